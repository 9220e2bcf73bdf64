//! Buildlight Core
//!
//! Core types and the pattern compiler for the buildlight status light.
//!
//! This crate contains:
//! - Domain types: CI entities as served by the server's REST API
//! - Pattern types: LED frames and the pattern wrapper played on the device
//! - Compiler: the pure status-to-pattern mapping with structured diagnostics

pub mod compile;
pub mod diagnostics;
pub mod domain;
pub mod pattern;
