//! Core domain types
//!
//! CI entities as returned by the server's REST API. Shared between the
//! client (deserialization) and the compiler (status dispatch).

pub mod job;
pub mod pipeline;
