//! Compiler diagnostics
//!
//! Events the compiler records instead of printing, surfaced to the caller
//! in emission order.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::job::BuildStatus;

/// How the caller should treat a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// A single structured event recorded during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The pipeline listing was empty.
    NoPipelines,
    /// A pipeline's job listing could not be fetched; the pipeline
    /// contributes no frames.
    JobsUnavailable { pipeline: String, reason: String },
    /// A paused job.
    Paused { pipeline: String, job: String },
    /// A job that has never finished a build.
    NoFinishedBuilds { pipeline: String, job: String },
    /// A finished build whose status has no color mapping.
    UnmappedStatus {
        pipeline: String,
        job: String,
        status: String,
    },
    /// Per-job status line for a non-succeeded finished build.
    BuildReport {
        pipeline: String,
        job: String,
        status: BuildStatus,
        finished_at: Option<DateTime<Utc>>,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NoPipelines | Self::JobsUnavailable { .. } | Self::UnmappedStatus { .. } => {
                Severity::Warning
            }
            Self::Paused { .. } | Self::NoFinishedBuilds { .. } | Self::BuildReport { .. } => {
                Severity::Info
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPipelines => write!(f, "no pipelines found"),
            Self::JobsUnavailable { pipeline, reason } => {
                write!(f, "could not list jobs for pipeline {}: {}", pipeline, reason)
            }
            Self::Paused { pipeline, job } => write!(f, "{}/{}: paused", pipeline, job),
            Self::NoFinishedBuilds { pipeline, job } => {
                write!(f, "{}/{}: no finished builds", pipeline, job)
            }
            Self::UnmappedStatus {
                pipeline,
                job,
                status,
            } => {
                write!(
                    f,
                    "{}/{}: status '{}' has no color mapping",
                    pipeline, job, status
                )
            }
            Self::BuildReport {
                pipeline,
                job,
                status,
                finished_at,
            } => match finished_at {
                Some(at) => write!(f, "{}/{}: {} since {}", pipeline, job, status, at.to_rfc3339()),
                None => write!(f, "{}/{}: {}", pipeline, job, status),
            },
        }
    }
}
