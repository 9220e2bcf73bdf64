//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named unit of CI work.
///
/// The paused flag takes precedence over the finished build's status when
/// the job is compiled into frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub pipeline_name: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub finished_build: Option<Build>,
}

/// The last completed execution of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job_name: String,
    pub status: BuildStatus,
    /// Unix timestamp of completion, when the server reports one.
    #[serde(default)]
    pub end_time: Option<i64>,
}

/// Build execution status.
///
/// Unrecognized wire values are preserved in `Unknown` so diagnostics can
/// report the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    Started,
    Pending,
    Succeeded,
    Failed,
    Errored,
    Aborted,
    Unknown(String),
}

impl From<String> for BuildStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "started" => Self::Started,
            "pending" => Self::Pending,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            "errored" => Self::Errored,
            "aborted" => Self::Aborted,
            _ => Self::Unknown(value),
        }
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            Self::Started => "started",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Errored => "errored",
            Self::Aborted => "aborted",
            Self::Unknown(raw) => raw.as_str(),
        };
        f.write_str(raw)
    }
}
