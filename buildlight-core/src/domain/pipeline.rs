//! Pipeline domain types

use serde::{Deserialize, Serialize};

/// A named, ordered collection of jobs in the CI system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub team_name: String,
}
