//! Buildlight CI Client
//!
//! A read-only HTTP client for the CI server consumed by buildlight.
//!
//! Resolving a session loads a pre-configured target (API URL, team, stored
//! token) from local state and binds an HTTP client to it. The session then
//! exposes the two listing calls the status light needs.
//!
//! # Example
//! ```no_run
//! use buildlight_client::Session;
//!
//! #[tokio::main]
//! async fn main() -> buildlight_client::Result<()> {
//!     let session = Session::resolve("ci")?;
//!     for pipeline in session.list_pipelines().await? {
//!         println!("{}", pipeline.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod target;
pub mod token;

pub use error::{ClientError, Result};
pub use target::{Target, TargetToken};
pub use token::TokenIssue;

use buildlight_core::domain::job::Job;
use buildlight_core::domain::pipeline::Pipeline;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// An authenticated handle onto one CI server target.
#[derive(Debug, Clone)]
pub struct Session {
    target: Target,
    client: Client,
}

impl Session {
    /// Resolve a named target from local configuration.
    pub fn resolve(name: &str) -> Result<Self> {
        let target = Target::load(name)?;
        target.validate()?;

        Ok(Self::with_target(target))
    }

    /// Build a session from an already-resolved target.
    pub fn with_target(target: Target) -> Self {
        Self {
            target,
            client: Client::new(),
        }
    }

    /// The resolved target this session is bound to.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Advisory check of the stored token. Never fatal to the run.
    pub fn validate_token(&self) -> std::result::Result<(), TokenIssue> {
        token::validate(self.target.token.as_ref())
    }

    /// List all pipelines visible to the target's team.
    pub async fn list_pipelines(&self) -> Result<Vec<Pipeline>> {
        let url = format!(
            "{}/api/v1/teams/{}/pipelines",
            self.target.api, self.target.team
        );
        debug!(%url, "listing pipelines");
        let response = self.authorized(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }

    /// List one pipeline's jobs, in the server's listing order.
    pub async fn list_jobs(&self, pipeline: &str) -> Result<Vec<Job>> {
        let url = format!(
            "{}/api/v1/teams/{}/pipelines/{}/jobs",
            self.target.api, self.target.team, pipeline
        );
        debug!(%url, "listing jobs");
        let response = self.authorized(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.target.token {
            Some(token) => request.header(
                reqwest::header::AUTHORIZATION,
                format!("{} {}", token.token_type, token.value),
            ),
            None => request,
        }
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("failed to parse JSON response: {}", e)))
    }
}
