//! Buildlight CLI
//!
//! One-pass CI status light: resolve a configured target, walk its
//! pipelines and jobs, compile the statuses into an LED pattern, and play
//! it once on the first attached blink(1).

mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use buildlight_client::Session;
use buildlight_core::compile::{Compilation, Compiler, JobListing, PipelineJobs};
use buildlight_device::Blink1;

use crate::output::print_diagnostics;

/// Render CI pipeline status on a blink(1) LED
#[derive(Parser)]
#[command(name = "buildlight")]
#[command(about = "Render CI pipeline status on a blink(1) LED", long_about = None)]
struct Cli {
    /// Configured target name
    #[arg(short, long, env = "BUILDLIGHT_TARGET")]
    target: String,

    /// Render only this pipeline
    #[arg(short, long, conflicts_with = "job")]
    pipeline: Option<String>,

    /// Render only this job, as PIPELINE/JOB
    #[arg(short, long)]
    job: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        println!("{}", format!("Error: {:#}", err).red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let session = Session::resolve(&cli.target)
        .with_context(|| format!("failed to resolve target '{}'", cli.target))?;

    if let Err(issue) = session.validate_token() {
        println!("{}", format!("Warning: {}.", issue).yellow());
    }

    let statuses = fetch_statuses(&session, &cli).await?;

    let Compilation {
        pattern,
        diagnostics,
    } = Compiler::new().compile(&statuses);

    print_diagnostics(&diagnostics);

    let mut device = Blink1::open_first().context("failed to open LED device")?;
    device.play(&pattern).context("failed to play pattern")?;

    Ok(())
}

/// Walk the target's pipelines sequentially and gather each one's jobs.
///
/// A failed job listing degrades that pipeline to a `Failed` entry; a
/// failed pipeline listing is fatal. The `--pipeline` and `--job` filters
/// are fatal when their subject does not exist.
async fn fetch_statuses(session: &Session, cli: &Cli) -> Result<Vec<PipelineJobs>> {
    let mut pipelines = session
        .list_pipelines()
        .await
        .context("failed to list pipelines")?;

    let job_filter = match &cli.job {
        Some(reference) => Some(parse_job_reference(reference)?),
        None => None,
    };

    let pipeline_filter = cli
        .pipeline
        .as_deref()
        .or(job_filter.as_ref().map(|(pipeline, _)| pipeline.as_str()));

    if let Some(wanted) = pipeline_filter {
        pipelines.retain(|p| p.name == wanted);
        if pipelines.is_empty() {
            bail!("pipeline '{}' not found", wanted);
        }
    }

    let mut statuses = Vec::with_capacity(pipelines.len());

    for pipeline in pipelines {
        let listing = match session.list_jobs(&pipeline.name).await {
            Ok(mut jobs) => {
                if let Some((_, job_name)) = &job_filter {
                    jobs.retain(|j| &j.name == job_name);
                    if jobs.is_empty() {
                        bail!("job '{}/{}' not found", pipeline.name, job_name);
                    }
                }
                JobListing::Listed(jobs)
            }
            Err(err) => JobListing::Failed(err.to_string()),
        };

        statuses.push(PipelineJobs { pipeline, listing });
    }

    Ok(statuses)
}

/// Split a PIPELINE/JOB reference.
fn parse_job_reference(reference: &str) -> Result<(String, String)> {
    match reference.split_once('/') {
        Some((pipeline, job)) if !pipeline.is_empty() && !job.is_empty() => {
            Ok((pipeline.to_string(), job.to_string()))
        }
        _ => bail!(
            "invalid job reference '{}': expected PIPELINE/JOB",
            reference
        ),
    }
}
