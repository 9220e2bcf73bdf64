//! The status-to-pattern compiler
//!
//! Pure mapping from pipeline/job listings to an ordered frame sequence.
//! Identical input always produces identical frames and diagnostics;
//! pipelines and jobs are traversed in listing order. Fetching happens
//! upstream, so a per-pipeline listing failure arrives here as data and
//! degrades to fewer visual signals instead of failing the run.

use chrono::DateTime;
use std::time::Duration;

use crate::diagnostics::Diagnostic;
use crate::domain::job::{BuildStatus, Job};
use crate::domain::pipeline::Pipeline;
use crate::pattern::{Frame, Pattern};

/// Delay after the full sequence, before any potential repeat.
const REPEAT_DELAY: Duration = Duration::from_millis(100);

/// Jobs fetched (or not) for one pipeline, in listing order.
#[derive(Debug, Clone)]
pub struct PipelineJobs {
    pub pipeline: Pipeline,
    pub listing: JobListing,
}

/// Outcome of fetching one pipeline's jobs.
#[derive(Debug, Clone)]
pub enum JobListing {
    Listed(Vec<Job>),
    Failed(String),
}

/// A compiled pattern together with the diagnostics recorded while
/// producing it, in emission order.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub pattern: Pattern,
    pub diagnostics: Vec<Diagnostic>,
}

/// The fixed "no pipelines configured" sequence: alternating amber/off.
pub fn no_pipelines_sequence() -> Vec<Frame> {
    vec![
        Frame::new(96, 64, 0, 100),
        Frame::off(100),
        Frame::new(96, 64, 0, 100),
        Frame::off(100),
        Frame::new(96, 64, 0, 100),
    ]
}

/// Compiles job statuses into LED frames, accumulating diagnostics.
#[derive(Debug, Default)]
pub struct Compiler {
    diagnostics: Vec<Diagnostic>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics recorded so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Top-level entry: compile a full pipeline listing into a playable
    /// pattern.
    pub fn compile(mut self, pipelines: &[PipelineJobs]) -> Compilation {
        let mut frames = Vec::new();

        if pipelines.is_empty() {
            self.diagnostics.push(Diagnostic::NoPipelines);
            frames.extend(no_pipelines_sequence());
        }

        frames.extend(self.compile_pipelines(pipelines));

        Compilation {
            pattern: Pattern {
                frames,
                repeat: 0,
                repeat_delay: REPEAT_DELAY,
            },
            diagnostics: self.diagnostics,
        }
    }

    /// Concatenate every pipeline's job frames in listing order.
    pub fn compile_pipelines(&mut self, pipelines: &[PipelineJobs]) -> Vec<Frame> {
        let mut frames = Vec::new();

        for entry in pipelines {
            match &entry.listing {
                JobListing::Listed(jobs) => {
                    for job in jobs {
                        frames.extend(self.compile_job(job));
                    }
                }
                JobListing::Failed(reason) => {
                    self.diagnostics.push(Diagnostic::JobsUnavailable {
                        pipeline: entry.pipeline.name.clone(),
                        reason: reason.clone(),
                    });
                }
            }
        }

        frames
    }

    /// Compile a single job into its frames.
    ///
    /// Paused is checked before build status and pre-empts it entirely.
    pub fn compile_job(&mut self, job: &Job) -> Vec<Frame> {
        if job.paused {
            self.diagnostics.push(Diagnostic::Paused {
                pipeline: job.pipeline_name.clone(),
                job: job.name.clone(),
            });
            return vec![Frame::new(0, 0, 128, 50)];
        }

        let Some(build) = &job.finished_build else {
            self.diagnostics.push(Diagnostic::NoFinishedBuilds {
                pipeline: job.pipeline_name.clone(),
                job: job.name.clone(),
            });
            return Vec::new();
        };

        let mut frames = match &build.status {
            BuildStatus::Started => vec![Frame::new(64, 64, 64, 50), Frame::off(20)],
            BuildStatus::Pending => vec![Frame::new(32, 32, 32, 50)],
            // no news are good news
            BuildStatus::Succeeded => return Vec::new(),
            BuildStatus::Failed => vec![Frame::new(128, 0, 0, 50)],
            BuildStatus::Errored => vec![Frame::new(128, 64, 0, 50)],
            BuildStatus::Aborted => vec![Frame::new(139, 87, 42, 50)],
            BuildStatus::Unknown(raw) => {
                self.diagnostics.push(Diagnostic::UnmappedStatus {
                    pipeline: job.pipeline_name.clone(),
                    job: job.name.clone(),
                    status: raw.clone(),
                });
                return Vec::new();
            }
        };

        self.diagnostics.push(Diagnostic::BuildReport {
            pipeline: job.pipeline_name.clone(),
            job: job.name.clone(),
            status: build.status.clone(),
            finished_at: build
                .end_time
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        });

        // spacer between consecutive job signals
        frames.push(Frame::off(50));

        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::Build;

    fn pipeline(name: &str) -> Pipeline {
        Pipeline {
            name: name.to_string(),
            paused: false,
            team_name: "main".to_string(),
        }
    }

    fn finished(status: BuildStatus) -> Option<Build> {
        Some(Build {
            id: 1,
            name: "1".to_string(),
            job_name: "unit".to_string(),
            status,
            end_time: Some(1_700_000_000),
        })
    }

    fn job(name: &str, status: BuildStatus) -> Job {
        Job {
            name: name.to_string(),
            pipeline_name: "main".to_string(),
            paused: false,
            finished_build: finished(status),
        }
    }

    fn listed(pipeline_name: &str, jobs: Vec<Job>) -> PipelineJobs {
        PipelineJobs {
            pipeline: pipeline(pipeline_name),
            listing: JobListing::Listed(jobs),
        }
    }

    #[test]
    fn test_paused_short_circuits_build_status() {
        let mut paused = job("unit", BuildStatus::Failed);
        paused.paused = true;

        let mut compiler = Compiler::new();
        let frames = compiler.compile_job(&paused);

        assert_eq!(frames, vec![Frame::new(0, 0, 128, 50)]);
        assert_eq!(compiler.diagnostics().len(), 1);
        assert!(matches!(
            compiler.diagnostics()[0],
            Diagnostic::Paused { .. }
        ));
    }

    #[test]
    fn test_succeeded_is_silent() {
        let mut compiler = Compiler::new();
        let frames = compiler.compile_job(&job("unit", BuildStatus::Succeeded));

        assert!(frames.is_empty());
        assert!(compiler.diagnostics().is_empty());
    }

    #[test]
    fn test_no_finished_builds_is_silent() {
        let mut never_ran = job("unit", BuildStatus::Failed);
        never_ran.finished_build = None;

        let mut compiler = Compiler::new();
        let frames = compiler.compile_job(&never_ran);

        assert!(frames.is_empty());
        assert!(matches!(
            compiler.diagnostics()[0],
            Diagnostic::NoFinishedBuilds { .. }
        ));
    }

    #[test]
    fn test_failed_frames() {
        let mut compiler = Compiler::new();
        let frames = compiler.compile_job(&job("unit", BuildStatus::Failed));

        assert_eq!(frames, vec![Frame::new(128, 0, 0, 50), Frame::off(50)]);
    }

    #[test]
    fn test_started_yields_three_frames() {
        let mut compiler = Compiler::new();
        let frames = compiler.compile_job(&job("unit", BuildStatus::Started));

        assert_eq!(
            frames,
            vec![Frame::new(64, 64, 64, 50), Frame::off(20), Frame::off(50)]
        );
    }

    #[test]
    fn test_spacer_follows_every_signal() {
        let signaling = [
            BuildStatus::Started,
            BuildStatus::Pending,
            BuildStatus::Failed,
            BuildStatus::Errored,
            BuildStatus::Aborted,
        ];

        for status in signaling {
            let mut compiler = Compiler::new();
            let frames = compiler.compile_job(&job("unit", status.clone()));
            assert_eq!(
                frames.last(),
                Some(&Frame::off(50)),
                "missing spacer for {status}"
            );
        }
    }

    #[test]
    fn test_signaling_statuses_record_build_report() {
        let mut compiler = Compiler::new();
        compiler.compile_job(&job("unit", BuildStatus::Errored));

        assert!(matches!(
            compiler.diagnostics()[0],
            Diagnostic::BuildReport {
                status: BuildStatus::Errored,
                finished_at: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unmapped_status_warns_and_is_silent() {
        let mut compiler = Compiler::new();
        let frames = compiler.compile_job(&job("unit", BuildStatus::Unknown("cancelled".into())));

        assert!(frames.is_empty());
        assert_eq!(compiler.diagnostics().len(), 1);
        match &compiler.diagnostics()[0] {
            Diagnostic::UnmappedStatus { status, .. } => assert_eq!(status, "cancelled"),
            other => panic!("unexpected diagnostic: {other:?}"),
        }
    }

    #[test]
    fn test_empty_listing_renders_no_pipelines_sequence() {
        let compilation = Compiler::new().compile(&[]);

        assert_eq!(compilation.pattern.frames, no_pipelines_sequence());
        assert_eq!(compilation.pattern.repeat, 0);
        assert_eq!(compilation.pattern.repeat_delay, Duration::from_millis(100));
        assert_eq!(compilation.diagnostics, vec![Diagnostic::NoPipelines]);
    }

    #[test]
    fn test_concatenation_order_is_stable() {
        let first = job("unit", BuildStatus::Failed);
        let second = job("integration", BuildStatus::Errored);

        let compilation = Compiler::new().compile(&[
            listed("p1", vec![first.clone()]),
            listed("p2", vec![second.clone()]),
        ]);

        let mut expected = Compiler::new().compile_job(&first);
        expected.extend(Compiler::new().compile_job(&second));
        assert_eq!(compilation.pattern.frames, expected);
    }

    #[test]
    fn test_failed_listing_contributes_no_frames() {
        let compilation = Compiler::new().compile(&[PipelineJobs {
            pipeline: pipeline("main"),
            listing: JobListing::Failed("connection refused".to_string()),
        }]);

        assert!(compilation.pattern.is_empty());
        assert_eq!(
            compilation.diagnostics,
            vec![Diagnostic::JobsUnavailable {
                pipeline: "main".to_string(),
                reason: "connection refused".to_string(),
            }]
        );
    }

    #[test]
    fn test_nonempty_listing_skips_no_pipelines_sequence() {
        let compilation = Compiler::new().compile(&[listed("main", Vec::new())]);

        assert!(compilation.pattern.is_empty());
        assert!(compilation.diagnostics.is_empty());
    }
}
