use std::path::Path;

use serde::Serialize;
use tracing::{error, info};

use crate::error::Result;
use crate::migrations::{MigrationStep, StepContext, VersionRegistry, Warning};
use crate::store::project::Project;

/// Notifications emitted during a run. Progress is sent before each step
/// starts; exactly one `Success` or `Failure` ends the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MigrationEvent {
    Progress {
        step: usize,
        total: usize,
        description: String,
    },
    Success {
        warnings: Vec<Warning>,
    },
    Failure {
        message: String,
    },
}

/// Receiver of migration events. Closures taking `&MigrationEvent` work.
pub trait EventSink {
    fn emit(&mut self, event: &MigrationEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&MigrationEvent),
{
    fn emit(&mut self, event: &MigrationEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running { step_index: usize },
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub version: String,
    pub steps_run: Vec<String>,
    pub warnings: Vec<Warning>,
}

/// Runs a version's steps one after the other against a project.
///
/// There is no rollback: when a step fails, everything written so far (by
/// earlier steps and by the failing step itself) stays on disk.
pub struct MigrationRunner<'r> {
    registry: &'r VersionRegistry,
    state: RunState,
}

impl<'r> MigrationRunner<'r> {
    pub fn new(registry: &'r VersionRegistry) -> Self {
        Self {
            registry,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Migrate the project from its recorded `version`.
    pub fn run(
        &mut self,
        project_root: &Path,
        version: &str,
        sink: &mut dyn EventSink,
    ) -> Result<MigrationReport> {
        info!(version, "migrate-data");
        let steps = self.registry.steps_for(version);
        if steps.is_empty() {
            info!(version, "no data to migrate");
        } else {
            info!(version, count = steps.len(), "found migrations");
        }
        self.run_steps(project_root, version, steps, sink)
    }

    /// Execute an explicit step list with the same event and failure rules.
    pub fn run_steps(
        &mut self,
        project_root: &Path,
        label: &str,
        steps: &[&'static MigrationStep],
        sink: &mut dyn EventSink,
    ) -> Result<MigrationReport> {
        match self.execute(project_root, label, steps, sink) {
            Ok(report) => {
                self.state = RunState::Succeeded;
                info!(version = label, warnings = report.warnings.len(), "migration succeeded");
                sink.emit(&MigrationEvent::Success {
                    warnings: report.warnings.clone(),
                });
                Ok(report)
            }
            Err(err) => {
                self.state = RunState::Failed;
                error!(version = label, error = %err, "migration failed");
                sink.emit(&MigrationEvent::Failure {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn execute(
        &mut self,
        project_root: &Path,
        label: &str,
        steps: &[&'static MigrationStep],
        sink: &mut dyn EventSink,
    ) -> Result<MigrationReport> {
        let project = Project::open(project_root)?;
        let mut warnings = Vec::new();
        let mut steps_run = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            self.state = RunState::Running { step_index: index };
            sink.emit(&MigrationEvent::Progress {
                step: index + 1,
                total: steps.len(),
                description: step.description.to_string(),
            });
            info!(step = step.id, index = index + 1, total = steps.len(), "running step");

            let mut ctx = StepContext::new(&project, step.id, &mut warnings);
            (step.run)(&mut ctx)?;
            steps_run.push(step.id.to_string());
        }

        Ok(MigrationReport {
            version: label.to_string(),
            steps_run,
            warnings,
        })
    }
}
