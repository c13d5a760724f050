//! Versioned rewrites of a project's on-disk data.
//!
//! A [`MigrationStep`] pairs the operation with its user-facing description,
//! so a version's step list can never disagree with its progress texts. Steps
//! must be idempotent: several historical versions share the same steps and
//! a project may go through a step more than once.

pub mod link_resources;
pub mod map_mtime;
pub mod registry;
pub mod runner;
pub mod sync_text;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::store::project::Project;

pub use registry::{RegistryBuilder, VersionEntry, VersionRegistry};
pub use runner::{EventSink, MigrationEvent, MigrationReport, MigrationRunner, RunState};

pub type StepFn = fn(&mut StepContext<'_>) -> Result<()>;

pub struct MigrationStep {
    /// Stable identifier, usable from the command line.
    pub id: &'static str,
    pub description: &'static str,
    pub run: StepFn,
}

impl std::fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationStep")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish()
    }
}

pub static LINK_RESOURCES: MigrationStep = MigrationStep {
    id: "link-resources",
    description: "Link the resources to the creatures",
    run: link_resources::run,
};

pub static SYNC_TEXT_LANGUAGES: MigrationStep = MigrationStep {
    id: "sync-text-languages",
    description: "Add missing language columns to the text files",
    run: sync_text::run,
};

pub static STAMP_MAPS: MigrationStep = MigrationStep {
    id: "stamp-maps",
    description: "Mark every map as modified",
    run: map_mtime::run,
};

/// A file a step chose to skip instead of failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub step: String,
    pub path: PathBuf,
    pub reason: String,
}

/// What a running step may touch: the project, and the run's warning log.
pub struct StepContext<'a> {
    project: &'a Project,
    step: &'static str,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> StepContext<'a> {
    pub fn new(project: &'a Project, step: &'static str, warnings: &'a mut Vec<Warning>) -> Self {
        Self {
            project,
            step,
            warnings,
        }
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn step(&self) -> &'static str {
        self.step
    }

    /// Record a skipped file.
    pub fn skip(&mut self, path: &Path, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(step = self.step, path = %path.display(), %reason, "skipping file");
        self.warnings.push(Warning {
            step: self.step.to_string(),
            path: path.to_path_buf(),
            reason,
        });
    }
}
