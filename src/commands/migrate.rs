use std::path::Path;

use crate::commands::PrintSink;
use crate::error::Result;
use crate::migrations::{MigrationRunner, VersionRegistry};
use crate::output::Format;
use crate::store::lock::lock_project;
use crate::store::project::Project;

/// Migrate a project from `from`, or from the version its descriptor records.
pub fn run(project_root: &Path, from: Option<String>, format: Format) -> Result<()> {
    let project = Project::open(project_root)?;
    let _lock = lock_project(project.root())?;
    let version = match from {
        Some(version) => version,
        None => project.descriptor()?.studio_version,
    };

    let registry = VersionRegistry::builtin()?;
    let mut runner = MigrationRunner::new(&registry);
    let mut sink = PrintSink::new(format);
    let result = runner.run(project_root, &version, &mut sink);
    sink.finish()?;
    result.map(|_| ())
}
