use std::path::Path;

use crate::commands::PrintSink;
use crate::error::Result;
use crate::migrations::{MigrationRunner, VersionRegistry};
use crate::output::Format;
use crate::store::lock::lock_project;
use crate::store::project::Project;

/// Run a single registered step, outside any version's list.
pub fn run(project_root: &Path, step_id: &str, format: Format) -> Result<()> {
    let registry = VersionRegistry::builtin()?;
    let step = registry.step(step_id)?;

    let project = Project::open(project_root)?;
    let _lock = lock_project(project.root())?;
    let mut runner = MigrationRunner::new(&registry);
    let mut sink = PrintSink::new(format);
    let result = runner.run_steps(project_root, step.id, &[step], &mut sink);
    sink.finish()?;
    result.map(|_| ())
}
