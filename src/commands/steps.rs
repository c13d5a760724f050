use crate::error::Result;
use crate::migrations::VersionRegistry;
use crate::output::{self, Format};

pub fn run(version: &str, format: Format) -> Result<()> {
    let registry = VersionRegistry::builtin()?;
    output::print_steps(version, registry.steps_for(version), format)
}
