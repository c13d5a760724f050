use std::fs;
use std::path::{Path, PathBuf};

use crate::bootstrap::{BootstrapInput, configure_project};
use crate::error::{Result, StudioError};
use crate::output::{self, Format};
use crate::store::lock::lock_project;

pub struct ConfigureArgs {
    pub project_data: PathBuf,
    pub language_config: PathBuf,
    pub title: String,
    pub icon: Option<PathBuf>,
    pub multi_language: bool,
}

pub fn run(project_root: &Path, args: ConfigureArgs, format: Format) -> Result<()> {
    let input = BootstrapInput {
        project_data: read_input(&args.project_data)?,
        language_config: read_input(&args.language_config)?,
        project_title: args.title,
        icon_path: args.icon,
        multi_language: args.multi_language,
    };

    let _lock = lock_project(project_root)?;
    let report = configure_project(project_root, &input)?;
    output::print_bootstrap(&report, format)
}

fn read_input(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(StudioError::MissingFile(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}
