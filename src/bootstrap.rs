//! Configure a freshly extracted project template.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{Result, StudioError};
use crate::migrations::{StepContext, Warning, map_mtime, sync_text};
use crate::model::{Extra, GameOptionConfig, InfoConfig, ProjectDescriptor, SceneTitleConfig};
use crate::store::project::{DESCRIPTOR_FILE, Project, read_required, write_json};
use crate::store::validate::safe_parse;

pub const LAUNCHER_FILE: &str = "psdk.bat";
pub const PROJECT_ICON_FILE: &str = "project_icon.png";
pub const DEFAULT_ICON: &str = "graphics/icons/game.png";
pub const INFOS_CONFIG: &str = "infos_config.json";
pub const GAME_OPTIONS_CONFIG: &str = "game_options_config.json";
pub const SCENE_TITLE_CONFIG: &str = "scene_title_config.json";
pub const LANGUAGE_CONFIG: &str = "language_config.json";

const LANGUAGE_OPTION: &str = "language";

const LAUNCHER_SCRIPT: &str = "@echo off\r\n\
cd /d \"%~dp0\"\r\n\
if not defined PSDK_BINARY_PATH set PSDK_BINARY_PATH=%~dp0psdk-binaries\\\r\n\
\"%PSDK_BINARY_PATH%ruby.exe\" --disable=gems,rubyopt,did_you_mean Game.rb %*\r\n";

#[derive(Debug, Clone)]
pub struct BootstrapInput {
    /// Raw JSON of the descriptor to install.
    pub project_data: String,
    /// Raw JSON written as the language config.
    pub language_config: String,
    pub project_title: String,
    pub icon_path: Option<PathBuf>,
    pub multi_language: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub kept_studio_version: Option<String>,
    pub text_files_updated: usize,
    pub maps_stamped: usize,
    pub warnings: Vec<Warning>,
}

/// Install the descriptor and derived configs into `project_dir`, then align
/// text tables and map timestamps. Steps run in order; a failure leaves the
/// earlier writes in place.
pub fn configure_project(project_dir: &Path, input: &BootstrapInput) -> Result<BootstrapReport> {
    let project = Project::at(project_dir);
    info!(project = %project_dir.display(), "configure-new-project");

    let kept_studio_version = write_descriptor(&project, &input.project_data)?;

    info!("writing launcher script");
    fs::write(project.path(LAUNCHER_FILE), LAUNCHER_SCRIPT)?;

    info!("updating icon");
    let icon = input
        .icon_path
        .clone()
        .unwrap_or_else(|| project.path(DEFAULT_ICON));
    fs::copy(&icon, project.path(PROJECT_ICON_FILE))?;

    info!("updating language config");
    let language_config = project.config_path(LANGUAGE_CONFIG);
    if let Some(parent) = language_config.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(language_config, &input.language_config)?;

    info!("updating infos config");
    update_infos_config(&project, &input.project_title)?;
    if !input.multi_language {
        info!("updating game options config");
        update_game_options_config(&project)?;
    }
    info!("updating scene title config");
    update_scene_title_config(&project, input.multi_language)?;

    let descriptor: ProjectDescriptor = safe_parse(&input.project_data, DESCRIPTOR_FILE)
        .map_err(|_| StudioError::InvalidDocument(DESCRIPTOR_FILE.to_string()))?;
    let mut warnings = Vec::new();

    info!("updating text files");
    let mut ctx = StepContext::new(&project, "configure-texts", &mut warnings);
    let text_files_updated =
        sync_text::sync_languages(&mut ctx, &descriptor.language_codes())?.len();

    info!("updating maps mtime");
    let mut ctx = StepContext::new(&project, "configure-maps", &mut warnings);
    let maps_stamped = map_mtime::stamp_maps(&mut ctx, Utc::now().timestamp_millis())?;

    Ok(BootstrapReport {
        kept_studio_version,
        text_files_updated,
        maps_stamped,
        warnings,
    })
}

/// Write the new descriptor. When a valid descriptor already exists its
/// `studioVersion` wins, since the template's data was written by that
/// version. Returns the kept version.
fn write_descriptor(project: &Project, project_data: &str) -> Result<Option<String>> {
    let path = project.descriptor_path();
    if path.is_file() {
        let existing = fs::read_to_string(&path)?;
        let existing = safe_parse::<ProjectDescriptor>(&existing, DESCRIPTOR_FILE);
        let incoming = safe_parse::<ProjectDescriptor>(project_data, DESCRIPTOR_FILE);
        if let (Ok(existing), Ok(_)) = (existing, incoming) {
            info!(studio_version = %existing.studio_version, "updating project descriptor");
            let mut document: Extra = serde_json::from_str(project_data)?;
            document.insert(
                "studioVersion".to_string(),
                Value::String(existing.studio_version.clone()),
            );
            write_json(&path, &document)?;
            return Ok(Some(existing.studio_version));
        }
    }

    info!("creating project descriptor");
    fs::write(&path, project_data)?;
    Ok(None)
}

fn update_infos_config(project: &Project, title: &str) -> Result<()> {
    let path = project.config_path(INFOS_CONFIG);
    let mut config: InfoConfig = read_required(&path, INFOS_CONFIG)?;
    config.game_title = title.to_string();
    write_json(&path, &config)
}

/// Single-language games drop the language entry from the options menu.
fn update_game_options_config(project: &Project) -> Result<()> {
    let path = project.config_path(GAME_OPTIONS_CONFIG);
    let mut config: GameOptionConfig = read_required(&path, GAME_OPTIONS_CONFIG)?;
    config.order.retain(|option| option != LANGUAGE_OPTION);
    write_json(&path, &config)
}

fn update_scene_title_config(project: &Project, multi_language: bool) -> Result<()> {
    let path = project.config_path(SCENE_TITLE_CONFIG);
    let mut config: SceneTitleConfig = read_required(&path, SCENE_TITLE_CONFIG)?;
    config.is_language_selection_enabled = multi_language;
    write_json(&path, &config)
}
