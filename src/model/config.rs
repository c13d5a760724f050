use serde::{Deserialize, Serialize};

use crate::model::Extra;
use crate::store::validate::Validate;

/// `Data/configs/infos_config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InfoConfig {
    pub game_title: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `Data/configs/game_options_config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameOptionConfig {
    /// Option keys in the order the options menu lists them.
    pub order: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `Data/configs/scene_title_config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneTitleConfig {
    pub is_language_selection_enabled: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Validate for InfoConfig {}
impl Validate for GameOptionConfig {}
impl Validate for SceneTitleConfig {}
