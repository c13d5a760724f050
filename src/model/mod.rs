pub mod config;
pub mod creature;
pub mod map;
pub mod project;

pub use config::{GameOptionConfig, InfoConfig, SceneTitleConfig};
pub use creature::{Creature, CreatureForm, PartialResources, ResourceSet};
pub use map::StudioMap;
pub use project::{LanguageTranslation, ProjectDescriptor};

/// Fields of a document that this subsystem does not interpret. Kept so a
/// rewrite never drops data.
pub type Extra = serde_json::Map<String, serde_json::Value>;
