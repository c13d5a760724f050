//! Keeps game-project data current as the editor's schema evolves: versioned
//! migration steps, creature resource inference, text-table language
//! alignment and first-time project configuration.

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod migrations;
pub mod model;
pub mod output;
pub mod store;
