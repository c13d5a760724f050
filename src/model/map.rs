use serde::{Deserialize, Serialize};

use crate::model::Extra;
use crate::store::project::{Entity, EntityFolder};
use crate::store::validate::Validate;

/// A map document (`Data/Studio/maps/<dbSymbol>.json`). Only the fields this
/// subsystem touches are typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudioMap {
    pub db_symbol: String,
    /// Last modification, in milliseconds since the Unix epoch. Maps written
    /// before the field existed read as 0.
    #[serde(default)]
    pub mtime: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Validate for StudioMap {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.db_symbol.trim().is_empty() {
            return Err("dbSymbol must not be empty".into());
        }
        Ok(())
    }
}

impl Entity for StudioMap {
    const FOLDER: EntityFolder = EntityFolder::Maps;

    fn db_symbol(&self) -> &str {
        &self.db_symbol
    }
}
