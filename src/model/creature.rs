use serde::{Deserialize, Serialize};

use crate::model::Extra;
use crate::store::project::{Entity, EntityFolder};
use crate::store::validate::Validate;

/// A creature species document (`Data/Studio/pokemon/<dbSymbol>.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    pub id: u32,
    pub db_symbol: String,
    pub forms: Vec<CreatureForm>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatureForm {
    pub form: u32,
    /// Percentage chance of a female individual. Negative values mark a
    /// genderless form. Kept as written so integer rates stay integers.
    pub female_rate: serde_json::Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceSet>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl CreatureForm {
    pub fn female_rate(&self) -> f64 {
        self.female_rate.as_f64().unwrap_or_default()
    }

    pub fn is_always_female(&self) -> bool {
        self.female_rate() == 100.0
    }
}

impl Validate for Creature {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.db_symbol.trim().is_empty() {
            return Err("dbSymbol must not be empty".into());
        }
        if self.forms.is_empty() {
            return Err("a creature needs at least one form".into());
        }
        for form in &self.forms {
            if form.female_rate() > 100.0 {
                return Err(format!(
                    "form {} has femaleRate {} above 100",
                    form.form, form.female_rate
                ));
            }
        }
        Ok(())
    }
}

impl Entity for Creature {
    const FOLDER: EntityFolder = EntityFolder::Creatures;

    fn db_symbol(&self) -> &str {
        &self.db_symbol
    }
}

/// Asset references of one creature form.
///
/// Every value is a file stem, except `cry` which keeps its audio extension.
/// An empty string is the explicit "no asset" placeholder. The female
/// variants are present exactly when `has_female` is true.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSet {
    pub has_female: bool,
    pub icon: String,
    pub icon_shiny: String,
    pub front: String,
    pub front_shiny: String,
    pub back: String,
    pub back_shiny: String,
    pub footprint: String,
    pub character: String,
    pub character_shiny: String,
    pub cry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_shiny_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_shiny_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_shiny_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_shiny_f: Option<String>,
}

impl ResourceSet {
    /// Built-in fallback used when nothing better can be inferred.
    pub fn fallback() -> Self {
        let stem = || "000".to_string();
        Self {
            has_female: false,
            icon: stem(),
            icon_shiny: stem(),
            front: stem(),
            front_shiny: stem(),
            back: stem(),
            back_shiny: stem(),
            footprint: stem(),
            character: stem(),
            character_shiny: stem(),
            cry: "000cry".into(),
            ..Self::default()
        }
    }

    fn female_fields(&self) -> [&Option<String>; 8] {
        [
            &self.icon_f,
            &self.icon_shiny_f,
            &self.front_f,
            &self.front_shiny_f,
            &self.back_f,
            &self.back_shiny_f,
            &self.character_f,
            &self.character_shiny_f,
        ]
    }
}

impl Validate for ResourceSet {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.has_female {
            if self.female_fields().iter().any(|field| field.is_none()) {
                return Err("hasFemale is set but a female variant is missing".into());
            }
        } else if self.female_fields().iter().any(|field| field.is_some()) {
            return Err("female variants are present but hasFemale is not set".into());
        }
        Ok(())
    }
}

/// Resource references under construction. `None` means "unset": for the
/// non-female fields that never survives validation, for the female fields
/// it means "no female variant".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialResources {
    pub icon: Option<String>,
    pub icon_shiny: Option<String>,
    pub front: Option<String>,
    pub front_shiny: Option<String>,
    pub back: Option<String>,
    pub back_shiny: Option<String>,
    pub footprint: Option<String>,
    pub character: Option<String>,
    pub character_shiny: Option<String>,
    pub cry: Option<String>,
    pub icon_f: Option<String>,
    pub icon_shiny_f: Option<String>,
    pub front_f: Option<String>,
    pub front_shiny_f: Option<String>,
    pub back_f: Option<String>,
    pub back_shiny_f: Option<String>,
    pub character_f: Option<String>,
    pub character_shiny_f: Option<String>,
}

impl PartialResources {
    /// True when any female variant points at an actual asset.
    pub fn has_female(&self) -> bool {
        [
            &self.back_f,
            &self.back_shiny_f,
            &self.character_f,
            &self.character_shiny_f,
            &self.front_f,
            &self.front_shiny_f,
            &self.icon_f,
            &self.icon_shiny_f,
        ]
        .iter()
        .any(|field| field.as_deref().is_some_and(|name| !name.is_empty()))
    }

    /// Fill each unset female variant from its non-empty counterpart.
    pub fn backfill_female(&mut self) {
        fn fill(female: &mut Option<String>, base: &Option<String>) {
            if let Some(base) = base.as_deref().filter(|name| !name.is_empty()) {
                female.get_or_insert_with(|| base.to_string());
            }
        }

        fill(&mut self.back_f, &self.back);
        fill(&mut self.back_shiny_f, &self.back_shiny);
        fill(&mut self.character_f, &self.character);
        fill(&mut self.character_shiny_f, &self.character_shiny);
        fill(&mut self.front_f, &self.front);
        fill(&mut self.front_shiny_f, &self.front_shiny);
        fill(&mut self.icon_f, &self.icon);
        fill(&mut self.icon_shiny_f, &self.icon_shiny);
    }

    /// Assemble a resource set with the given `hasFemale` flag. Female
    /// variants are dropped when the flag is off.
    pub fn assemble(&self, has_female: bool) -> std::result::Result<ResourceSet, String> {
        let required = |field: &Option<String>, name: &str| {
            field
                .clone()
                .ok_or_else(|| format!("resource '{name}' is missing"))
        };
        let female = |field: &Option<String>| if has_female { field.clone() } else { None };

        let set = ResourceSet {
            has_female,
            icon: required(&self.icon, "icon")?,
            icon_shiny: required(&self.icon_shiny, "iconShiny")?,
            front: required(&self.front, "front")?,
            front_shiny: required(&self.front_shiny, "frontShiny")?,
            back: required(&self.back, "back")?,
            back_shiny: required(&self.back_shiny, "backShiny")?,
            footprint: required(&self.footprint, "footprint")?,
            character: required(&self.character, "character")?,
            character_shiny: required(&self.character_shiny, "characterShiny")?,
            cry: required(&self.cry, "cry")?,
            icon_f: female(&self.icon_f),
            icon_shiny_f: female(&self.icon_shiny_f),
            front_f: female(&self.front_f),
            front_shiny_f: female(&self.front_shiny_f),
            back_f: female(&self.back_f),
            back_shiny_f: female(&self.back_shiny_f),
            character_f: female(&self.character_f),
            character_shiny_f: female(&self.character_shiny_f),
        };
        set.validate()?;
        Ok(set)
    }

    /// Overlay these values on the fallback set. A female variant that is
    /// still unset copies its base value, even an empty one, so the result
    /// always validates.
    pub fn over_fallback(&self) -> ResourceSet {
        let base = ResourceSet::fallback();
        let pick = |field: &Option<String>, default: &str| {
            field.clone().unwrap_or_else(|| default.to_string())
        };
        let paired = |field: &Option<String>, female: &Option<String>, default: &str| {
            let value = pick(field, default);
            let female = pick(female, &value);
            (value, Some(female))
        };

        let (icon, icon_f) = paired(&self.icon, &self.icon_f, &base.icon);
        let (icon_shiny, icon_shiny_f) =
            paired(&self.icon_shiny, &self.icon_shiny_f, &base.icon_shiny);
        let (front, front_f) = paired(&self.front, &self.front_f, &base.front);
        let (front_shiny, front_shiny_f) =
            paired(&self.front_shiny, &self.front_shiny_f, &base.front_shiny);
        let (back, back_f) = paired(&self.back, &self.back_f, &base.back);
        let (back_shiny, back_shiny_f) =
            paired(&self.back_shiny, &self.back_shiny_f, &base.back_shiny);
        let (character, character_f) =
            paired(&self.character, &self.character_f, &base.character);
        let (character_shiny, character_shiny_f) = paired(
            &self.character_shiny,
            &self.character_shiny_f,
            &base.character_shiny,
        );

        ResourceSet {
            has_female: true,
            icon,
            icon_shiny,
            front,
            front_shiny,
            back,
            back_shiny,
            footprint: pick(&self.footprint, &base.footprint),
            character,
            character_shiny,
            cry: pick(&self.cry, &base.cry),
            icon_f,
            icon_shiny_f,
            front_f,
            front_shiny_f,
            back_f,
            back_shiny_f,
            character_f,
            character_shiny_f,
        }
    }
}
