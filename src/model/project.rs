use serde::{Deserialize, Serialize};

use crate::model::Extra;
use crate::store::validate::Validate;

/// The `project.studio` descriptor at the project root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    /// Tool version that last wrote the project's data.
    pub studio_version: String,
    #[serde(default)]
    pub languages_translation: Vec<LanguageTranslation>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageTranslation {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

impl ProjectDescriptor {
    /// Declared language codes, in declaration order.
    pub fn language_codes(&self) -> Vec<String> {
        self.languages_translation
            .iter()
            .map(|language| language.code.clone())
            .collect()
    }
}

impl Validate for ProjectDescriptor {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(language) = self
            .languages_translation
            .iter()
            .find(|language| language.code.trim().is_empty())
        {
            return Err(format!("language '{}' has an empty code", language.name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_reads_languages_in_order() {
        let json = r#"{
            "studioVersion": "1.4.2",
            "title": "Demo",
            "languagesTranslation": [{"code": "en", "name": "English"}, {"code": "fr", "name": "French"}]
        }"#;
        let descriptor: ProjectDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.studio_version, "1.4.2");
        assert_eq!(descriptor.language_codes(), vec!["en", "fr"]);
        assert_eq!(descriptor.extra["title"], "Demo");
    }

    #[test]
    fn blank_language_code_is_invalid() {
        let json = r#"{"studioVersion": "1.0.0", "languagesTranslation": [{"code": " ", "name": "?"}]}"#;
        let descriptor: ProjectDescriptor = serde_json::from_str(json).unwrap();
        assert!(descriptor.validate().is_err());
    }
}
