use serde::{Deserialize, Serialize};

use crate::error::KeyboardError;

/// Settings for one keyboard instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyboardConfig {
    /// The two languages the shift+alt toggle alternates between.
    pub languages: [String; 2],
    /// Used when no preference is stored yet.
    pub default_language: String,
    /// Key the chosen language is persisted under.
    pub preference_key: String,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            languages: ["en".to_string(), "ru".to_string()],
            default_language: "en".to_string(),
            preference_key: "keyboardLanguage".to_string(),
        }
    }
}

impl KeyboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, KeyboardError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| KeyboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), KeyboardError> {
        if self.languages[0] == self.languages[1] {
            return Err(KeyboardError::Config(format!(
                "languages must differ, both are '{}'",
                self.languages[0]
            )));
        }
        if !self.supports(&self.default_language) {
            return Err(KeyboardError::Config(format!(
                "default language '{}' is not one of {:?}",
                self.default_language, self.languages
            )));
        }
        Ok(())
    }

    pub fn supports(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// The configured language that is not `language`.
    pub fn other_language(&self, language: &str) -> &str {
        if self.languages[0] == language {
            &self.languages[1]
        } else {
            &self.languages[0]
        }
    }
}
