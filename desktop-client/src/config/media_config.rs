use common::config::Validate;
use common::media::DEFAULT_CONCEPT;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct MediaConfig {
    pub enabled: bool,
    pub default_concept: String,
}

impl Validate for MediaConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_concept.trim().is_empty() {
            return Err("default_concept must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            default_concept: DEFAULT_CONCEPT.to_string(),
        }
    }
}
