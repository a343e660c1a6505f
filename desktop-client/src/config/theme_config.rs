use common::config::{Validate, validate_range};
use common::render::{GameTheme, parse_hex_color};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ThemeConfig {
    pub snake_color: String,
    pub food_color: String,
    pub canvas_size: u32,
    #[serde(default)]
    pub background_path: Option<String>,
}

impl ThemeConfig {
    /// Builds the theme, loading the background from disk if one is set.
    pub fn to_theme(&self) -> Result<GameTheme, String> {
        let theme = GameTheme::from_colors(&self.snake_color, &self.food_color)?;
        match &self.background_path {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .map_err(|e| format!("Failed to read background '{}': {}", path, e))?;
                theme.with_background_bytes(&bytes, self.canvas_size)
            }
            None => Ok(theme),
        }
    }
}

impl Validate for ThemeConfig {
    fn validate(&self) -> Result<(), String> {
        parse_hex_color(&self.snake_color)?;
        parse_hex_color(&self.food_color)?;
        validate_range("canvas_size", self.canvas_size, 220..=1200)?;
        if let Some(path) = &self.background_path
            && path.is_empty()
        {
            return Err("background_path must not be empty if provided".to_string());
        }
        Ok(())
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            snake_color: "#00ffcc".to_string(),
            food_color: "#ff0077".to_string(),
            canvas_size: common::render::DEFAULT_CANVAS_SIZE,
            background_path: None,
        }
    }
}
