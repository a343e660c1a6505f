use std::sync::Arc;

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use super::colors::parse_hex_color;

pub const DEFAULT_SNAKE_COLOR: Rgba<u8> = Rgba([0x00, 0xff, 0xcc, 0xff]);
pub const DEFAULT_FOOD_COLOR: Rgba<u8> = Rgba([0xff, 0x00, 0x77, 0xff]);

/// Visual parameters for the renderer. The background is decoded and scaled
/// to the canvas once so rendering never touches encoded bytes.
#[derive(Clone, Debug)]
pub struct GameTheme {
    pub background: Option<Arc<RgbaImage>>,
    pub snake_color: Rgba<u8>,
    pub food_color: Rgba<u8>,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            background: None,
            snake_color: DEFAULT_SNAKE_COLOR,
            food_color: DEFAULT_FOOD_COLOR,
        }
    }
}

impl GameTheme {
    pub fn from_colors(snake_color: &str, food_color: &str) -> Result<Self, String> {
        Ok(Self {
            background: None,
            snake_color: parse_hex_color(snake_color)?,
            food_color: parse_hex_color(food_color)?,
        })
    }

    pub fn with_background_bytes(mut self, bytes: &[u8], canvas_size: u32) -> Result<Self, String> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode background image: {}", e))?;
        let resized = decoded
            .resize_exact(canvas_size, canvas_size, FilterType::Triangle)
            .to_rgba8();
        self.background = Some(Arc::new(resized));
        Ok(self)
    }

    pub fn with_background_image(mut self, image: RgbaImage, canvas_size: u32) -> Self {
        let image = if image.width() == canvas_size && image.height() == canvas_size {
            image
        } else {
            image::imageops::resize(&image, canvas_size, canvas_size, FilterType::Triangle)
        };
        self.background = Some(Arc::new(image));
        self
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }
}
