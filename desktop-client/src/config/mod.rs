mod config;
mod gameplay_config;
mod media_config;
mod theme_config;

pub use config::{Config, get_config_manager};
pub use gameplay_config::GameplayConfig;
pub use media_config::MediaConfig;
pub use theme_config::ThemeConfig;
