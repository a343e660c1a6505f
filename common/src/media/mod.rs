mod generator;
mod prompts;
mod studio;

pub use generator::{AnimationVideo, MediaGenerator, ThemeImage, UnconfiguredMediaGenerator};
pub use prompts::{DEFAULT_CONCEPT, animation_prompt, theme_prompt};
pub use studio::{AiStatus, MediaStudio};
