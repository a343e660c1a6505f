pub const DEFAULT_CONCEPT: &str = "cyberpunk";

pub fn theme_prompt(concept: &str) -> String {
    format!(
        "Generate a high-quality game background texture for a snake game. Style should be futuristic and clean. Prompt: {}",
        concept.trim()
    )
}

/// A blank concept falls back to [`DEFAULT_CONCEPT`].
pub fn animation_prompt(concept: &str) -> String {
    let concept = match concept.trim() {
        "" => DEFAULT_CONCEPT,
        trimmed => trimmed,
    };
    format!(
        "Highly technological fluid animation of a snake pulsing through a space made of {}, cinematic, with motion blur",
        concept
    )
}
