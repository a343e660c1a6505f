use std::sync::{Mutex, PoisonError};

use image::RgbaImage;

use crate::log;
use super::generator::{AnimationVideo, MediaGenerator};
use super::prompts::{animation_prompt, theme_prompt};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiStatus {
    pub loading: bool,
    pub message: String,
    pub error: Option<String>,
}

/// Runs media requests one at a time and tracks their progress for the UI.
/// Failures are recorded and returned, never retried.
pub struct MediaStudio<G: MediaGenerator> {
    generator: G,
    status: Mutex<AiStatus>,
}

impl<G: MediaGenerator> MediaStudio<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            status: Mutex::new(AiStatus::default()),
        }
    }

    pub fn status(&self) -> AiStatus {
        self.status.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.status.lock().unwrap_or_else(PoisonError::into_inner).loading
    }

    /// Generates a background for `concept` and decodes it.
    pub async fn generate_theme(&self, concept: &str) -> Result<RgbaImage, String> {
        if concept.trim().is_empty() {
            return Err("Theme prompt is empty".to_string());
        }
        self.begin("Dreaming up your digital space...")?;
        log!("Requesting theme image for '{}'", concept.trim());

        let result = self
            .generator
            .generate_theme_image(theme_prompt(concept))
            .await
            .and_then(|image| {
                image::load_from_memory(&image.bytes)
                    .map(|decoded| decoded.to_rgba8())
                    .map_err(|e| format!("Generated image could not be decoded: {}", e))
            });

        self.finish(&result, "Theme synced!");
        result
    }

    /// Animates a captured frame. A blank concept uses the default one.
    pub async fn generate_animation(&self, concept: &str, start_frame_png: Vec<u8>) -> Result<AnimationVideo, String> {
        if start_frame_png.is_empty() {
            return Err("No frame was captured".to_string());
        }
        self.begin("Turning your run into video...")?;
        log!("Requesting animation ({} byte start frame)", start_frame_png.len());

        let result = self
            .generator
            .generate_animation(animation_prompt(concept), start_frame_png)
            .await;

        self.finish(&result, "Video decoded!");
        result
    }

    fn begin(&self, message: &str) -> Result<(), String> {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if status.loading {
            return Err("Another media request is still running".to_string());
        }
        *status = AiStatus {
            loading: true,
            message: message.to_string(),
            error: None,
        };
        Ok(())
    }

    fn finish<T>(&self, result: &Result<T, String>, success_message: &str) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        *status = match result {
            Ok(_) => {
                log!("Media request finished");
                AiStatus {
                    loading: false,
                    message: success_message.to_string(),
                    error: None,
                }
            }
            Err(e) => {
                log!("Media request failed: {}", e);
                AiStatus {
                    loading: false,
                    message: String::new(),
                    error: Some(e.clone()),
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ThemeImage;
    use image::Rgba;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeGenerator {
        calls: AtomicUsize,
        fail: bool,
        delay: Duration,
        last_prompt: Mutex<String>,
    }

    impl FakeGenerator {
        fn new(fail: bool, delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
                delay,
                last_prompt: Mutex::new(String::new()),
            }
        }
    }

    fn png() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    impl MediaGenerator for FakeGenerator {
        async fn generate_theme_image(&self, prompt: String) -> Result<ThemeImage, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt;
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err("quota exceeded".to_string());
            }
            Ok(ThemeImage {
                bytes: png(),
                mime_type: "image/png".to_string(),
            })
        }

        async fn generate_animation(&self, prompt: String, _start_frame_png: Vec<u8>) -> Result<AnimationVideo, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt;
            if self.fail {
                return Err("Requested entity was not found".to_string());
            }
            Ok(AnimationVideo {
                bytes: vec![0, 0, 0, 24],
                mime_type: "video/mp4".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_theme_success_updates_status() {
        let studio = MediaStudio::new(FakeGenerator::new(false, Duration::ZERO));

        let image = studio.generate_theme("neon jungle").await.unwrap();
        assert_eq!(image.dimensions(), (4, 4));

        let status = studio.status();
        assert!(!status.loading);
        assert_eq!(status.message, "Theme synced!");
        assert_eq!(status.error, None);
        assert!(studio.generator.last_prompt.lock().unwrap().ends_with("Prompt: neon jungle"));
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_without_calling_generator() {
        let studio = MediaStudio::new(FakeGenerator::new(false, Duration::ZERO));

        assert!(studio.generate_theme("   ").await.is_err());
        assert_eq!(studio.generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(studio.status(), AiStatus::default());
    }

    #[tokio::test]
    async fn test_failure_is_reported_once_and_not_retried() {
        let studio = MediaStudio::new(FakeGenerator::new(true, Duration::ZERO));

        let result = studio.generate_animation("", png()).await;
        assert_eq!(result, Err("Requested entity was not found".to_string()));
        assert_eq!(studio.generator.calls.load(Ordering::SeqCst), 1);

        let status = studio.status();
        assert!(!status.loading);
        assert_eq!(status.error.as_deref(), Some("Requested entity was not found"));
        assert!(studio.generator.last_prompt.lock().unwrap().contains("made of cyberpunk"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_request_is_rejected() {
        let studio = Arc::new(MediaStudio::new(FakeGenerator::new(false, Duration::from_secs(5))));

        let first = {
            let studio = Arc::clone(&studio);
            tokio::spawn(async move { studio.generate_theme("aurora").await })
        };
        tokio::task::yield_now().await;
        assert!(studio.is_loading());

        assert!(studio.generate_theme("storm").await.is_err());
        assert!(first.await.unwrap().is_ok());
        assert_eq!(studio.generator.calls.load(Ordering::SeqCst), 1);
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_missing_start_frame_is_rejected() {
        let studio = MediaStudio::new(FakeGenerator::new(false, Duration::ZERO));
        assert!(studio.generate_animation("ice", Vec::new()).await.is_err());
        assert_eq!(studio.generator.calls.load(Ordering::SeqCst), 0);
    }
}
