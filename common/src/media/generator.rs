use std::future::Future;

/// Encoded image returned by a generator, typically PNG or JPEG.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationVideo {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AnimationVideo {
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "video/webm" => "webm",
            "video/quicktime" => "mov",
            _ => "mp4",
        }
    }
}

/// External image/video synthesis service. Calls are independent of the
/// simulation and may take arbitrarily long or fail.
pub trait MediaGenerator: Send + Sync + 'static {
    fn generate_theme_image(&self, prompt: String) -> impl Future<Output = Result<ThemeImage, String>> + Send;

    fn generate_animation(
        &self,
        prompt: String,
        start_frame_png: Vec<u8>,
    ) -> impl Future<Output = Result<AnimationVideo, String>> + Send;
}

/// Stand-in used when no generation backend is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredMediaGenerator;

const UNCONFIGURED: &str = "No media generation backend is configured";

impl MediaGenerator for UnconfiguredMediaGenerator {
    async fn generate_theme_image(&self, _prompt: String) -> Result<ThemeImage, String> {
        Err(UNCONFIGURED.to_string())
    }

    async fn generate_animation(&self, _prompt: String, _start_frame_png: Vec<u8>) -> Result<AnimationVideo, String> {
        Err(UNCONFIGURED.to_string())
    }
}
