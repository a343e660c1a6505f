mod canvas;
mod colors;
mod renderer;
mod theme;

pub use canvas::Canvas;
pub use colors::parse_hex_color;
pub use renderer::{DEFAULT_CANVAS_SIZE, FrameSnapshot, capture_frame, render_frame};
pub use theme::GameTheme;
