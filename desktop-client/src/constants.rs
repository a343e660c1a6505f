pub const EVENT_LOG_SIZE: usize = 32;
pub const WINDOW_PADDING: f32 = 24.0;
pub const SIDE_PANEL_WIDTH: f32 = 280.0;
