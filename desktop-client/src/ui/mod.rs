mod app;
mod hud;
mod overlay;

pub use app::SnakeApp;
