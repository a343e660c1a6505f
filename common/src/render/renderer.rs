use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use tokio::time::Instant;

use super::canvas::Canvas;
use super::colors::{self, with_alpha};
use super::theme::GameTheme;
use crate::games::snake::{Direction, GameSnapshot, PlayMode, Point};

pub const DEFAULT_CANVAS_SIZE: u32 = 600;

const SCANLINE_PERIOD_MS: u64 = 2000;
const SCANLINE_HEIGHT: f32 = 2.0;
const AUTONOMOUS_BORDER_WIDTH: f32 = 4.0;
const SEGMENT_INSET: f32 = 2.0;
const FOOD_GLOW: f32 = 10.0;
const HEAD_GLOW: f32 = 12.0;

/// Everything one frame depends on. Two equal snapshots always render to
/// identical pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub grid_size: i32,
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub mode: PlayMode,
    pub flash: bool,
    pub timestamp_ms: u64,
}

impl FrameSnapshot {
    pub fn from_game(snapshot: &GameSnapshot, now: Instant, timestamp_ms: u64) -> Self {
        Self {
            grid_size: snapshot.grid_size,
            snake: snapshot.snake.clone(),
            food: snapshot.food,
            direction: snapshot.direction,
            mode: snapshot.mode,
            flash: snapshot.is_flashing(now),
            timestamp_ms,
        }
    }
}

pub fn render_frame(frame: &FrameSnapshot, theme: &GameTheme, canvas_size: u32) -> RgbaImage {
    let mut canvas = Canvas::new(canvas_size);
    let cell = canvas_size as f32 / frame.grid_size.max(1) as f32;
    let autonomous = frame.mode.is_autonomous();

    draw_board(&mut canvas, frame, theme, cell);

    if autonomous {
        let size = canvas_size as f32;
        canvas.stroke_rect(0.0, 0.0, size, size, AUTONOMOUS_BORDER_WIDTH, colors::AUTONOMOUS_ACCENT);
    }

    let scan_phase = (frame.timestamp_ms % SCANLINE_PERIOD_MS) as f32 / SCANLINE_PERIOD_MS as f32;
    canvas.fill_rect(
        0.0,
        scan_phase * canvas_size as f32,
        canvas_size as f32,
        SCANLINE_HEIGHT,
        colors::SCANLINE,
    );

    draw_food(&mut canvas, frame.food, theme.food_color, cell);

    let body_color = if autonomous {
        colors::AUTONOMOUS_ACCENT
    } else {
        theme.snake_color
    };
    // Tail first so the head is painted on top.
    for (index, &segment) in frame.snake.iter().enumerate().rev() {
        if index == 0 {
            draw_head(&mut canvas, frame, segment, body_color, cell);
        } else {
            let opacity = 1.0 - (index as f32 / frame.snake.len() as f32) * 0.6;
            let (x, y, w) = segment_rect(segment, cell);
            canvas.fill_rounded_rect(x, y, w, w, cell / 4.0, with_alpha(body_color, opacity));
        }
    }

    canvas.into_image()
}

/// Renders the frame and encodes it as PNG for the media collaborator.
pub fn capture_frame(frame: &FrameSnapshot, theme: &GameTheme, canvas_size: u32) -> Result<Vec<u8>, String> {
    let image = render_frame(frame, theme, canvas_size);
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| format!("Failed to encode frame: {}", e))?;
    Ok(bytes)
}

fn draw_board(canvas: &mut Canvas, frame: &FrameSnapshot, theme: &GameTheme, cell: f32) {
    if let Some(background) = &theme.background {
        canvas.draw_image(background);
        let overlay = if frame.flash {
            colors::BACKGROUND_FLASH
        } else {
            colors::BACKGROUND_DIM
        };
        let size = canvas.size() as f32;
        canvas.fill_rect(0.0, 0.0, size, size, overlay);
        return;
    }

    canvas.fill(if frame.flash {
        colors::FLASH_BACKGROUND
    } else {
        colors::BACKGROUND
    });

    let line = if frame.flash {
        colors::GRID_LINE_FLASH
    } else if frame.mode.is_autonomous() {
        colors::GRID_LINE_AUTONOMOUS
    } else {
        colors::GRID_LINE
    };
    let size = canvas.size() as f32;
    for i in 0..=frame.grid_size {
        let offset = (i as f32 * cell).min(size - 1.0);
        canvas.fill_rect(offset, 0.0, 1.0, size, line);
        canvas.fill_rect(0.0, offset, size, 1.0, line);
    }
}

fn draw_food(canvas: &mut Canvas, food: Point, color: Rgba<u8>, cell: f32) {
    let (cx, cy) = cell_center(food, cell);
    let radius = cell / 3.0;
    canvas.glow(cx, cy, radius, FOOD_GLOW, color);
    canvas.fill_circle(cx, cy, radius, color);
}

fn draw_head(canvas: &mut Canvas, frame: &FrameSnapshot, head: Point, glow: Rgba<u8>, cell: f32) {
    let (x, y, w) = segment_rect(head, cell);
    let (cx, cy) = cell_center(head, cell);

    canvas.glow(cx, cy, w / 2.0, HEAD_GLOW, glow);
    canvas.fill_rounded_rect(x, y, w, w, cell / 2.5, colors::HEAD);

    if frame.mode.is_autonomous() {
        let pulse = 1.0 + (frame.timestamp_ms as f32 / 100.0).sin() * 0.2;
        canvas.stroke_circle(cx, cy, cell / 2.0 * pulse, 1.0, colors::HEAD);
    }

    let eye = cell / 7.0;
    let offset = cell / 4.0;
    let near = offset;
    let far = w - offset - eye;
    let eyes = match frame.direction {
        Direction::Up => [(near, near), (far, near)],
        Direction::Down => [(near, far), (far, far)],
        Direction::Left => [(near, near), (near, far)],
        Direction::Right => [(far, near), (far, far)],
    };
    for (ex, ey) in eyes {
        canvas.fill_rect(x + ex, y + ey, eye, eye, colors::EYE);
    }
}

fn segment_rect(segment: Point, cell: f32) -> (f32, f32, f32) {
    (
        segment.x as f32 * cell + SEGMENT_INSET,
        segment.y as f32 * cell + SEGMENT_INSET,
        cell - 2.0 * SEGMENT_INSET,
    )
}

fn cell_center(point: Point, cell: f32) -> (f32, f32) {
    (
        point.x as f32 * cell + cell / 2.0,
        point.y as f32 * cell + cell / 2.0,
    )
}
