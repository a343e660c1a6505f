use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use common::games::snake::SessionCommand;
use common::media::{MediaGenerator, MediaStudio};
use common::render::{FrameSnapshot, capture_frame, render_frame};
use common::{Direction, GameSnapshot, GameStatus, PlayMode, log};
use egui::{Color32, Key, TextureOptions};
use image::RgbaImage;

use crate::command_sender::CommandSender;
use crate::constants::SIDE_PANEL_WIDTH;
use crate::state::{ClientCommand, SharedState};

use super::hud::render_hud;
use super::overlay::render_overlay;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub struct SnakeApp<G: MediaGenerator> {
    shared_state: SharedState,
    command_sender: CommandSender,
    studio: Arc<MediaStudio<G>>,
    canvas_size: u32,
    media_enabled: bool,
    concept_input: String,
    board_texture: Option<egui::TextureHandle>,
    started_at: Instant,
}

impl<G: MediaGenerator> SnakeApp<G> {
    pub fn new(
        shared_state: SharedState,
        command_sender: CommandSender,
        studio: Arc<MediaStudio<G>>,
        canvas_size: u32,
        media_enabled: bool,
        default_concept: String,
    ) -> Self {
        Self {
            shared_state,
            command_sender,
            studio,
            canvas_size,
            media_enabled,
            concept_input: default_concept,
            board_texture: None,
            started_at: Instant::now(),
        }
    }

    fn send_game(&self, command: SessionCommand) {
        self.command_sender.send(ClientCommand::Game(command));
    }

    fn frame_snapshot(&self, snapshot: &GameSnapshot) -> FrameSnapshot {
        FrameSnapshot::from_game(
            snapshot,
            tokio::time::Instant::now(),
            self.started_at.elapsed().as_millis() as u64,
        )
    }

    fn handle_input(&self, ctx: &egui::Context, snapshot: &GameSnapshot) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (direction, space, pause, toggle_mode) = ctx.input(|i| {
            let direction = if i.key_pressed(Key::ArrowUp) || i.key_pressed(Key::W) {
                Some(Direction::Up)
            } else if i.key_pressed(Key::ArrowDown) || i.key_pressed(Key::S) {
                Some(Direction::Down)
            } else if i.key_pressed(Key::ArrowLeft) || i.key_pressed(Key::A) {
                Some(Direction::Left)
            } else if i.key_pressed(Key::ArrowRight) || i.key_pressed(Key::D) {
                Some(Direction::Right)
            } else {
                None
            };
            (
                direction,
                i.key_pressed(Key::Space),
                i.key_pressed(Key::P) || i.key_pressed(Key::Escape),
                i.key_pressed(Key::Tab),
            )
        });

        if let Some(direction) = direction
            && snapshot.mode == PlayMode::Manual
        {
            self.send_game(SessionCommand::SetDirection(direction));
        }

        if space {
            match snapshot.status {
                GameStatus::Idle | GameStatus::GameOver => self.send_game(SessionCommand::StartGame),
                GameStatus::Playing | GameStatus::Paused => self.send_game(SessionCommand::TogglePause),
            }
        }
        if pause {
            self.send_game(SessionCommand::TogglePause);
        }
        if toggle_mode {
            self.send_game(SessionCommand::ToggleMode);
        }
    }

    fn render_board(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, snapshot: Option<&GameSnapshot>) {
        let Some(snapshot) = snapshot else {
            ui.centered_and_justified(|ui| {
                ui.label("Waiting for game state...");
            });
            return;
        };

        let frame = self.frame_snapshot(snapshot);
        let image: RgbaImage = render_frame(&frame, &self.shared_state.get_theme(), self.canvas_size);
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.width() as usize, image.height() as usize],
            image.as_raw(),
        );

        if let Some(texture) = &mut self.board_texture {
            texture.set(color_image, TextureOptions::LINEAR);
        } else {
            self.board_texture = Some(ctx.load_texture("board", color_image, TextureOptions::LINEAR));
        }
        let Some(texture) = &self.board_texture else {
            return;
        };

        let available = ui.available_size();
        let side = available.x.min(available.y).max(1.0);
        ui.vertical_centered(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
            ui.painter().image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        });
    }

    fn render_side_panel(&mut self, ui: &mut egui::Ui, snapshot: Option<&GameSnapshot>) {
        ui.heading("Controls");
        if let Some(snapshot) = snapshot {
            ui.horizontal(|ui| {
                let start_label = match snapshot.status {
                    GameStatus::Idle => "Start",
                    _ => "Restart",
                };
                if ui.button(start_label).clicked() {
                    self.send_game(SessionCommand::StartGame);
                }
                let pause_enabled = matches!(snapshot.status, GameStatus::Playing | GameStatus::Paused);
                let pause_label = if snapshot.status == GameStatus::Paused { "Resume" } else { "Pause" };
                if ui.add_enabled(pause_enabled, egui::Button::new(pause_label)).clicked() {
                    self.send_game(SessionCommand::TogglePause);
                }
            });

            let mut autopilot = snapshot.mode.is_autonomous();
            if ui.checkbox(&mut autopilot, "Autopilot (Tab)").changed() {
                let mode = if autopilot { PlayMode::Autonomous } else { PlayMode::Manual };
                self.send_game(SessionCommand::SetMode(mode));
            }
        }

        ui.separator();
        self.render_theme_controls(ui);

        ui.separator();
        self.render_media_controls(ui, snapshot);

        if let Some(error) = self.shared_state.get_error() {
            ui.separator();
            ui.colored_label(Color32::RED, error.as_str());
            if ui.small_button("Dismiss").clicked() {
                self.shared_state.clear_error();
            }
        }

        ui.separator();
        egui::CollapsingHeader::new("Event log")
            .default_open(true)
            .show(ui, |ui| {
                egui::ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                    let events = self.shared_state.get_event_log();
                    if events.is_empty() {
                        ui.weak("Nothing yet");
                    }
                    for event in events.iter().rev() {
                        ui.label(event.as_str());
                    }
                });
            });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Theme");
        ui.horizontal(|ui| {
            if ui.button("Load background...").clicked() {
                self.open_background_dialog();
            }
            let has_background = self.shared_state.get_theme().has_background();
            if ui.add_enabled(has_background, egui::Button::new("Clear")).clicked() {
                self.shared_state.update_theme(|theme| theme.clear_background());
            }
        });
    }

    fn render_media_controls(&mut self, ui: &mut egui::Ui, snapshot: Option<&GameSnapshot>) {
        ui.heading("AI studio");
        if !self.media_enabled {
            ui.weak("Media generation is disabled in the config file");
        }

        let status = self.studio.status();
        ui.add(egui::TextEdit::singleline(&mut self.concept_input).hint_text("e.g. neon jungle"));

        let can_request = self.media_enabled && !status.loading;
        ui.horizontal(|ui| {
            let theme_enabled = can_request && !self.concept_input.trim().is_empty();
            if ui.add_enabled(theme_enabled, egui::Button::new("Generate theme")).clicked() {
                self.command_sender.send(ClientCommand::GenerateTheme {
                    concept: self.concept_input.clone(),
                });
            }
            let animate_enabled = can_request && snapshot.is_some();
            if ui.add_enabled(animate_enabled, egui::Button::new("Capture & animate")).clicked()
                && let Some(snapshot) = snapshot
            {
                self.request_animation(snapshot);
            }
        });

        if status.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(status.message.as_str());
            });
        } else if let Some(error) = &status.error {
            ui.colored_label(Color32::RED, error.as_str());
        } else if !status.message.is_empty() {
            ui.colored_label(Color32::GREEN, status.message.as_str());
        }

        ui.horizontal(|ui| {
            if let Some(snapshot) = snapshot
                && ui.button("Save frame...").clicked()
            {
                self.save_frame(snapshot);
            }
            if self.shared_state.get_video().is_some() && ui.button("Save video...").clicked() {
                self.save_video();
            }
        });
    }

    fn request_animation(&self, snapshot: &GameSnapshot) {
        let frame = self.frame_snapshot(snapshot);
        match capture_frame(&frame, &self.shared_state.get_theme(), self.canvas_size) {
            Ok(start_frame_png) => self.command_sender.send(ClientCommand::Animate {
                concept: self.concept_input.clone(),
                start_frame_png,
            }),
            Err(e) => self.shared_state.set_error(e),
        }
    }

    fn open_background_dialog(&self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        if let Err(e) = self.load_background(&path) {
            log!("{}", e);
            self.shared_state.set_error(e);
        }
    }

    fn load_background(&self, path: &Path) -> Result<(), String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let theme = self
            .shared_state
            .get_theme()
            .with_background_bytes(&bytes, self.canvas_size)?;
        self.shared_state.update_theme(|current| *current = theme);
        log!("Loaded background from {}", path.display());
        Ok(())
    }

    fn save_frame(&self, snapshot: &GameSnapshot) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("phantom_snake_frame.png")
            .save_file()
        else {
            return;
        };

        let frame = self.frame_snapshot(snapshot);
        let result = capture_frame(&frame, &self.shared_state.get_theme(), self.canvas_size)
            .and_then(|bytes| {
                std::fs::write(&path, bytes)
                    .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
            });
        match result {
            Ok(()) => log!("Frame saved to {}", path.display()),
            Err(e) => self.shared_state.set_error(e),
        }
    }

    fn save_video(&self) {
        let Some(video) = self.shared_state.get_video() else {
            return;
        };
        let extension = video.file_extension();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Video", &[extension])
            .set_file_name(format!("phantom_snake.{}", extension))
            .save_file()
        else {
            return;
        };

        match std::fs::write(&path, &video.bytes) {
            Ok(()) => log!("Video saved to {}", path.display()),
            Err(e) => self
                .shared_state
                .set_error(format!("Failed to write {}: {}", path.display(), e)),
        }
    }
}

impl<G: MediaGenerator> eframe::App for SnakeApp<G> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.command_sender.send(ClientCommand::Shutdown);
        }

        let snapshot = self.shared_state.get_snapshot();
        if let Some(snapshot) = &snapshot {
            self.handle_input(ctx, snapshot);
        }
        let scoreboard = self.shared_state.get_scoreboard();

        egui::TopBottomPanel::top("hud").show(ctx, |ui| {
            render_hud(ui, snapshot.as_ref(), &scoreboard);
        });

        egui::SidePanel::right("side_panel")
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                self.render_side_panel(ui, snapshot.as_ref());
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                self.render_board(ui, ctx, snapshot.as_ref());
            });

        if let Some(snapshot) = &snapshot {
            render_overlay(ctx, snapshot, &scoreboard, &self.command_sender);
        }

        // Frames only need to keep coming while something animates.
        let playing = snapshot
            .as_ref()
            .is_some_and(|s| s.status == GameStatus::Playing);
        if playing || self.studio.is_loading() {
            ctx.request_repaint();
        }
    }
}

impl<G: MediaGenerator> Drop for SnakeApp<G> {
    fn drop(&mut self) {
        self.command_sender.send(ClientCommand::Shutdown);
    }
}
