use common::games::snake::SessionCommand;
use common::{GameSnapshot, GameStatus};
use egui::{Align2, Color32, RichText};

use crate::command_sender::CommandSender;
use crate::state::{ClientCommand, Scoreboard};

/// Centered card shown over the board whenever the game is not running.
pub fn render_overlay(
    ctx: &egui::Context,
    snapshot: &GameSnapshot,
    scoreboard: &Scoreboard,
    command_sender: &CommandSender,
) {
    if snapshot.status == GameStatus::Playing {
        return;
    }

    egui::Area::new(egui::Id::new("board_overlay"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.vertical_centered(|ui| match snapshot.status {
                    GameStatus::Idle => {
                        ui.heading("PHANTOM SNAKE");
                        ui.label("Arrows or WASD steer, Tab toggles autopilot");
                        ui.add_space(8.0);
                        if ui.button("Start (Space)").clicked() {
                            command_sender.send(ClientCommand::Game(SessionCommand::StartGame));
                        }
                    }
                    GameStatus::Paused => {
                        ui.heading("Paused");
                        if ui.button("Resume (P)").clicked() {
                            command_sender.send(ClientCommand::Game(SessionCommand::Resume));
                        }
                    }
                    GameStatus::GameOver => {
                        ui.heading(RichText::new("GAME OVER").color(Color32::RED));
                        let final_score = scoreboard.last_final_score.unwrap_or(snapshot.score);
                        ui.label(format!("Final score: {}", final_score));
                        ui.label(format!("Session best: {}", scoreboard.high_score));
                        ui.add_space(8.0);
                        if ui.button("Play again (Space)").clicked() {
                            command_sender.send(ClientCommand::Game(SessionCommand::StartGame));
                        }
                    }
                    GameStatus::Playing => {}
                });
            });
        });
}
