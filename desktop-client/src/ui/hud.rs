use common::{GameSnapshot, GameStatus, PlayMode};
use egui::{Color32, RichText, Ui};

use crate::state::Scoreboard;

const HEART_COLOR: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const AUTOPILOT_COLOR: Color32 = Color32::from_rgb(0xa8, 0x55, 0xf7);
const MANUAL_COLOR: Color32 = Color32::from_rgb(0x00, 0xff, 0xcc);

pub fn render_hud(ui: &mut Ui, snapshot: Option<&GameSnapshot>, scoreboard: &Scoreboard) {
    ui.horizontal(|ui| {
        let Some(snapshot) = snapshot else {
            ui.label("Connecting to session...");
            return;
        };

        ui.label(
            RichText::new("\u{2665}".repeat(snapshot.lives as usize))
                .color(HEART_COLOR)
                .size(20.0),
        );
        ui.separator();
        ui.label(RichText::new(format!("Score: {}", snapshot.score)).strong());
        ui.separator();
        ui.label(format!("Best: {}", scoreboard.high_score));
        ui.separator();

        let (mode_text, mode_color) = match snapshot.mode {
            PlayMode::Autonomous => ("AUTOPILOT", AUTOPILOT_COLOR),
            PlayMode::Manual => ("MANUAL", MANUAL_COLOR),
        };
        ui.label(RichText::new(mode_text).color(mode_color).strong());

        if snapshot.status == GameStatus::Paused {
            ui.separator();
            ui.label(RichText::new("PAUSED").color(Color32::YELLOW));
        }
    });
}
