mod command_sender;
mod config;
mod constants;
mod session;
mod state;
mod ui;

use std::sync::Arc;

use clap::Parser;
use common::media::{MediaStudio, UnconfiguredMediaGenerator};
use common::render::GameTheme;
use common::{PlayMode, log, logger};
use tokio::sync::mpsc;

use command_sender::CommandSender;
use config::{Config, get_config_manager};
use constants::{SIDE_PANEL_WIDTH, WINDOW_PADDING};
use session::local_game_task;
use state::SharedState;
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "phantom_snake")]
struct Args {
    /// Path to the YAML config file.
    #[arg(long)]
    config: Option<String>,
    /// Start with the pathfinder steering.
    #[arg(long)]
    autoplay: bool,
    /// Fixed seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = match get_config_manager(args.config.as_deref()).get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let mut settings = config.gameplay.to_session_settings();
    if args.autoplay {
        settings.initial_mode = PlayMode::Autonomous;
    }

    let theme = config.theme.to_theme().unwrap_or_else(|e| {
        log!("Failed to apply theme: {}", e);
        GameTheme::from_colors(&config.theme.snake_color, &config.theme.food_color).unwrap_or_default()
    });
    let canvas_size = config.theme.canvas_size;

    let shared_state = SharedState::new(theme);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let command_sender = CommandSender::new(command_tx);
    let studio = Arc::new(MediaStudio::new(UnconfiguredMediaGenerator));

    let shared_state_clone = shared_state.clone();
    let studio_clone = Arc::clone(&studio);
    let seed = args.seed;
    let runtime_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log!("Failed to start tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(local_game_task(
            shared_state_clone,
            command_rx,
            settings,
            seed,
            studio_clone,
            canvas_size,
        ));
    });

    let board_side = canvas_size as f32 + WINDOW_PADDING;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([board_side + SIDE_PANEL_WIDTH, board_side + 40.0])
            .with_title("Phantom Snake"),
        ..Default::default()
    };

    let media_enabled = config.media.enabled;
    let default_concept = config.media.default_concept.clone();
    eframe::run_native(
        "Phantom Snake",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SnakeApp::new(
                shared_state,
                command_sender,
                studio,
                canvas_size,
                media_enabled,
                default_concept,
            )))
        }),
    )?;

    if runtime_thread.join().is_err() {
        log!("Game thread panicked");
    }
    Ok(())
}
