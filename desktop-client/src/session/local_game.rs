use std::sync::Arc;

use common::games::snake::{SessionHandle, SnakeSessionSettings};
use common::log;
use common::media::{MediaGenerator, MediaStudio};
use tokio::sync::mpsc;

use crate::state::{ClientCommand, SharedState};

use super::LocalBroadcaster;

/// Hosts one snake session plus media requests until the window goes away.
/// Media work runs on its own tasks so the session keeps ticking meanwhile.
pub async fn local_game_task<G: MediaGenerator>(
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    settings: SnakeSessionSettings,
    seed: Option<u64>,
    studio: Arc<MediaStudio<G>>,
    canvas_size: u32,
) {
    let broadcaster = LocalBroadcaster::new(shared_state.clone());
    let session = SessionHandle::spawn(&settings, seed, broadcaster);

    while let Some(command) = command_rx.recv().await {
        match command {
            ClientCommand::Game(game_command) => {
                if let Err(e) = session.send(game_command) {
                    log!("Dropping {:?}: {}", game_command, e);
                    break;
                }
            }
            ClientCommand::GenerateTheme { concept } => {
                let studio = Arc::clone(&studio);
                let shared_state = shared_state.clone();
                tokio::spawn(async move {
                    match studio.generate_theme(&concept).await {
                        Ok(image) => shared_state.update_theme(|theme| {
                            *theme = theme.clone().with_background_image(image, canvas_size);
                        }),
                        Err(e) => shared_state.set_error(e),
                    }
                });
            }
            ClientCommand::Animate { concept, start_frame_png } => {
                let studio = Arc::clone(&studio);
                let shared_state = shared_state.clone();
                tokio::spawn(async move {
                    match studio.generate_animation(&concept, start_frame_png).await {
                        Ok(video) => {
                            log!("Received {} byte video", video.bytes.len());
                            shared_state.set_video(video);
                        }
                        Err(e) => shared_state.set_error(e),
                    }
                });
            }
            ClientCommand::Shutdown => break,
        }
    }

    if let Some(final_state) = session.join().await {
        log!("Session closed with score {}", final_state.score());
    }
}
