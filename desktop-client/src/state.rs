use std::sync::{Arc, Mutex};

use common::games::snake::{CollisionKind, SessionCommand};
use common::media::AnimationVideo;
use common::render::GameTheme;
use common::{GameEvent, GameSnapshot};
use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::constants::EVENT_LOG_SIZE;

#[derive(Debug, Clone)]
pub enum ClientCommand {
    Game(SessionCommand),
    GenerateTheme { concept: String },
    Animate { concept: String, start_frame_png: Vec<u8> },
    Shutdown,
}

/// Episode bookkeeping the engine leaves to its host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    pub high_score: u32,
    pub last_final_score: Option<u32>,
}

struct ClientState {
    snapshot: Option<GameSnapshot>,
    scoreboard: Scoreboard,
    event_log: AllocRingBuffer<String>,
    theme: GameTheme,
    video: Option<AnimationVideo>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct SharedState {
    inner: Arc<Mutex<ClientState>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new(theme: GameTheme) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClientState {
                snapshot: None,
                scoreboard: Scoreboard::default(),
                event_log: AllocRingBuffer::new(EVENT_LOG_SIZE),
                theme,
                video: None,
                error: None,
            })),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *self.context.lock().unwrap() = Some(ctx);
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().unwrap().is_some()
    }

    fn request_repaint(&self) {
        if let Some(ctx) = self.context.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }

    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        self.inner.lock().unwrap().snapshot = Some(snapshot);
        self.request_repaint();
    }

    pub fn get_snapshot(&self) -> Option<GameSnapshot> {
        self.inner.lock().unwrap().snapshot.clone()
    }

    pub fn record_event(&self, event: GameEvent) {
        {
            let mut state = self.inner.lock().unwrap();
            match event {
                GameEvent::ScoreUpdated { score } if score > state.scoreboard.high_score => {
                    state.scoreboard.high_score = score;
                }
                GameEvent::GameStarted => {
                    state.scoreboard.last_final_score = None;
                }
                GameEvent::GameOver { final_score } => {
                    state.scoreboard.last_final_score = Some(final_score);
                }
                _ => {}
            }
            state.event_log.enqueue(describe_event(event));
        }
        self.request_repaint();
    }

    pub fn get_scoreboard(&self) -> Scoreboard {
        self.inner.lock().unwrap().scoreboard.clone()
    }

    pub fn get_event_log(&self) -> Vec<String> {
        self.inner.lock().unwrap().event_log.to_vec()
    }

    pub fn get_theme(&self) -> GameTheme {
        self.inner.lock().unwrap().theme.clone()
    }

    pub fn update_theme(&self, update: impl FnOnce(&mut GameTheme)) {
        update(&mut self.inner.lock().unwrap().theme);
        self.request_repaint();
    }

    pub fn set_video(&self, video: AnimationVideo) {
        self.inner.lock().unwrap().video = Some(video);
        self.request_repaint();
    }

    pub fn get_video(&self) -> Option<AnimationVideo> {
        self.inner.lock().unwrap().video.clone()
    }

    pub fn set_error(&self, error: String) {
        self.inner.lock().unwrap().error = Some(error);
        self.request_repaint();
    }

    pub fn get_error(&self) -> Option<String> {
        self.inner.lock().unwrap().error.clone()
    }

    pub fn clear_error(&self) {
        self.inner.lock().unwrap().error = None;
    }
}

fn describe_event(event: GameEvent) -> String {
    match event {
        GameEvent::GameStarted => "New run started".to_string(),
        GameEvent::LifeLost { lives_remaining, reason } => {
            let cause = match reason {
                CollisionKind::Wall => "hit the wall",
                CollisionKind::SelfCollision => "bit itself",
            };
            format!("Snake {}, {} lives left", cause, lives_remaining)
        }
        GameEvent::ScoreUpdated { score } => format!("Score: {}", score),
        GameEvent::GameOver { final_score } => format!("Game over with {} points", final_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_only_rises() {
        let state = SharedState::new(GameTheme::default());
        state.record_event(GameEvent::ScoreUpdated { score: 40 });
        state.record_event(GameEvent::GameOver { final_score: 40 });
        state.record_event(GameEvent::GameStarted);
        state.record_event(GameEvent::ScoreUpdated { score: 20 });

        let scoreboard = state.get_scoreboard();
        assert_eq!(scoreboard.high_score, 40);
        assert_eq!(scoreboard.last_final_score, None);
    }

    #[test]
    fn test_event_log_keeps_latest_entries() {
        let state = SharedState::new(GameTheme::default());
        for score in 0..(EVENT_LOG_SIZE as u32 + 5) {
            state.record_event(GameEvent::ScoreUpdated { score });
        }

        let log = state.get_event_log();
        assert_eq!(log.len(), EVENT_LOG_SIZE);
        assert_eq!(log.first().map(String::as_str), Some("Score: 5"));
        assert_eq!(log.last(), Some(&format!("Score: {}", EVENT_LOG_SIZE + 4)));
    }

    #[test]
    fn test_life_lost_is_described() {
        let text = describe_event(GameEvent::LifeLost {
            lives_remaining: 2,
            reason: CollisionKind::Wall,
        });
        assert_eq!(text, "Snake hit the wall, 2 lives left");
    }

    #[test]
    fn test_updates_after_context_is_attached() {
        let state = SharedState::new(GameTheme::default());
        assert!(!state.has_context());

        state.set_context(egui::Context::default());
        state.record_event(GameEvent::ScoreUpdated { score: 20 });

        assert!(state.has_context());
        assert_eq!(state.get_scoreboard().high_score, 20);
    }
}
