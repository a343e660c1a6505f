use super::types::CollisionKind;

/// Notifications raised by the engine for the hosting layer, which owns
/// high-score tracking and the episode lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    LifeLost {
        lives_remaining: u32,
        reason: CollisionKind,
    },
    ScoreUpdated {
        score: u32,
    },
    GameOver {
        final_score: u32,
    },
}
