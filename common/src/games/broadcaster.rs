use std::future::Future;

use super::snake::{GameEvent, GameSnapshot};

/// Upward channel from the simulation to whoever hosts it.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_event(&self, event: GameEvent) -> impl Future<Output = ()> + Send;
}
