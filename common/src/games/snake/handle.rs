use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::log;
use crate::games::{GameBroadcaster, SessionRng};
use super::game_state::SnakeGameState;
use super::session::{SessionCommand, SnakeSession};
use super::settings::SnakeSessionSettings;

/// Owner of a running session task. Stopping is idempotent and also happens
/// on drop, so no ticker outlives the view that created it.
pub struct SessionHandle {
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<SnakeGameState>>,
}

impl SessionHandle {
    /// Spawns the session on the current tokio runtime.
    pub fn spawn(
        settings: &SnakeSessionSettings,
        seed: Option<u64>,
        broadcaster: impl GameBroadcaster,
    ) -> Self {
        let mut rng = SessionRng::from_optional_seed(seed);
        let state = SnakeGameState::new(settings, &mut rng);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let join_handle = tokio::spawn(SnakeSession::run(
            state,
            rng,
            settings.tick_intervals,
            command_rx,
            shutdown_rx,
            broadcaster,
        ));

        Self {
            command_tx,
            shutdown_tx: Some(shutdown_tx),
            join_handle: Some(join_handle),
        }
    }

    pub fn send(&self, command: SessionCommand) -> Result<(), String> {
        self.command_tx
            .send(command)
            .map_err(|_| "Session is no longer running".to_string())
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
            && self
                .join_handle
                .as_ref()
                .is_some_and(|handle| !handle.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            log!("Stopping session");
            let _ = shutdown_tx.send(());
        }
    }

    /// Stops the session and waits for the final state.
    pub async fn join(mut self) -> Option<SnakeGameState> {
        self.stop();
        let handle = self.join_handle.take()?;
        handle.await.ok()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::games::snake::{Direction, GameEvent, GameSnapshot, GameStatus, PlayMode, Point};

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        states: Arc<Mutex<Vec<GameSnapshot>>>,
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl RecordingBroadcaster {
        fn state_count(&self) -> usize {
            self.states.lock().unwrap().len()
        }

        fn latest(&self) -> GameSnapshot {
            self.states.lock().unwrap().last().cloned().unwrap()
        }

        fn events(&self) -> Vec<GameEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: GameSnapshot) {
            self.states.lock().unwrap().push(snapshot);
        }

        async fn broadcast_event(&self, event: GameEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_mode_steps_every_600ms() {
        let broadcaster = RecordingBroadcaster::default();
        let handle = SessionHandle::spawn(&SnakeSessionSettings::default(), Some(3), broadcaster.clone());

        handle.send(SessionCommand::StartGame).unwrap();
        tokio::time::sleep(ms(599)).await;
        assert_eq!(broadcaster.latest().head(), Some(Point::new(11, 11)));
        assert_eq!(broadcaster.events(), vec![GameEvent::GameStarted]);

        tokio::time::sleep(ms(2)).await;
        assert_eq!(broadcaster.latest().head(), Some(Point::new(11, 10)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_autonomous_mode_steps_every_100ms() {
        let broadcaster = RecordingBroadcaster::default();
        let handle = SessionHandle::spawn(&SnakeSessionSettings::default(), Some(3), broadcaster.clone());

        handle.send(SessionCommand::SetMode(PlayMode::Autonomous)).unwrap();
        handle.send(SessionCommand::StartGame).unwrap();
        tokio::time::sleep(ms(1)).await;
        let before = broadcaster.state_count();

        tokio::time::sleep(ms(350)).await;
        assert_eq!(broadcaster.state_count() - before, 3);
        assert_eq!(broadcaster.latest().mode, PlayMode::Autonomous);
    }

    #[tokio::test(start_paused = true)]
    async fn test_direction_is_applied_on_next_tick_only() {
        let broadcaster = RecordingBroadcaster::default();
        let handle = SessionHandle::spawn(&SnakeSessionSettings::default(), Some(3), broadcaster.clone());

        handle.send(SessionCommand::StartGame).unwrap();
        handle.send(SessionCommand::SetDirection(Direction::Left)).unwrap();
        tokio::time::sleep(ms(10)).await;
        assert_eq!(broadcaster.latest().direction, Direction::Up);

        tokio::time::sleep(ms(600)).await;
        let latest = broadcaster.latest();
        assert_eq!(latest.direction, Direction::Left);
        assert_eq!(latest.head(), Some(Point::new(10, 11)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_session_is_inert_and_resumes() {
        let broadcaster = RecordingBroadcaster::default();
        let handle = SessionHandle::spawn(&SnakeSessionSettings::default(), Some(3), broadcaster.clone());

        handle.send(SessionCommand::StartGame).unwrap();
        handle.send(SessionCommand::Pause).unwrap();
        tokio::time::sleep(ms(5)).await;
        assert_eq!(broadcaster.latest().status, GameStatus::Paused);
        let before = broadcaster.state_count();

        tokio::time::sleep(ms(5_000)).await;
        assert_eq!(broadcaster.state_count(), before);

        handle.send(SessionCommand::TogglePause).unwrap();
        tokio::time::sleep(ms(601)).await;
        let latest = broadcaster.latest();
        assert_eq!(latest.status, GameStatus::Playing);
        assert_eq!(latest.head(), Some(Point::new(11, 10)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_never_steps() {
        let broadcaster = RecordingBroadcaster::default();
        let _handle = SessionHandle::spawn(&SnakeSessionSettings::default(), Some(3), broadcaster.clone());

        tokio::time::sleep(ms(10_000)).await;
        assert_eq!(broadcaster.state_count(), 1);
        assert_eq!(broadcaster.latest().status, GameStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let broadcaster = RecordingBroadcaster::default();
        let mut handle = SessionHandle::spawn(&SnakeSessionSettings::default(), Some(3), broadcaster.clone());
        handle.send(SessionCommand::StartGame).unwrap();
        tokio::time::sleep(ms(1)).await;

        handle.stop();
        handle.stop();
        assert!(!handle.is_running());

        let final_state = handle.join().await.unwrap();
        assert_eq!(final_state.status(), GameStatus::Playing);

        let count = broadcaster.state_count();
        tokio::time::sleep(ms(5_000)).await;
        assert_eq!(broadcaster.state_count(), count);
    }
}
