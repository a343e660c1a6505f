use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::log;
use crate::games::{GameBroadcaster, SessionRng};
use super::events::GameEvent;
use super::game_state::SnakeGameState;
use super::pacer::TickPacer;
use super::types::{Direction, GameStatus, PlayMode, TickIntervals};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    StartGame,
    SetDirection(Direction),
    SetMode(PlayMode),
    ToggleMode,
    Pause,
    Resume,
    TogglePause,
}

pub struct SnakeSession;

impl SnakeSession {
    /// Drives the simulation until shutdown or until every command sender is
    /// gone. All mutation of `state` happens inside this task; the renderer
    /// only ever sees the snapshots handed to `broadcaster`.
    pub async fn run(
        mut state: SnakeGameState,
        mut rng: SessionRng,
        tick_intervals: TickIntervals,
        mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
        mut shutdown_rx: oneshot::Receiver<()>,
        broadcaster: impl GameBroadcaster,
    ) -> SnakeGameState {
        let mut pacer = TickPacer::new();
        log!("Session started (seed {})", rng.seed());
        broadcaster.broadcast_state(state.snapshot()).await;

        loop {
            let deadline = (state.status() == GameStatus::Playing).then(|| {
                pacer.next_due(Instant::now(), tick_intervals.for_mode(state.mode()))
            });

            tokio::select! {
                biased;
                _ = &mut shutdown_rx => break,
                command = command_rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    Self::handle_command(&mut state, &mut rng, &mut pacer, command, &broadcaster).await;
                }
                _ = sleep_until_deadline(deadline) => {
                    Self::tick(&mut state, &mut rng, &mut pacer, tick_intervals, &broadcaster).await;
                }
            }
        }

        log!("Session stopped (score {}, lives {})", state.score(), state.lives());
        state
    }

    async fn tick(
        state: &mut SnakeGameState,
        rng: &mut SessionRng,
        pacer: &mut TickPacer,
        tick_intervals: TickIntervals,
        broadcaster: &impl GameBroadcaster,
    ) {
        let now = Instant::now();
        if !pacer.is_due(now, tick_intervals.for_mode(state.mode())) {
            return;
        }

        if state.mode().is_autonomous() && state.steer_autonomously().is_none() {
            log!("Autopilot has no safe move, the next step collides");
        }

        let events = state.step(now, rng);
        pacer.commit(now);

        for event in events {
            broadcaster.broadcast_event(event).await;
        }
        broadcaster.broadcast_state(state.snapshot()).await;
    }

    async fn handle_command(
        state: &mut SnakeGameState,
        rng: &mut SessionRng,
        pacer: &mut TickPacer,
        command: SessionCommand,
        broadcaster: &impl GameBroadcaster,
    ) {
        let now = Instant::now();
        let result = match command {
            SessionCommand::StartGame => {
                state.start_game(rng);
                pacer.restart(now);
                broadcaster.broadcast_event(GameEvent::GameStarted).await;
                Ok(())
            }
            SessionCommand::SetDirection(direction) => state.set_pending_direction(direction),
            SessionCommand::SetMode(mode) => {
                state.set_mode(mode);
                Ok(())
            }
            SessionCommand::ToggleMode => {
                state.set_mode(state.mode().toggled());
                Ok(())
            }
            SessionCommand::Pause => state.pause(),
            SessionCommand::Resume => state.resume().map(|_| pacer.restart(now)),
            SessionCommand::TogglePause => match state.status() {
                GameStatus::Paused => state.resume().map(|_| pacer.restart(now)),
                _ => state.pause(),
            },
        };

        if let Err(e) = result {
            log!("Command {:?} ignored: {}", command, e);
            return;
        }

        broadcaster.broadcast_state(state.snapshot()).await;
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
