mod events;
mod game_state;
mod grid;
mod handle;
mod pacer;
mod pathfinder;
mod session;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use events::GameEvent;
pub use game_state::{INITIAL_DIRECTION, SnakeGameState};
pub use grid::{GRID_SIZE, Grid};
pub use handle::SessionHandle;
pub use pacer::TickPacer;
pub use pathfinder::Pathfinder;
pub use session::{SessionCommand, SnakeSession};
pub use settings::SnakeSessionSettings;
pub use snake::{INITIAL_LENGTH, Snake};
pub use snapshot::GameSnapshot;
pub use types::{CollisionKind, Direction, GameStatus, PlayMode, Point, TickIntervals};
