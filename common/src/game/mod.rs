mod rng;
mod state;
mod types;

pub use rng::GameRng;
pub use state::{GameState, START_CELL, START_DIRECTION, START_FOOD};
pub use types::{Axis, Direction, GRID_SIZE, Phase, Point};
