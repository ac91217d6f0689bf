//! Game rules: static board structure, the reversible game state and the
//! board-shape generator.

mod board;
mod player;
mod shape;
mod state;

pub use board::{Board, CELL_SIDES, Cell, Edge, Orientation};
pub use player::PlayerId;
pub use shape::{BoardLayout, BoardShape, GalletaShape, Point};
pub use state::{AppliedResult, GameState, Move, Outcome};
