//! Tic-tac-toe rules: board model, move validation, win and draw detection
mod board;
mod engine;

pub use board::{Board, Cell, CellMask, Coord, Player, WinLine, CELLS, SIZE};
pub use engine::{GameEngine, MoveOutcome, Placement, ResetKind};
