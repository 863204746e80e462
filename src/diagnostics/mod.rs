//! Internal consistency faults
//!
//! Rejected input is never an error. A `Fault` means the game state broke an
//! invariant that valid play cannot break; the main loop logs it and freezes
//! the display instead of playing on with a corrupt board.

use ufmt::derive::uDebug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, uDebug)]
pub enum Fault {
    /// More than nine moves recorded on a 3x3 board
    MoveCountOverflow { count: u8 },
    /// The move counter disagrees with the number of marked cells
    BoardCountMismatch { moves: u8, occupied: u8 },
}

impl Fault {
    /// Numeric code shown in the log, grouped like the board's other error codes
    pub const fn code(self) -> u16 {
        match self {
            Fault::MoveCountOverflow { .. } => 0x8001,
            Fault::BoardCountMismatch { .. } => 0x8002,
        }
    }
}
