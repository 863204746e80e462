use super::board::{Board, Coord, Player, WinLine, CELLS};
use crate::diagnostics::Fault;

/// Result of an accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue,
    Win(WinLine),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub coord: Coord,
    pub player: Player,
    pub outcome: MoveOutcome,
}

/// How much of the game survives a reset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetKind {
    /// After a finished game: whoever is next keeps the first move.
    NextGame,
    /// After waking from sleep: everything back to power-on state.
    Fresh,
}

/// Board, turn and move count. Nothing else writes them.
pub struct GameEngine {
    board: Board,
    turn: Player,
    move_count: u8,
}

impl GameEngine {
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::A,
            move_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    /// Places the current player's marker at `(row, col)`.
    ///
    /// Out-of-range coordinates, occupied cells and moves made while an
    /// animation is running are silently ignored (`Ok(None)`).
    pub fn apply_move(
        &mut self,
        row: u8,
        col: u8,
        animation_active: bool,
    ) -> Result<Option<Placement>, Fault> {
        if animation_active {
            return Ok(None);
        }
        let Some(coord) = Coord::new(row, col) else {
            return Ok(None);
        };
        if !self.board.get(coord).is_empty() {
            return Ok(None);
        }

        let player = self.turn;
        self.board.set(coord, player.marker());
        self.turn = player.other();
        self.move_count += 1;
        self.check_consistency()?;

        let outcome = match self.check_win() {
            Some(line) => MoveOutcome::Win(line),
            None if self.move_count as usize == CELLS => MoveOutcome::Draw,
            None => MoveOutcome::Continue,
        };

        Ok(Some(Placement {
            coord,
            player,
            outcome,
        }))
    }

    pub fn check_win(&self) -> Option<WinLine> {
        self.board.winning_line()
    }

    pub fn reset(&mut self, kind: ResetKind) {
        self.board = Board::new();
        self.move_count = 0;
        if kind == ResetKind::Fresh {
            self.turn = Player::A;
        }
    }

    fn check_consistency(&self) -> Result<(), Fault> {
        if self.move_count as usize > CELLS {
            return Err(Fault::MoveCountOverflow {
                count: self.move_count,
            });
        }
        let occupied = self.board.occupied() as u8;
        if occupied != self.move_count {
            return Err(Fault::BoardCountMismatch {
                moves: self.move_count,
                occupied,
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn corrupt_move_count(&mut self, count: u8) {
        self.move_count = count;
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, CellMask};

    fn play(engine: &mut GameEngine, moves: &[(u8, u8)]) -> Option<Placement> {
        let mut last = None;
        for &(row, col) in moves {
            last = engine.apply_move(row, col, false).unwrap();
            assert!(last.is_some(), "move ({}, {}) was rejected", row, col);
        }
        last
    }

    #[test]
    fn occupied_cells_never_change_hands() {
        for index in 0..CELLS {
            let coord = Coord::from_index(index).unwrap();
            let mut engine = GameEngine::new();
            play(&mut engine, &[(coord.row(), coord.col())]);
            let before = *engine.board();
            // Both players get a go at the taken cell.
            for _ in 0..2 {
                assert_eq!(engine.apply_move(coord.row(), coord.col(), false), Ok(None));
                assert_eq!(*engine.board(), before);
                assert_eq!(engine.move_count(), 1);
                assert_eq!(engine.turn(), Player::B);
            }
        }
    }

    #[test]
    fn out_of_range_moves_are_ignored() {
        let mut engine = GameEngine::new();
        assert_eq!(engine.apply_move(3, 0, false), Ok(None));
        assert_eq!(engine.apply_move(0, 7, false), Ok(None));
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.turn(), Player::A);
    }

    #[test]
    fn moves_during_animation_are_ignored() {
        let mut engine = GameEngine::new();
        assert_eq!(engine.apply_move(1, 1, true), Ok(None));
        assert_eq!(*engine.board(), Board::new());
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn turns_alternate_on_accepted_moves() {
        let mut engine = GameEngine::new();
        let first = engine.apply_move(0, 0, false).unwrap().unwrap();
        assert_eq!(first.player, Player::A);
        assert_eq!(first.outcome, MoveOutcome::Continue);
        assert_eq!(engine.board().get(first.coord), Cell::PlayerA);

        let second = engine.apply_move(2, 2, false).unwrap().unwrap();
        assert_eq!(second.player, Player::B);
        assert_eq!(engine.board().get(second.coord), Cell::PlayerB);
        assert_eq!(engine.turn(), Player::A);
    }

    #[test]
    fn top_row_win() {
        let mut engine = GameEngine::new();
        let last = play(&mut engine, &[(0, 0), (1, 1), (0, 1), (1, 0), (0, 2)]).unwrap();
        assert_eq!(last.player, Player::A);
        assert_eq!(last.outcome, MoveOutcome::Win(WinLine::Row(0)));

        let expected = [(0, 0), (0, 1), (0, 2)]
            .iter()
            .fold(CellMask::EMPTY, |mask, &(r, c)| {
                mask.with(Coord::new(r, c).unwrap())
            });
        assert_eq!(WinLine::Row(0).mask(), expected);
    }

    #[test]
    fn full_board_without_line_is_one_draw() {
        // Final layout A B A / A B B / B A A
        let order = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ];
        let mut engine = GameEngine::new();
        let mut draws = 0;
        for (n, &(row, col)) in order.iter().enumerate() {
            let placed = engine.apply_move(row, col, false).unwrap().unwrap();
            match placed.outcome {
                MoveOutcome::Win(line) => panic!("unexpected win on {:?}", line),
                MoveOutcome::Draw => {
                    assert_eq!(n, 8);
                    draws += 1;
                }
                MoveOutcome::Continue => assert!(n < 8),
            }
        }
        assert_eq!(draws, 1);
        assert_eq!(engine.move_count(), 9);
        assert_eq!(engine.check_win(), None);
    }

    #[test]
    fn winning_ninth_move_is_a_win_not_a_draw() {
        // A fills the last cell and completes column 2.
        let order = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 2),
            (1, 0),
            (2, 1),
            (2, 0),
            (2, 2),
        ];
        let mut engine = GameEngine::new();
        // Only the ninth move completes anything.
        let last = play(&mut engine, &order).unwrap();
        assert_eq!(last.outcome, MoveOutcome::Win(WinLine::Column(2)));
    }

    #[test]
    fn reset_kinds_differ_only_in_turn() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[(0, 0)]);
        engine.reset(ResetKind::NextGame);
        assert_eq!(*engine.board(), Board::new());
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.turn(), Player::B);

        engine.reset(ResetKind::Fresh);
        assert_eq!(engine.turn(), Player::A);
    }

    #[test]
    fn inconsistent_move_count_is_a_fault() {
        let mut engine = GameEngine::new();
        engine.corrupt_move_count(9);
        assert_eq!(
            engine.apply_move(0, 0, false),
            Err(Fault::MoveCountOverflow { count: 10 })
        );

        let mut engine = GameEngine::new();
        engine.corrupt_move_count(3);
        assert_eq!(
            engine.apply_move(0, 0, false),
            Err(Fault::BoardCountMismatch {
                moves: 4,
                occupied: 1
            })
        );
    }
}
