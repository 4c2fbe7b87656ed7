//! One game between the machine and a human.
//!
//! The machine always plays [`Player::One`] and the human [`Player::Two`];
//! who moves first is up to the driver. Human moves are given as columns
//! `1..=K` of the human's own side.

use thiserror::Error;

use crate::board::{Board, Pit, Player};
use crate::constants::K;
use crate::search::{SearchResult, Searcher};

pub const MACHINE: Player = Player::One;
pub const HUMAN: Player = Player::Two;

/// Why a human move was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("column {0} is not between 1 and 9")]
    OutOfRange(usize),
    #[error("pit {0} is empty")]
    EmptyPit(usize),
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HumanMove {
    pub landing: Pit,
    pub tuzdek: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineMove {
    pub pit: Pit,
    /// Whether a tuzdek was actually claimed.
    pub tuzdek: bool,
    /// The search value: the machine's store it can guarantee.
    pub value: i32,
    pub nodes: u64,
}

pub struct Session {
    board: Board,
    depth: usize,
}

impl Session {
    pub fn new(depth: usize) -> Self {
        Self::with_board(Board::new(), depth)
    }

    /// Resume from an existing position.
    pub fn with_board(board: Board, depth: usize) -> Self {
        Self { board, depth }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The board with the human's side first.
    pub fn human_view(&self) -> Board {
        self.board.rotate()
    }

    /// Map a human column to a pit index.
    pub fn human_pit(column: usize) -> Result<Pit, MoveError> {
        if !(1..=K).contains(&column) {
            return Err(MoveError::OutOfRange(column));
        }
        Ok(HUMAN.pits().start + column - 1)
    }

    pub fn human_can_move(&self) -> bool {
        self.board.has_moves(HUMAN)
    }

    /// Play the human's move at `column`. `choose_tuzdek` is asked with the
    /// landing pit only when a tuzdek may be claimed there.
    pub fn play_human(
        &mut self,
        column: usize,
        choose_tuzdek: impl FnOnce(Pit) -> bool,
    ) -> Result<HumanMove, MoveError> {
        let pit = Self::human_pit(column)?;
        if self.board.pit(pit) == 0 {
            return Err(MoveError::EmptyPit(column));
        }

        let landing = self.board.sow(pit);
        let tuzdek = self.board.tuzdek_possible(landing, HUMAN) && choose_tuzdek(landing);
        if tuzdek {
            self.board.set_tuzdek(landing, HUMAN);
        }
        self.board.account(landing, HUMAN);
        Ok(HumanMove { landing, tuzdek })
    }

    /// Search for and play the machine's move. `None` when the search has
    /// no move to offer, which ends the game.
    pub fn play_machine(&mut self) -> Option<MachineMove> {
        let mut searcher = Searcher::new();
        let SearchResult {
            value,
            best,
            tuzdek,
        } = searcher.best_move(&self.board, self.depth, MACHINE);
        let pit = best?;

        let before = self.board.tuzdek(MACHINE);
        self.board.play(pit, tuzdek, MACHINE);
        Some(MachineMove {
            pit,
            tuzdek: before != self.board.tuzdek(MACHINE),
            value,
            nodes: searcher.nodes,
        })
    }

    /// A win, once a store holds more than half of all seeds.
    pub fn outcome(&self) -> Option<Outcome> {
        self.board.winner().map(Outcome::Win)
    }

    /// The result when play stops early: the larger store wins.
    pub fn final_outcome(&self) -> Outcome {
        let machine = self.board.store(MACHINE);
        let human = self.board.store(HUMAN);
        match machine.cmp(&human) {
            std::cmp::Ordering::Greater => Outcome::Win(MACHINE),
            std::cmp::Ordering::Less => Outcome::Win(HUMAN),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PITS, TOTAL_SEEDS};

    #[test]
    fn test_human_pit() {
        assert_eq!(Session::human_pit(1), Ok(9));
        assert_eq!(Session::human_pit(9), Ok(17));
        assert_eq!(Session::human_pit(0), Err(MoveError::OutOfRange(0)));
        assert_eq!(Session::human_pit(10), Err(MoveError::OutOfRange(10)));
    }

    #[test]
    fn test_play_human_rejects_empty_pit() {
        let mut pits = [9; PITS];
        pits[12] = 0;
        pits[0] = 18;
        let mut session = Session::with_board(Board::from_parts(pits, [0, 0], [None, None]), 2);
        let err = session.play_human(4, |_| true).unwrap_err();
        assert_eq!(err, MoveError::EmptyPit(4));
        assert_eq!(err.to_string(), "pit 4 is empty");
    }

    #[test]
    fn test_play_human_capture() {
        let mut session = Session::new(2);
        // Column 2 is pit 10: 9 seeds land on pit 0, which becomes even.
        let mv = session.play_human(2, |_| panic!("no tuzdek expected")).unwrap();
        assert_eq!(mv.landing, 0);
        assert!(!mv.tuzdek);
        assert_eq!(session.board().store(HUMAN), 10);
        assert_eq!(session.board().total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_tuzdek_not_asked_when_ineligible() {
        let mut pits = [0; PITS];
        pits[17] = 2;
        pits[1] = 2;
        let board = Board::from_parts(pits, [79, 79], [None, None]);
        let mut session = Session::with_board(board, 2);
        let mut asked = false;
        let mv = session
            .play_human(9, |_| {
                asked = true;
                true
            })
            .unwrap();
        // Pit 17 drops its second seed into pit 0, leaving it at 1.
        assert!(!asked);
        assert!(!mv.tuzdek);
        assert_eq!(mv.landing, 0);
        assert_eq!(session.board().tuzdek(HUMAN), None);
    }

    #[test]
    fn test_play_human_claims_tuzdek() {
        let mut pits = [0; PITS];
        pits[16] = 3;
        pits[0] = 2;
        let board = Board::from_parts(pits, [78, 79], [None, None]);
        let mut session = Session::with_board(board, 2);
        let mv = session.play_human(8, |landing| landing == 0).unwrap();
        assert!(mv.tuzdek);
        assert_eq!(session.board().tuzdek(HUMAN), Some(0));
        assert_eq!(session.board().store(HUMAN), 82);
        assert_eq!(session.outcome(), Some(Outcome::Win(HUMAN)));
    }

    #[test]
    fn test_play_machine() {
        let mut session = Session::new(2);
        let mv = session.play_machine().expect("opening has moves");
        assert!(MACHINE.owns(mv.pit));
        assert!(mv.nodes > 1);
        assert_eq!(session.board().total_seeds(), TOTAL_SEEDS);
        assert_eq!(session.board().pit(mv.pit), 1);
    }

    #[test]
    fn test_play_machine_no_move() {
        let mut pits = [0; PITS];
        pits[9] = 3;
        let board = Board::from_parts(pits, [80, 79], [None, None]);
        let mut session = Session::with_board(board, 3);
        assert_eq!(session.play_machine(), None);
        assert_eq!(session.final_outcome(), Outcome::Win(MACHINE));
    }

    #[test]
    fn test_machine_flag_without_eligible_landing() {
        // Search returns pit 7 with the tuzdek flag set by pit 8; pit 7's
        // landing cannot become a tuzdek, so nothing is claimed.
        let mut pits = [0; PITS];
        pits[7] = 4;
        pits[8] = 2;
        pits[9] = 2;
        pits[10] = 1;
        let board = Board::from_parts(pits, [78, 75], [None, None]);
        let mut session = Session::with_board(board, 1);
        let mv = session.play_machine().unwrap();
        assert_eq!(mv.pit, 7);
        assert!(!mv.tuzdek);
        assert_eq!(session.board().tuzdek(MACHINE), None);
        assert_eq!(session.board().store(MACHINE), 80);
    }

    #[test]
    fn test_final_outcome_draw() {
        let board = Board::from_parts([0; PITS], [81, 81], [None, None]);
        let session = Session::with_board(board, 1);
        assert_eq!(session.outcome(), None);
        assert_eq!(session.final_outcome(), Outcome::Draw);
    }
}
