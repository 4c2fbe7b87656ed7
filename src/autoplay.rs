//! Unattended games: the engine against a random opponent.
//!
//! The opponent takes the human's seat and picks uniformly among its
//! non-empty columns, accepting a tuzdek with probability one half. Games
//! are reproducible from the seed.

use anyhow::Result;

use crate::board::Board;
use crate::constants::{K, MAX_PLIES};
use crate::session::{HUMAN, Outcome, Session};

/// Random player for the human's side.
pub struct RandomOpponent {
    rng: fastrand::Rng,
}

impl RandomOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// A column `1..=K` with seeds in it, or `None` if there is none.
    pub fn choose_column(&mut self, board: &Board) -> Option<usize> {
        let columns: Vec<usize> = HUMAN
            .pits()
            .filter(|&p| board.pit(p) > 0)
            .map(|p| p % K + 1)
            .collect();
        if columns.is_empty() {
            return None;
        }
        Some(columns[self.rng.usize(..columns.len())])
    }

    pub fn accept_tuzdek(&mut self) -> bool {
        self.rng.bool()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayReport {
    pub outcome: Outcome,
    pub plies: usize,
    pub board: Board,
}

/// Play one game between the engine at `depth` and a [`RandomOpponent`].
pub fn autoplay(depth: usize, seed: u64, machine_first: bool, verbose: bool) -> Result<AutoplayReport> {
    let mut session = Session::new(depth);
    let mut opponent = RandomOpponent::new(seed);
    let mut machine_turn = machine_first;
    let mut plies = 0;

    let outcome = loop {
        if let Some(outcome) = session.outcome() {
            break outcome;
        }
        if plies >= MAX_PLIES {
            break session.final_outcome();
        }

        if machine_turn {
            let Some(mv) = session.play_machine() else {
                break session.final_outcome();
            };
            if verbose {
                eprintln!(
                    "ply {plies}: engine sows {} value={} nodes={}{}",
                    mv.pit + 1,
                    mv.value,
                    mv.nodes,
                    if mv.tuzdek { " tuzdek" } else { "" }
                );
            }
        } else {
            let Some(column) = opponent.choose_column(session.board()) else {
                break session.final_outcome();
            };
            let mv = session.play_human(column, |_| opponent.accept_tuzdek())?;
            if verbose {
                eprintln!(
                    "ply {plies}: random sows {column}{}",
                    if mv.tuzdek { " tuzdek" } else { "" }
                );
            }
        }

        plies += 1;
        machine_turn = !machine_turn;
    };

    Ok(AutoplayReport {
        outcome,
        plies,
        board: *session.board(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PITS, TOTAL_SEEDS};

    #[test]
    fn test_choose_column_only_non_empty() {
        let mut pits = [0; PITS];
        pits[13] = 4;
        let board = Board::from_parts(pits, [80, 78], [None, None]);
        let mut opponent = RandomOpponent::new(7);
        for _ in 0..20 {
            assert_eq!(opponent.choose_column(&board), Some(5));
        }
    }

    #[test]
    fn test_choose_column_none_when_empty() {
        let board = Board::from_parts([0; PITS], [81, 81], [None, None]);
        assert_eq!(RandomOpponent::new(1).choose_column(&board), None);
    }

    #[test]
    fn test_autoplay_finishes() {
        let report = autoplay(2, 42, true, false).unwrap();
        assert!(report.plies > 0);
        assert!(report.plies <= MAX_PLIES);
        assert_eq!(report.board.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_autoplay_is_reproducible() {
        let a = autoplay(1, 9, false, false).unwrap();
        let b = autoplay(1, 9, false, false).unwrap();
        assert_eq!(a, b);
    }
}
