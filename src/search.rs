//! Fixed-depth minimax over board transitions.
//!
//! The value of a position is always player One's store at the leaf:
//! player One maximizes it, player Two minimizes it. Seeds are conserved, so
//! one store describes the whole outcome.
//!
//! Every candidate is simulated on its own copy of the board. When the
//! landing pit may become a tuzdek, the candidate is searched twice, with
//! and without claiming it.

use crate::board::{Board, Pit, Player};
use crate::constants::K;

/// What the search reports to its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Player One's store at the end of the principal line.
    pub value: i32,
    /// Pit to sow, or `None` when the position is terminal or the side to
    /// move has no seeds.
    pub best: Option<Pit>,
    /// Whether to claim a tuzdek with the move.
    pub tuzdek: bool,
}

impl SearchResult {
    fn leaf(board: &Board) -> Self {
        Self {
            value: board.store(Player::One) as i32,
            best: None,
            tuzdek: false,
        }
    }
}

/// Breakdown of one root candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEval {
    pub pit: Pit,
    pub without_tuzdek: i32,
    /// Only present when the landing pit could become a tuzdek.
    pub with_tuzdek: Option<i32>,
}

/// Minimax searcher. Keeps a node count for diagnostics.
#[derive(Debug, Default)]
pub struct Searcher {
    pub nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `depth` plies from `board` with `player` to move.
    ///
    /// The move index and the tuzdek flag are tracked separately: the move
    /// is the candidate with the best value without a tuzdek, and the flag
    /// is re-decided on every candidate by whether its tuzdek line strictly
    /// improves the running best. The flag can therefore belong to a
    /// different candidate than the returned move, and a tuzdek line that
    /// is later not improved upon still clears it.
    pub fn best_move(&mut self, board: &Board, depth: usize, player: Player) -> SearchResult {
        self.nodes += 1;
        if depth == 0 || board.is_terminal() {
            return SearchResult::leaf(board);
        }

        let maximizing = player == Player::One;
        let better = |a: i32, b: i32| if maximizing { a > b } else { a < b };

        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
        let mut best = None;
        let mut tuzdek = false;

        for pit in player.pits() {
            if board.pit(pit) == 0 {
                continue;
            }
            let eval = self.evaluate(board, pit, depth, player);

            if better(eval.without_tuzdek, best_value) {
                best = Some(pit);
                best_value = eval.without_tuzdek;
            }
            match eval.with_tuzdek {
                Some(v) if better(v, best_value) => {
                    tuzdek = true;
                    best_value = v;
                }
                _ => tuzdek = false,
            }
        }

        match best {
            Some(_) => SearchResult {
                value: best_value,
                best,
                tuzdek,
            },
            None => SearchResult::leaf(board),
        }
    }

    /// Score a single candidate `pit` for `player`, searching the replies
    /// `depth - 1` plies deep.
    fn evaluate(&mut self, board: &Board, pit: Pit, depth: usize, player: Player) -> MoveEval {
        let mut local = *board;
        let target = local.sow(pit);

        let with_tuzdek = if local.tuzdek_possible(target, player) {
            let mut claimed = local;
            claimed.set_tuzdek(target, player);
            claimed.account(target, player);
            Some(self.best_move(&claimed, depth - 1, player.opponent()).value)
        } else {
            None
        };

        local.account(target, player);
        let without_tuzdek = self.best_move(&local, depth - 1, player.opponent()).value;

        MoveEval {
            pit,
            without_tuzdek,
            with_tuzdek,
        }
    }
}

/// Search `depth` plies from `board` with `player` to move.
pub fn best_move(board: &Board, depth: usize, player: Player) -> SearchResult {
    Searcher::new().best_move(board, depth, player)
}

/// Evaluate every playable pit of `player` separately. Empty when the
/// position is terminal, `depth` is zero or `player` cannot move.
pub fn evaluate_moves(board: &Board, depth: usize, player: Player) -> Vec<MoveEval> {
    if depth == 0 || board.is_terminal() {
        return Vec::new();
    }
    let mut searcher = Searcher::new();
    player
        .pits()
        .filter(|&pit| board.pit(pit) > 0)
        .map(|pit| searcher.evaluate(board, pit, depth, player))
        .collect()
}

/// Print the root breakdown to stderr.
pub fn dump_moves(evals: &[MoveEval]) {
    for eval in evals {
        match eval.with_tuzdek {
            Some(v) => eprintln!(
                "pit {} value={} tuzdek={}",
                eval.pit % K + 1,
                eval.without_tuzdek,
                v
            ),
            None => eprintln!(
                "pit {} value={}",
                eval.pit % K + 1,
                eval.without_tuzdek
            ),
        }
    }
}
