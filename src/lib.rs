//! Toguz: a Toguz Kumalak engine.
//!
//! Two players own nine pits each on a ring of eighteen. A move sows the
//! seeds of one pit forward; landing on an even pit of the opponent captures
//! it, and landing on a pit that now holds three seeds may turn it into a
//! tuzdek that feeds its owner's store every turn. The first store past half
//! of the 162 seeds wins.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and engine parameters
//! - [`board`] - Game state and move rules (sowing, capture, tuzdeks)
//! - [`search`] - Fixed-depth minimax
//! - [`session`] - One machine-versus-human game
//! - [`driver`] - Text game loop on any reader and writer
//! - [`autoplay`] - Engine against a seeded random opponent
//!
//! ## Example
//!
//! ```
//! use toguz::board::{Board, Player};
//! use toguz::search::best_move;
//!
//! let mut board = Board::new();
//! let landing = board.play(0, false, Player::One);
//! assert_eq!(landing, 8);
//!
//! let reply = best_move(&board, 2, Player::Two);
//! assert!(reply.best.is_some());
//! ```

pub mod autoplay;
pub mod board;
pub mod constants;
pub mod driver;
pub mod search;
pub mod session;
