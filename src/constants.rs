//! Constants for board geometry and engine parameters.
//!
//! The board is a ring of `PITS` counters. Indices `0..K` belong to
//! [`Player::One`](crate::board::Player::One), indices `K..PITS` to
//! [`Player::Two`](crate::board::Player::Two). Every index handed around the
//! crate is already reduced modulo `PITS`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Pits per side.
pub const K: usize = 9;

/// Seeds placed in every pit at the start of a game.
pub const N: u8 = 9;

/// Total number of pits on the board (both sides).
pub const PITS: usize = 2 * K;

/// Seeds in play for the whole game: pits plus both stores always sum to this.
pub const TOTAL_SEEDS: u32 = (PITS as u32) * (N as u32);

/// A store holding more than this many seeds has won: the opponent can no
/// longer catch up.
pub const WIN_THRESHOLD: u8 = (K as u8) * N;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default minimax depth (plies) for the machine player.
pub const DEFAULT_DEPTH: usize = 8;

/// Seeds a pit must hold right after sowing to become a tuzdek.
pub const TUZDEK_SEEDS: u8 = 3;

/// Ply limit for unattended games; the stores decide a game that reaches it.
pub const MAX_PLIES: usize = 1000;
