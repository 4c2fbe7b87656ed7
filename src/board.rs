//! Board state and the move rules.
//!
//! A move is three steps: [`Board::sow`] the chosen pit, optionally claim the
//! landing pit as a tuzdek, then [`Board::account`] captures and tuzdek
//! harvests. [`Board::play`] does all three at once.
//!
//! `Board` is `Copy` so that search can branch by value without undo logic.

use std::fmt;
use std::ops::Range;

use crate::constants::{K, N, PITS, TUZDEK_SEEDS, WIN_THRESHOLD};

/// A pit index in `0..PITS`.
pub type Pit = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Owns pits `0..K`; the maximizing side in search.
    One,
    /// Owns pits `K..2K`.
    Two,
}

impl Player {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The pits on this player's side, in sowing order.
    #[inline]
    pub fn pits(self) -> Range<Pit> {
        let start = self.index() * K;
        start..start + K
    }

    #[inline]
    pub fn owns(self, pit: Pit) -> bool {
        pit / K == self.index()
    }
}

/// Reduce any index onto the ring of pits.
#[inline]
pub fn wrap(pit: Pit) -> Pit {
    pit % PITS
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pits: [u8; PITS],
    /// Tuzdek of each player, always a pit on the opponent's side.
    tuzdeks: [Option<Pit>; 2],
    /// Captured seeds (kazna) of each player.
    stores: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The starting position: every pit holds `N` seeds.
    pub fn new() -> Self {
        Self {
            pits: [N; PITS],
            tuzdeks: [None; 2],
            stores: [0; 2],
        }
    }

    /// Build an arbitrary position. The caller is responsible for keeping
    /// the tuzdeks on the right sides.
    pub fn from_parts(pits: [u8; PITS], stores: [u8; 2], tuzdeks: [Option<Pit>; 2]) -> Self {
        debug_assert!(tuzdeks.iter().flatten().all(|&t| t < PITS));
        Self {
            pits,
            tuzdeks,
            stores,
        }
    }

    #[inline]
    pub fn pit(&self, pit: Pit) -> u8 {
        self.pits[pit]
    }

    pub fn pits(&self) -> &[u8; PITS] {
        &self.pits
    }

    #[inline]
    pub fn store(&self, player: Player) -> u8 {
        self.stores[player.index()]
    }

    #[inline]
    pub fn tuzdek(&self, player: Player) -> Option<Pit> {
        self.tuzdeks[player.index()]
    }

    /// Seeds on the board plus both stores. Constant over a legal game.
    pub fn total_seeds(&self) -> u32 {
        self.pits.iter().map(|&s| s as u32).sum::<u32>()
            + self.stores.iter().map(|&s| s as u32).sum::<u32>()
    }

    /// Whether `player` has at least one non-empty pit to sow.
    pub fn has_moves(&self, player: Player) -> bool {
        player.pits().any(|p| self.pits[p] > 0)
    }

    /// A store has passed half of all seeds.
    pub fn is_terminal(&self) -> bool {
        self.stores.iter().any(|&s| s > WIN_THRESHOLD)
    }

    /// The player whose store has passed half of all seeds, if any.
    pub fn winner(&self) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&p| self.store(p) > WIN_THRESHOLD)
    }

    /// Sow the seeds of `pit` and return the pit the last seed landed in.
    ///
    /// A lone seed moves to the next pit and leaves the source empty.
    /// Otherwise the source keeps one seed and each following pit receives
    /// one, so `c` seeds land in pit `pit + c - 1`. When a pit holds more
    /// seeds than there are other pits, the source is skipped on the way
    /// round.
    pub fn sow(&mut self, pit: Pit) -> Pit {
        let seeds = self.pits[pit];
        debug_assert!(seeds > 0, "sowing empty pit {pit}");

        if seeds == 1 {
            self.pits[pit] = 0;
            let target = wrap(pit + 1);
            self.pits[target] += 1;
            return target;
        }

        self.pits[pit] = 1;
        let mut target = pit;
        let mut left = seeds - 1;
        while left > 0 {
            target = wrap(target + 1);
            if target == pit {
                continue;
            }
            self.pits[target] += 1;
            left -= 1;
        }
        target
    }

    /// Whether `player` may claim `target` as a tuzdek right after sowing
    /// into it (and before [`Board::account`]).
    pub fn tuzdek_possible(&self, target: Pit, player: Player) -> bool {
        let opponent = player.opponent();
        self.pits[target] == TUZDEK_SEEDS
            && opponent.owns(target)
            && (target + 1) % K != 0
            && self.tuzdek(player).is_none()
            && self.tuzdek(opponent).is_none_or(|t| t % K != target % K)
    }

    /// Claim `target` as the tuzdek of `player`. Eligibility is checked by
    /// [`Board::tuzdek_possible`].
    pub fn set_tuzdek(&mut self, target: Pit, player: Player) {
        debug_assert!(self.tuzdek_possible(target, player));
        self.tuzdeks[player.index()] = Some(target);
    }

    /// Capture an even landing pit on the opponent's side, then drain every
    /// tuzdek into its owner's store.
    pub fn account(&mut self, target: Pit, player: Player) {
        if player.opponent().owns(target) && self.pits[target] % 2 == 0 {
            self.stores[player.index()] += self.pits[target];
            self.pits[target] = 0;
        }
        for owner in [Player::One, Player::Two] {
            if let Some(t) = self.tuzdek(owner) {
                self.stores[owner.index()] += self.pits[t];
                self.pits[t] = 0;
            }
        }
    }

    /// Play a full move for `player`: sow `pit`, claim a tuzdek at the landing
    /// pit if asked and allowed, then account. Returns the landing pit.
    ///
    /// A tuzdek request that is not allowed at the landing pit is ignored.
    pub fn play(&mut self, pit: Pit, tuzdek: bool, player: Player) -> Pit {
        debug_assert!(player.owns(pit), "pit {pit} is not on {player:?}'s side");
        let total = self.total_seeds();
        let target = self.sow(pit);
        if tuzdek && self.tuzdek_possible(target, player) {
            self.set_tuzdek(target, player);
        }
        self.account(target, player);
        debug_assert_eq!(self.total_seeds(), total);
        target
    }

    /// The same position seen from the other side: pit halves, stores and
    /// tuzdeks swapped.
    pub fn rotate(&self) -> Board {
        let mut pits = [0; PITS];
        pits[..K].copy_from_slice(&self.pits[K..]);
        pits[K..].copy_from_slice(&self.pits[..K]);
        let flip = |t: Option<Pit>| t.map(|p| wrap(p + K));
        Board {
            pits,
            tuzdeks: [flip(self.tuzdeks[1]), flip(self.tuzdeks[0])],
            stores: [self.stores[1], self.stores[0]],
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for player in [Player::Two, Player::One] {
            write!(f, "{}:\t", player.index())?;
            for i in 0..K {
                let pit = match player {
                    Player::Two => PITS - i - 1,
                    Player::One => i,
                };
                write!(f, " {}", self.pits[pit])?;
                if self.tuzdek(player.opponent()) == Some(pit) {
                    write!(f, "*")?;
                }
                write!(f, "\t")?;
            }
            writeln!(f, "Kazna: {}", self.store(player))?;
        }
        write!(f, "\t")?;
        for i in 0..K {
            write!(f, "-{}-\t", i + 1)?;
        }
        writeln!(f)
    }
}
