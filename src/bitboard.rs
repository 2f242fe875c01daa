//! Packed 3x3 board: one 9-bit mask per player.
//!
//! Cells are numbered row-major, `index = row * 3 + column`, with row 0 being
//! rank `1` and column 0 being file `a`. Every operation here is a pure
//! function of its inputs; a [`Position`] is a small `Copy` value and is never
//! mutated in place.

use flagset::{flags, FlagSet};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use std::fmt;

// #############################
// #                           #
// #      Fixed Constants      #
// #                           #
// #############################

pub const BOARD_SIZE: usize = 3;
pub const CELLS: usize = BOARD_SIZE * BOARD_SIZE;

pub const EMPTY_MASK: u16 = 0;
pub const FULL_MASK: u16 = 0b111_111_111;

pub const WINNING_POSITIONS: [u16; 8] = [
    0b000_000_111, 0b000_111_000, 0b111_000_000, // rows
    0b100_100_100, 0b010_010_010, 0b001_001_001, // columns
    0b100_010_001, 0b001_010_100, // diagonals
];

/// A cell index in `0..CELLS`.
pub type Move = usize;

// #############################
// #                           #
// #          Player           #
// #                           #
// #############################

flags! {
    /// Side identifier. `Player::One | Player::Two` addresses both masks at
    /// once, see [`Position::cells`].
    pub enum Player: u8 {
        One,
        Two,
    }
}

impl Player {
    pub const fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Player::One => 'x',
            Player::Two => 'o',
        }
    }

    /// Both players as a set.
    pub fn both() -> FlagSet<Player> {
        Player::One | Player::Two
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Distribution<Player> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Player {
        if rng.gen() {
            Player::One
        } else {
            Player::Two
        }
    }
}

// #############################
// #                           #
// #         Position          #
// #                           #
// #############################

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    one: u16,
    two: u16,
}

impl Position {
    pub const EMPTY: Position = Position { one: EMPTY_MASK, two: EMPTY_MASK };

    /// Build a position from raw masks. No validation: use
    /// [`Position::is_legal`] to check the result.
    pub const fn from_masks(one: u16, two: u16) -> Self {
        Position { one, two }
    }

    pub const fn mask(self, player: Player) -> u16 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    /// Union of the masks of every player in `players`.
    pub fn cells(self, players: impl Into<FlagSet<Player>>) -> u16 {
        let players: FlagSet<Player> = players.into();
        players
            .into_iter()
            .fold(EMPTY_MASK, |acc, player| acc | self.mask(player))
    }

    pub const fn occupied(self) -> u16 {
        self.one | self.two
    }

    /// Return the position with `m` set for `player`.
    ///
    /// The cell must be empty for both players. This is not checked: playing
    /// an occupied cell silently yields an illegal position. Call
    /// [`Position::is_legal_move`] first.
    #[inline]
    pub const fn play(self, player: Player, m: Move) -> Position {
        let bit = 1 << m;
        match player {
            Player::One => Position { one: self.one | bit, two: self.two },
            Player::Two => Position { one: self.one, two: self.two | bit },
        }
    }

    /// Masks are disjoint and confined to the 9 board bits.
    pub const fn is_legal(self) -> bool {
        self.one & self.two == EMPTY_MASK
            && self.one & !FULL_MASK == EMPTY_MASK
            && self.two & !FULL_MASK == EMPTY_MASK
    }

    pub const fn is_full(self) -> bool {
        self.occupied() == FULL_MASK
    }

    pub fn is_won(self, player: Player) -> bool {
        let mask = self.mask(player);
        WINNING_POSITIONS
            .iter()
            .any(|&line| mask & line == line)
    }

    /// Won by either side or full.
    pub fn is_finished(self) -> bool {
        self.is_full() || self.is_won(Player::One) || self.is_won(Player::Two)
    }

    pub const fn is_legal_move(self, m: Move) -> bool {
        m < CELLS && self.occupied() & (1 << m) == EMPTY_MASK
    }

    /// Number of stones on the board.
    pub const fn ply(self) -> u32 {
        self.occupied().count_ones()
    }

    /// Side to move under strict alternation with `Player::One` starting.
    pub const fn side_to_move(self) -> Player {
        if self.one.count_ones() > self.two.count_ones() {
            Player::Two
        } else {
            Player::One
        }
    }

    pub fn open_cells(self) -> OpenCells {
        OpenCells::new(self.occupied())
    }
}

// #############################
// #                           #
// #        Open Cells         #
// #                           #
// #############################

/// Index of the lowest unset bit. Returns at least `CELLS` for a full mask.
#[inline]
pub const fn first_unset(mask: u16) -> Move {
    mask.trailing_ones() as Move
}

/// Index of the lowest unset bit strictly after `after`. `after` must be below
/// `CELLS`. Returns at least `CELLS` if no cell is left.
#[inline]
pub const fn next_unset(mask: u16, after: Move) -> Move {
    let next = after + 1;
    next + (mask >> next).trailing_ones() as Move
}

/// Unoccupied cells of a mask in ascending index order.
#[derive(Clone, Debug)]
pub struct OpenCells {
    mask: u16,
    current: Move,
}

impl OpenCells {
    pub const fn new(mask: u16) -> Self {
        OpenCells { mask, current: first_unset(mask) }
    }
}

impl Iterator for OpenCells {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= CELLS {
            return None;
        }
        let result = self.current;
        self.current = next_unset(self.mask, result);
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.current >= CELLS {
            0
        } else {
            (!self.mask & FULL_MASK & (FULL_MASK << self.current)).count_ones() as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OpenCells {}
