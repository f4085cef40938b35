//! Board coordinates.
//!
//! A `Square` is a file (a..h) and rank (1..8) pair stored as zero-based
//! indices. Squares are ordered by descending rank then ascending file, so
//! ordered containers iterate a8..h8 first and a1..h1 last, matching the
//! order boards are displayed in.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::{ChessError, ChessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Checked constructor from zero-based file/rank indices.
    pub fn from_indices(file: u8, rank: u8) -> ChessResult<Self> {
        if file > 7 || rank > 7 {
            return Err(ChessError::InvalidCoordinates {
                file: i16::from(file),
                rank: i16::from(rank),
            });
        }
        Ok(Self { file, rank })
    }

    /// Unchecked constructor for indices known to be in 0..=7.
    pub(crate) const fn at(file: u8, rank: u8) -> Self {
        debug_assert!(file <= 7 && rank <= 7);
        Self { file, rank }
    }

    /// Zero-based file index (a = 0).
    #[inline]
    pub const fn file_index(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank 1 = 0).
    #[inline]
    pub const fn rank_index(self) -> u8 {
        self.rank
    }

    /// The square shifted by the given deltas, or `None` when off the board.
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        let file = self.file as i8 + d_file;
        let rank = self.rank as i8 + d_rank;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Whether the square is dark-colored (a1 is dark).
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| self.file.cmp(&other.file))
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
