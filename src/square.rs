// This file is part of the mailbox-chess library.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Files, ranks and squares of the padded board.
//!
//! Squares live in a single padded index space: the 8×8 playing area is
//! surrounded by a ring of [`PADDING`] sentinel squares on every side. The
//! algebraic file `a` and rank `1` map to index [`PADDING`], so `a1` is
//! `(2, 2)` and `h8` is `(9, 9)`. [`Square::from_coords()`] is the only place
//! this offset is applied.

use core::{
    error, fmt,
    hash::{Hash, Hasher},
    ops,
    str::FromStr,
};

use crate::util::overflow_error;

/// Width of the sentinel ring around the playing area.
pub const PADDING: i8 = 2;

/// Number of files (and ranks) in the playing area.
pub const BOARD_SIZE: i8 = 8;

/// Number of files (and ranks) in the padded grid.
pub const GRID_SIZE: i8 = BOARD_SIZE + 2 * PADDING;

/// Number of cells in the padded grid.
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

macro_rules! try_from_int_impl {
    ($type:ty, $lower:expr, $upper:expr, $($t:ty)+) => {
        $(impl core::convert::TryFrom<$t> for $type {
            type Error = core::num::TryFromIntError;

            #[inline]
            fn try_from(value: $t) -> Result<$type, Self::Error> {
                if ($lower..$upper).contains(&value) {
                    Ok(<$type>::ALL[value as usize])
                } else {
                    Err(overflow_error())
                }
            }
        })+
    }
}

/// A file of the playing area, `a` to `h`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Gets the file from its lowercase letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::File;
    ///
    /// assert_eq!(File::from_char('e'), Some(File::E));
    /// assert_eq!(File::from_char('E'), None);
    /// assert_eq!(File::from_char('i'), None);
    /// ```
    #[inline]
    pub const fn from_char(ch: char) -> Option<File> {
        match ch {
            'a'..='h' => Some(File::ALL[(ch as u8 - b'a') as usize]),
            _ => None,
        }
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Index of the file in the padded grid.
    #[inline]
    pub const fn index(self) -> i8 {
        self as i8 + PADDING
    }

    /// `A` to `H`, in this order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

try_from_int_impl! { File, 0, 8, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// A rank of the playing area, `1` to `8`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    /// Gets the rank from its digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::Rank;
    ///
    /// assert_eq!(Rank::from_char('1'), Some(Rank::First));
    /// assert_eq!(Rank::from_char('9'), None);
    /// assert_eq!(Rank::from_char('0'), None);
    /// ```
    #[inline]
    pub const fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Some(Rank::ALL[(ch as u8 - b'1') as usize]),
            _ => None,
        }
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// Index of the rank in the padded grid.
    #[inline]
    pub const fn index(self) -> i8 {
        self as i8 + PADDING
    }

    /// `First` to `Eighth`, in this order.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

try_from_int_impl! { Rank, 0, 8, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// A displacement in the padded grid.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
}

impl Delta {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Delta {
        Delta { file, rank }
    }

    /// Largest absolute component, i.e. how far a single application of
    /// this delta can reach past the playing area.
    #[inline]
    pub const fn reach(self) -> i8 {
        let file = self.file.abs();
        let rank = self.rank.abs();
        if file > rank {
            file
        } else {
            rank
        }
    }
}

impl ops::Mul<i8> for Delta {
    type Output = Delta;

    #[inline]
    fn mul(self, rhs: i8) -> Delta {
        Delta::new(self.file * rhs, self.rank * rhs)
    }
}

impl ops::Neg for Delta {
    type Output = Delta;

    #[inline]
    fn neg(self) -> Delta {
        Delta::new(-self.file, -self.rank)
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl error::Error for ParseSquareError {}

/// A coordinate in the padded grid.
///
/// Squares are plain values: [`Square::translate()`] returns a new square and
/// never modifies its receiver. A square may lie in the sentinel ring, in
/// which case [`Square::file()`] and [`Square::rank()`] are `None`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Square {
    rank: i8,
    file: i8,
}

impl Square {
    /// Builds the playable square on `file` and `rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::{File, Rank, Square, PADDING};
    ///
    /// let a1 = Square::from_coords(File::A, Rank::First);
    /// assert_eq!(a1.grid_file(), PADDING);
    /// assert_eq!(a1.grid_rank(), PADDING);
    /// assert_eq!(a1.to_string(), "a1");
    /// ```
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square {
            file: file.index(),
            rank: rank.index(),
        }
    }

    /// Builds a square from raw grid indices, or `None` if they fall
    /// outside the padded grid.
    #[inline]
    pub const fn from_grid(file: i8, rank: i8) -> Option<Square> {
        if 0 <= file && file < GRID_SIZE && 0 <= rank && rank < GRID_SIZE {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Parses a square name like `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if `s` is not a file letter followed by
    /// a rank digit.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file, rank] => Ok(Square::from_coords(
                File::from_char(char::from(file)).ok_or(ParseSquareError)?,
                Rank::from_char(char::from(rank)).ok_or(ParseSquareError)?,
            )),
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn grid_file(self) -> i8 {
        self.file
    }

    #[inline]
    pub const fn grid_rank(self) -> i8 {
        self.rank
    }

    /// The algebraic file, or `None` in the sentinel ring.
    #[inline]
    pub const fn file(self) -> Option<File> {
        let index = self.file - PADDING;
        if 0 <= index && index < BOARD_SIZE {
            Some(File::ALL[index as usize])
        } else {
            None
        }
    }

    /// The algebraic rank, or `None` in the sentinel ring.
    #[inline]
    pub const fn rank(self) -> Option<Rank> {
        let index = self.rank - PADDING;
        if 0 <= index && index < BOARD_SIZE {
            Some(Rank::ALL[index as usize])
        } else {
            None
        }
    }

    /// Tests if the square belongs to the playing area.
    #[inline]
    pub const fn is_playable(self) -> bool {
        self.file().is_some() && self.rank().is_some()
    }

    /// Returns the square `delta` away from this one.
    ///
    /// No bounds are checked: callers start from playable squares and stop at
    /// the first occupied cell, and the sentinel ring is wide enough that no
    /// single delta leaves the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::{Delta, Square};
    ///
    /// let e4: Square = "e4".parse()?;
    /// assert_eq!(e4.translate(Delta::new(1, 2)).to_string(), "f6");
    /// assert_eq!(e4.to_string(), "e4");
    /// # Ok::<_, mailbox_chess::ParseSquareError>(())
    /// ```
    #[must_use]
    #[inline]
    pub const fn translate(self, delta: Delta) -> Square {
        Square {
            file: self.file + delta.file,
            rank: self.rank + delta.rank,
        }
    }

    /// Offset of the square in a row-major grid array.
    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        debug_assert!(0 <= self.file && self.file < GRID_SIZE);
        debug_assert!(0 <= self.rank && self.rank < GRID_SIZE);
        self.rank as usize * GRID_SIZE as usize + self.file as usize
    }

    /// Like [`Square::to_usize()`], but `None` for coordinates outside the
    /// padded grid.
    #[inline]
    pub(crate) const fn grid_index(self) -> Option<usize> {
        if 0 <= self.file && self.file < GRID_SIZE && 0 <= self.rank && self.rank < GRID_SIZE {
            Some(self.to_usize())
        } else {
            None
        }
    }

    /// Inverse of [`Square::to_usize()`].
    #[inline]
    pub(crate) const fn from_usize(index: usize) -> Square {
        Square {
            file: (index % GRID_SIZE as usize) as i8,
            rank: (index / GRID_SIZE as usize) as i8,
        }
    }
}

impl Hash for Square {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u16(u16::from_le_bytes([self.file as u8, self.rank as u8]));
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file(), self.rank()) {
            (Some(file), Some(rank)) => write!(f, "{file}{rank}"),
            _ => write!(f, "({},{})", self.file, self.rank),
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file(), self.rank()) {
            (Some(file), Some(rank)) => {
                write!(f, "{}{}", file.char().to_ascii_uppercase(), rank.char())
            }
            _ => write!(f, "Square({}, {})", self.file, self.rank),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = arrayvec::ArrayString::<16>::new();
        let _ = fmt::Write::write_fmt(&mut s, format_args!("{self}"));
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

macro_rules! define_squares {
    ($($name:ident = $file:ident $rank:ident),+ $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square::from_coords(File::$file, Rank::$rank);)+
        }
    }
}

define_squares! {
    A1 = A First, B1 = B First, C1 = C First, D1 = D First,
    E1 = E First, F1 = F First, G1 = G First, H1 = H First,
    A2 = A Second, B2 = B Second, C2 = C Second, D2 = D Second,
    E2 = E Second, F2 = F Second, G2 = G Second, H2 = H Second,
    A3 = A Third, B3 = B Third, C3 = C Third, D3 = D Third,
    E3 = E Third, F3 = F Third, G3 = G Third, H3 = H Third,
    A4 = A Fourth, B4 = B Fourth, C4 = C Fourth, D4 = D Fourth,
    E4 = E Fourth, F4 = F Fourth, G4 = G Fourth, H4 = H Fourth,
    A5 = A Fifth, B5 = B Fifth, C5 = C Fifth, D5 = D Fifth,
    E5 = E Fifth, F5 = F Fifth, G5 = G Fifth, H5 = H Fifth,
    A6 = A Sixth, B6 = B Sixth, C6 = C Sixth, D6 = D Sixth,
    E6 = E Sixth, F6 = F Sixth, G6 = G Sixth, H6 = H Sixth,
    A7 = A Seventh, B7 = B Seventh, C7 = C Seventh, D7 = D Seventh,
    E7 = E Seventh, F7 = F Seventh, G7 = G Seventh, H7 = H Seventh,
    A8 = A Eighth, B8 = B Eighth, C8 = C Eighth, D8 = D Eighth,
    E8 = E Eighth, F8 = F Eighth, G8 = G Eighth, H8 = H Eighth,
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "alloc")]
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_coords_roundtrip() {
        for file in File::ALL {
            for rank in Rank::ALL {
                let sq = Square::from_coords(file, rank);
                assert_eq!(sq.file(), Some(file));
                assert_eq!(sq.rank(), Some(rank));
                assert!(sq.is_playable());
                assert_eq!(Square::from_usize(sq.to_usize()), sq);
            }
        }
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_name_roundtrip() {
        for file in File::ALL {
            for rank in Rank::ALL {
                let sq = Square::from_coords(file, rank);
                let name = sq.to_string();
                assert_eq!(name.parse::<Square>().ok(), Some(sq));
            }
        }
    }

    #[test]
    fn test_padding_offset() {
        assert_eq!(Square::A1.grid_file(), 2);
        assert_eq!(Square::A1.grid_rank(), 2);
        assert_eq!(Square::H8.grid_file(), 9);
        assert_eq!(Square::H8.grid_rank(), 9);
        assert_eq!("a1".parse::<Square>().ok(), Some(Square::A1));
    }

    #[test]
    fn test_sentinel_ring() {
        let outside = Square::A1.translate(Delta::new(-1, 0));
        assert!(!outside.is_playable());
        assert_eq!(outside.file(), None);
        assert_eq!(outside.rank(), Some(Rank::First));
        assert_eq!(Square::from_grid(-1, 0), None);
        assert!(Square::from_grid(0, 11).is_some());
        assert!(Square::from_grid(0, 12).is_none());
    }

    #[test]
    fn test_translate_is_pure() {
        let e4 = Square::E4;
        let f6 = e4.translate(Delta::new(1, 2));
        assert_eq!(e4, Square::E4);
        assert_eq!(f6, Square::F6);
        assert_eq!(f6.translate(-Delta::new(1, 2)), e4);
        assert_eq!(e4.translate(Delta::new(0, 1) * 4), Square::E8);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("z9".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn test_try_from_int() {
        assert_eq!(File::try_from(4u8).ok(), Some(File::E));
        assert!(File::try_from(8u8).is_err());
        assert!(Rank::try_from(-1i32).is_err());
    }
}
