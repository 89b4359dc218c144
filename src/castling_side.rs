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

use crate::{Color, File, Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::from_coords(self.rook_from_file(), color.backrank())
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    pub const fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    /// The castling region: every square from the rook's origin up to and
    /// including the king's origin. Index 0 is always the rook's origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::{CastlingSide, Color, Square};
    ///
    /// let region = CastlingSide::KingSide.region(Color::White);
    /// assert_eq!(region, &[Square::H1, Square::G1, Square::F1, Square::E1]);
    /// ```
    pub const fn region(self, color: Color) -> &'static [Square] {
        match (self, color) {
            (CastlingSide::KingSide, Color::White) => &WHITE_KING_SIDE,
            (CastlingSide::QueenSide, Color::White) => &WHITE_QUEEN_SIDE,
            (CastlingSide::KingSide, Color::Black) => &BLACK_KING_SIDE,
            (CastlingSide::QueenSide, Color::Black) => &BLACK_QUEEN_SIDE,
        }
    }

    /// The square the king starts on.
    pub const fn king_from(color: Color) -> Square {
        Square::from_coords(File::E, color.backrank())
    }

    pub const fn char(self) -> char {
        match self {
            CastlingSide::KingSide => 'k',
            CastlingSide::QueenSide => 'q',
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

const WHITE_KING_SIDE: [Square; 4] = [Square::H1, Square::G1, Square::F1, Square::E1];
const WHITE_QUEEN_SIDE: [Square; 5] = [Square::A1, Square::B1, Square::C1, Square::D1, Square::E1];
const BLACK_KING_SIDE: [Square; 4] = [Square::H8, Square::G8, Square::F8, Square::E8];
const BLACK_QUEEN_SIDE: [Square; 5] = [Square::A8, Square::B8, Square::C8, Square::D8, Square::E8];

/// Container with values for each [`CastlingSide`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByCastlingSide<T> {
    pub king_side: T,
    pub queen_side: T,
}

impl<T> ByCastlingSide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> ByCastlingSide<T>
    where
        F: FnMut(CastlingSide) -> T,
    {
        ByCastlingSide {
            king_side: init(CastlingSide::KingSide),
            queen_side: init(CastlingSide::QueenSide),
        }
    }

    #[inline]
    pub const fn get(&self, side: CastlingSide) -> &T {
        match side {
            CastlingSide::KingSide => &self.king_side,
            CastlingSide::QueenSide => &self.queen_side,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: CastlingSide) -> &mut T {
        match side {
            CastlingSide::KingSide => &mut self.king_side,
            CastlingSide::QueenSide => &mut self.queen_side,
        }
    }

    #[inline]
    pub fn any<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        predicate(&self.king_side) || predicate(&self.queen_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_start_at_rook_and_end_at_king() {
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                let region = side.region(color);
                assert_eq!(region[0], side.rook_from(color));
                assert_eq!(region[region.len() - 1], CastlingSide::king_from(color));
                assert!(region.contains(&side.king_to(color)));
                assert!(region.contains(&side.rook_to(color)));
                assert!(region.iter().all(|sq| sq.rank() == Some(color.backrank())));
            }
        }
    }

    #[test]
    fn test_by_castling_side() {
        let mut rights = ByCastlingSide::new_with(|side| side == CastlingSide::KingSide);
        assert!(*rights.get(CastlingSide::KingSide));
        *rights.get_mut(CastlingSide::KingSide) = false;
        assert!(!rights.any(|r| *r));
    }
}
