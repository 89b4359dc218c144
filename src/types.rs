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

use core::fmt;

use crate::{Color, Role, Square};

/// Stable handle of a piece on a [`Board`](crate::Board).
///
/// Handles stay valid after the piece is captured, so a
/// [`MoveDescriptor`](crate::MoveDescriptor) can keep referring to the piece
/// it took.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece with [`Color`], [`Role`], location and movement history.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub square: Square,
    /// Set once the piece has moved. Meaningful for kings, rooks and pawns.
    pub has_moved: bool,
    /// Set once the piece has been captured and taken off the board.
    pub captured: bool,
}

impl Piece {
    /// A fresh, unmoved piece.
    pub const fn new(color: Color, role: Role, square: Square) -> Piece {
        Piece {
            color,
            role,
            square,
            has_moved: false,
            captured: false,
        }
    }

    /// The FEN letter: uppercase for white, lowercase for black.
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    /// Parses a FEN letter into a color and a piece type.
    pub const fn color_role_from_char(ch: char) -> Option<(Color, Role)> {
        match Role::from_char(ch) {
            Some(role) => Some((Color::from_white(ch.is_ascii_uppercase()), role)),
            None => None,
        }
    }
}

/// Content of a cell of the padded grid.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Occupant {
    /// A playable square with nothing on it.
    #[default]
    Empty,
    /// A playable square holding a piece.
    Occupied(PieceId),
    /// A sentinel cell outside the playing area. Never changes.
    Blocked,
}

impl Occupant {
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Occupant::Empty)
    }

    #[inline]
    pub const fn piece(self) -> Option<PieceId> {
        match self {
            Occupant::Occupied(id) => Some(id),
            Occupant::Empty | Occupant::Blocked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        let piece = Piece::new(Color::Black, Role::Knight, Square::G8);
        assert_eq!(piece.char(), 'n');
        assert_eq!(
            Piece::color_role_from_char('Q'),
            Some((Color::White, Role::Queen))
        );
        assert_eq!(Piece::color_role_from_char('x'), None);
    }

    #[test]
    fn test_occupant() {
        assert!(Occupant::Empty.is_empty());
        assert!(!Occupant::Blocked.is_empty());
        assert_eq!(Occupant::Blocked.piece(), None);
        assert_eq!(Occupant::Occupied(PieceId(3)).piece(), Some(PieceId(3)));
    }
}
