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

use core::{
    fmt,
    fmt::{Display, Write as _},
};

use arrayvec::ArrayVec;

use crate::{CastlingSide, File, PieceId, Rank, Role, Square};

/// Kind of a [`MoveDescriptor`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum MoveKind {
    /// Any move that is not castling, including captures, en passant and
    /// promotions.
    Normal,
    /// `O-O`.
    CastleKingSide,
    /// `O-O-O`.
    CastleQueenSide,
    /// Unparsable or unresolvable input.
    Invalid,
}

impl MoveKind {
    pub const fn from_castling_side(side: CastlingSide) -> MoveKind {
        match side {
            CastlingSide::KingSide => MoveKind::CastleKingSide,
            CastlingSide::QueenSide => MoveKind::CastleQueenSide,
        }
    }

    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self {
            MoveKind::CastleKingSide => Some(CastlingSide::KingSide),
            MoveKind::CastleQueenSide => Some(CastlingSide::QueenSide),
            MoveKind::Normal | MoveKind::Invalid => None,
        }
    }
}

/// Origin of a move, possibly only partially known.
///
/// Parsed notation usually carries no origin, or only the file or rank
/// needed for disambiguation. Generated moves always have both.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Origin {
    pub file: Option<File>,
    pub rank: Option<Rank>,
}

impl Origin {
    /// Nothing known about the origin.
    pub const UNKNOWN: Origin = Origin {
        file: None,
        rank: None,
    };

    /// A fully known origin.
    pub const fn square(sq: Square) -> Origin {
        Origin {
            file: sq.file(),
            rank: sq.rank(),
        }
    }

    /// The origin square, if fully known.
    pub const fn to_square(self) -> Option<Square> {
        match (self.file, self.rank) {
            (Some(file), Some(rank)) => Some(Square::from_coords(file, rank)),
            _ => None,
        }
    }

    /// Tests if `sq` agrees with every known component.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::{File, Origin, Square};
    ///
    /// let origin = Origin { file: Some(File::E), rank: None };
    /// assert!(origin.matches(Square::E2));
    /// assert!(!origin.matches(Square::D2));
    /// assert!(Origin::UNKNOWN.matches(Square::H8));
    /// ```
    pub fn matches(self, sq: Square) -> bool {
        self.file.map_or(true, |file| sq.file() == Some(file))
            && self.rank.map_or(true, |rank| sq.rank() == Some(rank))
    }
}

/// A move, from freshly parsed notation up to a fully resolved move.
///
/// Descriptors are plain values. The acting piece, the captured piece and
/// the en passant pawn are referred to by [`PieceId`], which stays valid for
/// the life of the board.
///
/// Castling descriptors use the king as acting piece: `from` is the king's
/// square and `to` is its destination.
///
/// # Display
///
/// `MoveDescriptor` implements [`Display`] in the same notation that
/// [`parse()`](crate::san::parse) accepts. Pieces show every known origin
/// component, pawns show the origin file on captures only.
///
/// ```
/// use mailbox_chess::{Chess, Square};
///
/// let pos = Chess::default();
/// let (knight, _) = pos.board().piece_at(Square::G1).expect("knight");
/// let moves = pos.moves_of(knight);
/// assert_eq!(moves[0].to_string(), "Ng1h3");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct MoveDescriptor {
    pub kind: MoveKind,
    /// Type of the acting piece.
    pub role: Role,
    /// The acting piece, once resolved.
    pub piece: Option<PieceId>,
    pub from: Origin,
    /// Destination of the acting piece, once known.
    pub to: Option<Square>,
    pub capture: bool,
    /// The piece taken by this move, once resolved. For en passant this is
    /// not the piece on `to`.
    pub captured: Option<PieceId>,
    pub promotion: Option<Role>,
    /// Set for a two-square pawn advance.
    pub double_push: bool,
}

impl MoveDescriptor {
    /// The descriptor for input that could not be parsed or resolved.
    pub const INVALID: MoveDescriptor = MoveDescriptor {
        kind: MoveKind::Invalid,
        role: Role::Pawn,
        piece: None,
        from: Origin::UNKNOWN,
        to: None,
        capture: false,
        captured: None,
        promotion: None,
        double_push: false,
    };

    /// An unresolved move of a `role` to `to`.
    pub const fn normal(role: Role, to: Square) -> MoveDescriptor {
        MoveDescriptor {
            kind: MoveKind::Normal,
            role,
            to: Some(to),
            ..MoveDescriptor::INVALID
        }
    }

    /// An unresolved castling move.
    pub const fn castle(side: CastlingSide) -> MoveDescriptor {
        MoveDescriptor {
            kind: MoveKind::from_castling_side(side),
            role: Role::King,
            ..MoveDescriptor::INVALID
        }
    }

    #[inline]
    pub const fn is_invalid(&self) -> bool {
        matches!(self.kind, MoveKind::Invalid)
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.kind.castling_side().is_some()
    }

    #[inline]
    pub const fn castling_side(&self) -> Option<CastlingSide> {
        self.kind.castling_side()
    }

    /// Tests if the move has been matched to a concrete piece.
    #[inline]
    pub const fn is_resolved(&self) -> bool {
        !self.is_invalid() && self.piece.is_some()
    }
}

impl Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Invalid => return f.write_str("(invalid)"),
            MoveKind::CastleKingSide => return f.write_str("O-O"),
            MoveKind::CastleQueenSide => return f.write_str("O-O-O"),
            MoveKind::Normal => (),
        }

        if self.role == Role::Pawn {
            if self.capture {
                if let Some(file) = self.from.file {
                    f.write_char(file.char())?;
                }
            }
        } else {
            f.write_char(self.role.upper_char())?;
            if let Some(file) = self.from.file {
                f.write_char(file.char())?;
            }
            if let Some(rank) = self.from.rank {
                f.write_char(rank.char())?;
            }
        }
        if self.capture {
            f.write_char('x')?;
        }
        if let Some(to) = self.to {
            write!(f, "{to}")?;
        }
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.upper_char())?;
        }
        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough for the pseudo-legal moves of all pieces of one
/// side.
///
/// # Example
///
/// ```
/// use mailbox_chess::{Chess, Role};
///
/// let pos = Chess::default();
/// let mut moves = pos.pseudo_legal_moves();
/// moves.retain(|m| m.role == Role::Pawn);
/// assert_eq!(moves.len(), 16);
/// ```
pub type MoveList = ArrayVec<MoveDescriptor, 512>;

#[cfg(test)]
mod tests {
    #[cfg(feature = "alloc")]
    use alloc::string::ToString;
    use core::mem;

    use super::*;

    #[test]
    fn test_descriptor_size() {
        assert!(mem::size_of::<MoveDescriptor>() <= 16);
    }

    #[test]
    fn test_castle() {
        let m = MoveDescriptor::castle(CastlingSide::QueenSide);
        assert!(m.is_castle());
        assert_eq!(m.castling_side(), Some(CastlingSide::QueenSide));
        assert_eq!(m.role, Role::King);
        assert!(!m.is_resolved());
        assert!(!MoveDescriptor::INVALID.is_resolved());
    }

    #[test]
    fn test_origin() {
        let origin = Origin::square(Square::C7);
        assert_eq!(origin.to_square(), Some(Square::C7));
        assert!(origin.matches(Square::C7));
        assert!(!origin.matches(Square::C6));
        assert_eq!(Origin::UNKNOWN.to_square(), None);
        let rank_only = Origin {
            file: None,
            rank: Some(Rank::Seventh),
        };
        assert!(rank_only.matches(Square::A7));
        assert!(!rank_only.matches(Square::A6));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_display() {
        let mut m = MoveDescriptor::normal(Role::Pawn, Square::D5);
        m.capture = true;
        m.from = Origin::square(Square::E4);
        assert_eq!(m.to_string(), "exd5");

        let mut m = MoveDescriptor::normal(Role::Pawn, Square::E8);
        m.from = Origin::square(Square::E7);
        m.promotion = Some(Role::Knight);
        assert_eq!(m.to_string(), "e8=N");

        let mut m = MoveDescriptor::normal(Role::Rook, Square::D1);
        m.from.file = Some(File::A);
        assert_eq!(m.to_string(), "Rad1");

        assert_eq!(MoveDescriptor::castle(CastlingSide::KingSide).to_string(), "O-O");
        assert_eq!(MoveDescriptor::INVALID.to_string(), "(invalid)");
    }
}
