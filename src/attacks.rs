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

//! Attack detection by ray casting.
//!
//! # Examples
//!
//! ```
//! use mailbox_chess::{Board, Color, Square};
//!
//! let board = Board::default();
//!
//! // f3 is covered by the g1 knight and the e2 and g2 pawns.
//! assert_eq!(board.attackers_of(Square::F3, Color::White).len(), 3);
//!
//! // Nothing reaches the middle of the board yet.
//! assert!(board.attackers_of(Square::E4, Color::White).is_empty());
//! ```

use arrayvec::ArrayVec;

use crate::{
    role::{BISHOP_DELTAS, KNIGHT_DELTAS, ROOK_DELTAS},
    Board, Color, Delta, PieceId, Role, Square,
};

/// Pieces attacking a square. Eight rays and eight knight jumps bound the
/// number of attackers.
pub type Attackers = ArrayVec<PieceId, 16>;

impl Board {
    /// Finds the pieces of `attacker` that attack `sq`.
    ///
    /// Straight and diagonal directions are scanned with a single ray each
    /// and only the first piece on the ray is considered. Knights are looked
    /// up directly. The result is empty if `sq` is not attacked.
    ///
    /// Occupancy of `sq` itself is ignored, so this also tells whether an
    /// empty square is covered. Squares outside the playing area have no
    /// attackers.
    pub fn attackers_of(&self, sq: Square, attacker: Color) -> Attackers {
        let mut attackers = Attackers::new();
        if !sq.is_playable() {
            return attackers;
        }

        for delta in ROOK_DELTAS {
            if let Some(id) = self.ray_attacker(sq, delta, attacker, |role, extent| {
                matches!(role, Role::Rook | Role::Queen) || (role == Role::King && extent == 1)
            }) {
                attackers.push(id);
            }
        }

        for delta in BISHOP_DELTAS {
            if let Some(id) = self.ray_attacker(sq, delta, attacker, |role, extent| match role {
                Role::Bishop | Role::Queen => true,
                Role::King => extent == 1,
                // Looking back from the target, the pawn sits one rank
                // behind it in its own marching direction.
                Role::Pawn => extent == 1 && delta.rank == -attacker.forward(),
                Role::Knight | Role::Rook => false,
            }) {
                attackers.push(id);
            }
        }

        for delta in KNIGHT_DELTAS {
            if let Some((id, piece)) = self.piece_at(sq.translate(delta)) {
                if piece.color == attacker && piece.role == Role::Knight {
                    attackers.push(id);
                }
            }
        }

        attackers
    }

    /// Tests if any piece of `attacker` attacks `sq`.
    pub fn is_attacked(&self, sq: Square, attacker: Color) -> bool {
        !self.attackers_of(sq, attacker).is_empty()
    }

    fn ray_attacker<F>(&self, sq: Square, delta: Delta, attacker: Color, attacks: F) -> Option<PieceId>
    where
        F: FnOnce(Role, u8) -> bool,
    {
        let extent = self.extent(sq, delta);
        let blocker = sq.translate(delta * extent as i8);
        let (id, piece) = self.piece_at(blocker)?;
        (piece.color == attacker && attacks(piece.role, extent)).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, KING_DELTAS};

    fn board_with(pieces: &[(Color, Role, Square)]) -> Board {
        let mut board = Board::empty();
        for &(color, role, sq) in pieces {
            board
                .place(Piece::new(color, role, sq))
                .expect("free square");
        }
        board
    }

    #[test]
    fn test_rook_attacks_until_blocked() {
        let board = board_with(&[
            (Color::White, Role::Rook, Square::A1),
            (Color::Black, Role::Knight, Square::A5),
        ]);
        assert_eq!(board.attackers_of(Square::A4, Color::White).len(), 1);
        assert_eq!(board.attackers_of(Square::A5, Color::White).len(), 1);
        assert!(board.attackers_of(Square::A6, Color::White).is_empty());
        assert!(board.attackers_of(Square::A4, Color::Black).is_empty());
    }

    #[test]
    fn test_king_attacks_only_adjacent() {
        let board = board_with(&[(Color::Black, Role::King, Square::E5)]);
        assert!(board.is_attacked(Square::E4, Color::Black));
        assert!(board.is_attacked(Square::D6, Color::Black));
        assert!(!board.is_attacked(Square::E3, Color::Black));
        assert!(!board.is_attacked(Square::C7, Color::Black));
    }

    #[test]
    fn test_pawn_attacks_only_forward_diagonals() {
        let board = board_with(&[
            (Color::White, Role::Pawn, Square::E4),
            (Color::Black, Role::Pawn, Square::C6),
        ]);
        assert!(board.is_attacked(Square::D5, Color::White));
        assert!(board.is_attacked(Square::F5, Color::White));
        assert!(!board.is_attacked(Square::E5, Color::White));
        assert!(!board.is_attacked(Square::D3, Color::White));
        assert!(!board.is_attacked(Square::G6, Color::White));
        assert!(!board.is_attacked(Square::C6, Color::White));

        assert!(board.is_attacked(Square::B5, Color::Black));
        assert!(board.is_attacked(Square::D5, Color::Black));
        assert!(!board.is_attacked(Square::D7, Color::Black));
        assert!(!board.is_attacked(Square::C5, Color::Black));
        assert!(!board.is_attacked(Square::A4, Color::Black));
        assert!(!board.is_attacked(Square::E4, Color::Black));
    }

    #[test]
    fn test_no_attackers_outside_the_playing_area() {
        let board = board_with(&[
            (Color::White, Role::Queen, Square::A1),
            (Color::White, Role::Knight, Square::B3),
            (Color::White, Role::Pawn, Square::B2),
        ]);
        for delta in KING_DELTAS.into_iter().chain(KNIGHT_DELTAS) {
            let outside = Square::A1.translate(delta);
            if !outside.is_playable() {
                assert!(board.attackers_of(outside, Color::White).is_empty());
            }
        }
        let far = Square::A1.translate(Delta::new(-2, -2)).translate(Delta::new(-3, 0));
        assert!(!board.is_attacked(far, Color::White));
    }

    #[test]
    fn test_knight_attacks_from_the_edge() {
        let board = board_with(&[(Color::White, Role::Knight, Square::A1)]);
        assert!(board.is_attacked(Square::B3, Color::White));
        assert!(board.is_attacked(Square::C2, Color::White));
        assert!(!board.is_attacked(Square::B2, Color::White));
    }

    #[test]
    fn test_multiple_attackers() {
        let board = board_with(&[
            (Color::White, Role::Queen, Square::D1),
            (Color::White, Role::Bishop, Square::A4),
            (Color::White, Role::Knight, Square::F4),
            (Color::White, Role::Rook, Square::H5),
            (Color::White, Role::Pawn, Square::C4),
        ]);
        let mut attackers: ArrayVec<Role, 16> = board
            .attackers_of(Square::D5, Color::White)
            .into_iter()
            .map(|id| board.piece(id).role)
            .collect();
        attackers.sort();
        assert_eq!(
            attackers.as_slice(),
            &[Role::Pawn, Role::Knight, Role::Rook, Role::Queen]
        );
    }
}
