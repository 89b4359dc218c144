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

//! Pseudo-legal move generation.
//!
//! Moves are not filtered for leaving the own king in check. The only
//! safety test is done for castling, where no square of the castling region
//! may be attacked.

use crate::{
    m::{MoveDescriptor, MoveKind, MoveList, Origin},
    CastlingSide, Chess, Color, Delta, Movement, Occupant, Piece, PieceId, Role, Square,
};

impl Chess {
    /// Generates the pseudo-legal moves of a piece.
    ///
    /// The list is empty if the piece has been captured or cannot move.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::{Chess, Square};
    ///
    /// let pos = Chess::default();
    /// let (pawn, _) = pos.board().piece_at(Square::E2).expect("pawn");
    /// let moves = pos.moves_of(pawn);
    /// assert_eq!(moves.len(), 2);
    /// assert!(moves.iter().any(|m| m.double_push && m.to == Some(Square::E4)));
    /// ```
    pub fn moves_of(&self, id: PieceId) -> MoveList {
        let mut moves = MoveList::new();
        let piece = self.board().piece(id);
        if piece.captured {
            return moves;
        }
        match piece.role.movement() {
            Movement::Step(deltas) => self.gen_steps(&mut moves, id, piece, deltas),
            Movement::Slide(deltas) => self.gen_slides(&mut moves, id, piece, deltas),
            Movement::Pawn => self.gen_pawn(&mut moves, id, piece),
        }
        if piece.role == Role::King {
            self.gen_castling(&mut moves, id, piece);
        }
        moves
    }

    /// Generates the pseudo-legal moves of the piece on `sq`, or nothing if
    /// the square is empty or outside the playing area.
    pub fn moves_from(&self, sq: Square) -> MoveList {
        match self.board().occupant_at(sq) {
            Occupant::Occupied(id) => self.moves_of(id),
            Occupant::Empty | Occupant::Blocked => MoveList::new(),
        }
    }

    /// Generates the pseudo-legal moves of every piece of the side to move.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for &id in self.us().pieces() {
            moves.extend(self.moves_of(id));
        }
        moves
    }

    fn gen_steps(&self, moves: &mut MoveList, id: PieceId, piece: &Piece, deltas: &[Delta]) {
        for &delta in deltas {
            let to = piece.square.translate(delta);
            match self.board().occupant_at(to) {
                Occupant::Empty => moves.push(quiet(id, piece, to)),
                Occupant::Occupied(victim) if self.board().piece(victim).color != piece.color => {
                    moves.push(capture(id, piece, to, victim));
                }
                Occupant::Occupied(_) | Occupant::Blocked => (),
            }
        }
    }

    fn gen_slides(&self, moves: &mut MoveList, id: PieceId, piece: &Piece, deltas: &[Delta]) {
        for (&delta, extent) in deltas.iter().zip(self.board().crawl(piece.square, deltas)) {
            let mut to = piece.square;
            for _ in 1..extent {
                to = to.translate(delta);
                moves.push(quiet(id, piece, to));
            }
            let blocker = to.translate(delta);
            if let Some((victim, other)) = self.board().piece_at(blocker) {
                if other.color != piece.color {
                    moves.push(capture(id, piece, blocker, victim));
                }
            }
        }
    }

    fn gen_pawn(&self, moves: &mut MoveList, id: PieceId, piece: &Piece) {
        let forward = piece.color.forward();

        for file_delta in [-1, 1] {
            let to = piece.square.translate(Delta::new(file_delta, forward));
            match self.board().occupant_at(to) {
                Occupant::Occupied(victim) if self.board().piece(victim).color != piece.color => {
                    push_pawn_move(moves, piece.color, capture(id, piece, to, victim));
                }
                Occupant::Empty => {
                    let beside = piece.square.translate(Delta::new(file_delta, 0));
                    if let Some(victim) = self.en_passant_victim(piece.color, beside) {
                        moves.push(capture(id, piece, to, victim));
                    }
                }
                Occupant::Occupied(_) | Occupant::Blocked => (),
            }
        }

        let single = piece.square.translate(Delta::new(0, forward));
        if self.board().occupant_at(single).is_empty() {
            push_pawn_move(moves, piece.color, quiet(id, piece, single));

            let double = single.translate(Delta::new(0, forward));
            if !piece.has_moved
                && piece.square.rank() == Some(piece.color.pawn_rank())
                && self.board().occupant_at(double).is_empty()
            {
                moves.push(MoveDescriptor {
                    double_push: true,
                    ..quiet(id, piece, double)
                });
            }
        }
    }

    /// The enemy pawn on `sq` if it has just made a double push.
    fn en_passant_victim(&self, us: Color, sq: Square) -> Option<PieceId> {
        let (victim, pawn) = self.board().piece_at(sq)?;
        (pawn.color != us
            && pawn.role == Role::Pawn
            && self.player(pawn.color).double_push() == Some(victim))
        .then_some(victim)
    }

    fn gen_castling(&self, moves: &mut MoveList, king: PieceId, piece: &Piece) {
        if piece.has_moved {
            return;
        }
        for side in CastlingSide::ALL {
            if self.can_castle(king, piece, side) {
                moves.push(MoveDescriptor {
                    kind: MoveKind::from_castling_side(side),
                    ..quiet(king, piece, side.king_to(piece.color))
                });
            } else {
                log::trace!("{} cannot castle {:?}", piece.color, side);
            }
        }
    }

    fn can_castle(&self, king: PieceId, piece: &Piece, side: CastlingSide) -> bool {
        let region = self.board().castling_region(piece.color, side);
        if region.last() != Some(&piece.square) {
            return false;
        }

        let Some((rook, rook_piece)) = self.board().piece_at(region[0]) else {
            return false;
        };
        if rook_piece.color != piece.color || rook_piece.role != Role::Rook || rook_piece.has_moved
        {
            return false;
        }

        region.iter().all(|&sq| {
            let free = match self.board().occupant_at(sq) {
                Occupant::Empty => true,
                Occupant::Occupied(id) => id == king || id == rook,
                Occupant::Blocked => false,
            };
            free && !self.board().is_attacked(sq, !piece.color)
        })
    }
}

fn quiet(id: PieceId, piece: &Piece, to: Square) -> MoveDescriptor {
    MoveDescriptor {
        piece: Some(id),
        from: Origin::square(piece.square),
        ..MoveDescriptor::normal(piece.role, to)
    }
}

fn capture(id: PieceId, piece: &Piece, to: Square, victim: PieceId) -> MoveDescriptor {
    MoveDescriptor {
        capture: true,
        captured: Some(victim),
        ..quiet(id, piece, to)
    }
}

fn push_pawn_move(moves: &mut MoveList, color: Color, m: MoveDescriptor) {
    if m.to.and_then(Square::rank) == Some(color.promotion_rank()) {
        // Queen first, down to knight.
        for role in Role::ALL.into_iter().rev().filter(|r| r.is_promotion_target()) {
            moves.push(MoveDescriptor {
                promotion: Some(role),
                ..m
            });
        }
    } else {
        moves.push(m);
    }
}
