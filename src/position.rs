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

use core::{error, fmt};

use arrayvec::ArrayVec;

use crate::{
    attacks::Attackers,
    m::{MoveDescriptor, MoveKind},
    san, Board, ByCastlingSide, ByColor, CastlingSide, Color, PieceId, Role,
};

/// Maximum number of pieces per side.
pub const MAX_PIECES_PER_COLOR: usize = 16;

/// Error when a position cannot be set up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// A side has more than [`MAX_PIECES_PER_COLOR`] pieces.
    TooManyPieces,
    /// A side has no king.
    MissingKing,
    /// A side has more than one king.
    TooManyKings,
    /// A pawn stands on the first or last rank.
    PawnsOnBackrank,
    /// A castling right without the unmoved king and rook it needs.
    InvalidCastlingRights,
    /// The en passant square does not follow a double pawn push.
    InvalidEpSquare,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            PositionError::TooManyPieces => "too many pieces of one color",
            PositionError::MissingKing => "missing king",
            PositionError::TooManyKings => "too many kings",
            PositionError::PawnsOnBackrank => "pawns on backrank",
            PositionError::InvalidCastlingRights => "invalid castling rights",
            PositionError::InvalidEpSquare => "invalid en passant square",
        })
    }
}

impl error::Error for PositionError {}

/// Error when a move cannot be matched to a piece of the side to move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The input was not valid notation.
    Unparsed,
    /// No piece of the side to move can make this move.
    Illegal,
    /// More than one piece can make this move.
    Ambiguous,
    /// The move reaches the last rank but names no promotion piece.
    PromotionRequired,
    /// A promotion piece is named for a move that does not promote.
    UnexpectedPromotion,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ResolveError::Unparsed => "invalid notation",
            ResolveError::Illegal => "no piece can make this move",
            ResolveError::Ambiguous => "ambiguous move",
            ResolveError::PromotionRequired => "promotion piece required",
            ResolveError::UnexpectedPromotion => "move does not promote",
        })
    }
}

impl error::Error for ResolveError {}

/// Error when playing a move that was not generated for the side to move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// The descriptor is invalid or not matched to a piece.
    Unresolved,
    /// The move is not a pseudo-legal move of the side to move.
    Illegal,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            PlayError::Unresolved => "unresolved move",
            PlayError::Illegal => "illegal move",
        })
    }
}

impl error::Error for PlayError {}

/// One side of the game: the pieces it still owns and whether its last
/// move was a double pawn push.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Player {
    color: Color,
    pieces: ArrayVec<PieceId, MAX_PIECES_PER_COLOR>,
    double_push: Option<PieceId>,
}

impl Player {
    fn new(color: Color) -> Player {
        Player {
            color,
            pieces: ArrayVec::new(),
            double_push: None,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Pieces not yet captured, in creation order.
    #[inline]
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    /// The pawn that has just made a double push, capturable en passant on
    /// the next ply only.
    #[inline]
    pub fn double_push(&self) -> Option<PieceId> {
        self.double_push
    }

    fn remove(&mut self, id: PieceId) {
        self.pieces.retain(|p| *p != id);
    }
}

/// A chess position: the board, both players and the side to move.
///
/// # Examples
///
/// ```
/// use mailbox_chess::{Chess, Color, Square};
///
/// let mut pos = Chess::default();
/// pos.play_san("e4")?;
/// pos.play_san("e5")?;
/// pos.play_san("Nf3")?;
///
/// assert_eq!(pos.turn(), Color::Black);
/// assert!(pos.board().piece_at(Square::F3).is_some());
/// # Ok::<_, mailbox_chess::ResolveError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Chess {
    board: Board,
    players: ByColor<Player>,
    turn: Color,
}

impl Chess {
    /// Sets up a position from the pieces on `board`, taking their
    /// movement history as given.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::TooManyPieces`] if a side has more than
    /// [`MAX_PIECES_PER_COLOR`] pieces.
    pub fn from_board(board: Board, turn: Color) -> Result<Chess, PositionError> {
        let mut players = ByColor::new_with(Player::new);
        for (id, piece) in board.pieces() {
            players
                .get_mut(piece.color)
                .pieces
                .try_push(id)
                .map_err(|_| PositionError::TooManyPieces)?;
        }
        Ok(Chess {
            board,
            players,
            turn,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn player(&self, color: Color) -> &Player {
        self.players.get(color)
    }

    /// The side to move.
    #[inline]
    pub fn us(&self) -> &Player {
        self.player(self.turn)
    }

    /// The side not to move.
    #[inline]
    pub fn them(&self) -> &Player {
        self.player(!self.turn)
    }

    pub(crate) fn set_double_push(&mut self, color: Color, pawn: Option<PieceId>) {
        self.players.get_mut(color).double_push = pawn;
    }

    /// Pieces giving check to the king of the side to move.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::Chess;
    ///
    /// let mut pos = Chess::default();
    /// for san in ["e4", "f5", "Qh5"] {
    ///     pos.play_san(san)?;
    /// }
    /// assert!(pos.is_check());
    /// assert_eq!(pos.checkers().len(), 1);
    /// # Ok::<_, mailbox_chess::ResolveError>(())
    /// ```
    pub fn checkers(&self) -> Attackers {
        self.board
            .king_of(self.turn)
            .map_or_else(Attackers::new, |king| {
                self.board
                    .attackers_of(self.board.piece(king).square, !self.turn)
            })
    }

    pub fn is_check(&self) -> bool {
        !self.checkers().is_empty()
    }

    /// Tests if `color` could still castle on `side` later in the game: the
    /// king and the rook are on their starting squares and have not moved.
    pub fn has_castling_right(&self, color: Color, side: CastlingSide) -> bool {
        let unmoved = |role: Role, sq| {
            self.board.piece_at(sq).is_some_and(|(_, piece)| {
                piece.color == color && piece.role == role && !piece.has_moved
            })
        };
        unmoved(Role::King, CastlingSide::king_from(color))
            && unmoved(Role::Rook, side.rook_from(color))
    }

    /// Castling rights of both sides.
    pub fn castling_rights(&self) -> ByColor<ByCastlingSide<bool>> {
        ByColor::new_with(|color| {
            ByCastlingSide::new_with(|side| self.has_castling_right(color, side))
        })
    }

    /// Matches a parsed move with the unique piece of the side to move that
    /// can make it.
    ///
    /// The piece type, the destination, the capture flag, the promotion
    /// piece and every given origin component must agree with a generated
    /// move.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if no piece or more than one piece
    /// qualifies.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::{Chess, ResolveError, san};
    ///
    /// let pos = Chess::default();
    /// assert!(pos.try_resolve(&san::parse("e4")).is_ok());
    /// assert_eq!(pos.try_resolve(&san::parse("e5")), Err(ResolveError::Illegal));
    /// assert_eq!(pos.try_resolve(&san::parse("exd3")), Err(ResolveError::Illegal));
    /// assert_eq!(pos.try_resolve(&san::parse("e9")), Err(ResolveError::Unparsed));
    /// ```
    pub fn try_resolve(&self, m: &MoveDescriptor) -> Result<MoveDescriptor, ResolveError> {
        match m.kind {
            MoveKind::Invalid => Err(ResolveError::Unparsed),
            MoveKind::CastleKingSide | MoveKind::CastleQueenSide => {
                let king = self.board.king_of(self.turn).ok_or(ResolveError::Illegal)?;
                self.moves_of(king)
                    .into_iter()
                    .find(|candidate| candidate.kind == m.kind)
                    .ok_or(ResolveError::Illegal)
            }
            MoveKind::Normal => self.resolve_normal(m),
        }
    }

    fn resolve_normal(&self, m: &MoveDescriptor) -> Result<MoveDescriptor, ResolveError> {
        let to = m.to.ok_or(ResolveError::Unparsed)?;

        let mut found = None;
        let mut ambiguous = false;
        let mut promotion_required = false;
        let mut unexpected_promotion = false;

        for &id in self.us().pieces() {
            let piece = self.board.piece(id);
            if piece.role != m.role || !m.from.matches(piece.square) {
                continue;
            }
            for candidate in self.moves_of(id) {
                if candidate.kind != MoveKind::Normal
                    || candidate.to != Some(to)
                    || candidate.capture != m.capture
                {
                    continue;
                }
                match (candidate.promotion, m.promotion) {
                    (Some(_), None) => promotion_required = true,
                    (None, Some(_)) => unexpected_promotion = true,
                    (a, b) if a == b => {
                        if found.is_some() {
                            ambiguous = true;
                        }
                        found = Some(candidate);
                    }
                    _ => (),
                }
            }
        }

        match found {
            Some(_) if ambiguous => Err(ResolveError::Ambiguous),
            Some(candidate) => Ok(candidate),
            None if promotion_required => Err(ResolveError::PromotionRequired),
            None if unexpected_promotion => Err(ResolveError::UnexpectedPromotion),
            None => Err(ResolveError::Illegal),
        }
    }

    /// Like [`Chess::try_resolve()`], but reports every failure as
    /// [`MoveDescriptor::INVALID`].
    pub fn resolve(&self, m: &MoveDescriptor) -> MoveDescriptor {
        self.try_resolve(m).unwrap_or_else(|err| {
            log::debug!("rejecting {m} for {}: {err}", self.turn);
            MoveDescriptor::INVALID
        })
    }

    /// Plays a resolved move of the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if `m` is not one of the moves generated for a
    /// piece of the side to move. The position is unchanged in that case.
    pub fn play(&mut self, m: &MoveDescriptor) -> Result<(), PlayError> {
        let id = m
            .piece
            .filter(|_| m.is_resolved())
            .ok_or(PlayError::Unresolved)?;
        let piece = self.board.piece(id);
        if piece.color != self.turn || !self.moves_of(id).contains(m) {
            return Err(PlayError::Illegal);
        }
        self.play_unchecked(id, m);
        Ok(())
    }

    /// Parses, resolves and plays a move.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the move cannot be resolved. The
    /// position is unchanged in that case.
    pub fn play_san(&mut self, line: &str) -> Result<MoveDescriptor, ResolveError> {
        let m = self.try_resolve(&san::parse(line)).inspect_err(|err| {
            log::debug!("rejecting {line:?} for {}: {err}", self.turn);
        })?;
        if let Some(id) = m.piece {
            self.play_unchecked(id, &m);
        }
        Ok(m)
    }

    fn play_unchecked(&mut self, id: PieceId, m: &MoveDescriptor) {
        let color = self.turn;

        // Eligibility for en passant lasts exactly one ply.
        self.set_double_push(Color::White, None);
        self.set_double_push(Color::Black, None);

        if let Some(victim) = m.captured {
            self.board.remove(victim);
            self.players.get_mut(!color).remove(victim);
        }

        if let Some(side) = m.castling_side() {
            if let Some((rook, _)) = self.board.piece_at(side.rook_from(color)) {
                self.board.relocate(id, side.king_to(color));
                self.board.relocate(rook, side.rook_to(color));
            }
        } else if let Some(to) = m.to {
            self.board.relocate(id, to);
            if let Some(role) = m.promotion {
                self.board.set_role(id, role);
            }
        }

        if m.double_push {
            self.set_double_push(color, Some(id));
        }

        log::trace!("{color} played {m}");
        self.turn = !color;
    }
}

impl Default for Chess {
    fn default() -> Chess {
        let board = Board::new();
        let mut players = ByColor::new_with(Player::new);
        for (id, piece) in board.pieces() {
            players.get_mut(piece.color).pieces.push(id);
        }
        Chess {
            board,
            players,
            turn: Color::White,
        }
    }
}
