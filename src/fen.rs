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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! Only the placement, turn, castling and en passant fields are used. Move
//! counters are accepted and ignored.
//!
//! # Examples
//!
//! ```
//! use mailbox_chess::{fen::Fen, Color, Square};
//!
//! let fen: Fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6".parse()?;
//! let pos = fen.into_position()?;
//! assert_eq!(pos.turn(), Color::White);
//!
//! let black_pawn = pos.player(Color::Black).double_push().expect("double push");
//! assert_eq!(pos.board().piece(black_pawn).square, Square::E5);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{error, fmt, fmt::Write as _, str::FromStr};

use arrayvec::ArrayVec;

use crate::{
    board::MAX_PIECES, position::MAX_PIECES_PER_COLOR, Board, ByCastlingSide, ByColor,
    CastlingSide, Chess, Color, Delta, File, Piece, PieceId, PositionError, Rank, Role, Square,
};

/// Error when parsing a syntactically invalid FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
        })
    }
}

impl error::Error for ParseFenError {}

impl Board {
    /// Parses the placement part of a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError::InvalidBoard`] if the placement is malformed
    /// or holds more than [`MAX_PIECES`] pieces.
    pub fn from_board_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
        let mut board = Board::empty();
        let mut rank = 7i8;
        let mut file = 0i8;

        for &ch in board_fen {
            match ch {
                b'/' if file == 8 && rank > 0 => {
                    file = 0;
                    rank -= 1;
                }
                b'1'..=b'8' => {
                    file += (ch - b'0') as i8;
                    if file > 8 {
                        return Err(ParseFenError::InvalidBoard);
                    }
                }
                _ => {
                    let (color, role) = Piece::color_role_from_char(char::from(ch))
                        .ok_or(ParseFenError::InvalidBoard)?;
                    let sq = Square::from_coords(
                        File::try_from(file).map_err(|_| ParseFenError::InvalidBoard)?,
                        Rank::try_from(rank).map_err(|_| ParseFenError::InvalidBoard)?,
                    );
                    board
                        .place(Piece::new(color, role, sq))
                        .map_err(|_| ParseFenError::InvalidBoard)?;
                    file += 1;
                }
            }
        }

        if rank == 0 && file == 8 {
            Ok(board)
        } else {
            Err(ParseFenError::InvalidBoard)
        }
    }
}

/// A parsed FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub castling_rights: ByColor<ByCastlingSide<bool>>,
    pub ep_square: Option<Square>,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen {
            board: Board::default(),
            turn: Color::White,
            castling_rights: ByColor::new_with(|_| ByCastlingSide::new_with(|_| true)),
            ep_square: None,
        }
    }
}

impl Fen {
    pub fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            castling_rights: ByColor::default(),
            ..Fen::default()
        }
    }

    /// Parses a FEN.
    ///
    /// Missing fields default to white to move, no castling rights and no
    /// en passant square.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if `fen` is not syntactically valid.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        let mut result = Fen {
            board: Board::from_board_fen(board_part)?,
            ..Fen::empty()
        };

        if let Some(turn_part) = parts.next() {
            result.turn = match turn_part {
                [ch] => Color::from_char(char::from(*ch)).ok_or(ParseFenError::InvalidTurn)?,
                _ => return Err(ParseFenError::InvalidTurn),
            };
        }

        if let Some(castling_part) = parts.next() {
            if castling_part != b"-" {
                for &ch in castling_part {
                    let (color, side) = match ch {
                        b'K' => (Color::White, CastlingSide::KingSide),
                        b'Q' => (Color::White, CastlingSide::QueenSide),
                        b'k' => (Color::Black, CastlingSide::KingSide),
                        b'q' => (Color::Black, CastlingSide::QueenSide),
                        _ => return Err(ParseFenError::InvalidCastling),
                    };
                    let right = result.castling_rights.get_mut(color).get_mut(side);
                    if *right {
                        return Err(ParseFenError::InvalidCastling);
                    }
                    *right = true;
                }
            }
        }

        if let Some(ep_part) = parts.next() {
            if ep_part != b"-" {
                result.ep_square = Some(
                    Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?,
                );
            }
        }

        for counter in parts.by_ref().take(2) {
            if counter.is_empty() || !counter.iter().all(u8::is_ascii_digit) {
                return Err(ParseFenError::InvalidFen);
            }
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(result)
    }

    /// Describes a position.
    pub fn from_position(pos: &Chess) -> Fen {
        let them = pos.them();
        Fen {
            board: pos.board().clone(),
            turn: pos.turn(),
            castling_rights: pos.castling_rights(),
            ep_square: them.double_push().map(|pawn| {
                pos.board()
                    .piece(pawn)
                    .square
                    .translate(Delta::new(0, -them.color().forward()))
            }),
        }
    }

    /// Sets up the described position.
    ///
    /// Pawns off their starting rank count as moved. Kings and rooks count
    /// as unmoved only where a castling right names them. An en passant
    /// square marks the pawn in front of it as having just made a double
    /// push.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if the position is not a valid setup.
    pub fn into_position(self) -> Result<Chess, PositionError> {
        let Fen {
            mut board,
            turn,
            castling_rights,
            ep_square,
        } = self;

        let pieces: ArrayVec<(PieceId, Piece), MAX_PIECES> =
            board.pieces().map(|(id, piece)| (id, *piece)).collect();

        for color in Color::ALL {
            let of_color = || pieces.iter().filter(move |(_, piece)| piece.color == color);
            if of_color().count() > MAX_PIECES_PER_COLOR {
                return Err(PositionError::TooManyPieces);
            }
            match of_color().filter(|(_, piece)| piece.role == Role::King).count() {
                0 => return Err(PositionError::MissingKing),
                1 => (),
                _ => return Err(PositionError::TooManyKings),
            }
        }

        for &(id, piece) in &pieces {
            let rights = castling_rights.get(piece.color);
            let unmoved = match piece.role {
                Role::Pawn => {
                    if matches!(piece.square.rank(), Some(Rank::First | Rank::Eighth)) {
                        return Err(PositionError::PawnsOnBackrank);
                    }
                    piece.square.rank() == Some(piece.color.pawn_rank())
                }
                Role::King => {
                    piece.square == CastlingSide::king_from(piece.color) && rights.any(|r| *r)
                }
                Role::Rook => CastlingSide::ALL.into_iter().any(|side| {
                    *rights.get(side) && piece.square == side.rook_from(piece.color)
                }),
                Role::Knight | Role::Bishop | Role::Queen => true,
            };
            board.set_has_moved(id, !unmoved);
        }

        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if !*castling_rights.get(color).get(side) {
                    continue;
                }
                let has = |role: Role, sq: Square| {
                    board.piece_at(sq).is_some_and(|(_, piece)| {
                        piece.color == color && piece.role == role
                    })
                };
                if !has(Role::King, CastlingSide::king_from(color))
                    || !has(Role::Rook, side.rook_from(color))
                {
                    return Err(PositionError::InvalidCastlingRights);
                }
            }
        }

        let double_push = match ep_square {
            Some(ep) => Some(en_passant_pawn(&board, turn, ep)?),
            None => None,
        };

        let mut pos = Chess::from_board(board, turn)?;
        pos.set_double_push(!turn, double_push);
        Ok(pos)
    }
}

/// The pawn that just passed over `ep`.
fn en_passant_pawn(board: &Board, turn: Color, ep: Square) -> Result<PieceId, PositionError> {
    let pusher = !turn;
    if ep.rank() != Some(pusher.fold_wb(Rank::Third, Rank::Sixth))
        || !board.occupant_at(ep).is_empty()
        || !board
            .occupant_at(ep.translate(Delta::new(0, -pusher.forward())))
            .is_empty()
    {
        return Err(PositionError::InvalidEpSquare);
    }
    match board.piece_at(ep.translate(Delta::new(0, pusher.forward()))) {
        Some((id, piece)) if piece.color == pusher && piece.role == Role::Pawn => Ok(id),
        _ => Err(PositionError::InvalidEpSquare),
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.board.board_fen(), self.turn.char())?;

        let mut any = false;
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if *self.castling_rights.get(color).get(side) {
                    let ch = side.char();
                    f.write_char(color.fold_wb(ch.to_ascii_uppercase(), ch))?;
                    any = true;
                }
            }
        }
        if !any {
            f.write_char('-')?;
        }

        match self.ep_square {
            Some(ep) => write!(f, " {ep}"),
            None => f.write_str(" -"),
        }
    }
}

impl Chess {
    /// Describes the position as a FEN.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::Chess;
    ///
    /// let mut pos = Chess::default();
    /// pos.play_san("d4")?;
    /// assert_eq!(
    ///     pos.fen().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3"
    /// );
    /// # Ok::<_, mailbox_chess::ResolveError>(())
    /// ```
    pub fn fen(&self) -> Fen {
        Fen::from_position(self)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "alloc")]
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_default_is_start_position() {
        let pos = Fen::default().into_position().expect("valid");
        let start = Chess::default();
        assert_eq!(pos.turn(), start.turn());
        assert_eq!(pos.castling_rights(), start.castling_rights());
        assert_eq!(pos.pseudo_legal_moves().len(), 20);
        for file in File::ALL {
            for rank in Rank::ALL {
                let sq = Square::from_coords(file, rank);
                let kind = |pos: &Chess| pos.board().piece_at(sq).map(|(_, p)| (p.color, p.role));
                assert_eq!(kind(&pos), kind(&start));
            }
        }
    }

    #[test]
    fn test_invalid_board_fen() {
        for board_fen in [
            "",
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "ppppppppp/8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/7X",
            "8/8/8/8/8/8/8/44/",
        ] {
            assert_eq!(
                Board::from_board_fen(board_fen.as_bytes()),
                Err(ParseFenError::InvalidBoard),
                "{board_fen:?}"
            );
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Fen>(), Err(ParseFenError::InvalidFen));
        assert_eq!(
            "8/8/8/8/8/8/8/8 x".parse::<Fen>(),
            Err(ParseFenError::InvalidTurn)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w KK".parse::<Fen>(),
            Err(ParseFenError::InvalidCastling)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - e9".parse::<Fen>(),
            Err(ParseFenError::InvalidEpSquare)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1 x".parse::<Fen>(),
            Err(ParseFenError::InvalidFen)
        );
        assert!("8/8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>().is_ok());
    }

    #[test]
    fn test_position_errors() {
        let setup = |fen: &str| fen.parse::<Fen>().expect("syntax").into_position();
        assert_eq!(setup("8/8/8/8/8/8/8/8"), Err(PositionError::MissingKing));
        assert_eq!(
            setup("4k3/8/8/8/8/8/8/3KK3"),
            Err(PositionError::TooManyKings)
        );
        assert_eq!(
            setup("4k2P/8/8/8/8/8/8/4K3"),
            Err(PositionError::PawnsOnBackrank)
        );
        assert_eq!(
            setup("4k3/8/8/8/8/8/8/4K3 w K"),
            Err(PositionError::InvalidCastlingRights)
        );
        assert_eq!(
            setup("4k3/8/8/8/8/8/8/4K3 w - e3"),
            Err(PositionError::InvalidEpSquare)
        );
        assert_eq!(
            setup("4k3/8/8/8/4P3/8/8/4K3 w - e3"),
            Err(PositionError::InvalidEpSquare)
        );
    }

    #[test]
    fn test_movement_history() {
        let pos = "r3k2r/8/8/8/8/4P3/P7/R3K2R w Kq"
            .parse::<Fen>()
            .expect("syntax")
            .into_position()
            .expect("valid");
        let moved = |sq| {
            let (_, piece) = pos.board().piece_at(sq).expect("piece");
            piece.has_moved
        };
        assert!(!moved(Square::E1));
        assert!(!moved(Square::H1));
        assert!(moved(Square::A1));
        assert!(!moved(Square::A2));
        assert!(moved(Square::E3));
        assert!(!moved(Square::E8));
        assert!(!moved(Square::A8));
        assert!(moved(Square::H8));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_roundtrip() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            "r3k2r/8/8/8/8/4P3/P7/R3K2R w Kq -",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6",
            "4k3/8/8/8/8/8/8/4K3 b - -",
        ] {
            let pos = fen
                .parse::<Fen>()
                .expect("syntax")
                .into_position()
                .expect("valid");
            assert_eq!(pos.fen().to_string(), fen);
        }
    }
}
