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

//! Parse algebraic notation into unresolved [`MoveDescriptor`]s.
//!
//! Input is matched against the [`Grammar`] table in priority order and the
//! first match wins. The grammars are built from disjoint token classes, so
//! at most one of them can match.
//!
//! # Examples
//!
//! ```
//! use mailbox_chess::{san, File, MoveKind, Role, Square};
//!
//! let m = san::parse("exd5");
//! assert_eq!(m.kind, MoveKind::Normal);
//! assert_eq!(m.role, Role::Pawn);
//! assert_eq!(m.from.file, Some(File::E));
//! assert_eq!(m.to, Some(Square::D5));
//! assert!(m.capture);
//!
//! // Bad input never panics.
//! assert!(san::parse("K9").is_invalid());
//! ```
//!
//! Parsed moves still need to be matched with a piece:
//!
//! ```
//! use mailbox_chess::{san, Chess, Square};
//!
//! let pos = Chess::default();
//! let m = pos.resolve(&san::parse("Nf3"));
//! assert_eq!(m.from.to_square(), Some(Square::G1));
//! ```

use core::{error, fmt, str::FromStr};

use crate::{
    m::MoveDescriptor,
    CastlingSide, File, Origin, Rank, Role, Square,
};

/// Error when parsing a syntactically invalid move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSanError;

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid san")
    }
}

impl error::Error for ParseSanError {}

/// A class of input characters.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Token {
    /// `K`, `Q`, `R`, `B` or `N`.
    Piece,
    /// `Q`, `R`, `B` or `N`.
    Promotion,
    /// `a` to `h`.
    File,
    /// `1` to `8`.
    Rank,
    /// `x`.
    Capture,
    /// `=`.
    Equals,
    /// `O` or `0`.
    Castle,
    /// `-`.
    Dash,
}

impl Token {
    pub const fn accepts(self, ch: u8) -> bool {
        match self {
            Token::Piece => matches!(ch, b'K' | b'Q' | b'R' | b'B' | b'N'),
            Token::Promotion => matches!(ch, b'Q' | b'R' | b'B' | b'N'),
            Token::File => matches!(ch, b'a'..=b'h'),
            Token::Rank => matches!(ch, b'1'..=b'8'),
            Token::Capture => ch == b'x',
            Token::Equals => ch == b'=',
            Token::Castle => matches!(ch, b'O' | b'0'),
            Token::Dash => ch == b'-',
        }
    }

    /// Tests if some character belongs to both classes.
    pub const fn overlaps(self, other: Token) -> bool {
        matches!(
            (self, other),
            (Token::Piece | Token::Promotion, Token::Piece | Token::Promotion)
                | (Token::File, Token::File)
                | (Token::Rank, Token::Rank)
                | (Token::Capture, Token::Capture)
                | (Token::Equals, Token::Equals)
                | (Token::Castle, Token::Castle)
                | (Token::Dash, Token::Dash)
        )
    }
}

/// The notation patterns, in priority order.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Grammar {
    /// `e4`
    PawnPush,
    /// `e8=Q`
    PawnPromotion,
    /// `exd5`
    PawnCapture,
    /// `exd8=Q`
    PawnCapturePromotion,
    /// `Nf3`
    PieceMove,
    /// `Nxf3`
    PieceCapture,
    /// `Nbd2`
    PieceMoveByFile,
    /// `Nbxd2`
    PieceCaptureByFile,
    /// `R1a3`
    PieceMoveByRank,
    /// `R1xa3`
    PieceCaptureByRank,
    /// `Qh4e1`
    PieceMoveBySquare,
    /// `Qh4xe1`
    PieceCaptureBySquare,
    /// `O-O-O`
    CastleQueenSide,
    /// `O-O`
    CastleKingSide,
}

impl Grammar {
    /// The token sequence a line must match exactly.
    pub const fn tokens(self) -> &'static [Token] {
        use Token::{Capture, Castle, Dash, Equals, File, Piece, Promotion, Rank};
        match self {
            Grammar::PawnPush => &[File, Rank],
            Grammar::PawnPromotion => &[File, Rank, Equals, Promotion],
            Grammar::PawnCapture => &[File, Capture, File, Rank],
            Grammar::PawnCapturePromotion => &[File, Capture, File, Rank, Equals, Promotion],
            Grammar::PieceMove => &[Piece, File, Rank],
            Grammar::PieceCapture => &[Piece, Capture, File, Rank],
            Grammar::PieceMoveByFile => &[Piece, File, File, Rank],
            Grammar::PieceCaptureByFile => &[Piece, File, Capture, File, Rank],
            Grammar::PieceMoveByRank => &[Piece, Rank, File, Rank],
            Grammar::PieceCaptureByRank => &[Piece, Rank, Capture, File, Rank],
            Grammar::PieceMoveBySquare => &[Piece, File, Rank, File, Rank],
            Grammar::PieceCaptureBySquare => &[Piece, File, Rank, Capture, File, Rank],
            Grammar::CastleQueenSide => &[Castle, Dash, Castle, Dash, Castle],
            Grammar::CastleKingSide => &[Castle, Dash, Castle],
        }
    }

    /// Tests if `ascii` matches the token sequence exactly.
    pub fn matches(self, ascii: &[u8]) -> bool {
        let tokens = self.tokens();
        tokens.len() == ascii.len()
            && tokens
                .iter()
                .zip(ascii)
                .all(|(token, &ch)| token.accepts(ch))
    }

    /// Finds the first grammar that matches `ascii`.
    pub fn find(ascii: &[u8]) -> Option<Grammar> {
        Grammar::ALL.into_iter().find(|grammar| grammar.matches(ascii))
    }

    /// All grammars, in priority order.
    pub const ALL: [Grammar; 14] = [
        Grammar::PawnPush,
        Grammar::PawnPromotion,
        Grammar::PawnCapture,
        Grammar::PawnCapturePromotion,
        Grammar::PieceMove,
        Grammar::PieceCapture,
        Grammar::PieceMoveByFile,
        Grammar::PieceCaptureByFile,
        Grammar::PieceMoveByRank,
        Grammar::PieceCaptureByRank,
        Grammar::PieceMoveBySquare,
        Grammar::PieceCaptureBySquare,
        Grammar::CastleQueenSide,
        Grammar::CastleKingSide,
    ];
}

impl MoveDescriptor {
    /// Parses a move in algebraic notation. Surrounding whitespace and a
    /// single trailing `+` or `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if no [`Grammar`] matches.
    pub fn from_ascii(ascii: &[u8]) -> Result<MoveDescriptor, ParseSanError> {
        let mut ascii = ascii.trim_ascii();
        if let [rest @ .., b'+' | b'#'] = ascii {
            ascii = rest;
        }

        let grammar = Grammar::find(ascii).ok_or(ParseSanError)?;
        match grammar {
            Grammar::CastleKingSide => return Ok(MoveDescriptor::castle(CastlingSide::KingSide)),
            Grammar::CastleQueenSide => {
                return Ok(MoveDescriptor::castle(CastlingSide::QueenSide))
            }
            _ => (),
        }

        let mut role = Role::Pawn;
        let mut files = [None; 2];
        let mut ranks = [None; 2];
        let mut capture = false;
        let mut promotion = None;
        let mut after_equals = false;

        for (&token, &ch) in grammar.tokens().iter().zip(ascii) {
            let ch = char::from(ch);
            match token {
                Token::Piece | Token::Promotion => {
                    let parsed = Role::from_char(ch).ok_or(ParseSanError)?;
                    if after_equals {
                        promotion = Some(parsed);
                    } else {
                        role = parsed;
                    }
                }
                Token::File => files = [files[1], File::from_char(ch)],
                Token::Rank => ranks = [ranks[1], Rank::from_char(ch)],
                Token::Capture => capture = true,
                Token::Equals => after_equals = true,
                Token::Castle | Token::Dash => (),
            }
        }

        let [from_file, to_file] = files;
        let [from_rank, to_rank] = ranks;
        let to = Square::from_coords(
            to_file.ok_or(ParseSanError)?,
            to_rank.ok_or(ParseSanError)?,
        );
        Ok(MoveDescriptor {
            from: Origin {
                file: from_file,
                rank: from_rank,
            },
            capture,
            promotion,
            ..MoveDescriptor::normal(role, to)
        })
    }
}

impl FromStr for MoveDescriptor {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<MoveDescriptor, ParseSanError> {
        MoveDescriptor::from_ascii(san.as_bytes())
    }
}

/// Parses a line of input. Anything unparsable yields
/// [`MoveDescriptor::INVALID`].
///
/// # Examples
///
/// ```
/// use mailbox_chess::{san, MoveKind};
///
/// assert_eq!(san::parse("O-O").kind, MoveKind::CastleKingSide);
/// assert_eq!(san::parse("O-O-O").kind, MoveKind::CastleQueenSide);
/// assert_eq!(san::parse("z9").kind, MoveKind::Invalid);
/// ```
pub fn parse(line: &str) -> MoveDescriptor {
    MoveDescriptor::from_ascii(line.as_bytes()).unwrap_or(MoveDescriptor::INVALID)
}
