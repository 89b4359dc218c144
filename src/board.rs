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

//! The padded mailbox board.
//!
//! # Examples
//!
//! ```
//! use mailbox_chess::{Board, Occupant, Role, ROOK_DELTAS, Square};
//!
//! let board = Board::default();
//! let (_, king) = board.piece_at(Square::E1).expect("white king");
//! assert_eq!(king.role, Role::King);
//!
//! // Rook on a1 is boxed in by its own pieces.
//! let extents: Vec<u8> = board.crawl(Square::A1, &ROOK_DELTAS).collect();
//! assert_eq!(extents, [1, 1, 1, 1]);
//! ```

use core::{error, fmt, fmt::Write as _};

use arrayvec::ArrayVec;

use crate::{
    role::{BISHOP_DELTAS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DELTAS},
    square::{Delta, GRID_CELLS, GRID_SIZE, PADDING},
    ByColor, CastlingSide, Color, File, Occupant, Piece, PieceId, Rank, Role, Square,
};

/// Maximum number of pieces a board can hold.
pub const MAX_PIECES: usize = 32;

/// Furthest a pawn looks ahead in a single step (the double push).
const PAWN_REACH: i8 = 2;

const fn max_reach(deltas: &[Delta]) -> i8 {
    let mut reach = 0;
    let mut i = 0;
    while i < deltas.len() {
        if deltas[i].reach() > reach {
            reach = deltas[i].reach();
        }
        i += 1;
    }
    reach
}

// Every single application of a direction vector from a playable square must
// land inside the padded grid, so the sentinel ring doubles as bounds check.
const _: () = assert!(
    PADDING >= max_reach(&KNIGHT_DELTAS)
        && PADDING >= max_reach(&KING_DELTAS)
        && PADDING >= max_reach(&ROOK_DELTAS)
        && PADDING >= max_reach(&BISHOP_DELTAS)
        && PADDING >= PAWN_REACH
);

/// Error when placing a piece on the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlaceError {
    /// The target square is in the sentinel ring.
    NotPlayable,
    /// Another piece already stands on the target square.
    Occupied,
    /// The board already holds [`MAX_PIECES`] pieces.
    Full,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            PlaceError::NotPlayable => "square is outside the playing area",
            PlaceError::Occupied => "square is already occupied",
            PlaceError::Full => "too many pieces on the board",
        })
    }
}

impl error::Error for PlaceError {}

/// Piece positions on a board padded by a ring of sentinel cells.
///
/// The board owns every piece created on it. A [`PieceId`] stays valid for
/// the life of the board, even after the piece has been captured.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    grid: [Occupant; GRID_CELLS],
    pieces: ArrayVec<Piece, MAX_PIECES>,
}

impl Board {
    /// A board with the sentinel ring and no pieces.
    pub fn empty() -> Board {
        let mut grid = [Occupant::Empty; GRID_CELLS];
        for (index, cell) in grid.iter_mut().enumerate() {
            if !Square::from_usize(index).is_playable() {
                *cell = Occupant::Blocked;
            }
        }
        Board {
            grid,
            pieces: ArrayVec::new(),
        }
    }

    /// The standard starting position.
    pub fn new() -> Board {
        const BACKRANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, role) in File::ALL.into_iter().zip(BACKRANK) {
                board.push(Piece::new(
                    color,
                    role,
                    Square::from_coords(file, color.backrank()),
                ));
            }
            for file in File::ALL {
                board.push(Piece::new(
                    color,
                    Role::Pawn,
                    Square::from_coords(file, color.pawn_rank()),
                ));
            }
        }
        board
    }

    fn push(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len() as u8);
        self.grid[piece.square.to_usize()] = Occupant::Occupied(id);
        self.pieces.push(piece);
        id
    }

    /// Puts a new piece on the board.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError`] if the square is not a free playable square,
    /// or if the board is full.
    pub fn place(&mut self, piece: Piece) -> Result<PieceId, PlaceError> {
        // A placed piece is never a captured one.
        let piece = Piece {
            captured: false,
            ..piece
        };
        if !piece.square.is_playable() {
            return Err(PlaceError::NotPlayable);
        }
        if !self.occupant_at(piece.square).is_empty() {
            return Err(PlaceError::Occupied);
        }
        if self.pieces.is_full() {
            return Err(PlaceError::Full);
        }
        Ok(self.push(piece))
    }

    /// What is on `sq`. Squares in the sentinel ring, and anything beyond
    /// it, are [`Occupant::Blocked`].
    #[inline]
    pub fn occupant_at(&self, sq: Square) -> Occupant {
        sq.grid_index()
            .map_or(Occupant::Blocked, |index| self.grid[index])
    }

    /// The piece behind `id`, captured or not.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.to_usize()]
    }

    /// The piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(PieceId, &Piece)> {
        self.occupant_at(sq)
            .piece()
            .map(|id| (id, self.piece(id)))
    }

    /// The color of the piece on `sq`, if any.
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, piece)| piece.color)
    }

    /// Pieces still on the board, in creation order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| !piece.captured)
            .map(|(index, piece)| (PieceId(index as u8), piece))
    }

    /// Pieces of `color` still on the board.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// The king of `color`, if it is on the board.
    pub fn king_of(&self, color: Color) -> Option<PieceId> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.role == Role::King)
            .map(|(id, _)| id)
    }

    /// Number of pieces of each color still on the board.
    pub fn count_by_color(&self) -> ByColor<usize> {
        ByColor::new_with(|color| self.pieces_of(color).count())
    }

    /// The castling region of `color` on `side`. Index 0 is the rook's
    /// origin, the last square is the king's origin.
    #[inline]
    pub fn castling_region(&self, color: Color, side: CastlingSide) -> &'static [Square] {
        side.region(color)
    }

    /// Number of steps along `delta` from `origin` until an occupied cell
    /// (piece or sentinel) is reached. At least 1 from a playable square,
    /// 0 from anywhere else.
    pub fn extent(&self, origin: Square, delta: Delta) -> u8 {
        if !origin.is_playable() {
            return 0;
        }
        let mut count = 1;
        let mut sq = origin.translate(delta);
        while self.occupant_at(sq).is_empty() {
            count += 1;
            sq = sq.translate(delta);
        }
        count
    }

    /// Casts a ray from `origin` along each of `deltas` and yields, per
    /// direction, the step count at which the first occupied cell is found.
    ///
    /// A slider can make `extent - 1` quiet moves in that direction; the cell
    /// at `extent` holds the blocker.
    pub fn crawl<'a>(
        &'a self,
        origin: Square,
        deltas: &'a [Delta],
    ) -> impl ExactSizeIterator<Item = u8> + 'a {
        deltas.iter().map(move |&delta| self.extent(origin, delta))
    }

    /// Takes a captured piece off the board. Its handle stays valid.
    pub(crate) fn remove(&mut self, id: PieceId) {
        let piece = &mut self.pieces[id.to_usize()];
        if piece.captured {
            return;
        }
        piece.captured = true;
        let sq = piece.square;
        if self.grid[sq.to_usize()] == Occupant::Occupied(id) {
            self.grid[sq.to_usize()] = Occupant::Empty;
        }
    }

    /// Moves a piece to an empty playable square and marks it as moved.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        debug_assert!(to.is_playable());
        let from = self.pieces[id.to_usize()].square;
        if self.grid[from.to_usize()] == Occupant::Occupied(id) {
            self.grid[from.to_usize()] = Occupant::Empty;
        }
        self.grid[to.to_usize()] = Occupant::Occupied(id);
        let piece = &mut self.pieces[id.to_usize()];
        piece.square = to;
        piece.has_moved = true;
    }

    pub(crate) fn set_role(&mut self, id: PieceId, role: Role) {
        self.pieces[id.to_usize()].role = role;
    }

    pub(crate) fn set_has_moved(&mut self, id: PieceId, has_moved: bool) {
        self.pieces[id.to_usize()].has_moved = has_moved;
    }

    /// Placement part of a FEN, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn board_fen(&self) -> BoardFen<'_> {
        BoardFen { board: self }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

/// Displays the placement part of a FEN. See [`Board::board_fen()`].
#[derive(Debug)]
pub struct BoardFen<'a> {
    board: &'a Board,
}

impl fmt::Display for BoardFen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.board.piece_at(Square::from_coords(file, rank)) {
                    Some((_, piece)) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > Rank::First {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for grid_rank in (0..GRID_SIZE).rev() {
            for grid_file in 0..GRID_SIZE {
                let sq = Square::from_grid(grid_file, grid_rank).ok_or(fmt::Error)?;
                f.write_char(match self.occupant_at(sq) {
                    Occupant::Empty => '.',
                    Occupant::Occupied(id) => self.piece(id).char(),
                    Occupant::Blocked => 'x',
                })?;
                if grid_file < GRID_SIZE - 1 {
                    f.write_char(' ')?;
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
