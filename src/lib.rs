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

//! A chess rule engine on a padded mailbox board.
//!
//! The 8×8 playing area is surrounded by a ring of sentinel cells, so ray
//! casting and knight jumps never need bounds checks: running into the
//! ring looks just like running into a piece.
//!
//! # Examples
//!
//! Generate pseudo-legal moves in the starting position:
//!
//! ```
//! use mailbox_chess::Chess;
//!
//! let pos = Chess::default();
//! assert_eq!(pos.pseudo_legal_moves().len(), 20);
//! ```
//!
//! Parse, resolve and play moves:
//!
//! ```
//! use mailbox_chess::{san, Chess, Square};
//!
//! let mut pos = Chess::default();
//!
//! let m = pos.resolve(&san::parse("Nf3"));
//! assert_eq!(m.from.to_square(), Some(Square::G1));
//! pos.play(&m)?;
//!
//! // Unparsable or unresolvable input yields an invalid descriptor.
//! assert!(pos.resolve(&san::parse("Nf3")).is_invalid());
//! assert!(pos.resolve(&san::parse("z9")).is_invalid());
//! # Ok::<_, mailbox_chess::PlayError>(())
//! ```
//!
//! Detect attacks and checks:
//!
//! ```
//! use mailbox_chess::{Chess, Color, Square};
//!
//! let pos = Chess::default();
//! assert!(pos.board().is_attacked(Square::F3, Color::White));
//! assert!(!pos.is_check());
//! ```
//!
//! Also supports [FEN](fen) for setting up positions.
//!
//! # Feature flags
//!
//! * `alloc`: Enables the [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html)
//!   crate.
//! * `std`: Implies `alloc`. Enabled by default.
//!   For `no_std` environments, this must be disabled with `default-features = false`.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   [`Color`], [`Role`] and [`Square`].
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for [`Color`], [`Role`], [`File`] and [`Rank`].
//!
//! # Logging
//!
//! Rejected moves are reported through the [`log`](https://docs.rs/log)
//! facade at `debug` level, played moves at `trace` level. No logger is
//! installed by this crate.

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod castling_side;
mod color;
mod m;
mod movegen;
mod position;
mod role;
mod square;
mod types;
mod util;

pub mod attacks;
pub mod board;
pub mod fen;
pub mod san;

pub use attacks::Attackers;
pub use board::{Board, PlaceError};
pub use castling_side::{ByCastlingSide, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use m::{MoveDescriptor, MoveKind, MoveList, Origin};
pub use position::{Chess, PlayError, Player, PositionError, ResolveError, MAX_PIECES_PER_COLOR};
pub use role::{
    Movement, ParseRoleError, Role, BISHOP_DELTAS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DELTAS,
};
pub use square::{
    Delta, File, ParseSquareError, Rank, Square, BOARD_SIZE, GRID_CELLS, GRID_SIZE, PADDING,
};
pub use types::{Occupant, Piece, PieceId};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for PieceId {}
