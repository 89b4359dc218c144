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

use core::{error, fmt, str::FromStr};

use crate::square::Delta;

/// Orthogonal directions: right, up, down, left.
pub const ROOK_DELTAS: [Delta; 4] = [
    Delta::new(1, 0),
    Delta::new(0, 1),
    Delta::new(0, -1),
    Delta::new(-1, 0),
];

/// Diagonal directions.
pub const BISHOP_DELTAS: [Delta; 4] = [
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, 1),
    Delta::new(-1, -1),
];

/// All eight neighbours, used by kings and queens.
pub const KING_DELTAS: [Delta; 8] = [
    Delta::new(1, 1),
    Delta::new(1, 0),
    Delta::new(1, -1),
    Delta::new(0, 1),
    Delta::new(0, -1),
    Delta::new(-1, 1),
    Delta::new(-1, 0),
    Delta::new(-1, -1),
];

/// Knight jumps.
pub const KNIGHT_DELTAS: [Delta; 8] = [
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(1, 2),
    Delta::new(1, -2),
    Delta::new(-2, 1),
    Delta::new(-2, -1),
    Delta::new(-1, 2),
    Delta::new(-1, -2),
];

/// How a piece type moves across the board.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Movement {
    /// One application of each delta: kings and knights.
    Step(&'static [Delta]),
    /// Repeated application of each delta until blocked: rooks, bishops and
    /// queens.
    Slide(&'static [Delta]),
    /// Pushes, double pushes, diagonal and en passant captures.
    Pawn,
}

impl Movement {
    /// The direction vectors, empty for pawns.
    pub const fn deltas(self) -> &'static [Delta] {
        match self {
            Movement::Step(deltas) | Movement::Slide(deltas) => deltas,
            Movement::Pawn => &[],
        }
    }
}

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
///
/// # Examples
///
/// ```
/// use mailbox_chess::Role;
///
/// // Piece types are indexed from 1 to 6.
/// assert_eq!(u32::from(Role::Pawn), 1);
/// assert_eq!(u32::from(Role::King), 6);
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Role {
    /// Gets the piece type from its English letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::Role;
    ///
    /// assert_eq!(Role::from_char('K'), Some(Role::King));
    /// assert_eq!(Role::from_char('n'), Some(Role::Knight));
    ///
    /// assert_eq!(Role::from_char('X'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Role> {
        match ch {
            'P' | 'p' => Some(Role::Pawn),
            'N' | 'n' => Some(Role::Knight),
            'B' | 'b' => Some(Role::Bishop),
            'R' | 'r' => Some(Role::Rook),
            'Q' | 'q' => Some(Role::Queen),
            'K' | 'k' => Some(Role::King),
            _ => None,
        }
    }

    /// Gets the lowercase English letter for the piece type.
    pub const fn char(self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }

    /// Gets the uppercase English letter for the piece type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::Role;
    ///
    /// assert_eq!(Role::Rook.upper_char(), 'R');
    /// ```
    pub const fn upper_char(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
        }
    }

    /// Gets the English name of the piece type.
    pub const fn name(self) -> &'static str {
        match self {
            Role::Pawn => "pawn",
            Role::Knight => "knight",
            Role::Bishop => "bishop",
            Role::Rook => "rook",
            Role::Queen => "queen",
            Role::King => "king",
        }
    }

    /// Gets the movement pattern of the piece type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_chess::{Movement, Role};
    ///
    /// assert!(matches!(Role::Knight.movement(), Movement::Step(_)));
    /// assert!(matches!(Role::Queen.movement(), Movement::Slide(_)));
    /// assert_eq!(Role::Queen.movement().deltas().len(), 8);
    /// ```
    pub const fn movement(self) -> Movement {
        match self {
            Role::Pawn => Movement::Pawn,
            Role::Knight => Movement::Step(&KNIGHT_DELTAS),
            Role::Bishop => Movement::Slide(&BISHOP_DELTAS),
            Role::Rook => Movement::Slide(&ROOK_DELTAS),
            Role::Queen => Movement::Slide(&KING_DELTAS),
            Role::King => Movement::Step(&KING_DELTAS),
        }
    }

    /// Tests if a pawn may promote to this piece type.
    pub const fn is_promotion_target(self) -> bool {
        matches!(self, Role::Knight | Role::Bishop | Role::Rook | Role::Queen)
    }

    /// `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, and `King`, in this order.
    pub const ALL: [Role; 6] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when parsing an invalid piece type name.
#[derive(Clone, Debug)]
pub struct ParseRoleError;

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece type")
    }
}

impl error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Parses a lowercase name (`knight`) or a single letter (`N`).
    fn from_str(s: &str) -> Result<Role, ParseRoleError> {
        if let [ch] = *s.as_bytes() {
            return Role::from_char(char::from(ch)).ok_or(ParseRoleError);
        }
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or(ParseRoleError)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RoleVisitor;

        impl serde::de::Visitor<'_> for RoleVisitor {
            type Value = Role;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("piece type name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(RoleVisitor)
    }
}

macro_rules! int_from_role_impl {
    ($($t:ty)+) => {
        $(impl From<Role> for $t {
            #[inline]
            fn from(role: Role) -> $t {
                role as $t
            }
        })+
    }
}

int_from_role_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_char(role.char()), Some(role));
            assert_eq!(Role::from_char(role.upper_char()), Some(role));
        }
    }

    #[test]
    fn test_name_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.name().parse::<Role>().ok(), Some(role));
        }
        assert_eq!("N".parse::<Role>().ok(), Some(Role::Knight));
        assert!("Knight".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_movement() {
        assert_eq!(Role::King.movement(), Movement::Step(&KING_DELTAS));
        assert_eq!(Role::Rook.movement().deltas().len(), 4);
        assert_eq!(Role::Bishop.movement().deltas().len(), 4);
        assert!(Role::Pawn.movement().deltas().is_empty());
    }

    #[test]
    fn test_promotion_targets() {
        assert!(Role::Queen.is_promotion_target());
        assert!(Role::Knight.is_promotion_target());
        assert!(!Role::King.is_promotion_target());
        assert!(!Role::Pawn.is_promotion_target());
    }
}
