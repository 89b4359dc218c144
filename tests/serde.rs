#![cfg(feature = "serde")]

use mailbox_chess::{Color, Role, Square};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Placement {
    color: Color,
    role: Role,
    square: Square,
}

#[test]
fn test_placement() {
    let placement = Placement {
        color: Color::White,
        role: Role::Knight,
        square: Square::E4,
    };
    let json = serde_json::to_string(&placement).expect("serialize");
    assert_eq!(json, r#"{"color":"white","role":"knight","square":"e4"}"#);
    assert_eq!(
        serde_json::from_str::<Placement>(&json).expect("deserialize"),
        placement
    );
}

#[test]
fn test_invalid() {
    assert!(serde_json::from_str::<Square>(r#""i9""#).is_err());
    assert!(serde_json::from_str::<Square>("4").is_err());
    assert!(serde_json::from_str::<Role>(r#""archbishop""#).is_err());
    assert!(serde_json::from_str::<Color>(r#""red""#).is_err());
}
