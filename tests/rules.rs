use mailbox_chess::{
    fen::Fen, CastlingSide, Chess, Color, MoveKind, Occupant, ResolveError, Role, Square,
};

fn fen(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .expect("invalid fen")
        .into_position()
        .expect("invalid position")
}

fn play_all(pos: &mut Chess, moves: &[&str]) {
    for san in moves {
        pos.play_san(san).unwrap_or_else(|err| panic!("{san}: {err}"));
    }
}

fn after(moves: &[&str]) -> Chess {
    let mut pos = Chess::default();
    play_all(&mut pos, moves);
    pos
}

#[test]
fn test_apply_moves_exactly_one_piece() {
    let positions = [
        Chess::default(),
        after(&["e4", "d5"]),
        after(&["e4", "a6", "e5", "d5"]),
        fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq -"),
        fen("4k3/1P6/8/8/8/8/6p1/4K2R b K -"),
    ];

    for pos in positions {
        for m in pos.pseudo_legal_moves() {
            let id = m.piece.expect("resolved");
            let from = m.from.to_square().expect("origin");
            let color = pos.turn();
            let before = pos.board().pieces().count();

            let mut child = pos.clone();
            child.play(&m).unwrap_or_else(|err| panic!("{m}: {err}"));

            assert_eq!(child.turn(), !color);
            assert_eq!(
                child.board().pieces().count(),
                before - usize::from(m.capture),
                "{m}"
            );

            if let Some(side) = m.castling_side() {
                let rook = pos.board().occupant_at(side.rook_from(color)).piece();
                assert_eq!(
                    child.board().occupant_at(side.king_to(color)),
                    Occupant::Occupied(id)
                );
                assert_eq!(
                    child.board().occupant_at(side.rook_to(color)).piece(),
                    rook
                );
            } else {
                let to = m.to.expect("destination");
                assert_eq!(child.board().occupant_at(to), Occupant::Occupied(id), "{m}");
                assert_eq!(child.board().occupant_at(from), Occupant::Empty, "{m}");
                let piece = child.board().piece(id);
                assert_eq!(piece.square, to);
                assert!(piece.has_moved);
                assert_eq!(piece.role, m.promotion.unwrap_or(m.role));
            }

            if let Some(victim) = m.captured {
                assert!(child.board().piece(victim).captured);
                assert!(!child.player(!color).pieces().contains(&victim));
            }
        }
    }
}

#[test]
fn test_en_passant_on_next_ply_only() {
    let mut pos = after(&["e4", "a6", "e5", "f5"]);
    assert!(pos.try_resolve(&"exf6".parse().expect("san")).is_ok());

    play_all(&mut pos, &["Nf3", "d5"]);
    assert_eq!(pos.play_san("exf6"), Err(ResolveError::Illegal));

    let (victim, _) = pos.board().piece_at(Square::D5).expect("pawn");
    let m = pos.play_san("exd6").expect("en passant");
    assert_eq!(m.captured, Some(victim));
    assert!(pos.board().piece_at(Square::D5).is_none());
    assert_eq!(
        pos.board().piece_at(Square::D6).map(|(_, p)| (p.color, p.role)),
        Some((Color::White, Role::Pawn))
    );
}

#[test]
fn test_en_passant_expires() {
    let mut pos = after(&["e4", "a6", "e5", "d5", "Nf3", "Nc6"]);
    assert_eq!(pos.play_san("exd6"), Err(ResolveError::Illegal));
    assert_eq!(pos.player(Color::Black).double_push(), None);
}

#[test]
fn test_en_passant_for_black() {
    let pos = after(&["a3", "e5", "a4", "e4", "d4", "exd3"]);
    assert!(pos.board().piece_at(Square::D4).is_none());
    assert_eq!(
        pos.board().piece_at(Square::D3).map(|(_, p)| p.color),
        Some(Color::Black)
    );
    assert_eq!(pos.player(Color::White).pieces().len(), 15);
}

#[test]
fn test_en_passant_from_fen() {
    let mut pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6");
    pos.play_san("exd6").expect("en passant");
    assert!(pos.board().piece_at(Square::D5).is_none());

    let mut pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - -");
    assert_eq!(pos.play_san("exd6"), Err(ResolveError::Illegal));
}

#[test]
fn test_no_castling_in_start_position() {
    let pos = Chess::default();
    assert!(pos.pseudo_legal_moves().iter().all(|m| !m.is_castle()));
    assert_eq!(pos.clone().play_san("O-O"), Err(ResolveError::Illegal));
    assert_eq!(pos.clone().play_san("O-O-O"), Err(ResolveError::Illegal));
}

#[test]
fn test_castling() {
    let base = fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq -");

    let mut pos = base.clone();
    let m = pos.play_san("O-O").expect("king side");
    assert_eq!(m.kind, MoveKind::CastleKingSide);
    assert_eq!(
        pos.board().piece_at(Square::G1).map(|(_, p)| p.role),
        Some(Role::King)
    );
    assert_eq!(
        pos.board().piece_at(Square::F1).map(|(_, p)| p.role),
        Some(Role::Rook)
    );
    assert!(pos.board().piece_at(Square::E1).is_none());
    assert!(pos.board().piece_at(Square::H1).is_none());
    assert_eq!(pos.fen().to_string(), "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b kq -");

    let mut pos = base;
    pos.play_san("O-O-O").expect("queen side");
    assert_eq!(
        pos.board().piece_at(Square::C1).map(|(_, p)| p.role),
        Some(Role::King)
    );
    assert_eq!(
        pos.board().piece_at(Square::D1).map(|(_, p)| p.role),
        Some(Role::Rook)
    );
    pos.play_san("O-O-O").expect("black queen side");
    assert_eq!(pos.fen().to_string(), "2kr3r/pppppppp/8/8/8/8/PPPPPPPP/2KR3R w - -");
}

#[test]
fn test_castling_through_attacked_square() {
    let mut pos = fen("r3k2r/pppppppp/8/8/8/8/PPPPPrPP/R3K2R w KQkq -");
    assert!(pos.board().is_attacked(Square::F1, Color::Black));
    assert_eq!(pos.play_san("O-O"), Err(ResolveError::Illegal));
    pos.play_san("O-O-O").expect("queen side is safe");
}

#[test]
fn test_castling_region_includes_rook_side() {
    // b1 belongs to the queen side region even though the king never
    // crosses it.
    let mut pos = fen("r3k2r/pppppppp/8/8/8/n7/PPPPPPPP/R3K2R w KQkq -");
    assert!(pos.board().is_attacked(Square::B1, Color::Black));
    assert_eq!(pos.play_san("O-O-O"), Err(ResolveError::Illegal));
    pos.play_san("O-O").expect("king side is safe");
}

#[test]
fn test_moved_rook_loses_castling() {
    let mut pos = fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq -");
    play_all(&mut pos, &["Rg1", "Rg8", "Rh1", "Rh8"]);

    assert!(!pos.has_castling_right(Color::White, CastlingSide::KingSide));
    assert!(pos.has_castling_right(Color::White, CastlingSide::QueenSide));
    assert_eq!(pos.fen().to_string(), "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Qq -");
    assert_eq!(pos.clone().play_san("O-O"), Err(ResolveError::Illegal));
    pos.play_san("O-O-O").expect("queen side");
}

#[test]
fn test_moved_king_loses_castling() {
    let mut pos = fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq -");
    play_all(&mut pos, &["Kf1", "Kf8", "Ke1", "Ke8"]);
    assert_eq!(pos.fen().to_string(), "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - -");
    assert!(pos.pseudo_legal_moves().iter().all(|m| !m.is_castle()));
}

#[test]
fn test_check_detection() {
    let pos = fen("4k3/8/8/8/8/8/8/4K2r w - -");
    assert!(pos.is_check());
    let checkers = pos.checkers();
    assert_eq!(checkers.len(), 1);
    assert_eq!(pos.board().piece(checkers[0]).square, Square::H1);

    let pos = fen("4k3/8/8/8/8/8/4P3/r3K3 w - -");
    assert!(pos.is_check());

    let pos = fen("4k3/8/8/8/8/8/8/r2NK3 w - -");
    assert!(!pos.is_check());

    let pos = fen("4k3/8/8/8/8/8/3p4/4K3 w - -");
    assert!(pos.is_check());

    let pos = fen("4k3/8/8/8/8/8/4p3/4K3 w - -");
    assert!(!pos.is_check());
}

#[test]
fn test_attackers_of_ignore_own_pieces() {
    let pos = Chess::default();
    assert!(pos.board().attackers_of(Square::E2, Color::Black).is_empty());
    assert_eq!(pos.board().attackers_of(Square::E2, Color::White).len(), 4);
    assert_eq!(pos.board().attackers_of(Square::F6, Color::Black).len(), 3);
}

#[test]
fn test_pseudo_legal_moves_may_leave_king_in_check() {
    // The pinned knight may still move.
    let pos = fen("4k3/4r3/8/8/8/8/4N3/4K3 w - -");
    let moves = pos.moves_from(Square::E2);
    assert_eq!(moves.len(), 6);
}
