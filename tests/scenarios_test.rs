use tui_fragtris::core::{canonical, line_clear_score, GameEvent, GameSession, Piece, SettleMode, Shape};
use tui_fragtris::types::{Direction, GameAction, PieceKind, Rotation, BOARD_COLS, BOARD_ROWS};

fn mono() -> Shape {
    Shape::from_rows(&[&[1]])
}

fn fill_row_except(session: &mut GameSession, row: i8, skip: &[i8]) {
    for col in 0..BOARD_COLS as i8 {
        if !skip.contains(&col) {
            session.place_fragment(row, col, mono());
        }
    }
}

fn occupied_cells(session: &GameSession) -> Vec<(i8, i8)> {
    let mut cells: Vec<(i8, i8)> = session
        .live_pieces()
        .flat_map(|p: &Piece| p.cells().map(|(r, c, _)| (r, c)).collect::<Vec<_>>())
        .collect();
    cells.sort_unstable();
    cells
}

fn assert_board_consistent(session: &GameSession) {
    let cells = occupied_cells(session);
    for pair in cells.windows(2) {
        assert_ne!(pair[0], pair[1], "two pieces share cell {:?}", pair[0]);
    }
    for &(r, c) in &cells {
        assert!((0..BOARD_ROWS as i8).contains(&r), "row {r} off the board");
        assert!((0..BOARD_COLS as i8).contains(&c), "col {c} off the board");
    }
}

#[test]
fn horizontal_i_completing_bottom_row_scores_and_vanishes() {
    let mut session = GameSession::new(1);
    fill_row_except(&mut session, 15, &[6, 7, 8, 9]);
    session.spawn(Some(PieceKind::I));
    assert!(session.move_active(Direction::Right));
    assert!(session.move_active(Direction::Right));
    let active = session.active().unwrap();
    assert_eq!(active.col + 3, 9);

    assert!(session.apply_action(GameAction::Drop));

    assert_eq!(session.score(), 10_000.0);
    assert!(session.active().is_none());
    assert_eq!(session.live_pieces().count(), 0);
}

#[test]
fn vertical_i_cut_by_middle_row_splits_into_two_fragments() {
    let mut session = GameSession::new(1).with_mode(SettleMode::PerTick);
    fill_row_except(&mut session, 14, &[3]);
    session.place_fragment(15, 0, mono());

    session.spawn(Some(PieceKind::I));
    assert!(session.rotate_active());
    assert!(session.move_active(Direction::Left));
    let id = session.active().unwrap().id;
    assert_eq!(session.active().unwrap().col, 3);
    session.drop_active();

    assert_eq!(session.score(), 10_000.0);
    assert!(session.is_settling());

    // Only the cut bar remains besides the row-15 block.
    let bar: Vec<&Piece> = session.resting().iter().filter(|p| p.col == 3).collect();
    assert_eq!(bar.len(), 2);
    assert_eq!(bar[0].id, id);
    assert!(bar.iter().all(|p| p.is_fragment()));
    assert_eq!((bar[0].row, bar[0].col), (12, 3));
    assert_eq!(bar[0].shape, Shape::from_rows(&[&[1], &[1]]));
    assert_eq!((bar[1].row, bar[1].col), (15, 3));
    assert_eq!(bar[1].shape, Shape::from_rows(&[&[1]]));
    assert_board_consistent(&session);

    // The upper half falls onto the lower one.
    session.finish_settling();
    assert!(!session.is_settling());
    assert_eq!(occupied_cells(&session), vec![(13, 3), (14, 3), (15, 0), (15, 3)]);
    assert_eq!(session.score(), 10_000.0);
}

#[test]
fn left_moves_at_the_wall_always_fail() {
    for kind in PieceKind::ALL {
        let mut session = GameSession::new(1);
        session.spawn(Some(kind));
        while session.move_active(Direction::Left) {}
        let col = session.active().unwrap().col;
        assert_eq!(col, 0, "{kind:?} stopped short of the wall");
        for _ in 0..5 {
            assert!(!session.move_active(Direction::Left));
            assert_eq!(session.active().unwrap().col, col);
        }
    }
}

#[test]
fn rotations_walk_the_catalog() {
    for kind in PieceKind::ALL {
        if kind == PieceKind::O {
            continue;
        }
        let mut session = GameSession::new(1);
        session.spawn(Some(kind));
        // Clear of the ceiling so every state fits.
        for _ in 0..4 {
            session.move_active(Direction::Down);
        }
        let mut expected = Rotation::North;
        for _ in 0..4 {
            assert!(session.rotate_active(), "{kind:?} failed to rotate");
            expected = expected.rotate_cw();
            let active = session.active().unwrap();
            assert_eq!(active.rotation, expected);
            assert_eq!(active.shape, canonical(kind, expected));
        }
    }
}

#[test]
fn o_piece_never_rotates() {
    let mut session = GameSession::new(1);
    session.spawn(Some(PieceKind::O));
    // Pressing into the right wall earns no credit either.
    for _ in 0..6 {
        session.move_active(Direction::Right);
    }
    for _ in 0..4 {
        assert!(!session.rotate_active());
        let active = session.active().unwrap();
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(active.pivot_offset, 0);
    }
    assert!(session.pivot_preview().is_none());
}

#[test]
fn double_clear_uses_the_growth_formula() {
    let mut session = GameSession::new(1);
    fill_row_except(&mut session, 15, &[4, 5]);
    fill_row_except(&mut session, 14, &[4, 5]);
    session.spawn(Some(PieceKind::O));
    session.drop_active();

    let expected = 2f64.powf(1.1) * 10_000.0;
    assert!((session.score() - expected).abs() < 1e-6);
    assert_eq!(session.score(), line_clear_score(2));
    assert_eq!(session.live_pieces().count(), 0);
}

#[test]
fn landing_without_full_row_keeps_score() {
    let mut session = GameSession::new(1);
    fill_row_except(&mut session, 15, &[0, 4, 5]);
    session.spawn(Some(PieceKind::O));
    session.drop_active();
    assert_eq!(session.score(), 0.0);
    assert_board_consistent(&session);
}

#[test]
fn settle_modes_agree_on_a_cascade() {
    let play = |mode| {
        let mut session = GameSession::new(5).with_mode(mode);
        fill_row_except(&mut session, 15, &[9]);
        session.place_fragment(10, 0, mono());
        fill_row_except(&mut session, 14, &[0, 9]);
        session.spawn(Some(PieceKind::I));
        session.rotate_active();
        while session.move_active(Direction::Right) {}
        session.drop_active();
        let mut ticks = 0;
        while session.is_settling() {
            session.tick();
            ticks += 1;
            assert!(ticks < 100);
        }
        session
    };
    let instant = play(SettleMode::Immediate);
    let ticked = play(SettleMode::PerTick);
    // The tick that ends the cascade also spawns, so compare resting pieces only.
    assert_eq!(instant.resting(), ticked.resting());
    assert!(ticked.active().is_some());
    assert_eq!(instant.score(), ticked.score());
    assert!(instant.score() > 10_000.0);
    assert_board_consistent(&instant);
}

#[test]
fn events_describe_a_landing_clear() {
    let mut session = GameSession::new(1);
    fill_row_except(&mut session, 15, &[6, 7, 8, 9]);
    session.take_events();
    session.spawn(Some(PieceKind::I));
    session.move_active(Direction::Right);
    session.move_active(Direction::Right);
    session.drop_active();

    let names: Vec<&str> = session.take_events().iter().map(GameEvent::name).collect();
    assert_eq!(names, vec!["spawned", "landed", "linesCleared", "settled"]);
}
