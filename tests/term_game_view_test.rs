use tui_fragtris::core::{GameSession, Shape};
use tui_fragtris::term::{marker_color, AnchorY, FrameBuffer, GameView, SidePanel, Viewport};
use tui_fragtris::types::PieceKind;

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 16*1 => 20x16
    // plus border => 22x18
    assert_eq!(view.frame_size(), (22, 18));
    let fb = view.render(&snap, &SidePanel::default(), Viewport::new(22, 18));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 17).unwrap().ch, '└');
    assert_eq!(fb.get(21, 17).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_resting_cell_as_two_chars_wide() {
    let mut session = GameSession::new(1);
    session.place_fragment(15, 0, Shape::from_rows(&[&[3]]));
    let snap = session.snapshot();

    let view = GameView::default();
    let fb = view.render(&snap, &SidePanel::default(), Viewport::new(22, 18));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 15);
    let left = fb.get(x0, y0).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(left.style.fg, marker_color(3));
    assert_ne!(fb.get(x0 + 2, y0).unwrap().ch, '█');
}

#[test]
fn term_view_draws_active_piece_and_rotation_ghost() {
    let mut session = GameSession::new(1);
    session.spawn(Some(PieceKind::I));
    session.tick();
    let snap = session.snapshot();
    assert!(snap.preview.is_some());

    let fb = GameView::default().render(&snap, &SidePanel::default(), Viewport::new(22, 18));
    let text = screen_text(&fb);
    assert!(text.contains('█'));
    assert!(text.contains('░'));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut session = GameSession::new(1);
    session.spawn(Some(PieceKind::T));
    let mut snap = session.snapshot();
    snap.score = 21_435.0;

    let scores = [30_000.0, 21_435.0];
    let panel = SidePanel {
        high_scores: &scores,
        last_rank: Some(1),
    };
    let fb = GameView::default().render(&snap, &panel, Viewport::new(60, 22));

    let text = screen_text(&fb);
    assert!(text.contains("SCORE"));
    assert!(text.contains("21,435"));
    assert!(text.contains("NEXT"));
    assert!(text.contains("SHAPE"));
    assert!(text.contains("HIGH SCORES"));
    assert!(text.contains("1. 30,000"));
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = GameSession::new(1).snapshot();
    let fb = GameView::default().render(&snap, &SidePanel::default(), Viewport::new(30, 18));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameSession::new(1).snapshot();
    let view = GameView::default();

    // Board frame is 18 rows tall (16 + border).
    let fb = view.render(&snap, &SidePanel::default(), Viewport::new(22, 30));

    // start_y = (30 - 18) / 2 = 6 => top-left corner at (0,6).
    assert_eq!(fb.get(0, 6).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameSession::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, &SidePanel::default(), Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut session = GameSession::new(1);
    session.spawn(Some(PieceKind::O));
    session.toggle_pause();
    let fb = GameView::default().render(&session.snapshot(), &SidePanel::default(), Viewport::new(22, 18));
    assert!(screen_text(&fb).contains("PAUSED"));

    let mut session = GameSession::new(1);
    session.place_fragment(0, 0, Shape::from_rows(&[&[1, 1, 1, 1], &[1, 1, 1, 1]]));
    session.place_fragment(0, 4, Shape::from_rows(&[&[1, 1, 1, 1], &[1, 1, 1, 1]]));
    session.tick();
    assert!(session.game_over());
    let fb = GameView::default().render(&session.snapshot(), &SidePanel::default(), Viewport::new(22, 18));
    assert!(screen_text(&fb).contains("GAME OVER"));
}
