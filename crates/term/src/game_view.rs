//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! Pure, no I/O. Board cells are `cell_w` x `cell_h` characters inside a
//! one-character border; the side panel sits two columns right of the frame
//! and is skipped when the viewport is too narrow.

use crate::core::snapshot::SnapshotCells;
use crate::core::{canonical, GameSnapshot, ShapeClass};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_COLS, BOARD_ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 14;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Panel data that lives outside the session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SidePanel<'a> {
    /// Highest first.
    pub high_scores: &'a [f64],
    /// Rank the last finished game took, highlighted in the list.
    pub last_rank: Option<usize>,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares a cell in most terminal fonts.
        Self::new(2, 1)
    }
}

/// Top-left of the board frame in framebuffer coordinates.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_COLS as u16 * self.cell_w + 2,
            BOARD_ROWS as u16 * self.cell_h + 2,
        )
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        panel: &SidePanel<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (w, h) = self.frame_size();
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.draw_box(
            frame.x,
            frame.y,
            frame.w,
            frame.h,
            CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)),
        );

        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for row in 0..BOARD_ROWS as i8 {
            for col in 0..BOARD_COLS as i8 {
                match snap.cell(row, col) {
                    0 => self.fill_board_cell(fb, frame, row, col, '·', empty),
                    marker => self.fill_board_cell(fb, frame, row, col, '█', solid(marker)),
                }
            }
        }

        if let Some(preview) = &snap.preview {
            // Unregistered shapes have no outline and get no ghost.
            if !preview.outline.is_empty() {
                self.draw_cells(fb, frame, &preview.cells, '░', |m| {
                    CellStyle::new(marker_color(m).shade(60), BOARD_BG).dim()
                });
            }
        }
        if let Some(active) = &snap.active {
            self.draw_cells(fb, frame, &active.cells, '█', |m| solid(m).bold());
        }

        self.draw_side_panel(fb, snap, panel, viewport, frame);

        if snap.paused {
            self.draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, panel: &SidePanel<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, panel, viewport, &mut fb);
        fb
    }

    fn draw_cells(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cells: &SnapshotCells,
        ch: char,
        style: impl Fn(u8) -> CellStyle,
    ) {
        for &(row, col, marker) in cells {
            self.fill_board_cell(fb, frame, row, col, ch, style(marker));
        }
    }

    /// Off-board cells are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: i8,
        col: i8,
        ch: char,
        style: CellStyle,
    ) {
        if row < 0 || col < 0 || row >= BOARD_ROWS as i8 || col >= BOARD_COLS as i8 {
            return;
        }
        let px = frame.x + 1 + col as u16 * self.cell_w;
        let py = frame.y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        panel: &SidePanel<'_>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let mut y = frame.y;

        fb.put_str(x, y, "SCORE", label);
        fb.put_score(x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        fb.put_str(x, y + 1, piece_letter(snap.next_kind), solid(snap.next_kind.marker()));
        self.draw_mini_piece(fb, x + 3, y + 1, snap.next_kind);
        y += 4;

        fb.put_str(x, y, "SHAPE", label);
        match &snap.active {
            Some(active) => put_class(fb, x, y + 1, active.class, value),
            None => fb.put_str(x, y + 1, "-", value),
        };
        y += 3;

        fb.put_str(x, y, "PIECES", label);
        let end = fb.put_score(x, y + 1, snap.live_pieces as f64, value);
        if snap.settling {
            fb.put_str(end + 1, y + 1, "settling", value.dim());
        }
        y += 3;

        if panel.high_scores.is_empty() || y >= viewport.height {
            return;
        }
        fb.put_str(x, y, "HIGH SCORES", label);
        y += 1;
        for (rank, &score) in panel.high_scores.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let style = if panel.last_rank == Some(rank) {
                value.bold()
            } else {
                value
            };
            let end = fb.put_score(x, y, (rank + 1) as f64, style);
            let end = fb.put_str(end, y, ". ", style);
            fb.put_score(end, y, score, style);
            y += 1;
        }
    }

    /// Canonical spawn shape, one character per cell.
    fn draw_mini_piece(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = solid(kind.marker());
        for (r, c, _) in canonical(kind, Rotation::North).cells() {
            fb.put_char(x + c as u16, y + r as u16, '▪', style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let y = frame.y.saturating_add(frame.h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

/// `T1` for canonical states, the fragment name otherwise. Returns the column after the text.
fn put_class(fb: &mut FrameBuffer, x: u16, y: u16, class: ShapeClass, style: CellStyle) -> u16 {
    match class {
        ShapeClass::Canonical { kind, state } => {
            let end = fb.put_str(x, y, piece_letter(kind), style);
            fb.put_score(end, y, f64::from(state), style)
        }
        ShapeClass::Fragment(fragment) => fb.put_str(x, y, fragment.as_str(), style),
        ShapeClass::Unknown => fb.put_str(x, y, "?", style),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::J => "J",
        PieceKind::L => "L",
        PieceKind::O => "O",
        PieceKind::S => "S",
        PieceKind::T => "T",
        PieceKind::Z => "Z",
    }
}

fn solid(marker: u8) -> CellStyle {
    CellStyle::new(marker_color(marker), BOARD_BG)
}

/// Color of a cell marker. Fragments keep the marker of the piece they came from.
pub fn marker_color(marker: u8) -> Rgb {
    match PieceKind::from_marker(marker) {
        Some(PieceKind::I) => Rgb::new(80, 220, 220),
        Some(PieceKind::J) => Rgb::new(80, 120, 220),
        Some(PieceKind::L) => Rgb::new(255, 165, 0),
        Some(PieceKind::O) => Rgb::new(240, 220, 80),
        Some(PieceKind::S) => Rgb::new(100, 220, 120),
        Some(PieceKind::T) => Rgb::new(200, 120, 220),
        Some(PieceKind::Z) => Rgb::new(220, 80, 80),
        None => Rgb::new(160, 160, 160),
    }
}
