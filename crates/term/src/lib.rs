//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: no widget toolkit, just a
//! framebuffer of styled cells that [`GameView`] paints from a
//! [`core::GameSnapshot`](crate::core::GameSnapshot) and [`TerminalRenderer`]
//! diff-flushes through crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_fragtris_core as core;
pub use tui_fragtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{marker_color, AnchorY, GameView, SidePanel, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, ChangedRuns, Run, TerminalRenderer};
