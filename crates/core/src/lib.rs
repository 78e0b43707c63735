//! Core game logic - pure, deterministic, and testable
//!
//! Everything a game of fragtris needs except the terminal: shapes and the
//! shape catalog, pieces, the occupancy grid, collision, line clearing with
//! fragmentation, the settle cascade, scoring, the piece queue and the
//! session that ties them together. No IO, no clocks.
//!
//! # Rules in brief
//!
//! - **Board**: 16 rows by 10 columns; pieces spawn with their top-left cell at (0, 4).
//! - **Rotation**: clockwise only, through fixed canonical states. There is no
//!   kick table: pushing an even-state piece into the right wall (or rightwards
//!   into other cells) earns kick credit that the next rotation spends.
//! - **Line clears**: full rows are zeroed in place. Pieces cut by a clear split
//!   into fragments, which then fall under gravity in rounds until nothing
//!   moves; rows that fill up along the way are cleared in turn.
//! - **Scoring**: `n^(1 + (n-1)/10) * 10000` per clear event of `n` rows.
//!
//! # Example
//!
//! ```
//! use tui_fragtris_core::GameSession;
//! use tui_fragtris_types::{GameAction, PieceKind};
//!
//! let mut session = GameSession::new(12345);
//! session.spawn(Some(PieceKind::O));
//!
//! session.apply_action(GameAction::MoveLeft);
//! session.apply_action(GameAction::Drop);
//!
//! assert!(session.active().is_none());
//! assert_eq!(session.resting().len(), 1);
//! assert_eq!(session.score(), 0.0);
//! ```

pub mod catalog;
pub mod clear;
pub mod collision;
pub mod events;
pub mod grid;
pub mod highscores;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod settle;
pub mod shape;
pub mod snapshot;
pub mod store;

pub use tui_fragtris_types as types;

pub use catalog::{canonical, classify, outline, FragmentShape, Outline, ShapeClass};
pub use clear::{clear_lines, ClearReport};
pub use collision::RotationPreview;
pub use events::GameEvent;
pub use grid::{GridCache, OccupancyGrid};
pub use highscores::{record_score, MemoryScoreStore, ScoreStore};
pub use piece::{Piece, PieceId, TetKind};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::line_clear_score;
pub use session::{GameSession, SettleMode};
pub use settle::{run_cascade, Cascade, CascadeStep, CascadeSummary};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
pub use store::PieceStore;
