//! TUI Fragtris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and holds the pieces
//! only the binary needs: environment configuration and the JSONL event log.

pub use tui_fragtris_core as core;
pub use tui_fragtris_input as input;
pub use tui_fragtris_scores as scores;
pub use tui_fragtris_term as term;
pub use tui_fragtris_types as types;

pub mod config;
pub mod event_log;

pub use config::Config;
pub use event_log::EventLog;
