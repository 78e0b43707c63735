//! Gameplay events recorded by the session for observers (event log, UI flashes).

use std::collections::VecDeque;

use crate::clear::ClearReport;
use crate::piece::{PieceId, TetKind};

/// Events kept before the oldest ones are dropped.
pub const EVENT_BUFFER_CAP: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned {
        id: PieceId,
        kind: TetKind,
    },
    /// The active piece came to rest at this anchor.
    Landed {
        id: PieceId,
        row: i8,
        col: i8,
    },
    LinesCleared {
        rows: Vec<u8>,
        score_delta: f64,
        removed: Vec<PieceId>,
        fragments: Vec<PieceId>,
    },
    /// A cascade reached its final fixed point.
    Settled {
        rounds: usize,
    },
    GameOver {
        score: f64,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::Landed { .. } => "landed",
            GameEvent::LinesCleared { .. } => "linesCleared",
            GameEvent::Settled { .. } => "settled",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}

impl From<ClearReport> for GameEvent {
    fn from(report: ClearReport) -> Self {
        GameEvent::LinesCleared {
            rows: report.rows,
            score_delta: report.score_delta,
            removed: report.removed,
            fragments: report.fragments,
        }
    }
}

/// Bounded FIFO. When full, the oldest event is discarded.
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    events: VecDeque<GameEvent>,
    dropped: u64,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.events.len() >= EVENT_BUFFER_CAP {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events discarded because nobody drained the buffer in time.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}
