//! JSONL event log: one JSON object per gameplay event.
//!
//! Every line carries `type`, `seq` (per-log counter starting at 1) and `ts`
//! (unix millis), followed by the event's own fields:
//!
//! ```json
//! {"seq":3,"ts":1700000000000,"type":"linesCleared","rows":[15],"scoreDelta":10000.0,"removed":[1],"fragments":[]}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GameEvent, PieceId, TetKind};

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum EventBody<'a> {
    Spawned {
        id: u32,
        kind: &'static str,
    },
    Landed {
        id: u32,
        row: i8,
        col: i8,
    },
    #[serde(rename_all = "camelCase")]
    LinesCleared {
        rows: &'a [u8],
        score_delta: f64,
        removed: Vec<u32>,
        fragments: Vec<u32>,
    },
    Settled {
        rounds: usize,
    },
    GameOver {
        score: f64,
    },
}

impl<'a> From<&'a GameEvent> for EventBody<'a> {
    fn from(event: &'a GameEvent) -> Self {
        match event {
            GameEvent::Spawned { id, kind } => EventBody::Spawned {
                id: id.0,
                kind: kind_name(*kind),
            },
            GameEvent::Landed { id, row, col } => EventBody::Landed {
                id: id.0,
                row: *row,
                col: *col,
            },
            GameEvent::LinesCleared {
                rows,
                score_delta,
                removed,
                fragments,
            } => EventBody::LinesCleared {
                rows,
                score_delta: *score_delta,
                removed: ids(removed),
                fragments: ids(fragments),
            },
            GameEvent::Settled { rounds } => EventBody::Settled { rounds: *rounds },
            GameEvent::GameOver { score } => EventBody::GameOver { score: *score },
        }
    }
}

#[derive(Debug, Serialize)]
struct Record<'a> {
    seq: u64,
    ts: u64,
    #[serde(flatten)]
    body: EventBody<'a>,
}

fn kind_name(kind: TetKind) -> &'static str {
    match kind {
        TetKind::Standard(kind) => kind.as_str(),
        TetKind::Fragment => "fragment",
    }
}

fn ids(list: &[PieceId]) -> Vec<u32> {
    list.iter().map(|id| id.0).collect()
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Appends events to a writer, one JSON object per line.
pub struct EventLog<W: Write = BufWriter<File>> {
    out: W,
    seq: u64,
    line: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            line: Vec::with_capacity(256),
        }
    }

    /// Lines written so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn write(&mut self, event: &GameEvent) -> Result<()> {
        self.write_at(event, now_ms())
    }

    pub fn write_all<'a, I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a GameEvent>,
    {
        for event in events {
            self.write(event)?;
        }
        Ok(())
    }

    fn write_at(&mut self, event: &GameEvent, ts: u64) -> Result<()> {
        let record = Record {
            seq: self.seq + 1,
            ts,
            body: EventBody::from(event),
        };
        self.line.clear();
        serde_json::to_writer(&mut self.line, &record)?;
        self.line.push(b'\n');
        self.out.write_all(&self.line)?;
        self.seq += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
