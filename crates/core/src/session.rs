//! Game session - everything one game owns, and the operations that drive it.
//!
//! The active piece lives outside the piece store while it falls, so the
//! cached grid never contains it. Landing moves it into the store and runs
//! the clear/settle cascade, either to completion right away or one step per
//! tick depending on [`SettleMode`]. Both modes end on the same board.

use crate::clear::clear_lines;
use crate::collision::{self, collides_bottom, collides_side, shape_fits, try_rotate, RotationPreview};
use crate::events::{EventBuffer, GameEvent};
use crate::grid::{GridCache, OccupancyGrid};
use crate::piece::{Piece, PieceId};
use crate::rng::PieceQueue;
use crate::settle::{run_cascade, Cascade, CascadeStep};
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
use crate::store::PieceStore;
use crate::types::{Direction, GameAction, PieceKind};

/// How a cascade after a line clear is paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettleMode {
    /// Run every settle round and re-clear inside the landing call.
    #[default]
    Immediate,
    /// Run one settle round (or one re-clear) per [`GameSession::tick`].
    PerTick,
}

impl SettleMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "instant" | "immediate" => Some(SettleMode::Immediate),
            "tick" => Some(SettleMode::PerTick),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettleMode::Immediate => "instant",
            SettleMode::PerTick => "tick",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    store: PieceStore,
    cache: GridCache,
    active: Option<Piece>,
    queue: PieceQueue,
    /// Kind the next unforced spawn uses. After a blocked spawn, the kind that did not fit.
    next: PieceKind,
    score: f64,
    paused: bool,
    game_over: bool,
    mode: SettleMode,
    /// Pending cascade in [`SettleMode::PerTick`].
    cascade: Option<Cascade>,
    events: EventBuffer,
    seed: u32,
}

impl GameSession {
    /// New empty board. The first piece appears on the first [`tick`](Self::tick)
    /// or an explicit [`spawn`](Self::spawn).
    pub fn new(seed: u32) -> Self {
        let mut queue = PieceQueue::new(seed);
        let next = queue.draw();
        Self {
            store: PieceStore::new(),
            cache: GridCache::new(),
            active: None,
            queue,
            next,
            score: 0.0,
            paused: false,
            game_over: false,
            mode: SettleMode::default(),
            cascade: None,
            events: EventBuffer::new(),
            seed,
        }
    }

    pub fn with_mode(mut self, mode: SettleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SettleMode {
        self.mode
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// True while a cascade is waiting for further ticks.
    pub fn is_settling(&self) -> bool {
        self.cascade.is_some()
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    /// Resting pieces in store order.
    pub fn resting(&self) -> &[Piece] {
        self.store.as_slice()
    }

    /// Resting pieces in store order, then the active piece.
    pub fn live_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.store.iter().chain(self.active.iter())
    }

    fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Spawn `forced` or the queued kind at the spawn anchor.
    ///
    /// Returns `None` without changes when a piece is already active, a
    /// cascade is pending, or the game is over. A spawn that overlaps the
    /// resting pieces ends the game: the kind is kept as the next kind and
    /// nothing else changes.
    pub fn spawn(&mut self, forced: Option<PieceKind>) -> Option<&Piece> {
        if self.game_over || self.active.is_some() || self.cascade.is_some() {
            return None;
        }
        let kind = forced.unwrap_or(self.next);
        let grid = self.cache.get(&self.store, None);
        let candidate = Piece::spawn(PieceId(0), kind);
        if !shape_fits(&candidate.shape, candidate.row, candidate.col, &grid) {
            self.next = kind;
            self.game_over = true;
            self.events.push(GameEvent::GameOver { score: self.score });
            return None;
        }

        if forced.is_none() {
            self.next = self.queue.draw();
        }
        let piece = Piece {
            id: self.store.alloc_id(),
            ..candidate
        };
        self.events.push(GameEvent::Spawned {
            id: piece.id,
            kind: piece.kind,
        });
        self.active = Some(piece);
        self.active.as_ref()
    }

    /// Move the active piece one cell.
    ///
    /// A blocked `Down` lands the piece: it joins the resting pieces, full
    /// rows are cleared and the cascade starts. The call then returns false
    /// with no active piece.
    pub fn move_active(&mut self, direction: Direction) -> bool {
        if !self.playable() {
            return false;
        }
        let grid = self.cache.get(&self.store, None);
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let (dr, dc) = direction.delta();
        match direction {
            Direction::Down => {
                if collides_bottom(&piece.shape, piece.row + dr, piece.col, &grid) {
                    self.land();
                    return false;
                }
                piece.row += dr;
                true
            }
            Direction::Left | Direction::Right => {
                let col = piece.col + dc;
                if collides_side(piece, col, direction, &grid) {
                    return false;
                }
                piece.col = col;
                true
            }
        }
    }

    pub fn rotate_active(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let grid = self.cache.get(&self.store, None);
        match self.active.as_mut() {
            Some(piece) => try_rotate(piece, &grid),
            None => false,
        }
    }

    /// Hard drop: move down until the piece lands. Returns false if nothing was active.
    pub fn drop_active(&mut self) -> bool {
        if !self.playable() || self.active.is_none() {
            return false;
        }
        while self.move_active(Direction::Down) {}
        true
    }

    /// One timer tick. A pending cascade advances first; otherwise a piece
    /// spawns if none is active, or the active piece moves down.
    ///
    /// Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        if self.cascade.is_some() {
            if self.step_cascade() {
                return true;
            }
            // Cascade finished this tick; the spawn below uses the same tick.
        }
        if self.active.is_none() {
            return self.spawn(None).is_some() || self.game_over;
        }
        self.move_active(Direction::Down);
        true
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Reset => {
                self.reset();
                true
            }
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.toggle_pause();
                true
            }
            GameAction::MoveLeft => self.move_active(Direction::Left),
            GameAction::MoveRight => self.move_active(Direction::Right),
            GameAction::MoveDown => self.move_active(Direction::Down),
            GameAction::Drop => self.drop_active(),
            GameAction::Rotate => self.rotate_active(),
        }
    }

    /// Flip the pause flag. Returns the new value. No effect after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.paused = !self.paused;
        }
        self.paused
    }

    /// Start a new game. The queue continues from the current rng state;
    /// undrained events are kept.
    pub fn reset(&mut self) {
        let seed = self.queue.seed();
        let mode = self.mode;
        let events = std::mem::take(&mut self.events);
        *self = Self::new(seed).with_mode(mode);
        self.events = events;
    }

    /// Occupancy of the resting pieces, optionally without one of them.
    pub fn current_grid(&mut self, excluding: Option<PieceId>) -> OccupancyGrid {
        self.cache.get(&self.store, excluding)
    }

    /// Where the next rotation would put the active piece.
    pub fn pivot_preview(&mut self) -> Option<RotationPreview> {
        let grid = self.cache.get(&self.store, None);
        collision::pivot_preview(self.active.as_ref()?, &grid)
    }

    /// Drive a pending cascade to its end. No-op when none is pending.
    pub fn finish_settling(&mut self) {
        while self.step_cascade() {}
    }

    /// Put a fragment on the board as a resting piece, for puzzles and tests.
    ///
    /// Refused (`None`) when any cell would sit off the board or on an occupied
    /// cell, the active piece included. No clear check runs; call order defines
    /// settle order.
    pub fn place_fragment(&mut self, row: i8, col: i8, shape: Shape) -> Option<PieceId> {
        let grid = self.cache.get(&self.store, None);
        let below_top = shape.cells().all(|(r, _, _)| row + r as i8 >= 0);
        if !below_top || !shape_fits(&shape, row, col, &grid) {
            return None;
        }
        let hits_active = self.active.as_ref().is_some_and(|active| {
            shape.cells().any(|(r, c, _)| {
                let cell = (row + r as i8, col + c as i8);
                active.cells().any(|(ar, ac, _)| (ar, ac) == cell)
            })
        });
        if hits_active {
            return None;
        }

        let id = self.store.alloc_id();
        self.store.push(Piece::fragment(id, row, col, shape));
        self.cache.invalidate();
        Some(id)
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out` without touching the grid cache.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.fill_board(self.store.iter());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.preview = self.active.as_ref().and_then(|piece| {
            let grid = OccupancyGrid::from_store(&self.store, None);
            collision::pivot_preview(piece, &grid)
                .as_ref()
                .map(PreviewSnapshot::from)
        });
        out.next_kind = self.next;
        out.score = self.score;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.settling = self.cascade.is_some();
        out.live_pieces = self.store.len() + usize::from(self.active.is_some());
        out.seed = self.seed;
    }

    fn land(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.events.push(GameEvent::Landed {
            id: piece.id,
            row: piece.row,
            col: piece.col,
        });
        let scan_from = piece.top_row().unwrap_or(0).max(0) as usize;
        self.store.push(piece);
        self.cache.invalidate();

        let report = clear_lines(&mut self.store, &mut self.cache, scan_from);
        if report.is_empty() {
            return;
        }
        self.score += report.score_delta;
        self.events.push(report.into());

        match self.mode {
            SettleMode::Immediate => {
                let summary = run_cascade(&mut self.store, &mut self.cache);
                for clear in summary.clears {
                    self.score += clear.score_delta;
                    self.events.push(clear.into());
                }
                self.events.push(GameEvent::Settled {
                    rounds: summary.rounds,
                });
            }
            SettleMode::PerTick => self.cascade = Some(Cascade::new()),
        }
    }

    /// Advance the pending cascade by one step. Returns false once it is over
    /// (or when none was pending).
    fn step_cascade(&mut self) -> bool {
        let Some(cascade) = self.cascade.as_mut() else {
            return false;
        };
        match cascade.step(&mut self.store, &mut self.cache) {
            Some(CascadeStep::Moved(_)) => true,
            Some(CascadeStep::Cleared(report)) => {
                self.score += report.score_delta;
                self.events.push(report.into());
                true
            }
            None => {
                let rounds = cascade.rounds();
                self.cascade = None;
                self.events.push(GameEvent::Settled { rounds });
                false
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
