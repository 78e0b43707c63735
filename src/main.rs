//! Terminal fragtris runner (default binary).
//!
//! Reads `FRAGTRIS_*` configuration, then runs the game loop: crossterm input,
//! a fixed gravity tick, and the framebuffer renderer. High scores and the
//! event log are optional; their failures are reported on stderr once the
//! terminal has been restored.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_fragtris::core::{record_score, GameEvent, GameSession, GameSnapshot, MemoryScoreStore, ScoreStore};
use tui_fragtris::input::{handle_key_event, should_quit};
use tui_fragtris::scores::JsonFileStore;
use tui_fragtris::term::{FrameBuffer, GameView, SidePanel, TerminalRenderer, Viewport};
use tui_fragtris::types::GameAction;
use tui_fragtris::{Config, EventLog};

enum HighScores {
    File(JsonFileStore),
    Memory(MemoryScoreStore),
}

impl HighScores {
    fn from_config(config: &Config) -> Self {
        match &config.scores_path {
            Some(path) => HighScores::File(JsonFileStore::new(path)),
            None => HighScores::Memory(MemoryScoreStore::new()),
        }
    }

    fn store(&mut self) -> &mut dyn ScoreStore {
        match self {
            HighScores::File(store) => store,
            HighScores::Memory(store) => store,
        }
    }

    fn take_error(&mut self) -> Option<anyhow::Error> {
        match self {
            HighScores::File(store) => store.take_error(),
            HighScores::Memory(_) => None,
        }
    }
}

struct App {
    session: GameSession,
    scores: HighScores,
    high: Vec<f64>,
    last_rank: Option<usize>,
    log: Option<EventLog>,
    log_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: &Config) -> Self {
        let mut scores = HighScores::from_config(config);
        let high = scores.store().get_scores();

        let (log, log_error) = match config.log_path.as_deref().map(EventLog::open) {
            Some(Ok(log)) => (Some(log), None),
            Some(Err(err)) => (None, Some(err)),
            None => (None, None),
        };

        let mut session = GameSession::new(config.seed).with_mode(config.settle);
        session.spawn(None);

        Self {
            session,
            scores,
            high,
            last_rank: None,
            log,
            log_error,
        }
    }

    fn apply(&mut self, action: GameAction) {
        if action == GameAction::Reset {
            self.last_rank = None;
        }
        self.session.apply_action(action);
    }

    /// Drain session events into the log and the high-score list.
    fn pump_events(&mut self) {
        let events = self.session.take_events();
        if events.is_empty() {
            return;
        }

        for event in &events {
            if let GameEvent::GameOver { score } = event {
                self.last_rank = record_score(self.scores.store(), *score);
                self.high = self.scores.store().get_scores();
            }
        }

        if let Some(log) = self.log.as_mut() {
            // A failing log is closed rather than retried every frame.
            if let Err(err) = log.write_all(&events).and_then(|_| log.flush()) {
                self.log_error = Some(err);
                self.log = None;
            }
        }
    }

    fn report(&mut self) {
        if let Some(err) = self.scores.take_error() {
            eprintln!("[Scores] {err:#}");
        }
        if let Some(err) = self.log_error.take() {
            eprintln!("[EventLog] {err:#}");
        }
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();
    let mut app = App::new(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, config.tick_duration());

    // Always try to restore terminal state.
    let _ = term.exit();
    app.pump_events();
    app.report();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App, tick: Duration) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        app.pump_events();

        // Render.
        app.session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let panel = SidePanel {
            high_scores: &app.high,
            last_rank: app.last_rank,
        };
        view.render_into(&snap, &panel, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.apply(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            app.session.tick();
        }
    }
}
