//! Shared types and constants for the fragmenting block puzzle.
//!
//! Everything here is plain data with no dependencies so the core, the
//! terminal front end and the score store can all agree on it.
//!
//! # Board
//!
//! - **Rows**: 16 (indexed 0-15, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Spawn anchor**: row 0, column 4 (top-left cell of the shape matrix)
//!
//! # Examples
//!
//! ```
//! use tui_fragtris_types::{PieceKind, Rotation, GameAction, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//!
//! assert_eq!(BOARD_COLS, 10);
//! assert_eq!(BOARD_ROWS, 16);
//! ```

/// Board height in rows
pub const BOARD_ROWS: u8 = 16;

/// Board width in columns
pub const BOARD_COLS: u8 = 10;

/// Anchor row of a freshly spawned piece
pub const SPAWN_ROW: i8 = 0;

/// Anchor column of a freshly spawned piece
pub const SPAWN_COL: i8 = 4;

/// Default gravity interval of the driving timer, in milliseconds
pub const DEFAULT_TICK_MS: u32 = 500;

/// Base points for a single cleared row
pub const LINE_SCORE_BASE: f64 = 10_000.0;

/// Length of the persisted high-score list
pub const MAX_SCORES: usize = 10;

/// The seven canonical piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use tui_fragtris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Non-zero cell marker carried by every cell of this kind.
    ///
    /// Markers are a color/identity class for renderers; collision never looks at them.
    pub fn marker(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::marker`].
    pub fn from_marker(marker: u8) -> Option<Self> {
        PieceKind::ALL.iter().copied().find(|k| k.marker() == marker)
    }

    /// Maximum rightward kick credit a piece of this kind can hold.
    pub fn pivot_max(&self) -> u8 {
        match self {
            PieceKind::I => 3,
            PieceKind::O => 0,
            _ => 1,
        }
    }
}

/// Rotation states 0..=3, advanced clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// ```
    /// use tui_fragtris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Wraps modulo 4.
    pub fn from_index(i: usize) -> Self {
        match i % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// States 0 and 2 are "even"; only they can earn kick credit.
    pub fn is_even(&self) -> bool {
        matches!(self, Rotation::North | Rotation::South)
    }
}

/// Direction of a single-cell move of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// (row delta, column delta)
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// Player and timer commands understood by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the active piece one column left
    MoveLeft,
    /// Move the active piece one column right
    MoveRight,
    /// Move the active piece one row down (lands it when blocked)
    MoveDown,
    /// Move down until the piece lands
    Drop,
    /// Rotate clockwise, consuming any kick credit
    Rotate,
    /// Toggle pause
    Pause,
    /// Start over with an empty board
    Reset,
}

impl GameAction {
    /// ```
    /// use tui_fragtris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("DROP"), Some(GameAction::Drop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "drop" => Some(GameAction::Drop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Drop => "drop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
        }
    }
}
