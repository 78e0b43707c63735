//! Shape catalog - canonical rotation tables and the outline registry.
//!
//! Canonical states are stored row-major with the top-left cell at the piece
//! anchor. Kinds with rotational symmetry store fewer states (I/S/Z two, O
//! one); the rotation index wraps onto the stored table.
//!
//! The registry maps any shape that is structurally equal to a canonical
//! state or to one of the remnants row clearing can leave behind onto a
//! [`ShapeClass`], and from there to an [`Outline`] polygon for renderers.
//! Gameplay never consults it.

use arrayvec::ArrayVec;

use crate::shape::{Shape, MAX_SHAPE_DIM};
use crate::types::{PieceKind, Rotation};

type Table = &'static [&'static [&'static [u8]]];

const I_STATES: Table = &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const J_STATES: Table = &[
    &[&[2, 0, 0], &[2, 2, 2]],
    &[&[2, 2], &[2, 0], &[2, 0]],
    &[&[2, 2, 2], &[0, 0, 2]],
    &[&[0, 2], &[0, 2], &[2, 2]],
];

const L_STATES: Table = &[
    &[&[0, 0, 3], &[3, 3, 3]],
    &[&[3, 0], &[3, 0], &[3, 3]],
    &[&[3, 3, 3], &[3, 0, 0]],
    &[&[3, 3], &[0, 3], &[0, 3]],
];

const O_STATES: Table = &[&[&[4, 4], &[4, 4]]];

const S_STATES: Table = &[&[&[0, 5, 5], &[5, 5, 0]], &[&[5, 0], &[5, 5], &[0, 5]]];

const T_STATES: Table = &[
    &[&[0, 6, 0], &[6, 6, 6]],
    &[&[6, 0], &[6, 6], &[6, 0]],
    &[&[6, 6, 6], &[0, 6, 0]],
    &[&[0, 6], &[6, 6], &[0, 6]],
];

const Z_STATES: Table = &[&[&[7, 7, 0], &[0, 7, 7]], &[&[0, 7], &[7, 7], &[7, 0]]];

fn table(kind: PieceKind) -> Table {
    match kind {
        PieceKind::I => I_STATES,
        PieceKind::J => J_STATES,
        PieceKind::L => L_STATES,
        PieceKind::O => O_STATES,
        PieceKind::S => S_STATES,
        PieceKind::T => T_STATES,
        PieceKind::Z => Z_STATES,
    }
}

/// Number of distinct rotation states stored for `kind`.
pub fn state_count(kind: PieceKind) -> usize {
    table(kind).len()
}

/// Canonical shape for `kind` in `rotation`.
pub fn canonical(kind: PieceKind, rotation: Rotation) -> Shape {
    let states = table(kind);
    Shape::from_rows(states[rotation.index() % states.len()])
}

/// Remnant shapes that row clearing can carve out of the canonical set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentShape {
    Mono,
    DominoH,
    DominoV,
    TrominoH,
    TrominoV,
    /// `[[x, x], [x]]`
    HookLeft,
    /// `[[x], [x, x]]`
    HookRight,
    /// `[[x, x], [0, x]]`
    CornerDown,
    /// `[[0, x], [x, x]]`
    CornerUp,
}

impl FragmentShape {
    pub const ALL: [FragmentShape; 9] = [
        FragmentShape::Mono,
        FragmentShape::DominoH,
        FragmentShape::DominoV,
        FragmentShape::TrominoH,
        FragmentShape::TrominoV,
        FragmentShape::HookLeft,
        FragmentShape::HookRight,
        FragmentShape::CornerDown,
        FragmentShape::CornerUp,
    ];

    fn rows(&self) -> &'static [&'static [u8]] {
        match self {
            FragmentShape::Mono => &[&[1]],
            FragmentShape::DominoH => &[&[1, 1]],
            FragmentShape::DominoV => &[&[1], &[1]],
            FragmentShape::TrominoH => &[&[1, 1, 1]],
            FragmentShape::TrominoV => &[&[1], &[1], &[1]],
            FragmentShape::HookLeft => &[&[1, 1], &[1]],
            FragmentShape::HookRight => &[&[1], &[1, 1]],
            FragmentShape::CornerDown => &[&[1, 1], &[0, 1]],
            FragmentShape::CornerUp => &[&[0, 1], &[1, 1]],
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::from_rows(self.rows())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentShape::Mono => "mono",
            FragmentShape::DominoH => "domino-h",
            FragmentShape::DominoV => "domino-v",
            FragmentShape::TrominoH => "tromino-h",
            FragmentShape::TrominoV => "tromino-v",
            FragmentShape::HookLeft => "hook-left",
            FragmentShape::HookRight => "hook-right",
            FragmentShape::CornerDown => "corner-down",
            FragmentShape::CornerUp => "corner-up",
        }
    }
}

/// Result of classifying an arbitrary shape against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    /// `state` indexes the kind's stored table (not the 0..=3 rotation).
    Canonical { kind: PieceKind, state: u8 },
    Fragment(FragmentShape),
    Unknown,
}

impl ShapeClass {
    pub fn is_known(&self) -> bool {
        !matches!(self, ShapeClass::Unknown)
    }
}

fn registry() -> impl Iterator<Item = (ShapeClass, Shape)> {
    let canonical = PieceKind::ALL.into_iter().flat_map(|kind| {
        table(kind).iter().enumerate().map(move |(state, rows)| {
            (
                ShapeClass::Canonical {
                    kind,
                    state: state as u8,
                },
                Shape::from_rows(rows),
            )
        })
    });
    let fragments = FragmentShape::ALL
        .into_iter()
        .map(|f| (ShapeClass::Fragment(f), f.shape()));
    canonical.chain(fragments)
}

/// Linear scan of the registry; total, returns [`ShapeClass::Unknown`] on no match.
pub fn classify(shape: &Shape) -> ShapeClass {
    registry()
        .find(|(_, candidate)| candidate.same_pattern(shape))
        .map(|(class, _)| class)
        .unwrap_or(ShapeClass::Unknown)
}

/// Maximum number of polygon vertices an outline can carry.
pub const MAX_OUTLINE_VERTICES: usize = 16;

/// Four edges per cell of the largest shape.
const MAX_TRACE_EDGES: usize = 4 * MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Closed boundary polygon of a registered shape, in cell units.
///
/// Vertices are `(x, y)` with `y` growing downwards, listed clockwise from the
/// top-left corner of the first occupied cell. Collinear points are merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    pub class: Option<ShapeClass>,
    pub vertices: ArrayVec<(u8, u8), MAX_OUTLINE_VERTICES>,
}

impl Outline {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Outline for `shape`, or [`Outline::empty`] when the shape is not registered.
pub fn outline(shape: &Shape) -> Outline {
    let class = classify(shape);
    if !class.is_known() {
        return Outline::empty();
    }
    Outline {
        class: Some(class),
        vertices: trace(shape),
    }
}

fn trace(shape: &Shape) -> ArrayVec<(u8, u8), MAX_OUTLINE_VERTICES> {
    let occupied = |r: i8, c: i8| {
        r >= 0 && c >= 0 && shape.row(r as usize).get(c as usize).is_some_and(|&m| m != 0)
    };

    // Directed boundary edges, clockwise around each cell, minus shared edges.
    let mut edges: ArrayVec<((i8, i8), (i8, i8)), MAX_TRACE_EDGES> = ArrayVec::new();
    for (r, c, _) in shape.cells() {
        let (r, c) = (r as i8, c as i8);
        if !occupied(r - 1, c) {
            let _ = edges.try_push(((c, r), (c + 1, r)));
        }
        if !occupied(r, c + 1) {
            let _ = edges.try_push(((c + 1, r), (c + 1, r + 1)));
        }
        if !occupied(r + 1, c) {
            let _ = edges.try_push(((c + 1, r + 1), (c, r + 1)));
        }
        if !occupied(r, c - 1) {
            let _ = edges.try_push(((c, r + 1), (c, r)));
        }
    }

    let Some((r0, c0, _)) = shape.cells().next() else {
        return ArrayVec::new();
    };
    let start = (c0 as i8, r0 as i8);

    let mut path: ArrayVec<(i8, i8), MAX_TRACE_EDGES> = ArrayVec::new();
    path.push(start);
    let mut cur = start;
    while let Some(idx) = edges.iter().position(|(from, _)| *from == cur) {
        let (_, to) = edges.swap_remove(idx);
        if to == start {
            break;
        }
        if path.try_push(to).is_err() {
            break;
        }
        cur = to;
    }

    let n = path.len();
    let mut out = ArrayVec::new();
    for i in 0..n {
        let prev = path[(i + n - 1) % n];
        let here = path[i];
        let next = path[(i + 1) % n];
        let d_in = (here.0 - prev.0, here.1 - prev.1);
        let d_out = (next.0 - here.0, next.1 - here.1);
        if d_in != d_out {
            let _ = out.try_push((here.0 as u8, here.1 as u8));
        }
    }
    out
}
