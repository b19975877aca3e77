use crate::board::{PieceKind, Side};
use std::{collections::HashMap, sync::LazyLock};

pub const MIN_SCORE: i32 = -10_000_000;
pub const MAX_SCORE: i32 = 10_000_000;

// Per-turn think budget for the computer player. A new depth iteration only
// starts while less than DEPTH_TIME_FRACTION of the budget is spent; the
// root move loop itself is cut off at the full budget.
pub const DEFAULT_THINK_SECS: u64 = 4;
pub const DEPTH_TIME_FRACTION: f64 = 0.25;

pub const FIX_SEARCH_DEPTH: i32 = 3;

// Null-move pruning is unsound in zugzwang-prone endings, so it is switched
// off once either side is down to this many pieces or legal moves.
pub const NEAR_END_PIECE_COUNT: usize = 5;
pub const NEAR_END_MOVE_COUNT: usize = 5;

// Placement letters: uppercase white, lowercase black.
pub static PLACEMENT_MAP: LazyLock<HashMap<char, (PieceKind, Side)>> = LazyLock::new(|| {
    HashMap::from([
        ('k', (PieceKind::King, Side::Black)),
        ('q', (PieceKind::Queen, Side::Black)),
        ('r', (PieceKind::Rook, Side::Black)),
        ('b', (PieceKind::Bishop, Side::Black)),
        ('n', (PieceKind::Knight, Side::Black)),
        ('p', (PieceKind::Pawn, Side::Black)),
        ('K', (PieceKind::King, Side::White)),
        ('Q', (PieceKind::Queen, Side::White)),
        ('R', (PieceKind::Rook, Side::White)),
        ('B', (PieceKind::Bishop, Side::White)),
        ('N', (PieceKind::Knight, Side::White)),
        ('P', (PieceKind::Pawn, Side::White)),
    ])
});

// Piece-square tables, indexed [row-1][col-1] in the internal orientation
// (White's back rank on row 8, White pawns advancing toward row 1). Black
// reads them through Cell::flip. Only pawns and knights get a positional
// adjustment; material dominates the evaluation.
pub const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

pub const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];
