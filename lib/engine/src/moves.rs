/*
 * A single game move: source and destination cells plus everything the
 * rules engine needs to take it back again. Built from a (from, to) pair;
 * the rules engine fills the capture, promotion and en-passant bookkeeping
 * and the classification when the move is executed.
 */

use crate::board::{Cell, Piece};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveKind {
    Normal,
    Capture,
    /// Castling: the king steps two columns toward an unmoved rook and the
    /// rook jumps to the crossed square.
    Tower,
    Promotion,
    EnPassant,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
    /// Snapshot of the moving piece as it stood before the move.
    pub piece: Piece,
    pub capture: Option<Piece>,
    pub promo: Option<Piece>,
    pub en_passant: Option<Piece>,
    pub kind: MoveKind,
    pub causes_check: bool,
    pub score: i32,
}

impl Move {
    pub fn new(from: Cell, to: Cell, piece: Piece, capture: Option<Piece>) -> Move {
        Move {
            from,
            to,
            piece,
            capture,
            promo: None,
            en_passant: None,
            kind: MoveKind::Normal,
            causes_check: false,
            score: 0,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.capture.is_some() || self.en_passant.is_some()
    }

    pub fn is_promo(&self) -> bool {
        self.kind == MoveKind::Promotion
    }

    // Weight of whatever this move removes from the board.
    pub fn captured_weight(&self) -> i32 {
        self.capture.map_or(0, |p| p.weight()) + self.en_passant.map_or(0, |p| p.weight())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { "x" } else { "-" };
        write!(
            f,
            "{} {}{}{}",
            self.piece.kind.name(),
            self.from.display(),
            sep,
            self.to.display()
        )
    }
}
