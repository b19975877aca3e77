/*
 * Rules engine: move generation, legality filtering, execution and undo,
 * check/checkmate/stalemate detection and the static evaluation.
 *
 * Move generation is two-staged: pseudo-legal moves follow the piece's
 * movement pattern only; legal moves are the pseudo-legal ones that do not
 * leave the mover's own king attacked, found by executing each candidate,
 * testing for check and undoing it again. Execute/undo pairs must nest
 * strictly (LIFO); the search relies on that discipline, the engine does
 * not check it.
 */

use crate::board::{Board, Cell, Piece, PieceKind, Side, BOARD_SIZE};
use crate::constant::{KNIGHT_TABLE, PAWN_TABLE};
use crate::moves::{Move, MoveKind};

const ORTHO_DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAG_DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub struct Rules {
    pub board: Board,
    // Last move committed at the game level. En-passant eligibility is
    // judged against this, never against tentative moves inside a search.
    last_move: Option<Move>,
}

impl Rules {
    pub fn new(board: Board) -> Rules {
        Rules {
            board,
            last_move: None,
        }
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    pub fn set_last_move(&mut self, m: Option<Move>) {
        self.last_move = m;
    }

    // ---- move generation -------------------------------------------------

    /// Pseudo-legal moves for the piece on `from`: consistent with its
    /// movement pattern, ignoring whether the own king ends up attacked.
    pub fn possible_moves(&self, from: Cell) -> Vec<Move> {
        let piece = match self.board.piece_at(from) {
            Some(p) => p,
            None => return vec![],
        };

        let mut moves = vec![];
        match piece.kind {
            PieceKind::Rook => self.slide(from, piece, &ORTHO_DIRS, &mut moves),
            PieceKind::Bishop => self.slide(from, piece, &DIAG_DIRS, &mut moves),
            PieceKind::Queen => {
                self.slide(from, piece, &ORTHO_DIRS, &mut moves);
                self.slide(from, piece, &DIAG_DIRS, &mut moves);
            }
            PieceKind::Knight => self.step(from, piece, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::King => {
                self.step(from, piece, &KING_OFFSETS, &mut moves);
                self.tower_moves(from, piece, &mut moves);
            }
            PieceKind::Pawn => self.pawn_moves(from, piece, &mut moves),
        }
        moves
    }

    /// Legal moves for the piece on `from`. An empty cell yields an empty
    /// list, not an error.
    pub fn legal_moves(&mut self, from: Cell) -> Vec<Move> {
        let side = match self.board.piece_at(from) {
            Some(p) => p.side,
            None => return vec![],
        };

        let mut legal = vec![];
        for mut m in self.possible_moves(from) {
            self.execute_move(&mut m);
            let safe = !self.is_under_check(side);
            self.undo_move(&m);
            if safe {
                legal.push(m);
            }
        }
        legal
    }

    /// Legal moves of every piece the side owns, in deterministic row-major
    /// board order.
    pub fn all_legal_moves(&mut self, side: Side) -> Vec<Move> {
        let mut moves = vec![];
        for cell in self.board.side_cells(side) {
            moves.extend(self.legal_moves(cell));
        }
        moves
    }

    /// Capture moves only, best victims first. Used by the quiescence search
    /// to bound its branching factor.
    pub fn good_capture_moves(&mut self, side: Side) -> Vec<Move> {
        let mut captures: Vec<Move> = self
            .all_legal_moves(side)
            .into_iter()
            .filter(|m| m.is_capture())
            .collect();
        captures.sort_by_key(|m| -(m.captured_weight() * 10 - m.piece.weight()));
        captures
    }

    fn slide(&self, from: Cell, piece: Piece, dirs: &[(i32, i32)], out: &mut Vec<Move>) {
        for &(dr, dc) in dirs {
            let mut cur = Cell::new(from.row + dr, from.col + dc);
            while cur.on_board() {
                match self.board.piece_at(cur) {
                    None => out.push(Move::new(from, cur, piece, None)),
                    Some(other) => {
                        if other.side != piece.side {
                            out.push(Move::new(from, cur, piece, Some(other)));
                        }
                        break;
                    }
                }
                cur = Cell::new(cur.row + dr, cur.col + dc);
            }
        }
    }

    fn step(&self, from: Cell, piece: Piece, offsets: &[(i32, i32)], out: &mut Vec<Move>) {
        for &(dr, dc) in offsets {
            let to = Cell::new(from.row + dr, from.col + dc);
            if !to.on_board() {
                continue;
            }
            match self.board.piece_at(to) {
                None => out.push(Move::new(from, to, piece, None)),
                Some(other) => {
                    if other.side != piece.side {
                        out.push(Move::new(from, to, piece, Some(other)));
                    }
                }
            }
        }
    }

    fn pawn_moves(&self, from: Cell, piece: Piece, out: &mut Vec<Move>) {
        // White pawns march up the rows, Black pawns down
        let forward = |cell: Cell, delta: i32| {
            if piece.side.is_white() {
                cell.up(delta)
            } else {
                cell.down(delta)
            }
        };

        let one = forward(from, 1);
        if one.on_board() && self.board.piece_at(one).is_none() {
            out.push(Move::new(from, one, piece, None));
            // double step off the home row
            let two = forward(from, 2);
            if piece.moves == 0 && two.on_board() && self.board.piece_at(two).is_none() {
                out.push(Move::new(from, two, piece, None));
            }
        }

        for diag in [forward(from, 1).left(1), forward(from, 1).right(1)] {
            if let Some(victim) = self.board.piece_at(diag) {
                if victim.side != piece.side {
                    out.push(Move::new(from, diag, piece, Some(victim)));
                }
            }
        }

        // En passant: the enemy pawn double-stepped onto the square right
        // next to this pawn with the last committed move.
        if let Some(last) = self.last_move {
            if last.piece.kind == PieceKind::Pawn
                && last.piece.side != piece.side
                && (last.from.row - last.to.row).abs() == 2
                && last.to.row == from.row
                && (last.to.col - from.col).abs() == 1
            {
                let behind = if last.to.col > from.col {
                    forward(from, 1).right(1)
                } else {
                    forward(from, 1).left(1)
                };
                out.push(Move::new(from, behind, piece, None));
            }
        }
    }

    // Castling moves for an unmoved king on its home square: the path to the
    // chosen rook must be clear, the rook unmoved, the king not in check and
    // the squares it crosses not attacked.
    fn tower_moves(&self, from: Cell, piece: Piece, out: &mut Vec<Move>) {
        let home_row = if piece.side.is_white() { 8 } else { 1 };
        if piece.moves != 0 || from != Cell::new(home_row, 5) {
            return;
        }
        if self.is_under_check(piece.side) {
            return;
        }

        let enemy = piece.side.enemy();
        // king side: rook on column 8, king crosses f and g
        if self.unmoved_rook(piece.side, Cell::new(home_row, 8))
            && self.board.piece_at(Cell::new(home_row, 6)).is_none()
            && self.board.piece_at(Cell::new(home_row, 7)).is_none()
            && !self.is_cell_attacked(Cell::new(home_row, 6), enemy)
            && !self.is_cell_attacked(Cell::new(home_row, 7), enemy)
        {
            out.push(Move::new(from, Cell::new(home_row, 7), piece, None));
        }
        // queen side: rook on column 1, king crosses d and c, b only empty
        if self.unmoved_rook(piece.side, Cell::new(home_row, 1))
            && self.board.piece_at(Cell::new(home_row, 2)).is_none()
            && self.board.piece_at(Cell::new(home_row, 3)).is_none()
            && self.board.piece_at(Cell::new(home_row, 4)).is_none()
            && !self.is_cell_attacked(Cell::new(home_row, 3), enemy)
            && !self.is_cell_attacked(Cell::new(home_row, 4), enemy)
        {
            out.push(Move::new(from, Cell::new(home_row, 3), piece, None));
        }
    }

    fn unmoved_rook(&self, side: Side, cell: Cell) -> bool {
        self.board
            .piece_at(cell)
            .is_some_and(|p| p.kind == PieceKind::Rook && p.side == side && p.moves == 0)
    }

    // ---- execution and undo ----------------------------------------------

    /// Execute a move produced against the current board state: relocate the
    /// piece, fill the capture/en-passant/promotion bookkeeping and the
    /// classification, bump the move counter. Exactly reversible by
    /// `undo_move`.
    pub fn execute_move(&mut self, m: &mut Move) {
        let mut piece = self
            .board
            .take_piece(m.from)
            .expect("move start cell holds no piece");

        let mut kind = MoveKind::Normal;

        // a pawn leaving its column onto an empty square is an en-passant
        // capture; the victim sits beside the start square, not on the
        // destination
        if piece.kind == PieceKind::Pawn
            && m.from.col != m.to.col
            && self.board.piece_at(m.to).is_none()
        {
            kind = MoveKind::EnPassant;
            m.en_passant = self.board.take_piece(Cell::new(m.from.row, m.to.col));
        } else if piece.kind == PieceKind::King && (m.to.col - m.from.col).abs() == 2 {
            kind = MoveKind::Tower;
            let (rook_from, rook_to) = Self::tower_rook_cells(m);
            if let Some(mut rook) = self.board.take_piece(rook_from) {
                rook.moves += 1;
                self.board.set_piece(rook_to, Some(rook));
            }
        }

        m.capture = self.board.take_piece(m.to);
        if m.capture.is_some() && kind == MoveKind::Normal {
            kind = MoveKind::Capture;
        }

        piece.moves += 1;

        let promo_row = if piece.side.is_white() { 1 } else { BOARD_SIZE };
        if piece.kind == PieceKind::Pawn && m.to.row == promo_row {
            kind = MoveKind::Promotion;
            // default to a queen unless the caller chose otherwise
            let promo = m
                .promo
                .unwrap_or(Piece::with_moves(PieceKind::Queen, piece.side, piece.moves));
            m.promo = Some(promo);
            self.board.set_piece(m.to, Some(promo));
        } else {
            self.board.set_piece(m.to, Some(piece));
        }

        m.kind = kind;
    }

    /// Inverse of `execute_move`: restores occupancy bit for bit, including
    /// the en-passant victim on its own square and the castled rook.
    pub fn undo_move(&mut self, m: &Move) {
        if m.kind == MoveKind::Promotion {
            // the promoted piece vanishes with the destination square
            // overwrite below; the pawn snapshot returns home
            self.board.set_piece(m.from, Some(m.piece));
        } else if let Some(mut piece) = self.board.take_piece(m.to) {
            piece.moves -= 1;
            self.board.set_piece(m.from, Some(piece));
        }

        self.board.set_piece(m.to, m.capture);

        match m.kind {
            MoveKind::EnPassant => {
                self.board
                    .set_piece(Cell::new(m.from.row, m.to.col), m.en_passant);
            }
            MoveKind::Tower => {
                let (rook_from, rook_to) = Self::tower_rook_cells(m);
                if let Some(mut rook) = self.board.take_piece(rook_to) {
                    rook.moves -= 1;
                    self.board.set_piece(rook_from, Some(rook));
                }
            }
            _ => {}
        }
    }

    fn tower_rook_cells(m: &Move) -> (Cell, Cell) {
        let row = m.from.row;
        if m.to.col > m.from.col {
            (Cell::new(row, 8), Cell::new(row, m.to.col - 1))
        } else {
            (Cell::new(row, 1), Cell::new(row, m.to.col + 1))
        }
    }

    /// Validate and execute a caller-supplied move: the destination must be
    /// in the legal set of the start cell. On success the move is recorded
    /// as the last committed move and its check flag is filled; on failure
    /// nothing is mutated.
    pub fn try_move(&mut self, m: &mut Move) -> bool {
        let legal = self.legal_moves(m.from);
        if !legal.iter().any(|lm| lm.to == m.to) {
            return false;
        }
        self.execute_move(m);
        m.causes_check = self.is_under_check(m.piece.side.enemy());
        self.last_move = Some(*m);
        true
    }

    // ---- check detection -------------------------------------------------

    /// True when any attack pattern of `by` reaches `cell`. Scans outward
    /// from the cell instead of enumerating every enemy move.
    pub fn is_cell_attacked(&self, cell: Cell, by: Side) -> bool {
        for &(dr, dc) in &ORTHO_DIRS {
            if self.ray_hits(cell, dr, dc, by, PieceKind::Rook) {
                return true;
            }
        }
        for &(dr, dc) in &DIAG_DIRS {
            if self.ray_hits(cell, dr, dc, by, PieceKind::Bishop) {
                return true;
            }
        }
        for &(dr, dc) in &KNIGHT_OFFSETS {
            let from = Cell::new(cell.row + dr, cell.col + dc);
            if self
                .board
                .piece_at(from)
                .is_some_and(|p| p.side == by && p.kind == PieceKind::Knight)
            {
                return true;
            }
        }
        for &(dr, dc) in &KING_OFFSETS {
            let from = Cell::new(cell.row + dr, cell.col + dc);
            if self
                .board
                .piece_at(from)
                .is_some_and(|p| p.side == by && p.kind == PieceKind::King)
            {
                return true;
            }
        }
        // pawns capture diagonally toward their own advance direction
        let pawn_row = if by.is_white() { cell.row + 1 } else { cell.row - 1 };
        for dc in [-1, 1] {
            let from = Cell::new(pawn_row, cell.col + dc);
            if self
                .board
                .piece_at(from)
                .is_some_and(|p| p.side == by && p.kind == PieceKind::Pawn)
            {
                return true;
            }
        }
        false
    }

    fn ray_hits(&self, cell: Cell, dr: i32, dc: i32, by: Side, slider: PieceKind) -> bool {
        let mut cur = Cell::new(cell.row + dr, cell.col + dc);
        while cur.on_board() {
            if let Some(piece) = self.board.piece_at(cur) {
                return piece.side == by
                    && (piece.kind == slider || piece.kind == PieceKind::Queen);
            }
            cur = Cell::new(cur.row + dr, cur.col + dc);
        }
        false
    }

    pub fn is_under_check(&self, side: Side) -> bool {
        match self.board.king_cell(side) {
            Some(king) => self.is_cell_attacked(king, side.enemy()),
            None => true,
        }
    }

    pub fn is_checkmate(&mut self, side: Side) -> bool {
        self.is_under_check(side) && self.all_legal_moves(side).is_empty()
    }

    pub fn is_stalemate(&mut self, side: Side) -> bool {
        !self.is_under_check(side) && self.all_legal_moves(side).is_empty()
    }

    // ---- evaluation ------------------------------------------------------

    /// Static score from `side`'s perspective: own material and placement
    /// minus the enemy's. Antisymmetric by construction, as the negamax
    /// search requires.
    pub fn evaluate(&self, side: Side) -> i32 {
        let mut score = 0;
        for row in 1..=BOARD_SIZE {
            for col in 1..=BOARD_SIZE {
                let cell = Cell::new(row, col);
                if let Some(piece) = self.board.piece_at(cell) {
                    let value = piece.weight() + Self::placement_value(piece, cell);
                    if piece.side == side {
                        score += value;
                    } else {
                        score -= value;
                    }
                }
            }
        }
        score
    }

    fn placement_value(piece: Piece, cell: Cell) -> i32 {
        // tables are oriented for White; Black reads them flipped
        let cell = if piece.side.is_black() { cell.flip() } else { cell };
        match piece.kind {
            PieceKind::Pawn => PAWN_TABLE[cell.row as usize - 1][cell.col as usize - 1],
            PieceKind::Knight => KNIGHT_TABLE[cell.row as usize - 1][cell.col as usize - 1],
            _ => 0,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::new(Board::init())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_from(placement: &str) -> Rules {
        Rules::new(Board::from_placement(placement))
    }

    #[test]
    fn twenty_opening_moves() {
        let mut rules = Rules::default();
        let moves = rules.all_legal_moves(Side::White);
        assert_eq!(moves.len(), 20);
        let pawn_moves = moves
            .iter()
            .filter(|m| m.piece.kind == PieceKind::Pawn)
            .count();
        assert_eq!(pawn_moves, 16);
        assert_eq!(moves.len() - pawn_moves, 4); // knights
    }

    #[test]
    fn empty_and_enemy_cells_yield_no_moves() {
        let mut rules = Rules::default();
        assert!(rules.legal_moves(Cell::from("d4")).is_empty());
        assert!(rules.possible_moves(Cell::from("e5")).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // black rook on e4 pins the white knight on e6 against the king e8
        let mut rules = rules_from("8/8/8/4r3/8/4N3/8/4K3");
        let knight_moves = rules.legal_moves(Cell::from("e6"));
        assert!(knight_moves.is_empty());
        // the king itself can still step aside
        assert!(!rules.legal_moves(Cell::from("e8")).is_empty());
    }

    #[test]
    fn no_legal_move_leaves_own_king_attacked() {
        let mut rules = rules_from("4k3/8/8/4r3/8/3PN3/4Q3/4K3");
        for side in [Side::White, Side::Black] {
            for mut m in rules.all_legal_moves(side) {
                rules.execute_move(&mut m);
                assert!(!rules.is_under_check(side), "move {} exposes the king", m);
                rules.undo_move(&m);
            }
        }
    }

    #[test]
    fn execute_undo_round_trips_every_move() {
        // castling rights on both wings plus tactical middlegame material
        let mut rules = rules_from("r3k2r/pppq1ppp/2n5/3pp3/3PP3/2N2N2/PPP2PPP/R3K2R");
        for side in [Side::White, Side::Black] {
            let before = rules.board.clone();
            for mut m in rules.all_legal_moves(side) {
                rules.execute_move(&mut m);
                rules.undo_move(&m);
                assert_eq!(rules.board, before, "move {} does not round-trip", m);
            }
        }
    }

    #[test]
    fn castling_both_wings() {
        let mut rules = rules_from("r3k2r/8/8/8/8/8/8/R3K2R");
        let king_moves = rules.legal_moves(Cell::from("e8"));
        let tower_targets: Vec<String> = king_moves
            .iter()
            .filter(|m| (m.to.col - m.from.col).abs() == 2)
            .map(|m| m.to.to_string())
            .collect();
        assert_eq!(tower_targets, vec!["g8", "c8"]);

        // execute the king-side castle and check the rook hopped over
        let mut castle = *king_moves.iter().find(|m| m.to == Cell::from("g8")).unwrap();
        let before = rules.board.clone();
        rules.execute_move(&mut castle);
        assert_eq!(castle.kind, MoveKind::Tower);
        assert_eq!(
            rules.board.piece_at(Cell::from("f8")).unwrap().kind,
            PieceKind::Rook
        );
        assert!(rules.board.piece_at(Cell::from("h8")).is_none());
        rules.undo_move(&castle);
        assert_eq!(rules.board, before);
    }

    #[test]
    fn castling_denied_through_attacked_square() {
        // black rook on f4 covers f8, the square the white king must cross
        let mut rules = rules_from("4k3/8/8/5r2/8/8/8/R3K2R");
        let king_moves = rules.legal_moves(Cell::from("e8"));
        assert!(!king_moves.iter().any(|m| m.to == Cell::from("g8")));
        // queen side is unaffected
        assert!(king_moves.iter().any(|m| m.to == Cell::from("c8")));
    }

    #[test]
    fn castling_denied_after_king_moved() {
        let mut rules = rules_from("4k3/8/8/8/8/8/8/R3K2R");
        // walk the king away and back
        let mut out = Move::new(
            Cell::from("e8"),
            Cell::from("e7"),
            rules.board.piece_at(Cell::from("e8")).unwrap(),
            None,
        );
        rules.execute_move(&mut out);
        let mut back = Move::new(
            Cell::from("e7"),
            Cell::from("e8"),
            rules.board.piece_at(Cell::from("e7")).unwrap(),
            None,
        );
        rules.execute_move(&mut back);

        let king_moves = rules.legal_moves(Cell::from("e8"));
        assert!(!king_moves.iter().any(|m| (m.to.col - m.from.col).abs() == 2));
    }

    #[test]
    fn en_passant_capture_and_undo() {
        // white pawn on d4, black pawn still home on e2
        let mut rules = rules_from("4k3/4p3/8/3P4/8/8/8/4K3");

        // black double-steps past the white pawn; commit it so it becomes
        // the last move
        let mut double = Move::new(
            Cell::from("e2"),
            Cell::from("e4"),
            rules.board.piece_at(Cell::from("e2")).unwrap(),
            None,
        );
        assert!(rules.try_move(&mut double));

        let pawn_moves = rules.legal_moves(Cell::from("d4"));
        let mut ep = *pawn_moves
            .iter()
            .find(|m| m.to == Cell::from("e3"))
            .expect("en passant capture is available");

        let before = rules.board.clone();
        rules.execute_move(&mut ep);
        assert_eq!(ep.kind, MoveKind::EnPassant);
        // the victim leaves its own square, not the destination
        assert!(rules.board.piece_at(Cell::from("e4")).is_none());
        assert_eq!(
            rules.board.piece_at(Cell::from("e3")).unwrap().kind,
            PieceKind::Pawn
        );
        rules.undo_move(&ep);
        assert_eq!(rules.board, before);
    }

    #[test]
    fn promotion_defaults_to_queen_and_undoes() {
        let mut rules = rules_from("4k3/P7/8/8/8/8/8/4K2R");
        let moves = rules.legal_moves(Cell::from("a2"));
        let mut promo = *moves.iter().find(|m| m.to == Cell::from("a1")).unwrap();

        let before = rules.board.clone();
        rules.execute_move(&mut promo);
        assert_eq!(promo.kind, MoveKind::Promotion);
        assert_eq!(
            rules.board.piece_at(Cell::from("a1")).unwrap().kind,
            PieceKind::Queen
        );
        rules.undo_move(&promo);
        assert_eq!(rules.board, before);
        assert_eq!(
            rules.board.piece_at(Cell::from("a2")).unwrap().kind,
            PieceKind::Pawn
        );
    }

    #[test]
    fn fools_mate() {
        let mut rules = Rules::default();
        for (from, to) in [("f7", "f6"), ("e2", "e4"), ("g7", "g5"), ("d1", "h5")] {
            let piece = rules.board.piece_at(Cell::from(from)).unwrap();
            let mut m = Move::new(Cell::from(from), Cell::from(to), piece, None);
            assert!(rules.try_move(&mut m), "{}{} must be legal", from, to);
        }
        assert!(rules.is_under_check(Side::White));
        assert!(rules.is_checkmate(Side::White));
        assert!(rules.all_legal_moves(Side::White).is_empty());
        assert!(!rules.is_checkmate(Side::Black));
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        // black king cornered by queen and king but not attacked
        let mut rules = rules_from("k7/2Q5/8/2K5/8/8/8/8");
        assert!(!rules.is_under_check(Side::Black));
        assert!(rules.is_stalemate(Side::Black));
        assert!(!rules.is_checkmate(Side::Black));
        assert!(rules.all_legal_moves(Side::Black).is_empty());
    }

    #[test]
    fn evaluation_is_antisymmetric() {
        for placement in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "4k3/8/8/3q4/8/8/2N5/4K3",
            "r3k2r/pppq1ppp/2n5/3pp3/3PP3/2N2N2/PPP2PPP/R3K2R",
        ] {
            let rules = rules_from(placement);
            assert_eq!(rules.evaluate(Side::White), -rules.evaluate(Side::Black));
        }
        // symmetric start position scores level
        assert_eq!(Rules::default().evaluate(Side::White), 0);
    }

    #[test]
    fn good_captures_are_sorted_by_victim() {
        // white queen can take a rook or a pawn, the pawn can take a knight
        let mut rules = rules_from("4k3/8/8/1r2n3/2p5/1Q1P4/8/4K3");
        let captures = rules.good_capture_moves(Side::White);
        assert!(!captures.is_empty());
        assert!(captures.iter().all(|m| m.is_capture()));
        // best victim first
        assert_eq!(captures[0].capture.unwrap().kind, PieceKind::Rook);
        let weights: Vec<i32> = captures
            .iter()
            .map(|m| m.captured_weight() * 10 - m.piece.weight())
            .collect();
        assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn try_move_rejects_illegal_and_keeps_state() {
        let mut rules = Rules::default();
        let before = rules.board.clone();
        let piece = rules.board.piece_at(Cell::from("a7")).unwrap();
        let mut bad = Move::new(Cell::from("a7"), Cell::from("b6"), piece, None);
        assert!(!rules.try_move(&mut bad));
        assert_eq!(rules.board, before);
        assert!(rules.last_move().is_none());
    }

    #[test]
    fn try_move_flags_check() {
        // white queen slides onto the black king's file
        let mut rules = rules_from("4k3/8/8/8/8/8/3Q4/4K3");
        let piece = rules.board.piece_at(Cell::from("d7")).unwrap();
        let mut m = Move::new(Cell::from("d7"), Cell::from("e6"), piece, None);
        assert!(rules.try_move(&mut m));
        assert!(m.causes_check);
        assert!(rules.is_under_check(Side::Black));
    }
}
