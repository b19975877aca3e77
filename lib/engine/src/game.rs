/*
 * Game: the top-level object a front end talks to. Owns the rules engine,
 * the two players, the turn and the undo/redo move stacks, and relays
 * search progress to registered observers.
 */

use crate::board::{Board, Cell, Piece, PieceKind, Side};
use crate::moves::{Move, MoveKind};
use crate::player::{Player, PlayerType, SearchOptions, SearchProgress};
use crate::rules::Rules;
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MoveError {
    #[error("the source cell is empty or not owned by the side to move")]
    NotYourTurn,
    #[error("the destination is not a legal move for this piece")]
    IllegalMove,
}

impl MoveError {
    // Stable result codes for callers that want the numeric form; 0 means
    // applied and is never produced here.
    pub fn code(&self) -> i32 {
        match self {
            MoveError::NotYourTurn => -1,
            MoveError::IllegalMove => -2,
        }
    }
}

pub type ProgressObserver = Box<dyn FnMut(&SearchProgress)>;

pub struct Game {
    rules: Rules,
    pub turn: Side,
    white_player: Player,
    black_player: Player,
    moves_history: Vec<Move>,
    redo_history: Vec<Move>,
    pub null_move_pruning: bool,
    pub principal_variation: bool,
    pub quiescent_search: bool,
    observers: Vec<ProgressObserver>,
}

impl Game {
    pub fn new() -> Game {
        Game::with_board(Board::init(), Side::White)
    }

    // Rebuild a game around an already-parsed board placement; the hook a
    // persistence collaborator uses.
    pub fn from_placement(placement: &str, turn: Side) -> Game {
        Game::with_board(Board::from_placement(placement), turn)
    }

    fn with_board(board: Board, turn: Side) -> Game {
        Game {
            rules: Rules::new(board),
            turn,
            white_player: Player::new(Side::White, PlayerType::Human),
            black_player: Player::new(Side::Black, PlayerType::Human),
            moves_history: vec![],
            redo_history: vec![],
            null_move_pruning: true,
            principal_variation: true,
            quiescent_search: true,
            observers: vec![],
        }
    }

    // Back to the standard starting arrangement, White to move.
    pub fn reset(&mut self) {
        self.moves_history.clear();
        self.redo_history.clear();
        self.white_player.reset_time();
        self.black_player.reset_time();
        self.turn = Side::White;
        self.white_player.time_start();
        self.rules = Rules::new(Board::init());
    }

    pub fn board(&self) -> &Board {
        &self.rules.board
    }

    pub fn white_player(&self) -> &Player {
        &self.white_player
    }

    pub fn black_player(&self) -> &Player {
        &self.black_player
    }

    pub fn white_player_mut(&mut self) -> &mut Player {
        &mut self.white_player
    }

    pub fn black_player_mut(&mut self) -> &mut Player {
        &mut self.black_player
    }

    pub fn active_player(&self) -> &Player {
        if self.turn.is_black() {
            &self.black_player
        } else {
            &self.white_player
        }
    }

    pub fn enemy_player(&self, side: Side) -> &Player {
        if side.is_black() {
            &self.white_player
        } else {
            &self.black_player
        }
    }

    pub fn comp_vs_comp(&self) -> bool {
        self.white_player.player_type() == self.black_player.player_type()
            && self.white_player.is_computer()
    }

    pub fn add_observer(&mut self, observer: ProgressObserver) {
        self.observers.push(observer);
    }

    // ---- moves -----------------------------------------------------------

    pub fn legal_moves(&mut self, loc: &str) -> Vec<Move> {
        self.rules.legal_moves(Cell::from(loc))
    }

    /// Commit a move given source/destination location strings. On success
    /// the move lands on the done stack, the redo stack is cleared and the
    /// turn flips. Rejections leave every piece where it was.
    pub fn do_move(&mut self, source: &str, dest: &str) -> Result<Move, MoveError> {
        let from = Cell::from(source);
        let piece = self
            .rules
            .board
            .piece_at(from)
            .filter(|p| p.side == self.turn)
            .ok_or(MoveError::NotYourTurn)?;

        let to = Cell::from(dest);
        let mut m = Move::new(from, to, piece, self.rules.board.piece_at(to));
        if !self.rules.try_move(&mut m) {
            return Err(MoveError::IllegalMove);
        }

        self.moves_history.push(m);
        self.redo_history.clear();
        self.next_player_turn();
        Ok(m)
    }

    /// Take back the newest committed move. Returns false when there is
    /// nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        match self.moves_history.pop() {
            Some(m) => {
                self.redo_history.push(m);
                self.rules.undo_move(&m);
                self.rules.set_last_move(self.moves_history.last().copied());
                self.next_player_turn();
                true
            }
            None => false,
        }
    }

    /// Replay the newest undone move.
    pub fn redo_move(&mut self) -> bool {
        match self.redo_history.pop() {
            Some(mut m) => {
                if !self.rules.try_move(&mut m) {
                    self.redo_history.push(m);
                    return false;
                }
                self.moves_history.push(m);
                self.next_player_turn();
                true
            }
            None => false,
        }
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.moves_history.last()
    }

    pub fn move_history(&self) -> &[Move] {
        &self.moves_history
    }

    /// Replace the promotion piece of the last committed move: the hook a
    /// front end calls once the user picked something other than the
    /// default queen.
    pub fn set_promo_piece(&mut self, kind: PieceKind) {
        if let Some(last) = self.moves_history.last_mut() {
            if last.kind == MoveKind::Promotion {
                let promo = Piece::with_moves(kind, last.piece.side, last.piece.moves + 1);
                last.promo = Some(promo);
                self.rules.board.set_piece(last.to, Some(promo));
                self.rules.set_last_move(Some(*last));
            }
        }
    }

    fn next_player_turn(&mut self) {
        if self.turn.is_white() {
            self.white_player.time_end();
            self.black_player.time_start();
            self.turn = Side::Black;
        } else {
            self.black_player.time_end();
            self.white_player.time_start();
            self.turn = Side::White;
        }
    }

    // ---- status queries --------------------------------------------------

    pub fn is_under_check(&self) -> bool {
        self.rules.is_under_check(self.turn)
    }

    pub fn is_checkmate(&mut self, side: Side) -> bool {
        self.rules.is_checkmate(side)
    }

    pub fn is_stalemate(&mut self, side: Side) -> bool {
        self.rules.is_stalemate(side)
    }

    // ---- search ----------------------------------------------------------

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            null_move_pruning: self.null_move_pruning,
            principal_variation: self.principal_variation,
            quiescent_search: self.quiescent_search,
        }
    }

    /// Let the active player's search pick a move. The move is not
    /// committed; the caller decides and calls `do_move`.
    pub fn think_best_move(&mut self) -> Option<Move> {
        let opts = self.search_options();
        let rules = &mut self.rules;
        let observers = &mut self.observers;
        let player = if self.turn.is_black() {
            &mut self.black_player
        } else {
            &mut self.white_player
        };
        player.get_best_move(rules, opts, |progress| {
            for observer in observers.iter_mut() {
                observer(progress);
            }
        })
    }

    /// Fixed-depth variant without time budget or notifications.
    pub fn think_fix_best_move(&mut self) -> Option<Move> {
        let opts = self.search_options();
        let rules = &mut self.rules;
        let player = if self.turn.is_black() {
            &mut self.black_player
        } else {
            &mut self.white_player
        };
        player.get_fix_best_move(rules, opts)
    }
}
