/*
 * Player and search controller.
 *
 * The computer player picks its move with an iterative-deepening negamax
 * alpha-beta search: adaptive null-move pruning, principal-variation probes
 * and a capture-only quiescence search below depth zero. The search is
 * single-threaded and time-boxed; the wall clock is only consulted between
 * root moves, so once a branch recurses it runs to completion. Progress is
 * reported to the caller after every root move, and that callback is the
 * one cooperative yield point of a search.
 */

use crate::board::Side;
use crate::constant::{
    DEFAULT_THINK_SECS, DEPTH_TIME_FRACTION, FIX_SEARCH_DEPTH, MAX_SCORE, MIN_SCORE,
    NEAR_END_MOVE_COUNT, NEAR_END_PIECE_COUNT,
};
use crate::moves::Move;
use crate::rules::Rules;
use std::time::{Duration, Instant};
use tracing::debug;

/// Monotonic time source for the search budget and the think-time clocks.
/// Injected so tests can drive time deterministically.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> MonotonicClock {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlayerType {
    Human,
    Computer,
}

/// Which of the search refinements are switched on. All of them change node
/// counts only, never the value of the returned move.
#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    pub null_move_pruning: bool,
    pub principal_variation: bool,
    pub quiescent_search: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            null_move_pruning: true,
            principal_variation: true,
            quiescent_search: true,
        }
    }
}

/// Progress record sent to observers after every root move.
#[derive(Clone, Copy, Debug)]
pub struct SearchProgress {
    pub depth: i32,
    pub current_move: usize,
    pub total_moves: usize,
    pub total_analyzed: i64,
    pub best_move: Option<Move>,
}

pub struct Player {
    side: Side,
    kind: PlayerType,
    max_think_time: Duration,
    total_think_time: Duration,
    turn_started: Option<Duration>,
    total_moves_analyzed: i64,
    game_near_end: bool,
    clock: Box<dyn Clock>,
}

impl Player {
    pub fn new(side: Side, kind: PlayerType) -> Player {
        Player::with_clock(side, kind, Box::new(MonotonicClock::new()))
    }

    pub fn with_clock(side: Side, kind: PlayerType, clock: Box<dyn Clock>) -> Player {
        Player {
            side,
            kind,
            max_think_time: Duration::from_secs(DEFAULT_THINK_SECS),
            total_think_time: Duration::ZERO,
            turn_started: None,
            total_moves_analyzed: 0,
            game_near_end: false,
            clock,
        }
    }

    pub fn is_computer(&self) -> bool {
        self.kind == PlayerType::Computer
    }

    pub fn player_type(&self) -> PlayerType {
        self.kind
    }

    pub fn set_player_type(&mut self, kind: PlayerType) {
        self.kind = kind;
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    pub fn set_max_think_secs(&mut self, secs: u64) {
        self.max_think_time = Duration::from_secs(secs);
    }

    pub fn total_moves_analyzed(&self) -> i64 {
        self.total_moves_analyzed
    }

    // ---- think-time accounting -------------------------------------------

    pub fn time_start(&mut self) {
        self.turn_started = Some(self.clock.now());
    }

    pub fn time_end(&mut self) {
        if let Some(started) = self.turn_started.take() {
            self.total_think_time += self.clock.now().saturating_sub(started);
        }
    }

    pub fn reset_time(&mut self) {
        self.total_think_time = Duration::ZERO;
        self.turn_started = None;
    }

    // Cumulative think time as hh:mm:ss, including the running turn.
    pub fn think_time(&self) -> String {
        let mut total = self.total_think_time;
        if let Some(started) = self.turn_started {
            total += self.clock.now().saturating_sub(started);
        }
        let secs = total.as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }

    // ---- search ----------------------------------------------------------

    /// Iterative-deepening search under the think-time budget. Each depth
    /// re-searches the root move list full-width; the incumbent best of the
    /// current depth is always valid, so a mid-depth timeout still returns a
    /// move. Returns None only when the side has no legal move at all.
    pub fn get_best_move(
        &mut self,
        rules: &mut Rules,
        opts: SearchOptions,
        mut notify: impl FnMut(&SearchProgress),
    ) -> Option<Move> {
        let mut total_moves = rules.all_legal_moves(self.side);
        if total_moves.is_empty() {
            return None;
        }

        let think_start = self.clock.now();
        let enemy = self.side.enemy();

        // With few pieces or few moves on either side the position is
        // zugzwang-prone and the null-move assumption breaks down.
        self.game_near_end = false;
        let enemy_moves = rules.all_legal_moves(enemy).len();
        if rules.board.piece_count(self.side) <= NEAR_END_PIECE_COUNT
            || total_moves.len() <= NEAR_END_MOVE_COUNT
            || rules.board.piece_count(enemy) <= NEAR_END_PIECE_COUNT
            || enemy_moves <= NEAR_END_MOVE_COUNT
        {
            self.game_near_end = true;
        }

        self.total_moves_analyzed = 0;
        let mut best: Option<Move> = None;
        let mut depth = 1;
        let mut move_counter;

        loop {
            let mut alpha = MIN_SCORE;
            let beta = MAX_SCORE;
            move_counter = 0;

            for i in 0..total_moves.len() {
                let mut m = total_moves[i];
                move_counter += 1;

                rules.execute_move(&mut m);
                m.score = -self.alpha_beta(rules, enemy, depth - 1, -beta, -alpha, opts);
                self.total_moves_analyzed += 1;
                rules.undo_move(&m);
                total_moves[i] = m;

                if m.score > alpha {
                    best = Some(m);
                    alpha = m.score;
                }

                notify(&SearchProgress {
                    depth,
                    current_move: move_counter,
                    total_moves: total_moves.len(),
                    total_analyzed: self.total_moves_analyzed,
                    best_move: best,
                });

                // hard cut: the full budget is gone, stop inside the depth
                if self.elapsed_since(think_start) > self.max_think_time {
                    break;
                }
            }

            debug!(depth, score = alpha, analyzed = self.total_moves_analyzed, "depth searched");

            // a new depth only starts while most of the budget remains
            if self.elapsed_since(think_start) > self.max_think_time.mul_f64(DEPTH_TIME_FRACTION) {
                break;
            }
            depth += 1;
        }

        notify(&SearchProgress {
            depth,
            current_move: move_counter,
            total_moves: total_moves.len(),
            total_analyzed: self.total_moves_analyzed,
            best_move: best,
        });
        best
    }

    /// Fixed-depth search without a time budget or notifications.
    pub fn get_fix_best_move(&mut self, rules: &mut Rules, opts: SearchOptions) -> Option<Move> {
        let enemy = self.side.enemy();
        let mut alpha = MIN_SCORE;
        let beta = MAX_SCORE;
        let mut best: Option<Move> = None;

        for mut m in rules.all_legal_moves(self.side) {
            rules.execute_move(&mut m);
            m.score = -self.alpha_beta(rules, enemy, FIX_SEARCH_DEPTH - 1, -beta, -alpha, opts);
            rules.undo_move(&m);

            if m.score > alpha {
                best = Some(m);
                alpha = m.score;
            }
        }
        best
    }

    // Negamax alpha-beta. The caller negates the result and swaps the
    // negated window across the recursive boundary.
    fn alpha_beta(
        &mut self,
        rules: &mut Rules,
        side: Side,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        opts: SearchOptions,
    ) -> i32 {
        // Null move: hand the enemy a free shot at reduced depth; if even
        // that cannot reach beta, the real moves will not either.
        let r = if depth > 6 { 3 } else { 2 };
        if depth >= 2 && !self.game_near_end && opts.null_move_pruning {
            let val = -self.alpha_beta(rules, side.enemy(), depth - r - 1, -beta, -beta + 1, opts);
            if val >= beta {
                return beta;
            }
        }

        if depth <= 0 {
            return if opts.quiescent_search {
                self.quiescent_search(rules, side, alpha, beta)
            } else {
                rules.evaluate(side)
            };
        }

        let mut found_pv = false;
        for mut m in rules.all_legal_moves(side) {
            rules.execute_move(&mut m);

            let val = if found_pv && opts.principal_variation {
                // null-window probe; re-search only when it lands inside
                // the open window
                let probe =
                    -self.alpha_beta(rules, side.enemy(), depth - 1, -alpha - 1, -alpha, opts);
                if probe > alpha && probe < beta {
                    -self.alpha_beta(rules, side.enemy(), depth - 1, -beta, -alpha, opts)
                } else {
                    probe
                }
            } else {
                -self.alpha_beta(rules, side.enemy(), depth - 1, -beta, -alpha, opts)
            };

            self.total_moves_analyzed += 1;
            rules.undo_move(&m);

            // the enemy already has better options than allowing this
            if val >= beta {
                return beta;
            }
            if val > alpha {
                alpha = val;
                found_pv = true;
            }
        }
        alpha
    }

    // Capture-only horizon extension below depth zero: stand pat on the
    // static score, then chase the good captures until the position is
    // quiet.
    fn quiescent_search(
        &mut self,
        rules: &mut Rules,
        side: Side,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        let val = rules.evaluate(side);
        if val >= beta {
            return beta;
        }
        if val > alpha {
            alpha = val;
        }

        for mut m in rules.good_capture_moves(side) {
            rules.execute_move(&mut m);
            let val = -self.quiescent_search(rules, side.enemy(), -beta, -alpha);
            rules.undo_move(&m);

            if val >= beta {
                return beta;
            }
            if val > alpha {
                alpha = val;
            }
        }
        alpha
    }

    fn elapsed_since(&self, start: Duration) -> Duration {
        self.clock.now().saturating_sub(start)
    }
}
