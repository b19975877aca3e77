/*
 * Chess rules-and-search engine.
 *
 * Modules:
 * - board: sides, pieces and the 8x8 cell grid
 * - moves: the reversible move record
 * - rules: move generation, legality, execution/undo, check detection and
 *   the static evaluation
 * - player: the per-side search controller (iterative-deepening alpha-beta
 *   with null-move pruning, principal-variation probes and quiescence)
 * - game: turn keeping, undo/redo stacks, search flags and progress
 *   observers
 * - engine: the console front end
 */
pub mod board;
pub mod constant;
pub mod engine;
pub mod game;
pub mod moves;
pub mod player;
pub mod rules;
