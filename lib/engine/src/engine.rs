/*
 * Console front end: a line-oriented protocol over stdin/stdout. This is
 * the reference caller of the engine: it asks for legal destinations,
 * commits moves as source/destination pairs, drives undo/redo and lets the
 * computer player think with progress reporting.
 *
 * Location strings are the engine-internal ones (row 1 is Black's back
 * rank); board output is rendered bottom-up the way a player expects.
 */

use crate::board::Side;
use crate::game::Game;
use crate::player::PlayerType;
use regex::Regex;
use std::io::{self, BufRead};
use std::sync::LazyLock;

static MOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-h][1-8])([a-h][1-8])$").unwrap());
static CELL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-h][1-8]$").unwrap());
static POSITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<placement>[kqrbnpKQRBNP1-8/]+) (?P<turn>[wb])$").unwrap());

pub struct ConsoleEngine {
    game: Game,
}

impl ConsoleEngine {
    pub fn new() -> ConsoleEngine {
        let mut game = Game::new();
        // the computer defends the black side by default
        game.black_player_mut().set_player_type(PlayerType::Computer);
        game.add_observer(Box::new(|progress| {
            println!(
                "info depth {} move {}/{} analyzed {} best {}",
                progress.depth,
                progress.current_move,
                progress.total_moves,
                progress.total_analyzed,
                progress
                    .best_move
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }));
        ConsoleEngine { game }
    }

    pub fn start(&mut self) -> io::Result<()> {
        self.info();
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let cmd = line.trim();
            if cmd.is_empty() {
                continue;
            }
            if cmd == "quit" {
                println!("bye");
                break;
            }
            let mut token = cmd.splitn(2, ' ');
            match token.next().unwrap_or_default() {
                "new" => {
                    self.game.reset();
                    print!("{}", self.game.board().render());
                }
                "board" => print!("{}", self.game.board().render()),
                "moves" => self.list_moves(token.next().unwrap_or_default()),
                "move" => self.user_move(token.next().unwrap_or_default()),
                "undo" => println!("{}", if self.game.undo_move() { "ok" } else { "nothing to undo" }),
                "redo" => println!("{}", if self.game.redo_move() { "ok" } else { "nothing to redo" }),
                "go" => self.go(),
                "fix" => self.fix(),
                "status" => self.status(),
                "time" => self.set_time(token.next().unwrap_or_default()),
                "position" => self.position(token.next().unwrap_or_default()),
                _ => println!("not supported"),
            }
        }
        Ok(())
    }

    pub fn info(&self) {
        println!("id name chess-engine 0.1");
        println!("readyok");
    }

    fn list_moves(&mut self, loc: &str) {
        if !CELL_RE.is_match(loc) {
            println!("bad cell");
            return;
        }
        let targets: Vec<String> = self
            .game
            .legal_moves(loc)
            .iter()
            .map(|m| m.to.to_string())
            .collect();
        println!("moves {}", targets.join(" "));
    }

    fn user_move(&mut self, arg: &str) {
        let caps = match MOVE_RE.captures(arg) {
            Some(c) => c,
            None => {
                println!("bad move, expected something like e7e5");
                return;
            }
        };
        let (from, to) = (&caps[1], &caps[2]);
        match self.game.do_move(from, to) {
            Ok(m) => {
                println!("moved {}", m);
                if m.is_promo() {
                    // queen unless the caller re-promotes via the game API
                    println!("promoted to {}", m.promo.map_or("?", |p| p.kind.name()));
                }
                self.announce_state(m.causes_check);
            }
            Err(err) => println!("rejected ({}): {}", err.code(), err),
        }
    }

    // Let the side to move think under its time budget and commit the
    // result.
    fn go(&mut self) {
        match self.game.think_best_move() {
            Some(best) => self.commit_best(best),
            None => println!("nobestmove"),
        }
    }

    fn fix(&mut self) {
        match self.game.think_fix_best_move() {
            Some(best) => self.commit_best(best),
            None => println!("nobestmove"),
        }
    }

    fn commit_best(&mut self, best: crate::moves::Move) {
        let (from, to) = (best.from.to_string(), best.to.to_string());
        let committed = self
            .game
            .do_move(&from, &to)
            .expect("the searched move is legal");
        println!("bestmove {}{} value {}", from, to, best.score);
        self.announce_state(committed.causes_check);
    }

    fn announce_state(&mut self, causes_check: bool) {
        let side = self.game.turn;
        if self.game.is_checkmate(side) {
            println!("checkmate");
        } else if self.game.is_stalemate(side) {
            println!("stalemate");
        } else if causes_check {
            println!("check");
        }
    }

    fn status(&mut self) {
        let side = self.game.turn;
        println!(
            "turn {} ({})",
            if side.is_white() { "white" } else { "black" },
            if self.game.active_player().is_computer() {
                "computer"
            } else {
                "human"
            },
        );
        if self.game.is_checkmate(side) {
            println!("checkmate");
        } else if self.game.is_stalemate(side) {
            println!("stalemate");
        } else if self.game.is_under_check() {
            println!("check");
        }
        println!(
            "time white {} black {}",
            self.game.white_player().think_time(),
            self.game.black_player().think_time(),
        );
    }

    fn set_time(&mut self, arg: &str) {
        match arg.parse::<u64>() {
            Ok(secs) if secs > 0 => {
                self.game.white_player_mut().set_max_think_secs(secs);
                self.game.black_player_mut().set_max_think_secs(secs);
                println!("ok");
            }
            _ => println!("bad time, expected seconds"),
        }
    }

    fn position(&mut self, arg: &str) {
        match POSITION_RE.captures(arg) {
            Some(caps) => {
                let turn = if &caps["turn"] == "b" {
                    Side::Black
                } else {
                    Side::White
                };
                let mut game = Game::from_placement(&caps["placement"], turn);
                game.black_player_mut().set_player_type(PlayerType::Computer);
                self.game = game;
                print!("{}", self.game.board().render());
            }
            None => println!("bad position, expected <placement> <w|b>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_command_shape() {
        let caps = MOVE_RE.captures("e7e5").unwrap();
        assert_eq!(&caps[1], "e7");
        assert_eq!(&caps[2], "e5");
        assert!(MOVE_RE.captures("e7e9").is_none());
        assert!(MOVE_RE.captures("e7 e5").is_none());
        assert!(CELL_RE.is_match("h8"));
        assert!(!CELL_RE.is_match("i1"));
    }

    #[test]
    fn position_command_shape() {
        let caps = POSITION_RE
            .captures("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w")
            .unwrap();
        assert_eq!(&caps["turn"], "w");
        assert!(POSITION_RE.captures("rnbqkbnr x").is_none());
    }
}
