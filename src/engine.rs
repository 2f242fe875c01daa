//! Text-facing engine holding the current position.

use colored::Colorize;
use log::debug;
use std::fmt;

use crate::bitboard::{Move, Player, Position, BOARD_SIZE, CELLS};
use crate::error::EngineError;
use crate::notation::{format_move, format_position, parse_cell, parse_position};
use crate::search::best_move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Engine {
    position: Position,
    randomize: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Engine { position: Position::EMPTY, randomize: true }
    }

    /// Engine that always answers with the lowest of equally good cells.
    pub fn deterministic() -> Self {
        Engine { position: Position::EMPTY, randomize: false }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn randomize(&self) -> bool {
        self.randomize
    }

    pub fn reset(&mut self) {
        debug!("reset board");
        self.position = Position::EMPTY;
    }

    /// Replace the board with `board` text. The current board is kept on error.
    pub fn set(&mut self, board: &str) -> Result<(), EngineError> {
        let position = parse_position(board).ok_or_else(|| EngineError::InvalidBoard(board.to_string()))?;
        debug!("set board to {}", board);
        self.position = position;
        Ok(())
    }

    pub fn is_won(&self, player: Player) -> bool {
        self.position.is_won(player)
    }

    pub fn is_full(&self) -> bool {
        self.position.is_full()
    }

    pub fn is_finished(&self) -> bool {
        self.position.is_finished()
    }

    pub fn winner(&self) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&player| self.is_won(player))
    }

    /// Play the coordinate `text` for `player`.
    pub fn play(&mut self, player: Player, text: &str) -> Result<Move, EngineError> {
        if self.is_finished() {
            return Err(EngineError::Finished);
        }
        let m = parse_cell(text).ok_or_else(|| EngineError::InvalidMove(text.to_string()))?;
        self.play_move(player, m)?;
        Ok(m)
    }

    pub fn play_move(&mut self, player: Player, m: Move) -> Result<(), EngineError> {
        if self.is_finished() {
            return Err(EngineError::Finished);
        }
        if m >= CELLS {
            return Err(EngineError::InvalidMove(m.to_string()));
        }
        if !self.position.is_legal_move(m) {
            return Err(EngineError::Occupied(format_move(m).unwrap_or_default()));
        }
        self.position = self.position.play(player, m);
        Ok(())
    }

    /// Search and play the best move for `player`.
    pub fn play_best(&mut self, player: Player) -> Result<Move, EngineError> {
        if self.is_finished() {
            return Err(EngineError::Finished);
        }
        let (m, eval) = best_move(self.position, player, self.randomize).ok_or(EngineError::NoMove)?;
        debug!("{} plays {:?} with eval {}", player, format_move(m), eval);
        self.position = self.position.play(player, m);
        Ok(m)
    }

    /// Board text of the current position.
    pub fn board(&self) -> String {
        format_position(self.position).unwrap_or_else(|| ".".repeat(CELLS))
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board();
        let cells: Vec<char> = board.chars().collect();
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{}|", row + 1)?;
            for &c in &cells[row * BOARD_SIZE..(row + 1) * BOARD_SIZE] {
                match c {
                    'x' => write!(f, "{}", "x".red())?,
                    'o' => write!(f, "{}", "o".blue())?,
                    _ => write!(f, "{}", c)?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  ---")?;
        write!(f, " |abc|")
    }
}
