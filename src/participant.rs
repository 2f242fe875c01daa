use log::warn;
use rand::Rng;
use std::io::{self, BufRead, Write};

use crate::bitboard::{Move, Player, Position};
use crate::notation::parse_move;
use crate::search::best_move;

// ##############################
// # Participant
// ##############################

/// Something that picks moves for one side of a game.
pub trait Participant {
    /// A legal move for `player` on `position`, or `None` to abandon the game.
    fn choose_move(&mut self, position: Position, player: Player) -> Option<Move>;
}

// ##############################
// # Engine
// ##############################

#[derive(Clone, Copy, Debug)]
pub struct EngineParticipant {
    randomize: bool,
}

impl EngineParticipant {
    pub fn new(randomize: bool) -> Self {
        EngineParticipant { randomize }
    }
}

impl Participant for EngineParticipant {
    fn choose_move(&mut self, position: Position, player: Player) -> Option<Move> {
        best_move(position, player, self.randomize).map(|(m, _)| m)
    }
}

// ##############################
// # Random
// ##############################

#[derive(Clone, Copy, Debug, Default)]
pub struct RandomParticipant;

impl RandomParticipant {
    pub fn new() -> Self {
        RandomParticipant {}
    }
}

impl Participant for RandomParticipant {
    fn choose_move(&mut self, position: Position, _player: Player) -> Option<Move> {
        let mut rng = rand::thread_rng();
        let possible_moves: Vec<Move> = position.open_cells().collect();
        if possible_moves.is_empty() {
            return None;
        }
        Some(possible_moves[rng.gen_range(0..possible_moves.len())])
    }
}

// ##############################
// # Human
// ##############################

/// Reads coordinates line by line until a legal one arrives. End of input
/// abandons the game.
pub struct HumanParticipant<R, W> {
    input: R,
    output: W,
}

impl HumanParticipant<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        HumanParticipant::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanParticipant<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanParticipant { input, output }
    }

    fn read_move(&mut self, position: Position) -> io::Result<Option<Move>> {
        let mut line = String::new();
        loop {
            write!(self.output, "Your move? [a1-c3] ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if let Some(m) = parse_move(position, line.trim()) {
                return Ok(Some(m));
            }
            writeln!(self.output, "Illegal move!")?;
        }
    }
}

impl<R: BufRead, W: Write> Participant for HumanParticipant<R, W> {
    fn choose_move(&mut self, position: Position, _player: Player) -> Option<Move> {
        match self.read_move(position) {
            Ok(m) => m,
            Err(e) => {
                warn!("failed to read move: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_position;
    use std::io::Cursor;

    #[test]
    fn test_human_retries_until_legal() {
        let position = parse_position("x........").unwrap();
        let mut output = Vec::new();
        let mut human = HumanParticipant::new(Cursor::new("zz\na1\n  b2  \n"), &mut output);

        assert_eq!(human.choose_move(position, Player::Two), Some(4));
        drop(human);

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Your move?").count(), 3);
        assert_eq!(output.matches("Illegal move!").count(), 2);
    }

    #[test]
    fn test_human_end_of_input() {
        let mut human = HumanParticipant::new(Cursor::new("c4\n"), Vec::new());
        assert_eq!(human.choose_move(Position::EMPTY, Player::One), None);
    }

    #[test]
    fn test_random_plays_open_cells() {
        let position = parse_position("xoxoxox..").unwrap();
        let mut random = RandomParticipant::new();
        for _ in 0..20 {
            let m = random.choose_move(position, Player::Two).unwrap();
            assert!(m == 7 || m == 8);
        }
        let full = parse_position("xoxxoooxx").unwrap();
        assert_eq!(random.choose_move(full, Player::One), None);
    }

    #[test]
    fn test_engine_takes_the_win() {
        let position = parse_position("oo.xx....").unwrap();
        let mut engine = EngineParticipant::new(true);
        assert_eq!(engine.choose_move(position, Player::One), Some(5));
    }
}
