use log::{debug, error};

use crate::bitboard::Player;
use crate::engine::Engine;
use crate::notation::format_move;
use crate::participant::Participant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won(Player),
    Draw,
    /// A participant stopped answering before the game was decided.
    Abandoned,
}

// ##############################
// # Game
// ##############################

/// Two participants taking turns on one engine board. `Player::One` moves
/// first from an empty board; on a preset board the side with fewer stones
/// moves.
pub struct Game<'a> {
    engine: Engine,
    player_one: Box<dyn Participant + 'a>,
    player_two: Box<dyn Participant + 'a>,
    verbose: bool,
}

impl<'a> Game<'a> {
    pub fn new(player_one: impl Participant + 'a, player_two: impl Participant + 'a) -> Self {
        Game::with_engine(Engine::new(), player_one, player_two)
    }

    pub fn with_engine(
        engine: Engine,
        player_one: impl Participant + 'a,
        player_two: impl Participant + 'a,
    ) -> Self {
        Game {
            engine,
            player_one: Box::new(player_one),
            player_two: Box::new(player_two),
            verbose: false,
        }
    }

    /// Print the board and every move to stdout.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn play(&mut self) -> Outcome {
        if self.verbose {
            println!("{}", self.engine);
        }

        loop {
            if let Some(winner) = self.engine.winner() {
                debug!("{} wins: {}", winner, self.engine.board());
                return Outcome::Won(winner);
            }
            if self.engine.is_full() {
                debug!("draw: {}", self.engine.board());
                return Outcome::Draw;
            }

            let position = self.engine.position();
            let player = position.side_to_move();
            let participant = match player {
                Player::One => &mut self.player_one,
                Player::Two => &mut self.player_two,
            };

            let Some(chosen_move) = participant.choose_move(position, player) else {
                debug!("{} abandoned the game", player);
                return Outcome::Abandoned;
            };

            if let Err(e) = self.engine.play_move(player, chosen_move) {
                error!("{} chose an unplayable move {}: {}", player, chosen_move, e);
                return Outcome::Abandoned;
            }

            if self.verbose {
                println!("{} plays {}", player, format_move(chosen_move).unwrap_or_default());
                println!("{}", self.engine);
            }
        }
    }
}
