//! Perfect tic-tac-toe.
//!
//! - [`bitboard`]: the 3x3 board as two 9-bit masks
//! - [`notation`]: board and move text
//! - [`search`]: negamax and alpha-beta search, best move selection
//! - [`engine`]: a current board driven by text commands
//! - [`participant`] and [`game`]: turn loop between humans and engines
//!
//! ```
//! use tictactoe::{best_move, parse_position, Player, DRAW};
//!
//! let position = parse_position("x...o....").unwrap();
//! let (_, eval) = best_move(position, Player::One, true).unwrap();
//! assert_eq!(eval, DRAW);
//! ```

pub mod bitboard;
pub mod engine;
pub mod error;
pub mod game;
pub mod notation;
pub mod participant;
pub mod search;

pub use bitboard::{Move, Player, Position, CELLS};
pub use engine::Engine;
pub use error::EngineError;
pub use game::{Game, Outcome};
pub use notation::{format_move, format_position, parse_move, parse_position};
pub use participant::{EngineParticipant, HumanParticipant, Participant, RandomParticipant};
pub use search::{alphabeta, best_move, negamax, Eval, DRAW, LOST, WON};
