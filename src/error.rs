use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid board `{0}`, expected 9 of `.`, `x`, `o`")]
    InvalidBoard(String),

    #[error("invalid move `{0}`, expected a1-c3")]
    InvalidMove(String),

    #[error("cell `{0}` is already taken")]
    Occupied(String),

    #[error("the game is already finished")]
    Finished,

    #[error("no open cell left")]
    NoMove,
}
