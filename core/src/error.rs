use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration, a board needs cells and at least one of them safe")]
    InvalidConfiguration,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Unknown difficulty, expected one of: easy, medium, hard")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
