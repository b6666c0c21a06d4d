use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError
{
    #[error("couldn't switch the terminal to raw mode: {0}")]
    TerminalInit(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("no free cell left to place {what}")]
    GridSaturated { what: &'static str },

    #[error("{0}")]
    InvalidOption(String),

    #[error("{0}")]
    Launch(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
