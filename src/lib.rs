pub mod error;
pub mod games;
pub mod grid;
pub mod launcher;
pub mod options;
pub mod terminal;

pub use error::{GameError, Result};
