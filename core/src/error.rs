use alloc::string::String;
use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{columns} board cannot hold {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        columns: Coord,
        mines: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Malformed data: {0}")]
    Malformed(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
