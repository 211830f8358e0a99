//! Error types for maze_pathfinding

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Position;

/// Why a maze file could not be turned into a grid.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("maze source is too short ({0} lines, need at least 3)")]
    TooShort(usize),

    #[error("maze source has no grid rows")]
    EmptyGrid,

    #[error("maze source has no `start` line")]
    MissingStart,

    #[error("maze source has no `end` line")]
    MissingEnd,

    #[error("could not parse coordinates from `{0}`")]
    BadCoordinates(String),

    #[error("{which} {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        which: &'static str,
        position: Position,
        width: usize,
        height: usize,
    },
}

/// maze_pathfinding error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("maze load failed: {0}")]
    Load(#[from] LoadError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("no maze files found in {0}")]
    NoMazes(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
