use std::{io, num::ParseIntError};

use thiserror::Error;

use crate::challenges::day24::AluError;

/// Everything a challenge can fail with, propagated up to the dispatcher.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid number: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("ALU fault: {0}")]
    Alu(#[from] AluError),
    #[error("no solution: {0}")]
    NoSolution(String),
    #[error("day {0} is not one of 1-25")]
    UnknownDay(u8),
    #[error("challenge {0} is not one of 1-2")]
    UnknownChallenge(u8),
}

impl Error {
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::Malformed(what.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
