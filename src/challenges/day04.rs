use tracing::debug;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const SIZE: usize = 5;

#[derive(Debug, Clone)]
struct Board {
    numbers: [u32; SIZE * SIZE],
    marked: [bool; SIZE * SIZE],
    won: bool,
}

impl Board {
    fn parse(block: &str) -> Result<Self> {
        let values = block
            .split_whitespace()
            .map(|n| Ok(n.parse()?))
            .collect::<Result<Vec<u32>>>()?;
        let numbers = values.try_into().map_err(|values: Vec<u32>| {
            Error::malformed(format!("board has {} numbers, expected 25", values.len()))
        })?;
        Ok(Self {
            numbers,
            marked: [false; SIZE * SIZE],
            won: false,
        })
    }

    /// Marks `number` and reports whether this call completed a row or column.
    fn call(&mut self, number: u32) -> bool {
        let Some(pos) = self.numbers.iter().position(|&n| n == number) else {
            return false;
        };
        self.marked[pos] = true;
        let (row, col) = (pos / SIZE, pos % SIZE);
        let row_done = (0..SIZE).all(|c| self.marked[row * SIZE + c]);
        let col_done = (0..SIZE).all(|r| self.marked[r * SIZE + col]);
        row_done || col_done
    }

    fn unmarked_sum(&self) -> u32 {
        self.numbers
            .iter()
            .zip(self.marked)
            .filter(|(_, marked)| !marked)
            .map(|(n, _)| n)
            .sum()
    }
}

struct Game {
    draws: Vec<u32>,
    boards: Vec<Board>,
}

fn parse(input: &str) -> Result<Game> {
    let normalized = input.replace("\r\n", "\n");
    let mut blocks = normalized.split("\n\n").filter(|b| !b.trim().is_empty());
    let draws = blocks
        .next()
        .ok_or_else(|| Error::malformed("missing draw order"))?
        .trim()
        .split(',')
        .map(|n| Ok(n.trim().parse()?))
        .collect::<Result<_>>()?;
    let boards = blocks.map(Board::parse).collect::<Result<_>>()?;
    Ok(Game { draws, boards })
}

/// Plays every draw and returns the winning scores in the order boards won.
fn winning_scores(mut game: Game) -> Vec<u32> {
    let mut scores = Vec::new();
    for number in game.draws {
        debug!(number, "calling");
        for (index, board) in game.boards.iter_mut().enumerate() {
            if !board.won && board.call(number) {
                board.won = true;
                let score = board.unmarked_sum() * number;
                debug!(board = index, score, "bingo");
                scores.push(score);
            }
        }
    }
    scores
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        winning_scores(parse(input)?)
            .first()
            .map(u32::to_string)
            .ok_or_else(|| Error::NoSolution("no board ever wins".into()))
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        winning_scores(parse(input)?)
            .last()
            .map(u32::to_string)
            .ok_or_else(|| Error::NoSolution("no board ever wins".into()))
    }
}
