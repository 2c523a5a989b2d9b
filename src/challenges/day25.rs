use tracing::debug;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const EAST: u8 = b'>';
const SOUTH: u8 = b'v';
const EMPTY: u8 = b'.';

/// The sea floor. Both herds wrap around the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Floor {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Floor {
    fn parse(input: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let (mut width, mut height) = (0, 0);
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if height == 0 {
                width = line.len();
            } else if line.len() != width {
                return Err(Error::malformed("sea floor rows differ in length"));
            }
            for b in line.bytes() {
                if ![EAST, SOUTH, EMPTY].contains(&b) {
                    return Err(Error::malformed(format!(
                        "unexpected {:?} on the sea floor",
                        b as char
                    )));
                }
                cells.push(b);
            }
            height += 1;
        }
        if height == 0 {
            return Err(Error::malformed("empty sea floor"));
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Moves every member of `herd` that faces an empty cell, all at once.
    fn shuffle(&mut self, herd: u8, next: impl Fn(usize, usize) -> (usize, usize)) -> bool {
        let movers: Vec<(usize, usize)> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cells[y * self.width + x] == herd)
            .filter_map(|(x, y)| {
                let (nx, ny) = next(x, y);
                let (from, to) = (y * self.width + x, ny * self.width + nx);
                (self.cells[to] == EMPTY).then_some((from, to))
            })
            .collect();
        for &(from, to) in &movers {
            self.cells[from] = EMPTY;
            self.cells[to] = herd;
        }
        !movers.is_empty()
    }

    fn step(&mut self) -> bool {
        let (width, height) = (self.width, self.height);
        let east = self.shuffle(EAST, |x, y| ((x + 1) % width, y));
        let south = self.shuffle(SOUTH, |x, y| (x, (y + 1) % height));
        east || south
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let mut floor = Floor::parse(input)?;
        let mut steps = 1;
        while floor.step() {
            steps += 1;
        }
        debug!(steps, "sea cucumbers settled");
        Ok(steps.to_string())
    }

    fn challenge2(&self, _input: &str) -> Result<String> {
        Ok("0".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
v...>>.vv>
.vv>>.vv..
>>.>v>...v
>>v>>.>.v.
v>v.vv.v..
>.>>..v...
.vv..>.>v.
v.v..>>v.v
....v..v.>
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "58");
    }

    #[test]
    fn one_step() {
        let mut floor = Floor::parse(EXAMPLE).unwrap();
        floor.step();
        let expected = Floor::parse(
            "\
....>.>v.>
v.v>.>v.v.
>v>>..>v..
>>v>v>.>.v
.>v.v...v.
v>>.>vvv..
..v...>>..
vv...>>vv.
>.v.v..v.v
",
        )
        .unwrap();
        assert_eq!(floor, expected);
    }

    #[test]
    fn east_moves_before_south() {
        // The south-facing cucumber takes the cell the east-facing one just left.
        let mut floor = Floor::parse(".v.\n.>.\n...\n").unwrap();
        floor.step();
        assert_eq!(floor.cells, b"....v>...".to_vec());
    }

    #[test]
    fn wraps_around_the_edges() {
        let mut floor = Floor::parse("..>\n").unwrap();
        floor.step();
        assert_eq!(floor.cells, b">..".to_vec());
    }
}
