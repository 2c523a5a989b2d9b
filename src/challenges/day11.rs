use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Debug, Clone)]
struct Cavern {
    energy: Vec<u8>,
    width: usize,
    height: usize,
}

impl Cavern {
    fn parse(input: &str) -> Result<Self> {
        let rows: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.len());
        let mut energy = Vec::with_capacity(width * rows.len());
        for row in &rows {
            if row.len() != width {
                return Err(Error::malformed("octopus rows differ in length"));
            }
            for c in row.chars() {
                let e = c
                    .to_digit(10)
                    .ok_or_else(|| Error::malformed(format!("bad energy level {c:?}")))?;
                energy.push(e as u8);
            }
        }
        if energy.is_empty() {
            return Err(Error::malformed("no octopuses"));
        }
        Ok(Self {
            energy,
            width,
            height: rows.len(),
        })
    }

    fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = (index % self.width, index / self.width);
        (-1isize..=1)
            .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
            .filter(|&d| d != (0, 0))
            .filter_map(move |(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < self.width && ny < self.height).then_some(ny * self.width + nx)
            })
    }

    /// Advances one step and returns how many octopuses flashed.
    fn step(&mut self) -> usize {
        let mut ready: Vec<usize> = Vec::new();
        for (i, e) in self.energy.iter_mut().enumerate() {
            *e += 1;
            if *e > 9 {
                ready.push(i);
            }
        }
        let mut flashed = vec![false; self.energy.len()];
        while let Some(i) = ready.pop() {
            if flashed[i] {
                continue;
            }
            flashed[i] = true;
            let neighbours: Vec<usize> = self.neighbours(i).collect();
            for n in neighbours {
                self.energy[n] += 1;
                if self.energy[n] > 9 && !flashed[n] {
                    ready.push(n);
                }
            }
        }
        for (e, flashed) in self.energy.iter_mut().zip(&flashed) {
            if *flashed {
                *e = 0;
            }
        }
        flashed.iter().filter(|&&f| f).count()
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let mut cavern = Cavern::parse(input)?;
        let flashes: usize = (0..100).map(|_| cavern.step()).sum();
        Ok(flashes.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let mut cavern = Cavern::parse(input)?;
        let everyone = cavern.energy.len();
        let mut step = 1;
        while cavern.step() != everyone {
            step += 1;
        }
        Ok(step.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
5483143223
2745854711
5264556173
6141336146
6357385478
4167524645
2176841721
6882881134
4846848554
5283751526
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "1656");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "195");
    }

    #[test]
    fn small_grid_cascade() {
        let mut cavern = Cavern::parse("11111\n19991\n19191\n19991\n11111\n").unwrap();
        assert_eq!(cavern.step(), 9);
        assert_eq!(
            cavern.energy,
            vec![
                3, 4, 5, 4, 3, //
                4, 0, 0, 0, 4, //
                5, 0, 0, 0, 5, //
                4, 0, 0, 0, 4, //
                3, 4, 5, 4, 3,
            ]
        );
    }
}
