use pathfinding::directed::bfs::bfs_reach;
use tracing::debug;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Debug)]
struct HeightMap {
    heights: Vec<u8>,
    width: usize,
    height: usize,
}

impl HeightMap {
    fn parse(input: &str) -> Result<Self> {
        let rows: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.len());
        let mut heights = Vec::with_capacity(width * rows.len());
        for row in &rows {
            if row.len() != width {
                return Err(Error::malformed("height map rows differ in length"));
            }
            for c in row.chars() {
                let h = c
                    .to_digit(10)
                    .ok_or_else(|| Error::malformed(format!("bad height {c:?}")))?;
                heights.push(h as u8);
            }
        }
        Ok(Self {
            heights,
            width,
            height: rows.len(),
        })
    }

    fn get(&self, x: usize, y: usize) -> u8 {
        self.heights[y * self.width + x]
    }

    fn neighbours(&self, (x, y): (usize, usize)) -> impl Iterator<Item = (usize, usize)> + '_ {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < self.width && ny < self.height).then_some((nx, ny))
            })
    }

    fn low_points(&self) -> Vec<(usize, usize)> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                let h = self.get(x, y);
                self.neighbours((x, y)).all(|(nx, ny)| self.get(nx, ny) > h)
            })
            .collect()
    }

    fn basin_size(&self, low: (usize, usize)) -> usize {
        bfs_reach(low, |&p| {
            self.neighbours(p)
                .filter(|&(x, y)| self.get(x, y) < 9)
                .collect::<Vec<_>>()
        })
        .count()
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let map = HeightMap::parse(input)?;
        let risk: u32 = map
            .low_points()
            .into_iter()
            .map(|(x, y)| u32::from(map.get(x, y)) + 1)
            .sum();
        Ok(risk.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let map = HeightMap::parse(input)?;
        let mut sizes: Vec<usize> = map
            .low_points()
            .into_iter()
            .map(|low| {
                let size = map.basin_size(low);
                debug!(?low, size, "basin");
                size
            })
            .collect();
        if sizes.len() < 3 {
            return Err(Error::NoSolution(format!("only {} basins", sizes.len())));
        }
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        Ok(sizes[..3].iter().product::<usize>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2199943210\n3987894921\n9856789892\n8767896789\n9899965678\n";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "15");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "1134");
    }

    #[test]
    fn basin_sizes() {
        let map = HeightMap::parse(EXAMPLE).unwrap();
        let mut sizes: Vec<_> = map.low_points().into_iter().map(|p| map.basin_size(p)).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![3, 9, 9, 14]);
    }
}
