use pathfinding::directed::dijkstra::dijkstra;
use tracing::{debug, trace};

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
struct Point {
    x: usize,
    y: usize,
}

impl Point {
    /// Orthogonal neighbours; the cavern bounds are checked by the caller.
    fn moves(&self) -> Vec<Point> {
        let (x, y) = (self.x, self.y);
        let mut m = vec![Point { x: x + 1, y }, Point { x, y: y + 1 }];
        if x > 0 {
            m.push(Point { x: x - 1, y });
        }
        if y > 0 {
            m.push(Point { x, y: y - 1 });
        }
        m
    }
}

/// A risk map, optionally repeated `tiles` times in each direction with the
/// risk rising by one per tile step and wrapping from 9 back to 1.
#[derive(Debug)]
struct Cavern {
    risks: Vec<u32>,
    width: usize,
    height: usize,
    tiles: usize,
}

impl Cavern {
    fn parse(input: &str, tiles: usize) -> Result<Self> {
        let mut risks = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if height == 0 {
                width = line.len();
            } else if line.len() != width {
                return Err(Error::malformed("risk map rows differ in length"));
            }
            for c in line.chars() {
                risks.push(
                    c.to_digit(10)
                        .ok_or_else(|| Error::malformed(format!("bad risk level {c:?}")))?,
                );
            }
            height += 1;
        }
        if risks.is_empty() {
            return Err(Error::malformed("empty risk map"));
        }
        Ok(Self {
            risks,
            width,
            height,
            tiles,
        })
    }

    fn risk(&self, point: &Point) -> Option<u32> {
        if point.x >= self.width * self.tiles || point.y >= self.height * self.tiles {
            return None;
        }
        let base = self.risks[(point.y % self.height) * self.width + point.x % self.width];
        let bump = (point.x / self.width + point.y / self.height) as u32;
        Some((base + bump - 1) % 9 + 1)
    }

    fn successors(&self, point: &Point) -> Vec<(Point, u32)> {
        point
            .moves()
            .into_iter()
            .filter_map(|p| self.risk(&p).map(|r| (p, r)))
            .collect()
    }

    fn exit(&self) -> Point {
        Point {
            x: self.width * self.tiles - 1,
            y: self.height * self.tiles - 1,
        }
    }

    fn lowest_risk(&self) -> Result<u32> {
        let exit = self.exit();
        let (path, risk) = dijkstra(
            &Point { x: 0, y: 0 },
            |p| self.successors(p),
            |p| *p == exit,
        )
            .ok_or_else(|| Error::NoSolution("exit is unreachable".into()))?;
        debug!(steps = path.len() - 1, risk, "lowest risk path");
        trace!(?path);
        Ok(risk)
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(Cavern::parse(input, 1)?.lowest_risk()?.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(Cavern::parse(input, 5)?.lowest_risk()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "40");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "315");
    }

    #[test]
    fn tiles_wrap_past_nine() {
        let cavern = Cavern::parse("8", 5).unwrap();
        let risks: Vec<u32> = (0..5)
            .map(|x| cavern.risk(&Point { x, y: 0 }).unwrap())
            .collect();
        assert_eq!(risks, vec![8, 9, 1, 2, 3]);
        assert_eq!(cavern.risk(&Point { x: 4, y: 4 }), Some(7));
        assert_eq!(cavern.risk(&Point { x: 5, y: 0 }), None);
    }

    #[test]
    fn single_cell_costs_nothing() {
        assert_eq!(Puzzle.challenge1("7\n").unwrap(), "0");
    }
}
