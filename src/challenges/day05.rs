use std::str::FromStr;

use regex::Regex;
use rustc_hash::FxHashMap;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Vent {
    from: (i32, i32),
    to: (i32, i32),
}

impl Vent {
    fn is_straight(&self) -> bool {
        self.from.0 == self.to.0 || self.from.1 == self.to.1
    }

    fn is_diagonal(&self) -> bool {
        (self.from.0 - self.to.0).abs() == (self.from.1 - self.to.1).abs()
    }

    fn points(&self) -> impl Iterator<Item = (i32, i32)> {
        let dx = (self.to.0 - self.from.0).signum();
        let dy = (self.to.1 - self.from.1).signum();
        let steps = (self.to.0 - self.from.0)
            .abs()
            .max((self.to.1 - self.from.1).abs());
        let (x, y) = self.from;
        (0..=steps).map(move |i| (x + i * dx, y + i * dy))
    }
}

fn parse(input: &str) -> Result<Vec<Vent>> {
    let re = Regex::new(r"^(\d+),(\d+)\s*->\s*(\d+),(\d+)$").expect("static pattern");
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let caps = re
                .captures(line)
                .ok_or_else(|| Error::malformed(format!("not a vent line: {line:?}")))?;
            let n = |i: usize| i32::from_str(&caps[i]);
            Ok(Vent {
                from: (n(1)?, n(2)?),
                to: (n(3)?, n(4)?),
            })
        })
        .collect()
}

fn overlaps<'a>(vents: impl Iterator<Item = &'a Vent>) -> usize {
    let mut covered: FxHashMap<(i32, i32), u32> = FxHashMap::default();
    for point in vents.flat_map(Vent::points) {
        *covered.entry(point).or_default() += 1;
    }
    covered.values().filter(|&&count| count > 1).count()
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let vents = parse(input)?;
        let straight = vents.iter().filter(|v| v.is_straight());
        Ok(overlaps(straight).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let vents = parse(input)?;
        let count = overlaps(vents.iter().filter(|v| v.is_straight() || v.is_diagonal()));
        Ok(count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
0,9 -> 5,9
8,0 -> 0,8
9,4 -> 3,4
2,2 -> 2,1
7,0 -> 7,4
6,4 -> 2,0
0,9 -> 2,9
3,4 -> 1,4
0,0 -> 8,8
5,5 -> 8,2
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "5");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "12");
    }

    #[test]
    fn reversed_diagonal_walks_every_point() {
        let vent = Vent {
            from: (3, 1),
            to: (1, 3),
        };
        assert_eq!(
            vent.points().collect::<Vec<_>>(),
            vec![(3, 1), (2, 2), (1, 3)]
        );
    }

    #[test]
    fn malformed_line() {
        assert!(matches!(
            Puzzle.challenge1("1,2 => 3,4\n"),
            Err(Error::Malformed(_))
        ));
    }
}
