use std::str::FromStr;

use regex::Regex;
use tracing::debug;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

/// An axis-aligned box of cubes with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cuboid {
    min: [i64; 3],
    max: [i64; 3],
}

impl Cuboid {
    fn volume(&self) -> i64 {
        (0..3).map(|axis| self.max[axis] - self.min[axis] + 1).product()
    }

    fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
        let mut overlap = *self;
        for axis in 0..3 {
            overlap.min[axis] = self.min[axis].max(other.min[axis]);
            overlap.max[axis] = self.max[axis].min(other.max[axis]);
            if overlap.min[axis] > overlap.max[axis] {
                return None;
            }
        }
        Some(overlap)
    }

    /// The parts of `self` not covered by `hole`, as at most six disjoint
    /// cuboids. Slabs are cut off one axis at a time, shrinking what is left.
    fn subtract(&self, hole: &Cuboid) -> Vec<Cuboid> {
        let Some(hole) = self.intersect(hole) else {
            return vec![*self];
        };
        let mut pieces = Vec::with_capacity(6);
        let mut rest = *self;
        for axis in 0..3 {
            if rest.min[axis] < hole.min[axis] {
                let mut below = rest;
                below.max[axis] = hole.min[axis] - 1;
                pieces.push(below);
                rest.min[axis] = hole.min[axis];
            }
            if rest.max[axis] > hole.max[axis] {
                let mut above = rest;
                above.min[axis] = hole.max[axis] + 1;
                pieces.push(above);
                rest.max[axis] = hole.max[axis];
            }
        }
        pieces
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    on: bool,
    cuboid: Cuboid,
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let re = Regex::new(
            r"^(on|off) x=(-?\d+)\.\.(-?\d+),y=(-?\d+)\.\.(-?\d+),z=(-?\d+)\.\.(-?\d+)$",
        )
        .expect("static pattern");
        let caps = re
            .captures(s.trim())
            .ok_or_else(|| Error::malformed(format!("not a reboot step: {s:?}")))?;
        let mut min = [0; 3];
        let mut max = [0; 3];
        for axis in 0..3 {
            min[axis] = caps[2 + 2 * axis].parse()?;
            max[axis] = caps[3 + 2 * axis].parse()?;
            if min[axis] > max[axis] {
                return Err(Error::malformed(format!("empty range in {s:?}")));
            }
        }
        Ok(Step {
            on: &caps[1] == "on",
            cuboid: Cuboid { min, max },
        })
    }
}

fn parse(input: &str) -> Result<Vec<Step>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Runs the reboot steps, optionally clipped to `region`, and counts the cubes
/// left on.
fn reboot(steps: &[Step], region: Option<Cuboid>) -> i64 {
    let mut lit: Vec<Cuboid> = Vec::new();
    for step in steps {
        let cuboid = match region {
            Some(region) => match step.cuboid.intersect(&region) {
                Some(clipped) => clipped,
                None => continue,
            },
            None => step.cuboid,
        };
        lit = lit.iter().flat_map(|c| c.subtract(&cuboid)).collect();
        if step.on {
            lit.push(cuboid);
        }
    }
    debug!(cuboids = lit.len(), "reboot finished");
    lit.iter().map(Cuboid::volume).sum()
}

const INITIALIZATION: Cuboid = Cuboid {
    min: [-50; 3],
    max: [50; 3],
};

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(reboot(&parse(input)?, Some(INITIALIZATION)).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(reboot(&parse(input)?, None).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
on x=10..12,y=10..12,z=10..12
on x=11..13,y=11..13,z=11..13
off x=9..11,y=9..11,z=9..11
on x=10..10,y=10..10,z=10..10
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "39");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "39");
    }

    #[test]
    fn clips_to_initialization_region() {
        let input = "on x=-100..100,y=0..0,z=0..0\n";
        assert_eq!(Puzzle.challenge1(input).unwrap(), "101");
        assert_eq!(Puzzle.challenge2(input).unwrap(), "201");
    }

    #[test]
    fn subtraction_preserves_volume() {
        let outer = Cuboid {
            min: [0, 0, 0],
            max: [9, 9, 9],
        };
        let hole = Cuboid {
            min: [3, 3, 3],
            max: [5, 5, 5],
        };
        let pieces = outer.subtract(&hole);
        assert_eq!(pieces.len(), 6);
        let remaining: i64 = pieces.iter().map(Cuboid::volume).sum();
        assert_eq!(remaining, 1000 - 27);
        assert!(pieces.iter().all(|p| p.intersect(&hole).is_none()));
    }

    #[test]
    fn disjoint_subtraction_is_identity() {
        let a = Cuboid {
            min: [0, 0, 0],
            max: [1, 1, 1],
        };
        let b = Cuboid {
            min: [5, 5, 5],
            max: [6, 6, 6],
        };
        assert_eq!(a.subtract(&b), vec![a]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Puzzle.challenge1("toggle x=1..2,y=1..2,z=1..2"),
            Err(Error::Malformed(_))
        ));
    }
}
