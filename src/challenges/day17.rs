use regex::Regex;
use tracing::debug;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Target {
    x_min: i64,
    x_max: i64,
    y_min: i64,
    y_max: i64,
}

impl Target {
    fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(r"x=(-?\d+)\.\.(-?\d+),\s*y=(-?\d+)\.\.(-?\d+)")
            .expect("static pattern");
        let caps = re
            .captures(input)
            .ok_or_else(|| Error::malformed(format!("not a target area: {input:?}")))?;
        let target = Target {
            x_min: caps[1].parse()?,
            x_max: caps[2].parse()?,
            y_min: caps[3].parse()?,
            y_max: caps[4].parse()?,
        };
        if target.x_min <= 0
            || target.x_min > target.x_max
            || target.y_min > target.y_max
            || target.y_max >= 0
        {
            return Err(Error::malformed(
                "target area must lie to the right of and below the launcher",
            ));
        }
        Ok(target)
    }

    fn contains(&self, (x, y): (i64, i64)) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    /// Flies the probe and returns its peak height if it ever lands inside.
    fn launch(&self, mut vx: i64, mut vy: i64) -> Option<i64> {
        let (mut x, mut y, mut peak) = (0, 0, 0);
        while x <= self.x_max && y >= self.y_min {
            if self.contains((x, y)) {
                return Some(peak);
            }
            x += vx;
            y += vy;
            peak = peak.max(y);
            vx -= vx.signum();
            vy -= 1;
        }
        None
    }

    /// Peak heights of every initial velocity that hits the target.
    ///
    /// Horizontal speeds beyond `x_max` overshoot on the first step, and a
    /// probe launched upward at `vy` comes back through y=0 at `-vy - 1`, so
    /// anything above `-y_min - 1` misses below.
    fn hits(&self) -> Vec<i64> {
        let hits: Vec<i64> = (1..=self.x_max)
            .flat_map(|vx| {
                (self.y_min..-self.y_min).filter_map(move |vy| self.launch(vx, vy))
            })
            .collect();
        debug!(count = hits.len(), "velocities on target");
        hits
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let target = Target::parse(input)?;
        target
            .hits()
            .into_iter()
            .max()
            .map(|peak| peak.to_string())
            .ok_or_else(|| Error::NoSolution("no velocity reaches the target".into()))
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(Target::parse(input)?.hits().len().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "target area: x=20..30, y=-10..-5\n";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "45");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "112");
    }

    #[test]
    fn sample_trajectories() {
        let target = Target::parse(EXAMPLE).unwrap();
        assert_eq!(target.launch(7, 2), Some(3));
        assert_eq!(target.launch(6, 3), Some(6));
        assert_eq!(target.launch(9, 0), Some(0));
        assert_eq!(target.launch(17, -4), None);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(
            Puzzle.challenge1("target area: x=-30..-20, y=-10..-5"),
            Err(Error::Malformed(_))
        ));
    }
}
