use super::Challenge;
use crate::error::Result;

pub struct Puzzle;

fn parse(input: &str) -> Result<Vec<u32>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(line.trim().parse()?))
        .collect()
}

/// Counts how often a reading is deeper than the one `gap` positions before.
///
/// Comparing 3-window sums only differs by the elements entering and leaving
/// the window, so `gap = 3` answers the sliding window question directly.
fn count_increases(depths: &[u32], gap: usize) -> usize {
    depths
        .iter()
        .zip(depths.iter().skip(gap))
        .filter(|(before, after)| after > before)
        .count()
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(count_increases(&parse(input)?, 1).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(count_increases(&parse(input)?, 3).to_string())
    }
}
