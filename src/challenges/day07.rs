use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

fn parse(input: &str) -> Result<Vec<i64>> {
    let crabs = input
        .trim()
        .split(',')
        .map(|n| Ok(n.trim().parse()?))
        .collect::<Result<Vec<i64>>>()?;
    if crabs.is_empty() {
        return Err(Error::malformed("no crab positions"));
    }
    Ok(crabs)
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let mut crabs = parse(input)?;
        crabs.sort_unstable();
        let median = crabs[crabs.len() / 2];
        let fuel: i64 = crabs.iter().map(|c| (c - median).abs()).sum();
        Ok(fuel.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let crabs = parse(input)?;
        let (Some(&lo), Some(&hi)) = (crabs.iter().min(), crabs.iter().max()) else {
            return Err(Error::malformed("no crab positions"));
        };
        let fuel = (lo..=hi)
            .map(|target| {
                crabs
                    .iter()
                    .map(|c| {
                        let d = (c - target).abs();
                        d * (d + 1) / 2
                    })
                    .sum::<i64>()
            })
            .min()
            .unwrap_or_default();
        Ok(fuel.to_string())
    }
}
