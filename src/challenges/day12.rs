use rustc_hash::FxHashMap;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

/// Cave graph with names interned to indices.
struct CaveSystem {
    small: Vec<bool>,
    neighbours: Vec<Vec<usize>>,
    start: usize,
    end: usize,
}

impl CaveSystem {
    fn parse(input: &str) -> Result<Self> {
        let mut ids: FxHashMap<&str, usize> = FxHashMap::default();
        let mut small = Vec::new();
        let mut neighbours: Vec<Vec<usize>> = Vec::new();
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (a, b) = line
                .split_once('-')
                .ok_or_else(|| Error::malformed(format!("not a tunnel: {line:?}")))?;
            let mut id = |name| {
                let next = ids.len();
                *ids.entry(name).or_insert_with(|| {
                    small.push(name.chars().all(|c| c.is_ascii_lowercase()));
                    neighbours.push(Vec::new());
                    next
                })
            };
            let (a, b) = (id(a), id(b));
            neighbours[a].push(b);
            neighbours[b].push(a);
        }

        let start = *ids
            .get("start")
            .ok_or_else(|| Error::malformed("no start cave"))?;
        let end = *ids.get("end").ok_or_else(|| Error::malformed("no end cave"))?;
        Ok(Self {
            small,
            neighbours,
            start,
            end,
        })
    }

    /// Depth-first count of paths from `cave` to the end. `revisit` is whether
    /// one small cave may still be entered a second time.
    fn paths(&self, cave: usize, visited: &mut Vec<bool>, revisit: bool) -> usize {
        if cave == self.end {
            return 1;
        }
        let mut count = 0;
        for &next in &self.neighbours[cave] {
            if next == self.start {
                continue;
            }
            if !self.small[next] {
                count += self.paths(next, visited, revisit);
            } else if !visited[next] {
                visited[next] = true;
                count += self.paths(next, visited, revisit);
                visited[next] = false;
            } else if revisit && next != self.end {
                count += self.paths(next, visited, false);
            }
        }
        count
    }

    fn count_paths(&self, revisit: bool) -> usize {
        let mut visited = vec![false; self.small.len()];
        visited[self.start] = true;
        self.paths(self.start, &mut visited, revisit)
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(CaveSystem::parse(input)?.count_paths(false).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(CaveSystem::parse(input)?.count_paths(true).to_string())
    }
}
