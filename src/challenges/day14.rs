use itertools::{Itertools, MinMaxResult};
use rustc_hash::FxHashMap;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

struct Polymer {
    template: Vec<u8>,
    rules: FxHashMap<[u8; 2], u8>,
}

fn parse(input: &str) -> Result<Polymer> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let template = lines
        .next()
        .ok_or_else(|| Error::malformed("missing polymer template"))?
        .as_bytes()
        .to_vec();
    let rules = lines
        .map(|line| match line.split_once(" -> ").map(|(l, r)| (l.as_bytes(), r.as_bytes())) {
            Some((&[a, b], &[c])) => Ok(([a, b], c)),
            _ => Err(Error::malformed(format!("bad insertion rule: {line:?}"))),
        })
        .collect::<Result<_>>()?;
    Ok(Polymer { template, rules })
}

impl Polymer {
    /// Most common minus least common element after `steps` insertions.
    ///
    /// Only pair counts are tracked, each step rewriting `AB` into `AC` and `CB`.
    /// Element counts are recovered from the second element of every pair plus
    /// the template's first element, which never changes.
    fn spread_after(&self, steps: usize) -> u64 {
        let mut pairs: FxHashMap<[u8; 2], u64> = FxHashMap::default();
        for window in self.template.windows(2) {
            *pairs.entry([window[0], window[1]]).or_default() += 1;
        }
        for _ in 0..steps {
            let mut next: FxHashMap<[u8; 2], u64> = FxHashMap::default();
            for (pair, count) in pairs {
                match self.rules.get(&pair) {
                    Some(&insert) => {
                        *next.entry([pair[0], insert]).or_default() += count;
                        *next.entry([insert, pair[1]]).or_default() += count;
                    }
                    None => *next.entry(pair).or_default() += count,
                }
            }
            pairs = next;
        }

        let mut elements: FxHashMap<u8, u64> = FxHashMap::default();
        if let Some(&first) = self.template.first() {
            elements.insert(first, 1);
        }
        for ([_, second], count) in pairs {
            *elements.entry(second).or_default() += count;
        }
        match elements.values().minmax() {
            MinMaxResult::MinMax(min, max) => max - min,
            _ => 0,
        }
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(parse(input)?.spread_after(10).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(parse(input)?.spread_after(40).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
NNCB

CH -> B
HH -> N
CB -> H
NH -> C
HB -> C
HC -> B
HN -> C
NN -> C
BH -> H
NC -> B
NB -> B
BN -> B
BB -> N
BC -> B
CC -> N
CN -> C
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "1588");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "2188189693529");
    }

    #[test]
    fn bad_rule() {
        assert!(matches!(
            Puzzle.challenge1("NN\n\nNN -> CC\n"),
            Err(Error::Malformed(_))
        ));
    }
}
