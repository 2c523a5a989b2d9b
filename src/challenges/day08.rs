use itertools::Itertools;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

/// Lit segments of each digit on a correctly wired display, as bitmasks over
/// `abcdefg` (bit 0 = `a`).
const DIGITS: [u8; 10] = [
    0b1110111, // 0: abcefg
    0b0100100, // 1: cf
    0b1011101, // 2: acdeg
    0b1101101, // 3: acdfg
    0b0101110, // 4: bcdf
    0b1101011, // 5: abdfg
    0b1111011, // 6: abdefg
    0b0100101, // 7: acf
    0b1111111, // 8: abcdefg
    0b1101111, // 9: abcdfg
];

struct Entry<'a> {
    patterns: Vec<&'a str>,
    outputs: Vec<&'a str>,
}

fn parse(input: &str) -> Result<Vec<Entry<'_>>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (patterns, outputs) = line
                .split_once('|')
                .ok_or_else(|| Error::malformed(format!("missing `|` in {line:?}")))?;
            let entry = Entry {
                patterns: patterns.split_whitespace().collect(),
                outputs: outputs.split_whitespace().collect(),
            };
            if entry.patterns.len() != 10 || entry.outputs.len() != 4 {
                return Err(Error::malformed(format!(
                    "expected 10 patterns and 4 outputs: {line:?}"
                )));
            }
            if let Some(bad) = entry
                .patterns
                .iter()
                .chain(&entry.outputs)
                .find(|word| word.bytes().any(|b| !(b'a'..=b'g').contains(&b)))
            {
                return Err(Error::malformed(format!("bad segment in {bad:?}")));
            }
            Ok(entry)
        })
        .collect()
}

/// Applies a wiring (scrambled wire index -> real segment index) to a word.
fn rewire(word: &str, wiring: &[usize]) -> u8 {
    word.bytes()
        .fold(0, |mask, b| mask | 1 << wiring[usize::from(b - b'a')])
}

fn digit(mask: u8) -> Option<usize> {
    DIGITS.iter().position(|&d| d == mask)
}

fn decode(entry: &Entry, wirings: &[Vec<usize>]) -> Option<usize> {
    let wiring = wirings.iter().find(|wiring| {
        entry
            .patterns
            .iter()
            .all(|p| digit(rewire(p, wiring)).is_some())
    })?;
    entry
        .outputs
        .iter()
        .try_fold(0, |value, o| Some(value * 10 + digit(rewire(o, wiring))?))
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let count = parse(input)?
            .iter()
            .flat_map(|entry| &entry.outputs)
            .filter(|o| matches!(o.len(), 2 | 3 | 4 | 7))
            .count();
        Ok(count.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let wirings: Vec<Vec<usize>> = (0..7).permutations(7).collect();
        let mut sum = 0;
        for entry in parse(input)? {
            sum += decode(&entry, &wirings).ok_or_else(|| {
                Error::NoSolution(format!("no consistent wiring for {:?}", entry.patterns))
            })?;
        }
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf\n";

    #[test]
    fn decodes_single_entry() {
        assert_eq!(Puzzle.challenge2(SINGLE).unwrap(), "5353");
        assert_eq!(Puzzle.challenge1(SINGLE).unwrap(), "0");
    }

    #[test]
    fn counts_easy_digits() {
        let input = "\
acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | ab dab eafb acedgfb
acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb ab cdbaf
";
        assert_eq!(Puzzle.challenge1(input).unwrap(), "5");
        assert_eq!(Puzzle.challenge2(input).unwrap(), (1748 + 5313).to_string());
    }

    #[test]
    fn rejects_short_entries() {
        assert!(matches!(
            Puzzle.challenge1("ab cd | ef\n"),
            Err(Error::Malformed(_))
        ));
    }
}
