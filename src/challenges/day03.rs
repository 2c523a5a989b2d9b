use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

struct Report {
    width: usize,
    numbers: Vec<u32>,
}

fn parse(input: &str) -> Result<Report> {
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let width = lines
        .first()
        .map(|line| line.len())
        .ok_or_else(|| Error::malformed("empty diagnostic report"))?;
    if width > 31 {
        return Err(Error::malformed(format!(
            "{width} bits do not fit a reading"
        )));
    }
    let numbers = lines
        .iter()
        .map(|line| {
            if line.len() != width {
                return Err(Error::malformed(format!(
                    "reading {line:?} is not {width} bits"
                )));
            }
            Ok(u32::from_str_radix(line, 2)?)
        })
        .collect::<Result<_>>()?;
    Ok(Report { width, numbers })
}

fn ones_at(numbers: &[u32], bit: usize) -> usize {
    numbers.iter().filter(|n| *n >> bit & 1 == 1).count()
}

/// Narrows the readings bit by bit from the most significant end until one is
/// left. `keep_common` picks the most common bit (ties keep 1), otherwise the
/// least common (ties keep 0).
fn rating(report: &Report, keep_common: bool) -> Result<u32> {
    let mut candidates = report.numbers.clone();
    for bit in (0..report.width).rev() {
        if candidates.len() <= 1 {
            break;
        }
        let ones = ones_at(&candidates, bit);
        let ones_common = ones * 2 >= candidates.len();
        let wanted = u32::from(ones_common == keep_common);
        candidates.retain(|n| n >> bit & 1 == wanted);
    }
    match candidates.as_slice() {
        [rating] => Ok(*rating),
        _ => Err(Error::NoSolution(
            "bit criteria did not narrow down to a single reading".into(),
        )),
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let report = parse(input)?;
        let gamma = (0..report.width)
            .filter(|&bit| ones_at(&report.numbers, bit) * 2 > report.numbers.len())
            .fold(0u32, |gamma, bit| gamma | 1 << bit);
        let epsilon = !gamma & ((1 << report.width) - 1);
        Ok((u64::from(gamma) * u64::from(epsilon)).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let report = parse(input)?;
        let oxygen = rating(&report, true)?;
        let co2 = rating(&report, false)?;
        Ok((u64::from(oxygen) * u64::from(co2)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
00100
11110
10110
10111
10101
01111
00111
11100
10000
11001
00010
01010
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "198");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "230");
    }

    #[test]
    fn ratings() {
        let report = parse(EXAMPLE).unwrap();
        assert_eq!(rating(&report, true).unwrap(), 23);
        assert_eq!(rating(&report, false).unwrap(), 10);
    }

    #[test]
    fn ragged_report_is_malformed() {
        assert!(matches!(
            Puzzle.challenge1("0101\n011\n"),
            Err(Error::Malformed(_))
        ));
    }
}
