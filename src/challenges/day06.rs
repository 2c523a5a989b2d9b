use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const NEWBORN_TIMER: usize = 8;
const RESET_TIMER: usize = 6;

/// Fish are counted per timer value rather than tracked individually.
fn parse(input: &str) -> Result<[u64; NEWBORN_TIMER + 1]> {
    let mut school = [0u64; NEWBORN_TIMER + 1];
    for timer in input.trim().split(',') {
        let timer: usize = timer.trim().parse()?;
        let slot = school
            .get_mut(timer)
            .ok_or_else(|| Error::malformed(format!("timer {timer} out of range")))?;
        *slot += 1;
    }
    Ok(school)
}

fn population_after(mut school: [u64; NEWBORN_TIMER + 1], days: usize) -> u64 {
    for _ in 0..days {
        let spawning = school[0];
        school.rotate_left(1);
        school[RESET_TIMER] += spawning;
    }
    school.iter().sum()
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(population_after(parse(input)?, 80).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(population_after(parse(input)?, 256).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EXAMPLE: &str = "3,4,3,1,2\n";

    #[rstest]
    #[case(18, 26)]
    #[case(80, 5934)]
    #[case(256, 26984457539)]
    fn example_population(#[case] days: usize, #[case] expected: u64) {
        assert_eq!(population_after(parse(EXAMPLE).unwrap(), days), expected);
    }

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "5934");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "26984457539");
    }
}
