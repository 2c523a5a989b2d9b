use tracing::info_span;

use crate::error::{Error, Result};

pub mod day01;
pub mod day02;
pub mod day03;
pub mod day04;
pub mod day05;
pub mod day06;
pub mod day07;
pub mod day08;
pub mod day09;
pub mod day10;
pub mod day11;
pub mod day12;
pub mod day13;
pub mod day14;
pub mod day15;
pub mod day16;
pub mod day17;
pub mod day18;
pub mod day19;
pub mod day20;
pub mod day21;
pub mod day22;
pub mod day23;
pub mod day24;
pub mod day25;

/// The two puzzles of a single day. Every call parses `input` from scratch.
pub trait Challenge {
    fn challenge1(&self, input: &str) -> Result<String>;
    fn challenge2(&self, input: &str) -> Result<String>;
}

pub fn for_day(day: u8) -> Option<&'static dyn Challenge> {
    let challenge: &'static dyn Challenge = match day {
        1 => &day01::Puzzle,
        2 => &day02::Puzzle,
        3 => &day03::Puzzle,
        4 => &day04::Puzzle,
        5 => &day05::Puzzle,
        6 => &day06::Puzzle,
        7 => &day07::Puzzle,
        8 => &day08::Puzzle,
        9 => &day09::Puzzle,
        10 => &day10::Puzzle,
        11 => &day11::Puzzle,
        12 => &day12::Puzzle,
        13 => &day13::Puzzle,
        14 => &day14::Puzzle,
        15 => &day15::Puzzle,
        16 => &day16::Puzzle,
        17 => &day17::Puzzle,
        18 => &day18::Puzzle,
        19 => &day19::Puzzle,
        20 => &day20::Puzzle,
        21 => &day21::Puzzle,
        22 => &day22::Puzzle,
        23 => &day23::Puzzle,
        24 => &day24::Puzzle,
        25 => &day25::Puzzle,
        _ => return None,
    };
    Some(challenge)
}

pub fn run(day: u8, challenge: u8, input: &str) -> Result<String> {
    let solver = for_day(day).ok_or(Error::UnknownDay(day))?;
    let _span = info_span!("challenge", day, challenge).entered();
    match challenge {
        1 => solver.challenge1(input),
        2 => solver.challenge2(input),
        other => Err(Error::UnknownChallenge(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_day_is_registered() {
        for day in 1..=25 {
            assert!(for_day(day).is_some(), "day {day} missing");
        }
        assert!(for_day(0).is_none());
        assert!(for_day(26).is_none());
    }

    #[test]
    fn rejects_unknown_selectors() {
        assert!(matches!(run(26, 1, ""), Err(Error::UnknownDay(26))));
        assert!(matches!(
            run(1, 3, "1\n2\n"),
            Err(Error::UnknownChallenge(3))
        ));
    }

    #[test]
    fn dispatches_to_the_requested_challenge() {
        let input = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n";
        assert_eq!(run(1, 1, input).unwrap(), "7");
        assert_eq!(run(1, 2, input).unwrap(), "5");
    }
}
