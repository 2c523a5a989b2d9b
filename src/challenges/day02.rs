use std::str::FromStr;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let (direction, amount) = line
            .split_once(' ')
            .ok_or_else(|| Error::malformed(format!("expected `<direction> <amount>`: {line:?}")))?;
        let amount = amount.trim().parse()?;
        match direction {
            "forward" => Ok(Command::Forward(amount)),
            "down" => Ok(Command::Down(amount)),
            "up" => Ok(Command::Up(amount)),
            other => Err(Error::malformed(format!("invalid direction: {other}"))),
        }
    }
}

fn parse(input: &str) -> Result<Vec<Command>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let (mut horizontal, mut depth) = (0i64, 0i64);
        for command in parse(input)? {
            match command {
                Command::Forward(n) => horizontal += n,
                Command::Down(n) => depth += n,
                Command::Up(n) => depth -= n,
            }
        }
        Ok((horizontal * depth).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let (mut horizontal, mut depth, mut aim) = (0i64, 0i64, 0i64);
        for command in parse(input)? {
            match command {
                Command::Forward(n) => {
                    horizontal += n;
                    depth += aim * n;
                }
                Command::Down(n) => aim += n,
                Command::Up(n) => aim -= n,
            }
        }
        Ok((horizontal * depth).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "forward 5\ndown 5\nforward 8\nup 3\ndown 8\nforward 2\n";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "150");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "900");
    }

    #[test]
    fn unknown_direction_is_an_error() {
        assert!(matches!(
            Puzzle.challenge1("sideways 3\n"),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            Puzzle.challenge1("forward\n"),
            Err(Error::Malformed(_))
        ));
    }
}
