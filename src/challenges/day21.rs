use rustc_hash::FxHashMap;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const BOARD: u32 = 10;

/// Sums of three rolls of a three-sided die and how many universes produce each.
const DIRAC_ROLLS: [(u32, u64); 7] = [(3, 1), (4, 3), (5, 6), (6, 7), (7, 6), (8, 3), (9, 1)];

fn parse(input: &str) -> Result<[u32; 2]> {
    let starts = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (_, position) = line
                .rsplit_once(':')
                .ok_or_else(|| Error::malformed(format!("bad player line: {line:?}")))?;
            let position: u32 = position.trim().parse()?;
            if !(1..=BOARD).contains(&position) {
                return Err(Error::malformed(format!(
                    "position {position} is off the board"
                )));
            }
            Ok(position)
        })
        .collect::<Result<Vec<_>>>()?;
    starts
        .try_into()
        .map_err(|_| Error::malformed("expected exactly two players"))
}

fn advance(position: u32, roll: u32) -> u32 {
    (position + roll - 1) % BOARD + 1
}

struct DeterministicDie {
    next: u32,
    rolls: u32,
}

impl DeterministicDie {
    fn roll(&mut self) -> u32 {
        let value = self.next;
        self.next = self.next % 100 + 1;
        self.rolls += 1;
        value
    }
}

fn practice_game(mut positions: [u32; 2]) -> u32 {
    let mut scores = [0u32; 2];
    let mut die = DeterministicDie { next: 1, rolls: 0 };
    let mut player = 0;
    loop {
        let roll = die.roll() + die.roll() + die.roll();
        positions[player] = advance(positions[player], roll);
        scores[player] += positions[player];
        if scores[player] >= 1000 {
            return scores[1 - player] * die.rolls;
        }
        player = 1 - player;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Universe {
    positions: [u32; 2],
    scores: [u32; 2],
}

/// Plays all universes in lockstep, merging identical ones, and returns how
/// many universes each player wins.
fn dirac_game(positions: [u32; 2]) -> [u64; 2] {
    let mut universes: FxHashMap<Universe, u64> = FxHashMap::default();
    universes.insert(
        Universe {
            positions,
            scores: [0, 0],
        },
        1,
    );
    let mut wins = [0u64; 2];
    let mut player = 0;
    while !universes.is_empty() {
        let mut next: FxHashMap<Universe, u64> = FxHashMap::default();
        for (universe, count) in universes {
            for (roll, ways) in DIRAC_ROLLS {
                let mut u = universe;
                u.positions[player] = advance(u.positions[player], roll);
                u.scores[player] += u.positions[player];
                if u.scores[player] >= 21 {
                    wins[player] += count * ways;
                } else {
                    *next.entry(u).or_default() += count * ways;
                }
            }
        }
        universes = next;
        player = 1 - player;
    }
    wins
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(practice_game(parse(input)?).to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let [a, b] = dirac_game(parse(input)?);
        Ok(a.max(b).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "Player 1 starting position: 4\nPlayer 2 starting position: 8\n";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "739785");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "444356092776315");
    }

    #[test]
    fn dirac_wins_for_both_players() {
        assert_eq!(dirac_game([4, 8]), [444356092776315, 341960390180808]);
    }

    #[test]
    fn die_wraps_after_100() {
        let mut die = DeterministicDie { next: 99, rolls: 0 };
        assert_eq!([die.roll(), die.roll(), die.roll()], [99, 100, 1]);
        assert_eq!(die.rolls, 3);
    }

    #[test]
    fn rejects_off_board_start() {
        assert!(matches!(
            Puzzle.challenge1("Player 1 starting position: 11\nPlayer 2 starting position: 1\n"),
            Err(Error::Malformed(_))
        ));
    }
}
