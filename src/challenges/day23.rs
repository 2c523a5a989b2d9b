use pathfinding::directed::astar;
use tracing::debug;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const EMPTY: u8 = 0;
const HALLWAY: usize = 11;
/// Hallway cells an amphipod may stop on. The cells above room entrances are
/// left out.
const STOPS: [usize; 7] = [0, 1, 3, 5, 7, 9, 10];

/// Extra rows folded into the middle of the diagram for the full burrow.
const FOLDED: [[u8; 4]; 2] = [[4, 3, 2, 1], [4, 2, 1, 3]];

fn entrance(room: usize) -> usize {
    2 + 2 * room
}

/// Amphipods are stored as 1..=4 for A..=D, and kind `k` lives in room `k - 1`.
fn energy(kind: u8) -> u32 {
    10u32.pow(u32::from(kind) - 1)
}

fn home(kind: u8) -> usize {
    usize::from(kind) - 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Burrow<const DEPTH: usize> {
    hallway: [u8; HALLWAY],
    /// Room slots, top to bottom.
    rooms: [[u8; DEPTH]; 4],
}

impl<const DEPTH: usize> Burrow<DEPTH> {
    fn from_rows(rows: &[[u8; 4]]) -> Result<Self> {
        if rows.len() != DEPTH {
            return Err(Error::malformed(format!(
                "expected {DEPTH} room rows, found {}",
                rows.len()
            )));
        }
        let mut rooms = [[EMPTY; DEPTH]; 4];
        for (depth, row) in rows.iter().enumerate() {
            for (room, &kind) in row.iter().enumerate() {
                rooms[room][depth] = kind;
            }
        }
        Ok(Self {
            hallway: [EMPTY; HALLWAY],
            rooms,
        })
    }

    fn organized(&self) -> bool {
        self.rooms
            .iter()
            .enumerate()
            .all(|(room, slots)| slots.iter().all(|&k| k != EMPTY && home(k) == room))
    }

    /// True when the room holds nothing but its own kind, so amphipods may
    /// enter and those inside never need to leave.
    fn accepting(&self, room: usize) -> bool {
        self.rooms[room]
            .iter()
            .all(|&k| k == EMPTY || home(k) == room)
    }

    /// Whether every hallway cell strictly between `from` and `to`, plus `to`
    /// itself, is empty.
    fn clear(&self, from: usize, to: usize) -> bool {
        let cells = if from < to { from + 1..=to } else { to..=from - 1 };
        cells.into_iter().all(|x| self.hallway[x] == EMPTY)
    }

    fn successors(&self) -> Vec<(Self, u32)> {
        let mut moves = Vec::new();

        for (x, &kind) in self.hallway.iter().enumerate() {
            if kind == EMPTY {
                continue;
            }
            let room = home(kind);
            if !self.accepting(room) || !self.clear(x, entrance(room)) {
                continue;
            }
            let Some(depth) = self.rooms[room].iter().rposition(|&k| k == EMPTY) else {
                continue;
            };
            let mut next = *self;
            next.hallway[x] = EMPTY;
            next.rooms[room][depth] = kind;
            let steps = x.abs_diff(entrance(room)) + depth + 1;
            moves.push((next, steps as u32 * energy(kind)));
        }

        for room in 0..4 {
            if self.accepting(room) {
                continue;
            }
            let Some(depth) = self.rooms[room].iter().position(|&k| k != EMPTY) else {
                continue;
            };
            let kind = self.rooms[room][depth];
            for stop in STOPS {
                if !self.clear(entrance(room), stop) {
                    continue;
                }
                let mut next = *self;
                next.rooms[room][depth] = EMPTY;
                next.hallway[stop] = kind;
                let steps = stop.abs_diff(entrance(room)) + depth + 1;
                moves.push((next, steps as u32 * energy(kind)));
            }
        }
        moves
    }

    /// Energy each misplaced amphipod needs to reach the top of its room,
    /// ignoring every other amphipod.
    fn estimate(&self) -> u32 {
        let mut total = 0;
        for (x, &kind) in self.hallway.iter().enumerate() {
            if kind != EMPTY {
                total += (x.abs_diff(entrance(home(kind))) + 1) as u32 * energy(kind);
            }
        }
        for (room, slots) in self.rooms.iter().enumerate() {
            for (depth, &kind) in slots.iter().enumerate() {
                if kind == EMPTY {
                    continue;
                }
                let settled = slots[depth..]
                    .iter()
                    .all(|&k| k != EMPTY && home(k) == room);
                if settled {
                    continue;
                }
                // A blocker in its own room steps out one cell sideways and back.
                let across = entrance(room).abs_diff(entrance(home(kind))).max(2);
                total += (depth + 1 + across + 1) as u32 * energy(kind);
            }
        }
        total
    }
}

fn parse(input: &str) -> Result<Vec<[u8; 4]>> {
    let rows = input
        .lines()
        .map(|line| {
            line.bytes()
                .filter(|b| (b'A'..=b'D').contains(b))
                .map(|b| b - b'A' + 1)
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .map(|row| {
            <[u8; 4]>::try_from(row)
                .map_err(|row| Error::malformed(format!("room row has {} amphipods", row.len())))
        })
        .collect::<Result<Vec<_>>>()?;
    let mut counts = [0usize; 4];
    for row in &rows {
        for &kind in row {
            counts[home(kind)] += 1;
        }
    }
    if counts.iter().any(|&c| c != rows.len()) {
        return Err(Error::malformed(
            "each room needs as many amphipods of every kind",
        ));
    }
    Ok(rows)
}

fn organize<const DEPTH: usize>(rows: &[[u8; 4]]) -> Result<u32> {
    let start = Burrow::<DEPTH>::from_rows(rows)?;
    let (path, cost) = astar::astar(
        &start,
        |b| b.successors(),
        |b| b.estimate(),
        |b| b.organized(),
    )
    .ok_or_else(|| Error::NoSolution("amphipods cannot be organized".into()))?;
    debug!(moves = path.len() - 1, cost, "burrow organized");
    Ok(cost)
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(organize::<2>(&parse(input)?)?.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let rows = parse(input)?;
        let [top, bottom] = rows[..] else {
            return Err(Error::malformed("the folded diagram has two room rows"));
        };
        let cost = organize::<4>(&[top, FOLDED[0], FOLDED[1], bottom])?;
        Ok(cost.to_string())
    }
}
