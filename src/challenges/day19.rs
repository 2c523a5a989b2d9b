use std::collections::VecDeque;

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const MIN_OVERLAP: usize = 12;
/// Distances between `MIN_OVERLAP` shared beacons, `12 choose 2`.
const MIN_SHARED_DISTANCES: usize = MIN_OVERLAP * (MIN_OVERLAP - 1) / 2;

type Vec3 = [i32; 3];

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn squared_distance(a: Vec3, b: Vec3) -> i64 {
    sub(a, b).iter().map(|&d| i64::from(d) * i64::from(d)).sum()
}

fn manhattan(a: Vec3, b: Vec3) -> i32 {
    sub(a, b).iter().map(|d| d.abs()).sum()
}

/// A proper rotation by multiples of 90 degrees: output axis `i` is input
/// axis `axes[i]` scaled by `signs[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Rotation {
    axes: [usize; 3],
    signs: [i32; 3],
}

impl Rotation {
    /// The 24 orientations a scanner can have. Signed axis permutations with
    /// determinant -1 are mirror images and are left out.
    fn all() -> Vec<Rotation> {
        let mut rotations = Vec::with_capacity(24);
        for perm in (0..3).permutations(3) {
            let axes = [perm[0], perm[1], perm[2]];
            let inversions = (0..3)
                .tuple_combinations()
                .filter(|&(i, j)| axes[i] > axes[j])
                .count();
            let parity = if inversions % 2 == 0 { 1 } else { -1 };
            for bits in 0..8 {
                let signs = [0, 1, 2].map(|i| if bits >> i & 1 == 1 { -1 } else { 1 });
                if parity * signs.iter().product::<i32>() == 1 {
                    rotations.push(Rotation { axes, signs });
                }
            }
        }
        rotations
    }

    fn apply(&self, v: Vec3) -> Vec3 {
        [0, 1, 2].map(|i| v[self.axes[i]] * self.signs[i])
    }
}

#[derive(Debug)]
struct Scanner {
    id: usize,
    beacons: Vec<Vec3>,
    /// Sorted squared distances between every pair of the scanner's beacons.
    /// They do not depend on orientation or position.
    fingerprint: Vec<i64>,
}

impl Scanner {
    fn new(id: usize, beacons: Vec<Vec3>) -> Self {
        let mut fingerprint: Vec<i64> = beacons
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| squared_distance(a, b))
            .collect();
        fingerprint.sort_unstable();
        Self {
            id,
            beacons,
            fingerprint,
        }
    }

    fn shared_distances(&self, other: &Scanner) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < self.fingerprint.len() && j < other.fingerprint.len() {
            match self.fingerprint[i].cmp(&other.fingerprint[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// Finds the orientation and position that puts at least `MIN_OVERLAP` of
    /// this scanner's beacons on top of `known` ones. Returns the scanner's
    /// position and its beacons in the frame of `known`.
    fn align(&self, known: &[Vec3], rotations: &[Rotation]) -> Option<(Vec3, Vec<Vec3>)> {
        for rotation in rotations {
            let rotated: Vec<Vec3> = self.beacons.iter().map(|&b| rotation.apply(b)).collect();
            let mut offsets: FxHashMap<Vec3, usize> = FxHashMap::default();
            for &k in known {
                for &r in &rotated {
                    let count = offsets.entry(sub(k, r)).or_default();
                    *count += 1;
                    if *count >= MIN_OVERLAP {
                        let position = sub(k, r);
                        let placed = rotated.iter().map(|&r| add(r, position)).collect();
                        return Some((position, placed));
                    }
                }
            }
        }
        None
    }
}

fn parse(input: &str) -> Result<Vec<Scanner>> {
    let mut scanners = Vec::new();
    let mut current: Option<Vec<Vec3>> = None;
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with("---") {
            if let Some(beacons) = current.take() {
                scanners.push(Scanner::new(scanners.len(), beacons));
            }
            current = Some(Vec::new());
            continue;
        }
        let beacons = current
            .as_mut()
            .ok_or_else(|| Error::malformed("beacon before the first scanner header"))?;
        let coords = line
            .split(',')
            .map(|n| n.trim().parse::<i32>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let beacon: Vec3 = coords
            .try_into()
            .map_err(|_| Error::malformed(format!("expected x,y,z: {line:?}")))?;
        beacons.push(beacon);
    }
    if let Some(beacons) = current {
        scanners.push(Scanner::new(scanners.len(), beacons));
    }
    if scanners.is_empty() {
        return Err(Error::malformed("no scanners"));
    }
    Ok(scanners)
}

#[derive(Debug)]
struct Map {
    positions: Vec<Vec3>,
    beacons: FxHashSet<Vec3>,
}

/// Aligns every scanner breadth-first, starting from scanner 0 which defines
/// the shared frame.
fn assemble(scanners: &[Scanner]) -> Result<Map> {
    let rotations = Rotation::all();
    let mut placed: Vec<Option<(Vec3, Vec<Vec3>)>> = vec![None; scanners.len()];
    placed[0] = Some(([0, 0, 0], scanners[0].beacons.clone()));
    let mut queue = VecDeque::from([0]);

    while let Some(anchor) = queue.pop_front() {
        let Some((_, anchor_beacons)) = placed[anchor].clone() else {
            continue;
        };
        for scanner in scanners {
            if placed[scanner.id].is_some()
                || scanner.shared_distances(&scanners[anchor]) < MIN_SHARED_DISTANCES
            {
                continue;
            }
            if let Some((position, beacons)) = scanner.align(&anchor_beacons, &rotations) {
                debug!(scanner = scanner.id, via = anchor, ?position, "aligned");
                placed[scanner.id] = Some((position, beacons));
                queue.push_back(scanner.id);
            }
        }
    }

    let mut map = Map {
        positions: Vec::with_capacity(scanners.len()),
        beacons: FxHashSet::default(),
    };
    for (id, slot) in placed.into_iter().enumerate() {
        let (position, beacons) =
            slot.ok_or_else(|| Error::NoSolution(format!("scanner {id} overlaps no other")))?;
        map.positions.push(position);
        map.beacons.extend(beacons);
    }
    Ok(map)
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let map = assemble(&parse(input)?)?;
        Ok(map.beacons.len().to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let map = assemble(&parse(input)?)?;
        let widest = map
            .positions
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| manhattan(a, b))
            .max()
            .unwrap_or(0);
        Ok(widest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic scatter of beacons within +-900 on every axis.
    fn beacon_field(count: usize) -> Vec<Vec3> {
        let mut state: u64 = 0x2021_1219;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % 1801) as i32 - 900
        };
        (0..count).map(|_| [next(), next(), next()]).collect()
    }

    /// Renders what a scanner at `position`, turned by `rotation`, reports
    /// for the given beacons.
    fn report(id: usize, position: Vec3, rotation: Rotation, beacons: &[Vec3]) -> String {
        let mut text = format!("--- scanner {id} ---\n");
        for &b in beacons {
            let [x, y, z] = rotation.apply(sub(b, position));
            text.push_str(&format!("{x},{y},{z}\n"));
        }
        text.push('\n');
        text
    }

    fn survey() -> String {
        let field = beacon_field(40);
        let rotations = Rotation::all();
        [
            report(0, [0, 0, 0], rotations[0], &field[0..25]),
            report(1, [1105, -68, 1246], rotations[7], &field[10..35]),
            report(2, [-92, -2380, -20], rotations[19], &field[20..40]),
        ]
        .concat()
    }

    #[test]
    fn there_are_24_orientations() {
        let rotations = Rotation::all();
        assert_eq!(rotations.len(), 24);
        let images: FxHashSet<Vec3> = rotations.iter().map(|r| r.apply([1, 2, 3])).collect();
        assert_eq!(images.len(), 24);
    }

    #[test]
    fn assembles_chained_scanners() {
        let input = survey();
        assert_eq!(Puzzle.challenge1(&input).unwrap(), "40");
        let map = assemble(&parse(&input).unwrap()).unwrap();
        assert_eq!(map.positions[0], [0, 0, 0]);
        let expected = [
            manhattan([0, 0, 0], [1105, -68, 1246]),
            manhattan([0, 0, 0], [-92, -2380, -20]),
            manhattan([1105, -68, 1246], [-92, -2380, -20]),
        ]
        .into_iter()
        .max()
        .unwrap();
        assert_eq!(Puzzle.challenge2(&input).unwrap(), expected.to_string());
    }

    #[test]
    fn isolated_scanner_has_no_solution() {
        let field = beacon_field(40);
        let rotations = Rotation::all();
        let input = [
            report(0, [0, 0, 0], rotations[0], &field[0..20]),
            report(1, [50, 50, 50], rotations[3], &field[20..40]),
        ]
        .concat();
        assert!(matches!(
            Puzzle.challenge1(&input),
            Err(Error::NoSolution(_))
        ));
    }
}
