use rustc_hash::FxHashSet;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fold {
    X(u32),
    Y(u32),
}

impl Fold {
    fn apply(self, (x, y): (u32, u32)) -> (u32, u32) {
        match self {
            Fold::X(line) if x > line => (2 * line - x, y),
            Fold::Y(line) if y > line => (x, 2 * line - y),
            _ => (x, y),
        }
    }
}

struct Manual {
    dots: FxHashSet<(u32, u32)>,
    folds: Vec<Fold>,
}

fn parse(input: &str) -> Result<Manual> {
    let mut dots = FxHashSet::default();
    let mut folds = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(fold) = line.strip_prefix("fold along ") {
            let (axis, at) = fold
                .split_once('=')
                .ok_or_else(|| Error::malformed(format!("bad fold: {line:?}")))?;
            let at = at.parse()?;
            folds.push(match axis {
                "x" => Fold::X(at),
                "y" => Fold::Y(at),
                _ => return Err(Error::malformed(format!("bad fold axis: {axis:?}"))),
            });
        } else {
            let (x, y) = line
                .split_once(',')
                .ok_or_else(|| Error::malformed(format!("bad dot: {line:?}")))?;
            dots.insert((x.parse()?, y.parse()?));
        }
    }
    if folds.is_empty() {
        return Err(Error::malformed("no fold instructions"));
    }
    Ok(Manual { dots, folds })
}

fn fold(dots: FxHashSet<(u32, u32)>, fold: Fold) -> Result<FxHashSet<(u32, u32)>> {
    let out_of_range = |&(x, y): &(u32, u32)| match fold {
        Fold::X(line) => x > 2 * line,
        Fold::Y(line) => y > 2 * line,
    };
    if dots.iter().any(out_of_range) {
        return Err(Error::malformed(format!(
            "{fold:?} leaves dots off the sheet"
        )));
    }
    Ok(dots.into_iter().map(|dot| fold.apply(dot)).collect())
}

fn render(dots: &FxHashSet<(u32, u32)>) -> String {
    let width = dots.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
    let height = dots.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
    let mut sheet = String::new();
    for y in 0..height {
        sheet.push('\n');
        for x in 0..width {
            sheet.push(if dots.contains(&(x, y)) { '#' } else { '.' });
        }
    }
    sheet
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let manual = parse(input)?;
        Ok(fold(manual.dots, manual.folds[0])?.len().to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let manual = parse(input)?;
        let dots = manual.folds.iter().try_fold(manual.dots, |dots, &f| fold(dots, f))?;
        Ok(render(&dots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
6,10
0,14
9,10
0,3
10,4
4,11
6,0
6,12
4,1
0,13
10,12
3,4
3,0
8,4
1,10
2,14
8,10
9,0

fold along y=7
fold along x=5
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "17");
        assert_eq!(
            Puzzle.challenge2(EXAMPLE).unwrap(),
            "\n#####\n#...#\n#...#\n#...#\n#####"
        );
    }

    #[test]
    fn folding_past_the_edge_is_malformed() {
        assert!(matches!(
            Puzzle.challenge1("9,0\n\nfold along x=2\n"),
            Err(Error::Malformed(_))
        ));
    }
}
