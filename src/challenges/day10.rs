use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

enum Line {
    Corrupted(char),
    Incomplete(Vec<char>),
}

fn closer(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}

fn check(line: &str) -> Result<Line> {
    let mut expected = Vec::new();
    for c in line.chars() {
        if let Some(close) = closer(c) {
            expected.push(close);
        } else if matches!(c, ')' | ']' | '}' | '>') {
            if expected.pop() != Some(c) {
                return Ok(Line::Corrupted(c));
            }
        } else {
            return Err(Error::malformed(format!("unexpected character {c:?}")));
        }
    }
    expected.reverse();
    Ok(Line::Incomplete(expected))
}

fn lines(input: &str) -> impl Iterator<Item = Result<Line>> + '_ {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(check)
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        let mut score = 0u64;
        for line in lines(input) {
            if let Line::Corrupted(c) = line? {
                score += match c {
                    ')' => 3,
                    ']' => 57,
                    '}' => 1197,
                    _ => 25137,
                };
            }
        }
        Ok(score.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let mut scores = Vec::new();
        for line in lines(input) {
            if let Line::Incomplete(missing) = line? {
                if missing.is_empty() {
                    continue;
                }
                let score = missing.iter().fold(0u64, |score, c| {
                    score * 5
                        + match c {
                            ')' => 1,
                            ']' => 2,
                            '}' => 3,
                            _ => 4,
                        }
                });
                scores.push(score);
            }
        }
        if scores.is_empty() {
            return Err(Error::NoSolution("no incomplete lines".into()));
        }
        scores.sort_unstable();
        Ok(scores[scores.len() / 2].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EXAMPLE: &str = "\
[({(<(())[]>[[{[]{<()<>>
[(()[<>])]({[<{<<[]>>(
{([(<{}[<>[]}>{[]{[(<()>
(((({<>}<{<{<>}{[]{[]{}
[[<[([]))<([[{}[[()]]]
[{[{({}]{}}([{[{{{}}([]
{<[[]]>}<{[{[{[]{()[[[]
[<(<(<(<{}))><([]([]()
<{([([[(<>()){}]>(<<{{
<{([{{}}[<[[[<>{}]]]>[]]
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "26397");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "288957");
    }

    #[rstest]
    #[case("{([(<{}[<>[]}>{[]{[(<()>", '}')]
    #[case("[[<[([]))<([[{}[[()]]]", ')')]
    #[case("<{([([[(<>()){}]>(<<{{", '>')]
    fn first_illegal_character(#[case] line: &str, #[case] illegal: char) {
        assert!(matches!(
            check(line).unwrap(),
            Line::Corrupted(c) if c == illegal
        ));
    }

    #[test]
    fn completion_string() {
        let Line::Incomplete(missing) = check("[({(<(())[]>[[{[]{<()<>>").unwrap() else {
            panic!("line should be incomplete");
        };
        assert_eq!(missing.into_iter().collect::<String>(), "}}]])})]");
    }
}
