use std::{fmt, ops::Add, str::FromStr};

use itertools::Itertools;

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Number {
    Regular(u32),
    Pair(Box<Number>, Box<Number>),
}

impl Number {
    fn pair(left: Number, right: Number) -> Self {
        Number::Pair(Box::new(left), Box::new(right))
    }

    fn magnitude(&self) -> u64 {
        match self {
            Number::Regular(n) => u64::from(*n),
            Number::Pair(l, r) => 3 * l.magnitude() + 2 * r.magnitude(),
        }
    }

    fn reduce(&mut self) {
        while self.explode(0).is_some() || self.split() {}
    }

    /// Explodes the leftmost pair nested inside four pairs. The returned
    /// values are the parts that still need adding to the nearest regular
    /// number on the left and right.
    fn explode(&mut self, depth: usize) -> Option<(Option<u32>, Option<u32>)> {
        let Number::Pair(left, right) = self else {
            return None;
        };
        if depth >= 4 {
            if let (Number::Regular(l), Number::Regular(r)) = (&**left, &**right) {
                let carry = (Some(*l), Some(*r));
                *self = Number::Regular(0);
                return Some(carry);
            }
        }
        if let Some((carry_left, carry_right)) = left.explode(depth + 1) {
            if let Some(n) = carry_right {
                right.add_leftmost(n);
            }
            return Some((carry_left, None));
        }
        if let Some((carry_left, carry_right)) = right.explode(depth + 1) {
            if let Some(n) = carry_left {
                left.add_rightmost(n);
            }
            return Some((None, carry_right));
        }
        None
    }

    fn add_leftmost(&mut self, value: u32) {
        match self {
            Number::Regular(n) => *n += value,
            Number::Pair(l, _) => l.add_leftmost(value),
        }
    }

    fn add_rightmost(&mut self, value: u32) {
        match self {
            Number::Regular(n) => *n += value,
            Number::Pair(_, r) => r.add_rightmost(value),
        }
    }

    /// Splits the leftmost regular number of 10 or more.
    fn split(&mut self) -> bool {
        match self {
            Number::Regular(n) if *n >= 10 => {
                *self = Number::pair(Number::Regular(*n / 2), Number::Regular((*n + 1) / 2));
                true
            }
            Number::Regular(_) => false,
            Number::Pair(l, r) => l.split() || r.split(),
        }
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        let mut sum = Number::pair(self, rhs);
        sum.reduce();
        sum
    }
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.bytes.get(self.pos) != Some(&byte) {
            return Err(Error::malformed(format!(
                "expected {:?} at offset {}",
                byte as char, self.pos
            )));
        }
        self.pos += 1;
        Ok(())
    }

    fn number(&mut self) -> Result<Number> {
        if self.bytes.get(self.pos) == Some(&b'[') {
            self.expect(b'[')?;
            let left = self.number()?;
            self.expect(b',')?;
            let right = self.number()?;
            self.expect(b']')?;
            return Ok(Number::pair(left, right));
        }
        let digits = self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Err(Error::malformed(format!(
                "expected a number at offset {}",
                self.pos
            )));
        }
        let text = std::str::from_utf8(&self.bytes[self.pos..self.pos + digits])
            .map_err(|_| Error::malformed("non-ASCII digits"))?;
        self.pos += digits;
        Ok(Number::Regular(text.parse()?))
    }
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser {
            bytes: s.trim().as_bytes(),
            pos: 0,
        };
        let number = parser.number()?;
        if parser.pos != parser.bytes.len() {
            return Err(Error::malformed(format!("trailing input after {number}")));
        }
        Ok(number)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Regular(n) => write!(f, "{}", n),
            Number::Pair(l, r) => write!(f, "[{},{}]", l, r),
        }
    }
}

fn parse(input: &str) -> Result<Vec<Number>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        parse(input)?
            .into_iter()
            .reduce(|sum, n| sum + n)
            .map(|sum| sum.magnitude().to_string())
            .ok_or_else(|| Error::malformed("no snailfish numbers"))
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        let numbers = parse(input)?;
        numbers
            .iter()
            .permutations(2)
            .map(|pair| (pair[0].clone() + pair[1].clone()).magnitude())
            .max()
            .map(|m| m.to_string())
            .ok_or_else(|| Error::malformed("need at least two snailfish numbers"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn n(s: &str) -> Number {
        s.parse().unwrap()
    }

    const HOMEWORK: &str = "\
[[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]
[[[5,[2,8]],4],[5,[[9,9],0]]]
[6,[[[6,2],[5,6]],[[7,6],[4,7]]]]
[[[6,[0,7]],[0,9]],[4,[9,[9,0]]]]
[[[7,[6,4]],[3,[1,3]]],[[[5,5],1],9]]
[[6,[[7,3],[3,2]]],[[[3,8],[5,7]],4]]
[[[[5,4],[7,7]],8],[[8,3],8]]
[[9,3],[[9,9],[6,[4,9]]]]
[[2,[[7,7],7]],[[5,8],[[9,3],[0,2]]]]
[[[[5,2],5],[8,[3,7]]],[[5,[7,5]],[4,4]]]
";

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(HOMEWORK).unwrap(), "4140");
        assert_eq!(Puzzle.challenge2(HOMEWORK).unwrap(), "3993");
    }

    #[rstest]
    #[case("[[[[[9,8],1],2],3],4]", "[[[[0,9],2],3],4]")]
    #[case("[7,[6,[5,[4,[3,2]]]]]", "[7,[6,[5,[7,0]]]]")]
    #[case("[[6,[5,[4,[3,2]]]],1]", "[[6,[5,[7,0]]],3]")]
    #[case("[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]", "[[3,[2,[8,0]]],[9,[5,[7,0]]]]")]
    fn single_explode(#[case] before: &str, #[case] after: &str) {
        let mut number = n(before);
        assert!(number.explode(0).is_some());
        assert_eq!(number.to_string(), after);
    }

    #[test]
    fn addition_reduces() {
        let sum = n("[[[[4,3],4],4],[7,[[8,4],9]]]") + n("[1,1]");
        assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
    }

    #[test]
    fn running_sum() {
        let sum = ["[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]", "[6,6]"]
            .into_iter()
            .map(n)
            .reduce(|a, b| a + b)
            .unwrap();
        assert_eq!(sum.to_string(), "[[[[5,0],[7,4]],[5,5]],[6,6]]");
    }

    #[rstest]
    #[case("[[1,2],[[3,4],5]]", 143)]
    #[case("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]", 1384)]
    #[case("[[[[8,7],[7,7]],[[8,6],[7,7]]],[[[0,7],[6,6]],[8,7]]]", 3488)]
    fn magnitudes(#[case] number: &str, #[case] expected: u64) {
        assert_eq!(n(number).magnitude(), expected);
    }

    #[test]
    fn rejects_unbalanced_pairs() {
        assert!(matches!("[1,2".parse::<Number>(), Err(Error::Malformed(_))));
        assert!(matches!(
            "[1,2]]".parse::<Number>(),
            Err(Error::Malformed(_))
        ));
    }
}
