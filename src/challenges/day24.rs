use std::str::FromStr;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const W: usize = 0;
const X: usize = 1;
const Y: usize = 2;
const Z: usize = 3;

/// Faults the ALU raises instead of producing a value.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum AluError {
    #[error("division of {0} by zero")]
    DivideByZero(i64),
    #[error("{0} mod {1} is undefined")]
    InvalidModulus(i64, i64),
    #[error("program read more input than it was given")]
    MissingInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Register(usize),
    Literal(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
    Div,
    Mod,
    Eql,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Inp(usize),
    Binary(Op, usize, Operand),
}

fn register(name: &str) -> Result<usize> {
    match name {
        "w" => Ok(W),
        "x" => Ok(X),
        "y" => Ok(Y),
        "z" => Ok(Z),
        other => Err(Error::malformed(format!("unknown register {other:?}"))),
    }
}

impl FromStr for Operand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match register(s) {
            Ok(r) => Ok(Operand::Register(r)),
            Err(_) => Ok(Operand::Literal(s.parse()?)),
        }
    }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let op = match parts[..] {
            ["inp", a] => return Ok(Instruction::Inp(register(a)?)),
            ["add", _, _] => Op::Add,
            ["mul", _, _] => Op::Mul,
            ["div", _, _] => Op::Div,
            ["mod", _, _] => Op::Mod,
            ["eql", _, _] => Op::Eql,
            _ => return Err(Error::malformed(format!("bad instruction {s:?}"))),
        };
        let (a, b) = (register(parts[1])?, parts[2].parse()?);
        Ok(Instruction::Binary(op, a, b))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
struct Alu {
    registers: [i64; 4],
}

impl Alu {
    fn value(&self, operand: Operand) -> i64 {
        match operand {
            Operand::Register(r) => self.registers[r],
            Operand::Literal(n) => n,
        }
    }

    fn step(
        &mut self,
        instruction: Instruction,
        input: &mut impl Iterator<Item = i64>,
    ) -> std::result::Result<(), AluError> {
        match instruction {
            Instruction::Inp(a) => {
                self.registers[a] = input.next().ok_or(AluError::MissingInput)?;
            }
            Instruction::Binary(op, a, b) => {
                let (lhs, rhs) = (self.registers[a], self.value(b));
                self.registers[a] = match op {
                    Op::Add => lhs.wrapping_add(rhs),
                    Op::Mul => lhs.wrapping_mul(rhs),
                    Op::Div if rhs == 0 => return Err(AluError::DivideByZero(lhs)),
                    Op::Div => lhs.wrapping_div(rhs),
                    Op::Mod if lhs < 0 || rhs <= 0 => {
                        return Err(AluError::InvalidModulus(lhs, rhs))
                    }
                    Op::Mod => lhs % rhs,
                    Op::Eql => i64::from(lhs == rhs),
                };
            }
        }
        Ok(())
    }

    fn run(
        &mut self,
        program: &[Instruction],
        input: impl IntoIterator<Item = i64>,
    ) -> std::result::Result<(), AluError> {
        let mut input = input.into_iter();
        for &instruction in program {
            self.step(instruction, &mut input)?;
        }
        Ok(())
    }
}

/// The instructions from one `inp` up to the next, with the registers whose
/// incoming values the block can observe.
#[derive(Debug)]
struct Block {
    instructions: Vec<Instruction>,
    live: [bool; 4],
    /// The `div z N` divisor when the block is a MONAD digit check that can
    /// never leave `z` below `z / N`.
    shrink: Option<i64>,
}

impl Block {
    /// Registers read before being written, and registers written.
    /// `mul r 0` counts as a plain write.
    fn uses_and_defs(&self) -> ([bool; 4], [bool; 4]) {
        let mut uses = [false; 4];
        let mut defs = [false; 4];
        for &instruction in &self.instructions {
            match instruction {
                Instruction::Inp(a) => defs[a] = true,
                Instruction::Binary(Op::Mul, a, Operand::Literal(0)) => defs[a] = true,
                Instruction::Binary(_, a, b) => {
                    if let Operand::Register(r) = b {
                        uses[r] |= !defs[r];
                    }
                    uses[a] |= !defs[a];
                    defs[a] = true;
                }
            }
        }
        (uses, defs)
    }

    fn run(&self, alu: &mut Alu, digit: i64) -> std::result::Result<(), AluError> {
        alu.run(&self.instructions, [digit])
    }

    /// Matches the 18-instruction MONAD digit check
    /// `z = z / a * (25 * x + 1) + (w + c) * x`, with `x` either 0 or 1.
    /// With `a > 0` and `c >= -1` the block's result is at least `z / a`.
    fn monad_divisor(&self) -> Option<i64> {
        let literal = |i: usize, op: Op, r: usize| match self.instructions.get(i) {
            Some(&Instruction::Binary(o, reg, Operand::Literal(n))) if o == op && reg == r => {
                Some(n)
            }
            _ => None,
        };
        let a = literal(4, Op::Div, Z)?;
        let b = literal(5, Op::Add, X)?;
        let c = literal(15, Op::Add, Y)?;
        if a <= 0 || c < -1 {
            return None;
        }
        let template = format!(
            "inp w\nmul x 0\nadd x z\nmod x 26\ndiv z {a}\nadd x {b}\neql x w\neql x 0\n\
             mul y 0\nadd y 25\nmul y x\nadd y 1\nmul z y\nmul y 0\nadd y w\nadd y {c}\n\
             mul y x\nadd z y"
        );
        let expected: Vec<Instruction> = template
            .lines()
            .map(str::parse)
            .collect::<Result<_>>()
            .ok()?;
        (expected == self.instructions).then_some(a)
    }
}

fn parse(input: &str) -> Result<Vec<Block>> {
    let mut blocks: Vec<Block> = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let instruction: Instruction = line.parse()?;
        if let Instruction::Inp(_) = instruction {
            blocks.push(Block {
                instructions: Vec::new(),
                live: [false; 4],
                shrink: None,
            });
        }
        blocks
            .last_mut()
            .ok_or_else(|| Error::malformed("program must start with inp"))?
            .instructions
            .push(instruction);
    }

    // Backwards liveness; only z is read after the last block.
    let mut live_out = [false, false, false, true];
    for block in blocks.iter_mut().rev() {
        block.shrink = block.monad_divisor();
        let (uses, defs) = block.uses_and_defs();
        for r in 0..4 {
            block.live[r] = uses[r] || (live_out[r] && !defs[r]);
        }
        live_out = block.live;
    }
    Ok(blocks)
}

/// Depth-first search for the first accepted model number, trying digits in
/// the given order.
struct Search<'a> {
    blocks: &'a [Block],
    /// `budgets[i]` bounds the `z` that blocks `i..` can still reduce to zero.
    /// `None` when some block from `i` on is not a MONAD digit check.
    budgets: Vec<Option<i64>>,
    digits: [i64; 9],
    dead: FxHashSet<(usize, [i64; 4])>,
}

impl<'a> Search<'a> {
    fn new(blocks: &'a [Block], digits: [i64; 9]) -> Self {
        let mut budgets: Vec<Option<i64>> = vec![None; blocks.len() + 1];
        budgets[blocks.len()] = Some(1);
        for i in (0..blocks.len()).rev() {
            budgets[i] = budgets[i + 1]
                .zip(blocks[i].shrink)
                .map(|(rest, a)| rest.saturating_mul(a));
        }
        Self {
            blocks,
            budgets,
            digits,
            dead: FxHashSet::default(),
        }
    }

    fn key(&self, index: usize, alu: &Alu) -> (usize, [i64; 4]) {
        let mut registers = alu.registers;
        if let Some(block) = self.blocks.get(index) {
            for r in 0..4 {
                if !block.live[r] {
                    registers[r] = 0;
                }
            }
        }
        (index, registers)
    }

    /// Returns the digits still to enter, last one first.
    fn explore(&mut self, index: usize, alu: Alu) -> Result<Option<Vec<i64>>> {
        let z = alu.registers[Z];
        if index == self.blocks.len() {
            return Ok((z == 0).then(Vec::new));
        }
        if self.budgets[index].is_some_and(|budget| z >= budget) {
            return Ok(None);
        }
        let key = self.key(index, &alu);
        if self.dead.contains(&key) {
            return Ok(None);
        }
        for digit in self.digits {
            let mut next = alu;
            match self.blocks[index].run(&mut next, digit) {
                Ok(()) => {}
                Err(AluError::MissingInput) => return Err(AluError::MissingInput.into()),
                Err(fault) => {
                    trace!(block = index, digit, %fault, "digit rejected");
                    continue;
                }
            }
            if let Some(mut rest) = self.explore(index + 1, next)? {
                rest.push(digit);
                return Ok(Some(rest));
            }
        }
        trace!(block = index, ?key, "dead state");
        self.dead.insert(key);
        Ok(None)
    }
}

fn model_number(input: &str, digits: [i64; 9]) -> Result<String> {
    let blocks = parse(input)?;
    let mut search = Search::new(&blocks, digits);
    let found = search.explore(0, Alu::default())?;
    debug!(dead = search.dead.len(), "search finished");
    let digits =
        found.ok_or_else(|| Error::NoSolution("MONAD accepts no model number".into()))?;
    Ok(digits.iter().rev().map(|d| d.to_string()).collect())
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        model_number(input, [9, 8, 7, 6, 5, 4, 3, 2, 1])
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        model_number(input, [1, 2, 3, 4, 5, 6, 7, 8, 9])
    }
}
