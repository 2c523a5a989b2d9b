use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

const LITERAL: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
    Literal(u64),
    Operator(u8, Vec<Packet>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Packet {
    version: u8,
    payload: Payload,
}

/// Reads big-endian bit fields out of a hex-encoded transmission.
struct BitReader {
    bits: Vec<bool>,
    pos: usize,
}

impl BitReader {
    fn from_hex(hex: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(hex.len() * 4);
        for c in hex.trim().chars() {
            let nibble = c
                .to_digit(16)
                .ok_or_else(|| Error::malformed(format!("bad hex digit {c:?}")))?;
            bits.extend((0..4).rev().map(|i| nibble >> i & 1 == 1));
        }
        Ok(Self { bits, pos: 0 })
    }

    fn read(&mut self, width: usize) -> Result<u64> {
        let end = self.pos + width;
        let field = self
            .bits
            .get(self.pos..end)
            .ok_or_else(|| Error::malformed("transmission ends mid-packet"))?;
        self.pos = end;
        let value = field.iter().fold(0, |value, &bit| value << 1 | u64::from(bit));
        Ok(value)
    }

    fn packet(&mut self) -> Result<Packet> {
        let version = self.read(3)? as u8;
        let type_id = self.read(3)? as u8;
        let payload = if type_id == LITERAL {
            let mut value = 0u64;
            loop {
                let more = self.read(1)? == 1;
                value = value
                    .checked_mul(16)
                    .ok_or_else(|| Error::malformed("literal overflows 64 bits"))?
                    | self.read(4)?;
                if !more {
                    break;
                }
            }
            Payload::Literal(value)
        } else {
            let mut children = Vec::new();
            if self.read(1)? == 0 {
                let length = self.read(15)? as usize;
                let end = self.pos + length;
                while self.pos < end {
                    children.push(self.packet()?);
                }
                if self.pos != end {
                    return Err(Error::malformed("subpackets overrun their bit length"));
                }
            } else {
                let count = self.read(11)?;
                for _ in 0..count {
                    children.push(self.packet()?);
                }
            }
            Payload::Operator(type_id, children)
        };
        Ok(Packet { version, payload })
    }
}

impl Packet {
    fn decode(hex: &str) -> Result<Self> {
        BitReader::from_hex(hex)?.packet()
    }

    fn version_sum(&self) -> u64 {
        let nested = match &self.payload {
            Payload::Literal(_) => 0,
            Payload::Operator(_, children) => children.iter().map(Packet::version_sum).sum(),
        };
        u64::from(self.version) + nested
    }

    fn value(&self) -> Result<u64> {
        let (type_id, children) = match &self.payload {
            Payload::Literal(value) => return Ok(*value),
            Payload::Operator(type_id, children) => (*type_id, children),
        };
        let values = children.iter().map(Packet::value).collect::<Result<Vec<_>>>()?;
        let compare = |op: fn(&u64, &u64) -> bool| match values.as_slice() {
            [a, b] => Ok(u64::from(op(a, b))),
            _ => Err(Error::malformed(format!(
                "comparison packet has {} operands",
                values.len()
            ))),
        };
        match type_id {
            0 => values
                .iter()
                .try_fold(0u64, |acc, &v| acc.checked_add(v))
                .ok_or_else(|| Error::malformed("sum packet overflows 64 bits")),
            1 => values
                .iter()
                .try_fold(1u64, |acc, &v| acc.checked_mul(v))
                .ok_or_else(|| Error::malformed("product packet overflows 64 bits")),
            2 => values.iter().copied().min().ok_or_else(|| Error::malformed("empty minimum")),
            3 => values.iter().copied().max().ok_or_else(|| Error::malformed("empty maximum")),
            5 => compare(u64::gt),
            6 => compare(u64::lt),
            7 => compare(u64::eq),
            other => Err(Error::malformed(format!("unknown packet type {other}"))),
        }
    }
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(Packet::decode(input)?.version_sum().to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(Packet::decode(input)?.value()?.to_string())
    }
}
