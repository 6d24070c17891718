//! Longest line selection, keeping every line tied for the maximum.
//!
//! Lines are raw bytes and their length is counted in bytes; a `\r` before
//! the line break is part of the line.
//!
//! Keys are line lengths zero-padded to [`LENGTH_WIDTH`] digits, so
//! comparing keys as strings orders them by length. The reducer keeps a
//! running maximum and accepts records in any order.

use std::{cmp::Ordering, str};

use common::{Emit, Job, Mapper, Record, Reducer, Result};
use eyre::{ensure, eyre};
use log::trace;

/// Digits in an encoded length; lines up to 99,999,999 bytes.
pub const LENGTH_WIDTH: usize = 8;

pub fn encode_length(len: usize) -> Result<String> {
    let key = format!("{:0width$}", len, width = LENGTH_WIDTH);
    ensure!(
        key.len() == LENGTH_WIDTH,
        "line length {} does not fit in {} digits",
        len,
        LENGTH_WIDTH
    );
    Ok(key)
}

pub fn decode_length(key: &[u8]) -> Result<u64> {
    str::from_utf8(key)
        .ok()
        .and_then(|key| key.parse::<u64>().ok())
        .ok_or_else(|| eyre!("invalid length key {:?}", String::from_utf8_lossy(key)))
}

#[derive(Debug)]
pub struct LongestPath;

impl Job for LongestPath {
    const NAME: &'static str = "longestpath";

    type Mapper = LongestPathMapper;
    type Reducer = LongestPathReducer;
}

#[derive(Debug, Default)]
pub struct LongestPathMapper;

impl Mapper for LongestPathMapper {
    fn map(&self, line: &[u8], out: &mut impl Emit) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        let key = encode_length(line.len())?;
        out.emit(Record::new(key, line))
    }
}

#[derive(Debug, Default)]
pub struct LongestPathReducer {
    max: Option<Vec<u8>>,
    // in arrival order
    longest: Vec<Vec<u8>>,
}

impl Reducer for LongestPathReducer {
    const REQUIRES_GROUPING: bool = false;

    fn reduce(&mut self, record: Record, _out: &mut impl Emit) -> Result<()> {
        let Record { key, value } = record;
        let ordering = match &self.max {
            Some(max) => key.cmp(max),
            None => Ordering::Greater,
        };

        match ordering {
            Ordering::Greater => {
                trace!("new maximum {}", String::from_utf8_lossy(&key));
                self.max = Some(key);
                self.longest.clear();
                self.longest.push(value);
            }
            Ordering::Equal => self.longest.push(value),
            Ordering::Less => {}
        }
        Ok(())
    }

    fn finish(self, out: &mut impl Emit) -> Result<()> {
        let max = match self.max {
            Some(max) => max,
            None => return Ok(()),
        };
        let len = decode_length(&max)?.to_string();
        for line in self.longest {
            out.emit(Record::new(len.as_bytes(), line))?;
        }
        Ok(())
    }
}
