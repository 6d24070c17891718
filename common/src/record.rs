use std::io::{self, Write};

use crate::Result;

pub const SEPARATOR: u8 = b'\t';

/// A `key\tvalue` pair. Both halves are raw bytes; nothing here assumes an
/// encoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Record {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Record {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Splits a line at its first tab. Empty lines and lines without a tab
    /// yield `None`.
    pub fn parse(line: &[u8]) -> Option<Self> {
        if line.is_empty() {
            return None;
        }
        let at = line.iter().position(|&b| b == SEPARATOR)?;
        Some(Self::new(&line[..at], &line[at + 1..]))
    }
}

pub trait Emit {
    fn emit(&mut self, record: Record) -> Result<()>;
}

impl Emit for Vec<Record> {
    fn emit(&mut self, record: Record) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Writes one `key\tvalue\n` line per record.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Emit for RecordWriter<W> {
    fn emit(&mut self, record: Record) -> Result<()> {
        self.inner.write_all(&record.key)?;
        self.inner.write_all(&[SEPARATOR])?;
        self.inner.write_all(&record.value)?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}
