//! Word frequency counting.
//!
//! The mapper emits `word\t1` for every occurrence. Words are runs of ASCII
//! alphanumeric bytes and `_`; every other byte, including each byte of a
//! non-ASCII character, separates words. The reducer sums runs
//! of equal words, so its input must be key-grouped: all records for one
//! word contiguous, as delivered by a sorting shuffle. A word split across
//! two runs is emitted twice.

use std::str;

use common::{Emit, Job, Mapper, Record, Reducer, Result};
use eyre::eyre;
use log::trace;

#[derive(Debug)]
pub struct WordCount;

impl Job for WordCount {
    const NAME: &'static str = "wordcount";

    type Mapper = WordCountMapper;
    type Reducer = WordCountReducer;
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[derive(Debug, Default)]
pub struct WordCountMapper;

impl Mapper for WordCountMapper {
    fn map(&self, line: &[u8], out: &mut impl Emit) -> Result<()> {
        for word in line.split(|&b| !is_word_byte(b)).filter(|w| !w.is_empty()) {
            out.emit(Record::new(word.to_ascii_lowercase(), "1"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct WordCountReducer {
    current: Option<(Vec<u8>, u64)>,
}

impl Reducer for WordCountReducer {
    const REQUIRES_GROUPING: bool = true;

    fn reduce(&mut self, record: Record, out: &mut impl Emit) -> Result<()> {
        let Record { key: word, value } = record;
        let count = str::from_utf8(&value)
            .ok()
            .and_then(|count| count.parse::<u64>().ok())
            .ok_or_else(|| {
                eyre!(
                    "invalid count {:?} for word {:?}",
                    String::from_utf8_lossy(&value),
                    String::from_utf8_lossy(&word)
                )
            })?;

        match &mut self.current {
            Some((current, total)) if *current == word => {
                *total = total
                    .checked_add(count)
                    .ok_or_else(|| {
                        eyre!("count for word {:?} overflows", String::from_utf8_lossy(&word))
                    })?;
            }
            current => {
                if let Some((done, total)) = current.replace((word, count)) {
                    trace!("flush {:?}", String::from_utf8_lossy(&done));
                    out.emit(Record::new(done, total.to_string()))?;
                }
            }
        }
        Ok(())
    }

    fn finish(self, out: &mut impl Emit) -> Result<()> {
        if let Some((word, total)) = self.current {
            out.emit(Record::new(word, total.to_string()))?;
        }
        Ok(())
    }
}
