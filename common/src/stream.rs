use std::io::{BufRead, Write};

use eyre::WrapErr;
use itertools::Itertools;
use log::debug;

use crate::{Mapper, Record, RecordWriter, Reducer, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Input lines consumed.
    pub lines: usize,
    /// Records written.
    pub records: usize,
    /// Malformed input lines dropped by a reduce pass.
    pub skipped: usize,
}

/// Calls `f` with each line of `input`, numbered from 1, with its `\n`
/// stripped. Any other byte, `\r` included, is part of the line.
fn for_each_line(
    mut input: impl BufRead,
    mut f: impl FnMut(usize, &[u8]) -> Result<()>,
) -> Result<usize> {
    let mut line = Vec::new();
    let mut n = 0;
    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .wrap_err_with(|| format!("failed to read input line {}", n + 1))?;
        if read == 0 {
            return Ok(n);
        }
        n += 1;
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        f(n, &line)?;
    }
}

pub fn run_map<M: Mapper>(mapper: &M, input: impl BufRead, output: impl Write) -> Result<Stats> {
    let mut writer = RecordWriter::new(output);
    let mut stats = Stats::default();

    let lines = for_each_line(input, |_, line| mapper.map(line, &mut writer))?;
    stats.lines = lines;

    writer.flush()?;
    stats.records = writer.written();
    Ok(stats)
}

/// Feeds every well-formed record to `reducer` in arrival order.
///
/// With `regroup`, a reducer that requires key-grouped input gets its
/// records sorted by key in memory first; arrival order is kept among
/// records with the same key.
pub fn run_reduce<R: Reducer>(
    mut reducer: R,
    input: impl BufRead,
    output: impl Write,
    regroup: bool,
) -> Result<Stats> {
    let mut writer = RecordWriter::new(output);
    let mut stats = Stats::default();
    let regroup = regroup && R::REQUIRES_GROUPING;
    let mut held = Vec::new();

    let lines = for_each_line(input, |n, line| {
        let record = match Record::parse(line) {
            Some(record) => record,
            None => {
                debug!("skip malformed line {}: {:?}", n, String::from_utf8_lossy(line));
                stats.skipped += 1;
                return Ok(());
            }
        };

        if regroup {
            held.push(record);
            Ok(())
        } else {
            reducer.reduce(record, &mut writer)
        }
    })?;
    stats.lines = lines;

    if regroup {
        debug!("regrouping {} records by key", held.len());
        for record in held.into_iter().sorted_by(|a, b| a.key.cmp(&b.key)) {
            reducer.reduce(record, &mut writer)?;
        }
    }
    reducer.finish(&mut writer)?;

    writer.flush()?;
    stats.records = writer.written();
    Ok(stats)
}
