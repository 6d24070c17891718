pub use eyre::Result;

mod cli;
mod record;
mod stream;

pub use cli::{parse_args, run, Mode, Opt};
pub use record::{Emit, Record, RecordWriter};
pub use stream::{run_map, run_reduce, Stats};

/// Turns one raw input line, without its `\n`, into zero or more records.
pub trait Mapper {
    fn map(&self, line: &[u8], out: &mut impl Emit) -> Result<()>;
}

/// Aggregates a stream of records, one at a time, in arrival order.
pub trait Reducer {
    /// Whether records sharing a key must arrive contiguously. A reducer
    /// that sets this trusts the upstream shuffle and does not re-sort.
    const REQUIRES_GROUPING: bool;

    fn reduce(&mut self, record: Record, out: &mut impl Emit) -> Result<()>;

    /// Called once at end of stream.
    fn finish(self, out: &mut impl Emit) -> Result<()>;
}

/// A mapper and a reducer sharing one executable.
pub trait Job {
    const NAME: &'static str;

    type Mapper: Mapper + Default;
    type Reducer: Reducer + Default;
}

pub fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init()
}
