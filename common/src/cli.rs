use std::{
    env,
    ffi::OsString,
    fmt,
    io::{self, BufWriter},
    str::FromStr,
};

use eyre::eyre;
use log::{debug, info};
use structopt::{
    clap::{self, AppSettings},
    StructOpt,
};

use crate::{init_logger, run_map, run_reduce, Job, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Map,
    Reduce,
}

impl Mode {
    pub const VARIANTS: [&'static str; 2] = ["map", "reduce"];
}

impl FromStr for Mode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "map" => Ok(Mode::Map),
            "reduce" => Ok(Mode::Reduce),
            _ => Err(eyre!("unknown mode {:?}, use either 'map' or 'reduce'", s)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Map => "map",
            Mode::Reduce => "reduce",
        })
    }
}

/// Streaming map/reduce filter: reads stdin, writes `key\tvalue` lines to stdout.
#[derive(StructOpt, Debug)]
pub struct Opt {
    /// Role in the pipeline
    #[structopt(possible_values = &Mode::VARIANTS)]
    pub mode: Mode,
    /// Sort reduce input by key in memory when the upstream shuffle does
    /// not guarantee key-grouped delivery
    #[structopt(long)]
    pub regroup: bool,
    /// Ignored, as a streaming runner may append its own arguments
    #[structopt(parse(from_os_str), hidden = true)]
    pub extra: Vec<OsString>,
}

pub fn parse_args<J, I, T>(args: I) -> std::result::Result<Opt, clap::Error>
where
    J: Job,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    // stdout carries records, so there is no --help or --version to print there
    let matches = Opt::clap()
        .name(J::NAME)
        .setting(AppSettings::DisableHelpFlags)
        .setting(AppSettings::DisableVersion)
        .get_matches_from_safe(args)?;
    Ok(Opt::from_clap(&matches))
}

/// Entry point shared by the job executables.
pub fn run<J: Job>() -> Result<()> {
    let opt = parse_args::<J, _, _>(env::args_os()).unwrap_or_else(|e| e.exit());
    init_logger();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let input = stdin.lock();
    let output = BufWriter::new(stdout.lock());

    if !opt.extra.is_empty() {
        debug!("ignoring extra arguments {:?}", opt.extra);
    }

    let stats = match opt.mode {
        Mode::Map => run_map(&J::Mapper::default(), input, output)?,
        Mode::Reduce => run_reduce(J::Reducer::default(), input, output, opt.regroup)?,
    };
    info!("{} {}: {:?}", J::NAME, opt.mode, stats);

    Ok(())
}
