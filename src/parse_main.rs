use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::ArgMatches;
use clap::Parser;
use tracing::{event, Level};

use crate::file_input_util;
use crate::file_output_util;
use crate::lib;
use crate::lib::Metric;
use crate::lib::ParseError;
use crate::lib::ProgramError;
use crate::lib::StatsError;
use crate::lib::StatsEvent;
use crate::lib::XmlWriter;

/// Translates IPPcode21 source into its XML representation on standard output.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
// metric flags are read back through ArgMatches indices, since their order matters
#[allow(dead_code)]
pub struct ParseCli {
    /// Source file (standard input when omitted)
    #[clap(parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Write the metric flags that follow to FILE, one value per line. May be repeated.
    #[clap(long, value_name = "FILE")]
    stats: Vec<String>,

    /// Number of instructions
    #[clap(long, parse(from_occurrences))]
    loc: u64,
    /// Number of comments
    #[clap(long, parse(from_occurrences))]
    comments: u64,
    /// Number of label definitions
    #[clap(long, parse(from_occurrences))]
    labels: u64,
    /// Number of jumps, calls and returns
    #[clap(long, parse(from_occurrences))]
    jumps: u64,
    /// Number of forward jumps
    #[clap(long, parse(from_occurrences))]
    fwjumps: u64,
    /// Number of backward jumps
    #[clap(long, parse(from_occurrences))]
    backjumps: u64,
    /// Number of jumps to undefined labels
    #[clap(long, parse(from_occurrences))]
    badjumps: u64,
}

#[derive(Debug)]
pub enum Fail {
    Args(String),
    Input(anyhow::Error),
    OutputFile(anyhow::Error),
    /// Diagnostics were already printed against the source.
    Parse(ParseError),
    Internal(anyhow::Error),
}
impl Fail {
    pub const ARGS: i32 = 10;

    pub fn exit_code(&self) -> i32 {
        match self {
            Fail::Args(_) => Self::ARGS,
            Fail::Input(_) => 11,
            Fail::OutputFile(_) => 12,
            Fail::Parse(err) => err.kind().exit_code(),
            Fail::Internal(_) => 99,
        }
    }

    pub fn report(&self) {
        match self {
            Fail::Parse(_) => {}
            Fail::Args(msg) => eprintln!("Error: {}", msg),
            Fail::Input(err) | Fail::OutputFile(err) | Fail::Internal(err) => eprintln!("Error: {:?}", err),
        }
    }
}
impl fmt::Display for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fail::Args(msg) => f.write_str(msg),
            Fail::Parse(err) => err.fmt(f),
            Fail::Input(err) | Fail::OutputFile(err) | Fail::Internal(err) => err.fmt(f),
        }
    }
}

fn stats_events(matches: &ArgMatches) -> Vec<StatsEvent> {
    let mut events = Vec::new();
    if let (Some(files), Some(indices)) = (matches.values_of("stats"), matches.indices_of("stats")) {
        events.extend(indices.zip(files).map(|(i, file)| (i, StatsEvent::File(file.to_owned()))));
    }
    for (metric, name) in Metric::ALL {
        if let Some(indices) = matches.indices_of(name) {
            events.extend(indices.map(|i| (i, StatsEvent::Metric(metric))));
        }
    }

    events.sort_by_key(|(i, _)| *i);
    events.into_iter().map(|(_, e)| e).collect()
}

pub fn parse_main(cli: ParseCli, matches: &ArgMatches) -> Result<(), Fail> {
    let groups = lib::group_stats(stats_events(matches)).map_err(|err| match err {
        StatsError::DuplicateFile(_) => Fail::OutputFile(err.into()),
        StatsError::MetricWithoutFile(_) | StatsError::EmptyFileName => Fail::Args(err.to_string()),
    })?;

    let (fname, source) = file_input_util::read_source(cli.input.as_deref()).map_err(Fail::Input)?;

    let mut xml = XmlWriter::new(Vec::new()).map_err(|err| Fail::Internal(err.into()))?;
    let stats = match lib::parse_program(&source, |inst| xml.instruction(&inst)) {
        Ok(stats) => stats,
        Err(ProgramError::Parse(err)) => {
            err.display(&fname, &source);
            return Err(Fail::Parse(err));
        }
        Err(ProgramError::Sink(err)) => return Err(Fail::Internal(err.into())),
    };
    event!(
        Level::INFO,
        loc = stats.loc,
        comments = stats.comments,
        labels = stats.labels,
        jumps = stats.jumps,
        bad_jumps = stats.bad_jumps,
        "parsed {}",
        fname
    );

    file_output_util::write_stats(&groups, &stats).map_err(Fail::OutputFile)?;

    let out = xml.finish().map_err(|err| Fail::Internal(err.into()))?;
    std::io::stdout()
        .lock()
        .write_all(&out)
        .context("Unable to write XML to standard output")
        .map_err(Fail::Internal)?;
    Ok(())
}
