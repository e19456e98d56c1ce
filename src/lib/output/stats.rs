use std::collections::HashSet;
use std::fmt::Write;

use thiserror::Error as ThisError;

use crate::lib::parse::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Loc,
    Comments,
    Labels,
    Jumps,
    FwJumps,
    BackJumps,
    BadJumps,
}
impl Metric {
    /// Command line flag names, without the leading `--`.
    pub const ALL: [(Metric, &'static str); 7] = [
        (Metric::Loc, "loc"),
        (Metric::Comments, "comments"),
        (Metric::Labels, "labels"),
        (Metric::Jumps, "jumps"),
        (Metric::FwJumps, "fwjumps"),
        (Metric::BackJumps, "backjumps"),
        (Metric::BadJumps, "badjumps"),
    ];
}

impl Statistics {
    pub fn value(&self, metric: Metric) -> usize {
        use Metric::*;
        match metric {
            Loc => self.loc,
            Comments => self.comments,
            Labels => self.labels,
            Jumps => self.jumps,
            FwJumps => self.forward_jumps(),
            BackJumps => self.backward_jumps,
            BadJumps => self.bad_jumps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsEvent {
    File(String),
    Metric(Metric),
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StatsError {
    #[error("--{0} must follow a --stats=<file> option")]
    MetricWithoutFile(&'static str),
    #[error("--stats requires a file name")]
    EmptyFileName,
    #[error("file {0} is used by more than one --stats option")]
    DuplicateFile(String),
}

/// Metrics to be written to one file, one value per line, in the given order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsGroup {
    pub file: String,
    pub metrics: Vec<Metric>,
}
impl StatsGroup {
    pub fn render(&self, stats: &Statistics) -> String {
        let mut out = String::new();
        for &m in &self.metrics {
            // writing to a String cannot fail
            let _ = writeln!(out, "{}", stats.value(m));
        }
        out
    }
}

fn flag_name(metric: Metric) -> &'static str {
    Metric::ALL.iter().find(|(m, _)| *m == metric).map_or("", |(_, name)| name)
}

/// Groups command line events, given in command line order.
pub fn group(events: impl IntoIterator<Item = StatsEvent>) -> Result<Vec<StatsGroup>, StatsError> {
    let mut groups: Vec<StatsGroup> = Vec::new();
    let mut seen = HashSet::new();

    for event in events {
        match event {
            StatsEvent::File(file) => {
                if file.is_empty() {
                    return Err(StatsError::EmptyFileName);
                }
                if !seen.insert(file.clone()) {
                    return Err(StatsError::DuplicateFile(file));
                }
                groups.push(StatsGroup {
                    file,
                    metrics: Vec::new(),
                });
            }
            StatsEvent::Metric(m) => match groups.last_mut() {
                Some(g) => g.metrics.push(m),
                None => return Err(StatsError::MetricWithoutFile(flag_name(m))),
            },
        }
    }

    Ok(groups)
}
