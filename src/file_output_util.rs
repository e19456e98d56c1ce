use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{event, Level};

use crate::lib::Statistics;
use crate::lib::StatsGroup;

/// Writes every group to its own file, truncating anything already there.
pub fn write_stats(groups: &[StatsGroup], stats: &Statistics) -> Result<()> {
    for group in groups {
        let p = Path::new(&group.file);
        let mut f = fs::File::create(p).with_context(|| format!("Unable to create statistics file '{}'", p.display()))?;
        f.write_all(group.render(stats).as_bytes())
            .with_context(|| format!("Unable to write statistics file '{}'", p.display()))?;
        event!(Level::DEBUG, "wrote statistics to {}", p.display());
    }
    Ok(())
}
