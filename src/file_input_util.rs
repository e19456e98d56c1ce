use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Returns a display name for diagnostics together with the source text.
pub fn read_source(p: Option<&Path>) -> Result<(String, String)> {
    match p {
        Some(p) => {
            let data = fs::read(p).with_context(|| format!("Unable to read '{}'", p.display()))?;
            let source = String::from_utf8(data).map_err(|_| anyhow!("'{}' is not valid UTF-8", p.display()))?;
            Ok((p.to_string_lossy().into_owned(), source))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Unable to read source from standard input")?;
            Ok(("<stdin>".to_owned(), source))
        }
    }
}
