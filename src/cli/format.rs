use std::io::Write;

use anyhow::Result;

use crate::cli::args::OutputFormat;
use crate::models::QueryResult;

/// Notice printed when a query matches nothing.
pub const NO_MATCHES: &str = "No matches found";

/// Render a `QueryResult` in the requested format.
pub fn write_result<W: Write>(result: &QueryResult, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(result, out),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, result)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Render matches one per line as `path line "text"`, best first.
///
/// The score is not printed.
pub fn write_text<W: Write>(result: &QueryResult, out: &mut W) -> Result<()> {
    if result.matches.is_empty() {
        writeln!(out, "{NO_MATCHES}")?;
        return Ok(());
    }

    for m in &result.matches {
        writeln!(out, "{} {} \"{}\"", m.path.display(), m.line, m.text)?;
    }

    Ok(())
}
