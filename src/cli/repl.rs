//! Interactive query loop.
//!
//! Reads one query per line, evaluates it against a shared index, and
//! writes the rendered result. `quit` (any case) or end of input ends
//! the loop. A failing query is reported and the loop keeps going.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::cli::args::OutputFormat;
use crate::cli::format::write_result;
use crate::index::WordIndex;
use crate::search::engine::run_query;

pub const PROMPT: &str = "> ";

/// Per-session output settings.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    pub index: &'a WordIndex,
    pub format: OutputFormat,
    pub limit: Option<usize>,
}

impl Session<'_> {
    /// Run the read loop until `quit` or end of input.
    ///
    /// Only failures writing to `out` or reading from `input` (other
    /// than undecodable input lines) are returned.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<()> {
        let mut line = String::new();

        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    warn!(error = %err, "discarding undecodable input line");
                    writeln!(out, "Error: {err}")?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            let query = line.trim_end_matches(['\n', '\r']);
            if query.trim().eq_ignore_ascii_case("quit") {
                break;
            }

            match run_query(self.index, query, self.limit) {
                Ok(result) => write_result(&result, self.format, &mut out)?,
                Err(err) => writeln!(out, "Error: {err:#}")?,
            }
        }

        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    fn index() -> WordIndex {
        let mut index = WordIndex::new();
        index
            .add_text(Arc::from(Path::new("a.txt")), "cat dog\ndog fish\n")
            .expect("index text");
        index
    }

    fn session_output(input: &str, format: OutputFormat, limit: Option<usize>) -> String {
        let index = index();
        let session = Session {
            index: &index,
            format,
            limit,
        };
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).expect("session");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn answers_queries_until_quit() {
        let output = session_output("+(cat fish)\nzebra\nQUIT\nfish\n", OutputFormat::Text, None);

        assert_eq!(
            output,
            "> a.txt 1 \"cat dog\"\na.txt 2 \"dog fish\"\n> No matches found\n> "
        );
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let output = session_output("fish", OutputFormat::Text, None);
        assert_eq!(output, "> a.txt 2 \"dog fish\"\n> ");
    }

    #[test]
    fn query_errors_are_reported_and_loop_continues() {
        let output = session_output("+(cat dog\nfish\nquit\n", OutputFormat::Text, None);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("> Error: unterminated OR-group"));
        assert_eq!(lines[1], "> a.txt 2 \"dog fish\"");
    }

    #[test]
    fn undecodable_input_lines_are_reported() {
        let index = index();
        let session = Session {
            index: &index,
            format: OutputFormat::Text,
            limit: None,
        };
        let input: &[u8] = b"\xff\xfe\nfish\n";
        let mut out = Vec::new();
        session.run(input, &mut out).expect("session");

        let output = String::from_utf8(out).expect("utf-8");
        assert!(output.starts_with("> Error:"));
        assert!(output.contains("a.txt 2 \"dog fish\""));
    }

    #[test]
    fn limit_and_json_format_apply_per_query() {
        let output = session_output("+dog\n", OutputFormat::Json, Some(1));
        let body = output
            .strip_prefix(PROMPT)
            .and_then(|rest| rest.strip_suffix(PROMPT))
            .expect("prompt framing");

        let value: serde_json::Value = serde_json::from_str(body.trim()).expect("json");
        assert_eq!(value["total_matches"], 2);
        assert_eq!(value["truncated"], true);
        assert_eq!(value["matches"].as_array().map(Vec::len), Some(1));
    }
}
