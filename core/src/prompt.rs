//! Validated integer acquisition for the interactive benchmark.
//!
//! Parsing is a pure function ([`parse_or_none`]); the retry loop in
//! [`Prompter`] is generic over where lines come from and where messages go,
//! so the same driver runs against a terminal editor, piped stdin, or
//! in-memory buffers in tests.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please enter a valid integer.";

/// Parses one answer as an integer.
///
/// Accepts surrounding whitespace, an optional sign, and single underscores
/// between digits (`1_000`). Anything else, including decimals and values
/// outside `i64`, yields `None`.
pub fn parse_or_none(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
        return None;
    }

    let mut cleaned = String::with_capacity(digits.len() + 1);
    if negative {
        cleaned.push('-');
    }
    cleaned.extend(digits.chars().filter(|c| *c != '_'));
    cleaned.parse().ok()
}

/// Where answers come from.
pub trait LineSource {
    /// Shows `prompt` and reads one line. `Ok(None)` means input is exhausted.
    ///
    /// `out` is the stream the caller writes its own messages to; sources that
    /// echo the prompt themselves write it there so output stays ordered.
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Option<String>>;
}

/// Line source over any buffered reader, e.g. locked stdin or a `Cursor`.
pub struct StreamLines<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> StreamLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> LineSource for StreamLines<R> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Option<String>> {
        write!(out, "{}", prompt)?;
        out.flush()?;
        self.buf.clear();
        let read = self.reader.read_line(&mut self.buf).context("read answer from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(self.buf.clone()))
    }
}

/// Asks integer questions until each one gets a valid answer.
pub struct Prompter<S, W> {
    source: S,
    out: W,
}

impl<S: LineSource, W: Write> Prompter<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self { source, out }
    }

    /// Repeats `question` until the answer parses. Every rejected answer
    /// prints [`INVALID_INPUT_MESSAGE`] once. There is no retry limit; only
    /// the end of input stops the loop, as an error.
    pub fn ask_int(&mut self, question: &str) -> Result<i64> {
        loop {
            let Some(line) = self.source.read_line(question, &mut self.out)? else {
                bail!("input closed while waiting for: {}", question.trim_end());
            };
            match parse_or_none(&line) {
                Some(value) => return Ok(value),
                None => {
                    tracing::debug!(target: "unroll::prompt", answer = line.trim_end(), "rejected non-integer answer");
                    writeln!(self.out, "{}", INVALID_INPUT_MESSAGE)?;
                }
            }
        }
    }

    /// Stream for the caller's own report lines.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (S, W) {
        (self.source, self.out)
    }
}
