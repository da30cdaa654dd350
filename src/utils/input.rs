//! Pull-based line input.
//!
//! The navigator loop blocks on one line at a time. Abstracting the source
//! lets a real terminal and a scripted harness drive identical transition
//! logic.

use std::collections::VecDeque;
use std::io::{self, BufRead};

pub trait LineSource {
    /// Next line without its trailing newline; `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads from standard input.
pub struct StdinLineSource;

impl LineSource for StdinLineSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
        }
    }
}

/// Replays a fixed script of lines, then reports end of input.
pub struct ScriptedLineSource {
    lines: VecDeque<String>,
}

impl ScriptedLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLineSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
