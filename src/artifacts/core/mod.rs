//! Core utilities and shared types
//!
//! This module contains shared utilities used across the application:
//!
//! - `debug_log!`: tracing for matcher compilation, compiled in only with the
//!   `debug_search` feature
//! - `OutputWriter`: stdout or pager-backed sink for command output

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Macro for debug logging that is enabled with the `debug_search` feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Resolved branch {} to {}", name, tip);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(feature = "debug_search") {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use debug_log;

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper
/// adapts it to be compatible with Rust's standard I/O traits.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Destination of command output
///
/// Search results go straight to stdout unless stdout is a terminal and paging
/// was not disabled, in which case they are buffered into a static pager that
/// is shown once the command finishes.
pub enum OutputWriter {
    Stdout(io::Stdout),
    Paged(PagerWriter, Pager),
}

impl OutputWriter {
    pub fn for_stdout(use_pager: bool) -> Self {
        let stdout = io::stdout();
        if use_pager && stdout.is_terminal() {
            let pager = Pager::new();
            OutputWriter::Paged(PagerWriter::new(pager.clone()), pager)
        } else {
            OutputWriter::Stdout(stdout)
        }
    }

    /// Flush the output, handing the buffered content to the pager if any
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            OutputWriter::Stdout(mut stdout) => stdout.flush()?,
            OutputWriter::Paged(_, pager) => minus::page_all(pager)?,
        }

        Ok(())
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputWriter::Stdout(stdout) => stdout.write(buf),
            OutputWriter::Paged(writer, _) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(stdout) => stdout.flush(),
            OutputWriter::Paged(writer, _) => writer.flush(),
        }
    }
}

