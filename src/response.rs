//! Line assembly and final result code detection.
//!
//! Bytes from the module are accumulated into lines. Each completed line is
//! classified as blank, command echo, a final result code (`OK` / `ERROR`) or
//! an informational line, which is kept in arrival order until the final
//! result code arrives.

use heapless::{String, Vec};

use crate::error::Error;

/// Informational lines kept per response.
pub const MAX_LINES: usize = 5;

/// Bytes kept per line, excluding the terminator.
pub const LINE_CAPACITY: usize = 255;

pub type Line = String<LINE_CAPACITY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Echo,
    Ok,
    Error(Option<u16>),
    Info(&'a str),
}

/// Classify a single line with its terminator already stripped.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line == "OK" {
        return LineKind::Ok;
    }
    if line == "ERROR" {
        return LineKind::Error(None);
    }
    if let Some(code) = line
        .strip_prefix("+CME ERROR:")
        .or_else(|| line.strip_prefix("+CMS ERROR:"))
    {
        return LineKind::Error(code.trim().parse().ok());
    }
    if line.starts_with("AT") {
        return LineKind::Echo;
    }
    LineKind::Info(line)
}

/// The informational lines of a successfully completed command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Response {
    lines: Vec<Line, MAX_LINES>,
}

impl Response {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Payload of the first line starting with `prefix` (e.g. `"+CEREG:"`),
    /// with whitespace after the prefix removed.
    pub fn prefixed(&self, prefix: &str) -> Option<&str> {
        self.lines()
            .find_map(|line| line.strip_prefix(prefix))
            .map(str::trim_start)
    }

    /// First line that is not a `+VERB:` style line. Replies such as socket
    /// numbers and the IMSI come back without a prefix.
    pub fn unprefixed(&self) -> Option<&str> {
        self.lines().find(|line| !line.starts_with('+'))
    }

    #[cfg(test)]
    pub(crate) fn from_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| Line::try_from(*l).unwrap())
                .collect(),
        }
    }
}

/// Outcome of feeding a byte into the [`LineBuffer`].
#[derive(Debug, PartialEq, Eq)]
pub enum Feed {
    Pending,
    Complete(Result<Response, Error>),
}

/// Accumulates raw bytes into at most [`MAX_LINES`] informational lines.
pub struct LineBuffer {
    current: Vec<u8, LINE_CAPACITY>,
    lines: Vec<Line, MAX_LINES>,
    /// Rest of the current line is dropped
    skip_line: bool,
    overflowed: bool,
    malformed: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            current: Vec::new(),
            lines: Vec::new(),
            skip_line: false,
            overflowed: false,
            malformed: false,
        }
    }

    pub fn reset(&mut self) {
        self.current.clear();
        self.lines.clear();
        self.skip_line = false;
        self.overflowed = false;
        self.malformed = false;
    }

    /// More lines, or longer lines, arrived than fit.
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Feed one byte. Lines end at `\n`, carriage returns are dropped, so a
    /// response completes on the very last byte the module sends for it.
    ///
    /// `ack` is an informational line that ends the response
    /// successfully, for commands that never send a final result code in
    /// time (e.g. `REBOOTING` after `AT+NRB`).
    pub fn feed(&mut self, byte: u8, ack: Option<&str>) -> Feed {
        match byte {
            b'\n' => return self.end_line(ack),
            b'\r' => return Feed::Pending,
            _ => {}
        }

        if self.skip_line {
            return Feed::Pending;
        }

        if self.current.push(byte).is_err() {
            if !self.current.starts_with(b"AT") {
                warn!("Line exceeds {} bytes", LINE_CAPACITY);
                self.overflowed = true;
            }
            self.skip_line = true;
        }
        Feed::Pending
    }

    fn end_line(&mut self, ack: Option<&str>) -> Feed {
        let skipped = core::mem::replace(&mut self.skip_line, false);
        if skipped {
            self.current.clear();
            return Feed::Pending;
        }

        let raw = core::mem::take(&mut self.current);
        let Ok(text) = core::str::from_utf8(&raw) else {
            warn!("Non UTF-8 line in response");
            self.malformed = true;
            return Feed::Pending;
        };

        match classify(text) {
            LineKind::Blank | LineKind::Echo => Feed::Pending,
            LineKind::Ok => self.complete(Ok(())),
            LineKind::Error(code) => self.complete(Err(Error::Rejected(code))),
            LineKind::Info(line) => {
                let is_ack = ack == Some(line);
                self.store(line);
                if is_ack {
                    self.complete(Ok(()))
                } else {
                    Feed::Pending
                }
            }
        }
    }

    fn store(&mut self, line: &str) {
        if self.overflowed {
            return;
        }
        let stored = Line::try_from(line)
            .ok()
            .and_then(|line| self.lines.push(line).ok());
        if stored.is_none() {
            warn!("Response exceeds {} lines", MAX_LINES);
            self.overflowed = true;
        }
    }

    fn complete(&mut self, result: Result<(), Error>) -> Feed {
        let lines = core::mem::take(&mut self.lines);
        let overflowed = self.overflowed;
        let malformed = self.malformed;
        self.reset();

        Feed::Complete(match result {
            Err(e) => Err(e),
            Ok(()) if overflowed => Err(Error::Overflow),
            Ok(()) if malformed => Err(Error::InvalidResponse),
            Ok(()) => Ok(Response { lines }),
        })
    }
}
