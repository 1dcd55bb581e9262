//! Target file parsing.
//!
//! The input is a plain text file with one host URL per line. Lines are
//! trimmed, blank lines are skipped, and everything else is taken verbatim
//! as a probe target. No URL validation happens here: an unparseable line
//! still deserves its own result line, so it stays in the list and fails
//! inside the probe instead.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// One host URL to probe, as read from the target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: String,
}

impl Target {
    #[must_use]
    pub fn new(line: impl AsRef<str>) -> Self {
        Self {
            url: line.as_ref().trim().to_string(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The parsed contents of a target file.
#[derive(Debug, Default)]
pub struct TargetList {
    targets: Vec<Target>,
    blank_lines: usize,
}

impl TargetList {
    /// Parses newline-delimited target text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();
        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                debug!(line = index + 1, "skipping blank target line");
                list.blank_lines += 1;
            } else {
                list.targets.push(Target::new(trimmed));
            }
        }
        list
    }

    /// Reads and parses a target file from disk.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub fn load(path: &Path) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of blank lines skipped during parsing.
    #[must_use]
    pub fn blank_lines(&self) -> usize {
        self.blank_lines
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub fn into_targets(self) -> Vec<Target> {
        self.targets
    }
}
