//! Paste configuration and dispatch

use crate::delimiter::Delimiters;
use crate::error::Result;
use crate::escape;
use crate::rune::RuneWriter;
use crate::stream::Stream;
use crate::{parallel, sequential};
use std::io::{Read, Write};

/// Default delimiter list, before escape resolution
pub const DEFAULT_DELIMITERS: &str = "\\t";

/// How lines of the input streams are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Corresponding lines of all streams form one output line
    #[default]
    Parallel,
    /// All lines of each stream form one output line (`-s`)
    Sequential,
}

/// User-facing paste options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteConfig {
    pub mode: MergeMode,
    /// Delimiter list as typed, with backslash escapes unresolved
    pub delimiters: String,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            mode: MergeMode::Parallel,
            delimiters: DEFAULT_DELIMITERS.to_string(),
        }
    }
}

impl PasteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select sequential mode when `serial` is set
    pub fn serial(mut self, serial: bool) -> Self {
        self.mode = if serial {
            MergeMode::Sequential
        } else {
            MergeMode::Parallel
        };
        self
    }

    pub fn with_delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = delimiters.into();
        self
    }
}

/// A validated paste job: merge mode plus a built delimiter table
#[derive(Debug, Clone)]
pub struct Paster {
    mode: MergeMode,
    delimiters: Delimiters,
}

impl Paster {
    pub fn new(mode: MergeMode, delimiters: Delimiters) -> Self {
        Self { mode, delimiters }
    }

    /// Resolve escapes and build the delimiter table.
    ///
    /// Fails before any input is touched if the delimiter list is malformed.
    pub fn from_config(config: &PasteConfig) -> Result<Self> {
        let resolved = escape::resolve(&config.delimiters)?;
        let delimiters = Delimiters::build(&resolved)?;
        log::debug!(
            "mode {:?}, {} delimiter(s): {}",
            config.mode,
            delimiters.len(),
            delimiters
        );
        Ok(Self::new(config.mode, delimiters))
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Merge `streams` onto `out` and flush it
    pub fn run<R: Read, W: Write>(&self, streams: &mut [Stream<R>], out: W) -> Result<()> {
        let mut writer = RuneWriter::stdout(out);
        match self.mode {
            MergeMode::Parallel => parallel::merge(streams, &self.delimiters, &mut writer)?,
            MergeMode::Sequential => sequential::merge(streams, &self.delimiters, &mut writer)?,
        }
        writer.flush()
    }
}
