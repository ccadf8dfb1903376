//! Errors describing malformed data found while reading a block.

use std::{error::Error as StdError, fmt::Display};

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A named byte range within the data being read.
#[derive(Debug, Clone)]
struct ScopeItem {
    start: usize,
    end: usize,
    description: String,
}

impl Display for ScopeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{:#x}..{:#x}]", self.description, self.start, self.end)
    }
}

/// The chain of nested scopes a reader was opened in.
///
/// Each sub-reader extends its parent's chain, so an error raised deep in a
/// chunk can report every enclosing block.
#[derive(Debug, Clone)]
pub(crate) struct BlockContext {
    data_size: usize,
    scopes: Vec<ScopeItem>,
}

impl BlockContext {
    pub(crate) fn new_root(data_size: usize) -> Self {
        Self {
            data_size,
            scopes: Vec::new(),
        }
    }

    /// Create a child context covering the absolute range `start..end`.
    pub(crate) fn nested(&self, start: usize, end: usize, description: &str) -> Self {
        let mut scopes = self.scopes.clone();
        scopes.push(ScopeItem {
            start,
            end,
            description: description.to_owned(),
        });
        Self {
            data_size: self.data_size,
            scopes,
        }
    }

    pub(crate) fn create_error<E>(&self, offset: usize, source: E) -> InvalidDataError
    where
        E: Into<BoxError>,
    {
        InvalidDataError {
            offset,
            data_size: self.data_size,
            scopes: self.scopes.clone(),
            source: source.into(),
        }
    }
}

/// Data did not match the structure the reader expected.
#[derive(Debug)]
pub struct InvalidDataError {
    offset: usize,
    data_size: usize,
    scopes: Vec<ScopeItem>,
    source: BoxError,
}

impl InvalidDataError {
    /// The absolute byte offset at which the problem was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The description of the innermost scope, if any.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scopes.last().map(|item| item.description.as_str())
    }
}

impl Display for InvalidDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid data at offset {:#x} of {:#x}: {}",
            self.offset, self.data_size, self.source
        )?;
        for scope in self.scopes.iter().rev() {
            write!(f, "\n  in {scope}")?;
        }
        Ok(())
    }
}

impl StdError for InvalidDataError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}
