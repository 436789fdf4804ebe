//! Feed windows and pages

use super::item::RawEvent;
use std::fmt;

/// A contiguous row range `[offset, offset + size)` requested in one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub size: usize,
}

impl Window {
    pub fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// Exclusive end of the window
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

impl fmt::Display for Window {
    /// One-based inclusive row range, as shown to users
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.offset + 1, self.end())
    }
}

/// Rows returned for one window plus the feed's total row count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub rows: Vec<RawEvent>,
    pub total: usize,
}

impl Page {
    pub fn new(rows: Vec<RawEvent>, total: usize) -> Self {
        Self { rows, total }
    }
}
