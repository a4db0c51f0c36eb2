//! Plausible record count band
//!
//! The band turns silent drift (a layout change in a new edition of the
//! source document, a truncated input, the wrong file) into a run-level
//! failure.

use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanityBand {
    pub min: usize,
    pub max: usize,
}

impl SanityBand {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Band that accepts any count, for fixtures
    pub const fn unbounded() -> Self {
        Self {
            min: 0,
            max: usize::MAX,
        }
    }

    /// Inclusive on both ends
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }

    /// Fail with [`Error::SanityGate`] when `count` is outside the band
    pub fn check(&self, count: usize, source_label: &str) -> Result<()> {
        if self.contains(count) {
            Ok(())
        } else {
            Err(Error::sanity_gate(
                count,
                self.min,
                self.max,
                source_label,
            ))
        }
    }
}

impl fmt::Display for SanityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
