//! Column-count tolerance hook
//!
//! A tolerance gets one chance to reshape a row's columns before the
//! minimum-width check, e.g. to split columns an OCR engine merged. The
//! default [`Exact`] tolerance changes nothing, which keeps the text and OCR
//! paths identical.

use super::columns::ColumnSet;
use std::fmt::Debug;

pub trait ColumnTolerance: Debug {
    fn reconcile(&self, columns: ColumnSet) -> ColumnSet;
}

/// Columns are used exactly as split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl ColumnTolerance for Exact {
    fn reconcile(&self, columns: ColumnSet) -> ColumnSet {
        columns
    }
}
