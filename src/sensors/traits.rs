// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Reader trait shared by every metric family

use crate::core::MetricFamily;
use crate::error::Result;

/// Reads the current OS state for one metric family.
///
/// A failed read is local to its family: callers substitute
/// `Output::default()` and carry on with the other families.
pub trait MetricReader: Send + Sync {
    type Output: Default;

    /// Family this reader fills in
    fn family(&self) -> MetricFamily;

    /// Sample the family now
    fn read(&self) -> Result<Self::Output>;
}
