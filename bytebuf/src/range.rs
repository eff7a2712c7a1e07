use core::ops::RangeInclusive;

use crate::error::{ByteBufferError, Result};

/// Closed interval `[lower, upper]` of element indices.
///
/// A `Range` always addresses at least two elements: construction rejects
/// `upper <= lower`. It holds no reference to any buffer and can be reused
/// against as many buffers as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    lower: usize,
    upper: usize,
    span: usize,
}

impl Range {
    /// Creates a range covering `lower..=upper`.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::InvalidRange` if `upper <= lower`.
    pub fn new(lower: usize, upper: usize) -> Result<Self> {
        if upper <= lower {
            return Err(ByteBufferError::InvalidRange { lower, upper });
        }
        Ok(Self {
            lower,
            upper,
            span: upper - lower,
        })
    }

    #[must_use]
    pub fn lower_bound(&self) -> usize {
        self.lower
    }

    #[must_use]
    pub fn upper_bound(&self) -> usize {
        self.upper
    }

    /// Number of elements beyond `lower`, i.e. `upper - lower`.
    #[must_use]
    pub fn span(&self) -> usize {
        self.span
    }

    /// Number of addressed elements, `span() + 1`.
    #[must_use]
    #[allow(clippy::len_without_is_empty)] // a range is never empty
    pub fn len(&self) -> usize {
        self.span + 1
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.lower <= index && index <= self.upper
    }

    #[must_use]
    pub fn as_std(&self) -> RangeInclusive<usize> {
        self.lower..=self.upper
    }
}

impl TryFrom<RangeInclusive<usize>> for Range {
    type Error = ByteBufferError;

    fn try_from(range: RangeInclusive<usize>) -> Result<Self> {
        Range::new(*range.start(), *range.end())
    }
}

impl From<Range> for RangeInclusive<usize> {
    fn from(range: Range) -> Self {
        range.as_std()
    }
}
