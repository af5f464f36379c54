//! Checks on the size of a string, collection or map.

use std::ops::{Bound, RangeBounds};

use crate::errors::{ConfigError, ExceptionKind, Result};
use crate::log_op_error;
use crate::message::builder::ACTUAL;
use crate::message::{exception_builder, Describe};

use super::{quote, Verifier};

/// Verifies the size of its parent's value
///
/// Failures report the size as `Actual` and the parent's value under the
/// parent's name. [`SizeVerifier::parent`] returns to the parent's chain.
#[derive(Debug, Clone)]
pub struct SizeVerifier<P> {
    parent: Verifier<P>,
    size: usize,
    name: String,
}

impl<P> SizeVerifier<P> {
    pub(crate) fn new(parent: Verifier<P>, size: usize, accessor: &str) -> Self {
        let name = format!("{}.{}", parent.name(), accessor);
        Self { parent, size, name }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The name of the size, such as `list.size()`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Continue with the verifier the size was taken from
    pub fn parent(self) -> Verifier<P> {
        self.parent
    }
}

impl<P: Describe> SizeVerifier<P> {
    fn check(
        self,
        op: &'static str,
        passed: impl FnOnce(usize) -> bool,
        requirement: impl FnOnce() -> String,
    ) -> Result<Self> {
        if !self.parent.is_enabled() || passed(self.size) {
            return Ok(self);
        }
        let err = exception_builder(
            self.parent.configuration(),
            ExceptionKind::InvalidArgument,
            format!("{} {}.", quote(&self.name), requirement()),
        )
        .op(op)
        .name(self.name.as_str())
        .add_context(ACTUAL, &self.size)
        .add_context(self.parent.name(), self.parent.value())
        .build();
        Err(err)
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the size equals `expected`.
    pub fn is_equal_to(self, expected: usize) -> Result<Self> {
        self.check(
            "is_equal_to",
            |size| size == expected,
            || format!("must contain {} elements", expected),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the size equals `unwanted`.
    pub fn is_not_equal_to(self, unwanted: usize) -> Result<Self> {
        self.check(
            "is_not_equal_to",
            |size| size != unwanted,
            || format!("may not contain {} elements", unwanted),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the size is less than `limit`.
    pub fn is_less_than(self, limit: usize) -> Result<Self> {
        self.check(
            "is_less_than",
            |size| size < limit,
            || format!("must contain less than {} elements", limit),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the size is greater than `limit`.
    pub fn is_less_than_or_equal_to(self, limit: usize) -> Result<Self> {
        self.check(
            "is_less_than_or_equal_to",
            |size| size <= limit,
            || format!("may not contain more than {} elements", limit),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the size is greater than `limit`.
    pub fn is_greater_than(self, limit: usize) -> Result<Self> {
        self.check(
            "is_greater_than",
            |size| size > limit,
            || format!("must contain more than {} elements", limit),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the size is less than `limit`.
    pub fn is_greater_than_or_equal_to(self, limit: usize) -> Result<Self> {
        self.check(
            "is_greater_than_or_equal_to",
            |size| size >= limit,
            || format!("must contain at least {} elements", limit),
        )
    }

    /// Accepts any range form: `2..5`, `2..=5`, `2..`, `..5`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the range is reversed, or if the size lies
    /// outside it.
    pub fn is_between(self, range: impl RangeBounds<usize>) -> Result<Self> {
        if !self.parent.is_enabled() {
            return Ok(self);
        }
        let start = range.start_bound().cloned();
        let end = range.end_bound().cloned();
        if let (Bound::Included(first) | Bound::Excluded(first), Bound::Included(last) | Bound::Excluded(last)) =
            (start, end)
        {
            if first > last {
                let err = ConfigError::ReversedBounds {
                    parameter: "range".to_string(),
                    first: first.to_string(),
                    last: last.to_string(),
                };
                log_op_error!("is_between", err);
                return Err(err.into());
            }
        }
        self.check(
            "is_between",
            |size| (start, end).contains(&size),
            || format!("must be in the range {}", interval(start, end)),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the size is zero.
    pub fn is_zero(self) -> Result<Self> {
        self.check("is_zero", |size| size == 0, || "must be empty".to_string())
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the size is zero.
    pub fn is_not_zero(self) -> Result<Self> {
        self.check("is_not_zero", |size| size != 0, || "may not be empty".to_string())
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the size is zero.
    pub fn is_positive(self) -> Result<Self> {
        self.check("is_positive", |size| size > 0, || "must be positive".to_string())
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the size is zero.
    pub fn is_not_positive(self) -> Result<Self> {
        self.check("is_not_positive", |size| size == 0, || "may not be positive".to_string())
    }

    /// Always passes
    ///
    /// # Errors
    ///
    /// Never.
    pub fn is_not_negative(self) -> Result<Self> {
        Ok(self)
    }

    /// Always fails unless assertions are disabled
    ///
    /// # Errors
    ///
    /// `InvalidArgument`, since no size is negative.
    #[deprecated(note = "a size is never negative, so this check always fails")]
    pub fn is_negative(self) -> Result<Self> {
        self.check("is_negative", |_| false, || "must be negative".to_string())
    }
}

fn interval(start: Bound<usize>, end: Bound<usize>) -> String {
    let open = match start {
        Bound::Included(first) => format!("[{}", first),
        Bound::Excluded(first) => format!("({}", first),
        Bound::Unbounded => "[0".to_string(),
    };
    let close = match end {
        Bound::Included(last) => format!("{}]", last),
        Bound::Excluded(last) => format!("{})", last),
        Bound::Unbounded => "\u{221e})".to_string(),
    };
    format!("{}, {}", open, close)
}
