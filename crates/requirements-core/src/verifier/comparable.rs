//! Ordering checks.

use std::ops::RangeInclusive;

use crate::errors::{ConfigError, ExceptionKind, Result};
use crate::log_op_error;
use crate::message::builder::ACTUAL;
use crate::message::Describe;

use super::{quote, Verifier};

#[derive(Debug, Clone, Copy)]
enum Bound {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Bound {
    fn op(self) -> &'static str {
        match self {
            Bound::Less => "is_less_than",
            Bound::LessOrEqual => "is_less_than_or_equal_to",
            Bound::Greater => "is_greater_than",
            Bound::GreaterOrEqual => "is_greater_than_or_equal_to",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Bound::Less => "less than",
            Bound::LessOrEqual => "less than or equal to",
            Bound::Greater => "greater than",
            Bound::GreaterOrEqual => "greater than or equal to",
        }
    }

    fn holds<T: PartialOrd<U>, U>(self, value: &T, bound: &U) -> bool {
        match self {
            Bound::Less => value < bound,
            Bound::LessOrEqual => value <= bound,
            Bound::Greater => value > bound,
            Bound::GreaterOrEqual => value >= bound,
        }
    }
}

impl<T: Describe> Verifier<T> {
    fn compare<U>(self, bound: Bound, limit: U, name: Option<&str>) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.verify(
            |value| bound.holds(value, &limit),
            |v| {
                let target = name.map_or_else(|| limit.describe(), quote);
                let mut failure = v.failure(
                    bound.op(),
                    ExceptionKind::InvalidArgument,
                    format!("{} must be {} {}.", v.quoted_name(), bound.phrase(), target),
                );
                if name.is_some() {
                    failure = failure.add_context("Limit", &limit);
                }
                failure.add_context(ACTUAL, v.value()).build()
            },
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is less than `limit`.
    pub fn is_less_than<U>(self, limit: U) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::Less, limit, None)
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is less than `limit`.
    pub fn is_less_than_named<U>(self, limit: U, name: &str) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::Less, limit, Some(name))
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is greater than `limit`.
    pub fn is_less_than_or_equal_to<U>(self, limit: U) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::LessOrEqual, limit, None)
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is greater than `limit`.
    pub fn is_less_than_or_equal_to_named<U>(self, limit: U, name: &str) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::LessOrEqual, limit, Some(name))
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is greater than `limit`.
    pub fn is_greater_than<U>(self, limit: U) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::Greater, limit, None)
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is greater than `limit`.
    pub fn is_greater_than_named<U>(self, limit: U, name: &str) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::Greater, limit, Some(name))
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is less than `limit`.
    pub fn is_greater_than_or_equal_to<U>(self, limit: U) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::GreaterOrEqual, limit, None)
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is less than `limit`.
    pub fn is_greater_than_or_equal_to_named<U>(self, limit: U, name: &str) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe,
    {
        self.compare(Bound::GreaterOrEqual, limit, Some(name))
    }

    /// Both ends of `range` are inclusive
    ///
    /// ```
    /// use requirements_core::require_that;
    ///
    /// assert!(require_that(5, "x")?.is_in_range(1..=5).is_ok());
    /// assert!(require_that(6, "x")?.is_in_range(1..=5).is_err());
    /// # Ok::<(), requirements_core::VerificationError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the range's start is greater than its end, or if
    /// the value lies outside the range.
    pub fn is_in_range<U>(self, range: RangeInclusive<U>) -> Result<Self>
    where
        T: PartialOrd<U>,
        U: Describe + PartialOrd,
    {
        if !self.is_enabled() {
            return Ok(self);
        }
        let (start, end) = range.into_inner();
        if start > end {
            let err = ConfigError::ReversedBounds {
                parameter: "range".to_string(),
                first: start.describe(),
                last: end.describe(),
            };
            log_op_error!("is_in_range", err);
            return Err(err.into());
        }
        self.verify(
            |value| *value >= start && *value <= end,
            |v| {
                v.failure(
                    "is_in_range",
                    ExceptionKind::InvalidArgument,
                    format!(
                        "{} must be between {} and {}, inclusive.",
                        v.quoted_name(),
                        start.describe(),
                        end.describe()
                    ),
                )
                .add_context(ACTUAL, v.value())
                .build()
            },
        )
    }
}
