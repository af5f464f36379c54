//! Equality, membership and type checks available to every value.

use std::any::{type_name, Any};

use crate::errors::{ExceptionKind, Result};
use crate::message::builder::{ACTUAL, EXPECTED};
use crate::message::Describe;

use super::{quote, Verifier};

impl<T: Describe> Verifier<T> {
    /// # Errors
    ///
    /// `InvalidArgument` unless the value equals `expected`.
    pub fn is_equal_to<U>(self, expected: U) -> Result<Self>
    where
        T: PartialEq<U>,
        U: Describe,
    {
        self.equal_to("is_equal_to", expected, None)
    }

    /// Like [`Verifier::is_equal_to`], naming `expected` in the message
    /// instead of printing it
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the value equals `expected`.
    pub fn is_equal_to_named<U>(self, expected: U, name: &str) -> Result<Self>
    where
        T: PartialEq<U>,
        U: Describe,
    {
        self.equal_to("is_equal_to", expected, Some(name))
    }

    fn equal_to<U>(self, op: &'static str, expected: U, name: Option<&str>) -> Result<Self>
    where
        T: PartialEq<U>,
        U: Describe,
    {
        self.verify(
            |value| *value == expected,
            |v| {
                let target = name.map_or_else(|| expected.describe(), quote);
                v.failure(
                    op,
                    ExceptionKind::InvalidArgument,
                    format!("{} must be equal to {}.", v.quoted_name(), target),
                )
                .add_context(ACTUAL, v.value())
                .add_context(EXPECTED, &expected)
                .type_names(type_name::<T>(), type_name::<U>())
                .build()
            },
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value equals `unwanted`.
    pub fn is_not_equal_to<U>(self, unwanted: U) -> Result<Self>
    where
        T: PartialEq<U>,
        U: Describe,
    {
        self.not_equal_to(unwanted, None)
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value equals `unwanted`.
    pub fn is_not_equal_to_named<U>(self, unwanted: U, name: &str) -> Result<Self>
    where
        T: PartialEq<U>,
        U: Describe,
    {
        self.not_equal_to(unwanted, Some(name))
    }

    fn not_equal_to<U>(self, unwanted: U, name: Option<&str>) -> Result<Self>
    where
        T: PartialEq<U>,
        U: Describe,
    {
        self.verify(
            |value| *value != unwanted,
            |v| {
                let target = name.map_or_else(|| unwanted.describe(), quote);
                v.failure(
                    "is_not_equal_to",
                    ExceptionKind::InvalidArgument,
                    format!("{} may not be equal to {}.", v.quoted_name(), target),
                )
                .add_context(ACTUAL, v.value())
                .build()
            },
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value equals one of `allowed`.
    pub fn is_in<I>(self, allowed: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Describe,
        T: PartialEq<I::Item>,
    {
        let allowed: Vec<I::Item> = allowed.into_iter().collect();
        self.verify(
            |value| allowed.iter().any(|candidate| value == candidate),
            |v| {
                v.failure(
                    "is_in",
                    ExceptionKind::InvalidArgument,
                    format!("{} must be one of {}.", v.quoted_name(), allowed.describe()),
                )
                .add_context(ACTUAL, v.value())
                .build()
            },
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value equals one of `unwanted`.
    pub fn is_not_in<I>(self, unwanted: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Describe,
        T: PartialEq<I::Item>,
    {
        let unwanted: Vec<I::Item> = unwanted.into_iter().collect();
        self.verify(
            |value| !unwanted.iter().any(|candidate| value == candidate),
            |v| {
                v.failure(
                    "is_not_in",
                    ExceptionKind::InvalidArgument,
                    format!("{} may not be one of {}.", v.quoted_name(), unwanted.describe()),
                )
                .add_context(ACTUAL, v.value())
                .build()
            },
        )
    }
}

/// True if `value` is a `U`, looking through one layer of boxed `dyn Any`
fn holds<U: Any>(value: &dyn Any) -> bool {
    if value.is::<U>() {
        return true;
    }
    if let Some(inner) = value.downcast_ref::<Box<dyn Any>>() {
        return (**inner).is::<U>();
    }
    if let Some(inner) = value.downcast_ref::<Box<dyn Any + Send>>() {
        return (**inner).is::<U>();
    }
    if let Some(inner) = value.downcast_ref::<Box<dyn Any + Send + Sync>>() {
        return (**inner).is::<U>();
    }
    false
}

impl<T: Any> Verifier<T> {
    /// # Errors
    ///
    /// `InvalidArgument` unless the value is a `U`.
    pub fn is_instance_of<U: Any>(self) -> Result<Self> {
        self.verify(
            |value| holds::<U>(value),
            |v| {
                v.failure(
                    "is_instance_of",
                    ExceptionKind::InvalidArgument,
                    format!("{} must be an instance of {}.", v.quoted_name(), type_name::<U>()),
                )
                .add_context("Actual.type", type_name::<T>())
                .build()
            },
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is a `U`.
    pub fn is_not_instance_of<U: Any>(self) -> Result<Self> {
        self.verify(
            |value| !holds::<U>(value),
            |v| {
                v.failure(
                    "is_not_instance_of",
                    ExceptionKind::InvalidArgument,
                    format!("{} may not be an instance of {}.", v.quoted_name(), type_name::<U>()),
                )
                .add_context("Actual.type", type_name::<T>())
                .build()
            },
        )
    }
}
