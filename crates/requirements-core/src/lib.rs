//! Requirements Core - fluent precondition and assertion checks
//!
//! Wrap a value with [`require_that`] or [`assert_that`] and chain predicates.
//! Each predicate returns the verifier on success or a [`VerificationError`]
//! carrying a composed failure message:
//!
//! ```
//! use requirements_core::require_that;
//!
//! let err = require_that(5, "age")?.is_greater_than(10).unwrap_err();
//! assert_eq!(err.message(), "\"age\" must be greater than 10.\nActual: 5");
//! # Ok::<(), requirements_core::VerificationError>(())
//! ```
//!
//! This crate provides:
//! - Per-chain [`Configuration`] (exception override, context, diff and
//!   assertion switches) and the process-wide [`GlobalConfiguration`]
//! - The message composer, which splices a diff of `Actual` against
//!   `Expected` into failure messages
//! - A terminal-aware diff engine (plain markers or ANSI colours)
//! - Generic verifier primitives over a single [`Verifier<T>`]
//! - A registry of caller-defined error kinds

pub mod config;
pub mod diff;
pub mod errors;
pub mod exceptions;
pub mod global;
pub mod logging_facility;
pub mod message;
pub mod terminal;
pub mod verifier;

pub use requirements_core_types as core_types;

// Re-export commonly used types
pub use config::{Configuration, ContextEntry};
pub use errors::{ConfigError, ExceptionKind, Result, VerificationError};
pub use exceptions::{is_constructible, register_exception};
pub use global::{global_configuration, GlobalConfiguration, GlobalSettings};
pub use message::Describe;
pub use requirements_core_types::{TerminalCapability, TerminalEncoding};
pub use terminal::EnvTerminalCapability;
pub use verifier::{Container, SizeVerifier, Verifier};

use errors::check_name;

/// Entry point carrying a [`Configuration`] for the verifiers it creates
///
/// ```
/// use requirements_core::{ExceptionKind, Requirements};
///
/// let requirements = Requirements::new()
///     .with_exception(ExceptionKind::IllegalState)?
///     .add_context("request", 42)?;
/// let err = requirements.require_that(-1, "balance")?.is_not_negative().unwrap_err();
/// assert_eq!(err.kind(), ExceptionKind::IllegalState);
/// assert!(err.message().ends_with("request: 42"));
/// # Ok::<(), requirements_core::VerificationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Requirements {
    config: Configuration,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configuration(config: Configuration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Verify `value`, failing on the first unmet predicate
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `name` is blank or has surrounding whitespace.
    pub fn require_that<T>(&self, value: T, name: &str) -> Result<Verifier<T>> {
        check_name(name, "name")?;
        Ok(Verifier::new(value, name.to_string(), self.config.clone(), true))
    }

    /// Like [`Requirements::require_that`], but every predicate passes
    /// without evaluating when assertions are disabled
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `name` is blank or has surrounding whitespace.
    pub fn assert_that<T>(&self, value: T, name: &str) -> Result<Verifier<T>> {
        check_name(name, "name")?;
        Ok(Verifier::new(
            value,
            name.to_string(),
            self.config.clone(),
            self.config.assertions_enabled(),
        ))
    }

    /// # Errors
    ///
    /// `Configuration` if `kind` is a custom kind with no registered factory.
    pub fn with_exception(self, kind: ExceptionKind) -> Result<Self> {
        Ok(Self::from_configuration(self.config.with_exception(kind)?))
    }

    pub fn with_default_exception(self) -> Self {
        Self::from_configuration(self.config.with_default_exception())
    }

    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty.
    pub fn add_context<V>(self, key: impl Into<String>, value: V) -> Result<Self>
    where
        V: Describe + PartialEq + Send + Sync + 'static,
    {
        Ok(Self::from_configuration(self.config.add_context(key, value)?))
    }

    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty.
    pub fn add_lazy_context<F>(self, key: impl Into<String>, supplier: F) -> Result<Self>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Ok(Self::from_configuration(
            self.config.add_lazy_context(key, supplier)?,
        ))
    }

    pub fn with_context(self, entries: impl IntoIterator<Item = ContextEntry>) -> Self {
        Self::from_configuration(self.config.with_context(entries))
    }

    pub fn with_assertions_enabled(self) -> Self {
        Self::from_configuration(self.config.with_assertions_enabled())
    }

    pub fn with_assertions_disabled(self) -> Self {
        Self::from_configuration(self.config.with_assertions_disabled())
    }

    pub fn with_diff(self) -> Self {
        Self::from_configuration(self.config.with_diff())
    }

    pub fn without_diff(self) -> Self {
        Self::from_configuration(self.config.without_diff())
    }
}

/// Verify `value` with the default configuration
///
/// # Errors
///
/// `InvalidArgument` if `name` is blank or has surrounding whitespace.
pub fn require_that<T>(value: T, name: &str) -> Result<Verifier<T>> {
    Requirements::new().require_that(value, name)
}

/// Verify `value` only when assertions are enabled (debug builds by default)
///
/// # Errors
///
/// `InvalidArgument` if `name` is blank or has surrounding whitespace.
pub fn assert_that<T>(value: T, name: &str) -> Result<Verifier<T>> {
    Requirements::new().assert_that(value, name)
}
