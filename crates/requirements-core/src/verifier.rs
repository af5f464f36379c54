//! Verifiers
//!
//! One generic [`Verifier<T>`] wraps the value under test, its name and the
//! chain's [`Configuration`]. Which predicates are available depends on `T`:
//!
//! - any `T: PartialEq + Describe`: equality and membership ([`object`])
//! - any `T: PartialOrd + Describe`: ordering and ranges ([`comparable`])
//! - primitive numbers: sign checks and divisibility ([`number`])
//! - `Option<T>`: null checks ([`option`])
//! - `String` and `&str`: text checks ([`string`])
//! - sequences and sets: containment ([`collection`])
//! - maps: key checks ([`map`])
//!
//! Every predicate consumes the verifier and returns it on success, so checks
//! chain with `?`. The first failing predicate ends the chain.

pub mod collection;
pub mod comparable;
pub mod map;
pub mod number;
pub mod object;
pub mod option;
pub mod size;
pub mod string;

use crate::config::{Configuration, ContextEntry};
use crate::errors::{ExceptionKind, Result, VerificationError};
use crate::message::{exception_builder, ExceptionBuilder};

pub use collection::Container;
pub use number::{Float, Number};
pub use size::SizeVerifier;

/// Checks one value
#[derive(Debug, Clone)]
pub struct Verifier<T> {
    value: T,
    name: String,
    config: Configuration,
    enabled: bool,
}

impl<T> Verifier<T> {
    pub(crate) fn new(value: T, name: String, config: Configuration, enabled: bool) -> Self {
        Self {
            value,
            name,
            config,
            enabled,
        }
    }

    /// The value under test
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume the verifier and return the value under test
    pub fn into_value(self) -> T {
        self.value
    }

    /// The name of the value, as it appears in failure messages
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// False for the pass-through verifier returned by `assert_that()` when
    /// assertions are disabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run independent checks against this verifier and continue the chain
    ///
    /// The outcome of `checks` is returned unless it failed, in which case
    /// its error is. Whatever verifier `checks` ends with is discarded.
    ///
    /// ```
    /// use requirements_core::require_that;
    ///
    /// let port = require_that(8080, "port")?
    ///     .isolate(|v| v.is_greater_than(1024))?
    ///     .is_less_than(65536)?
    ///     .into_value();
    /// assert_eq!(port, 8080);
    /// # Ok::<(), requirements_core::VerificationError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// The first failure raised by `checks`.
    pub fn isolate<R, F>(self, checks: F) -> Result<Self>
    where
        T: Clone,
        F: FnOnce(Self) -> Result<R>,
    {
        checks(self.clone())?;
        Ok(self)
    }

    fn map_config(self, f: impl FnOnce(Configuration) -> Configuration) -> Self {
        Self {
            config: f(self.config),
            ..self
        }
    }

    fn try_map_config(
        self,
        f: impl FnOnce(Configuration) -> Result<Configuration>,
    ) -> Result<Self> {
        Ok(Self {
            config: f(self.config)?,
            ..self
        })
    }

    /// Raise `kind` instead of each failure's default kind
    ///
    /// # Errors
    ///
    /// `Configuration` if `kind` is a custom kind with no registered factory.
    pub fn with_exception(self, kind: ExceptionKind) -> Result<Self> {
        self.try_map_config(|config| config.with_exception(kind))
    }

    pub fn with_default_exception(self) -> Self {
        self.map_config(Configuration::with_default_exception)
    }

    /// Append context to this verifier's failure messages
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty.
    pub fn add_context<V>(self, key: impl Into<String>, value: V) -> Result<Self>
    where
        V: crate::message::Describe + PartialEq + Send + Sync + 'static,
    {
        self.try_map_config(|config| config.add_context(key, value))
    }

    /// Append context computed only if a failure message is built
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty.
    pub fn add_lazy_context<F>(self, key: impl Into<String>, supplier: F) -> Result<Self>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.try_map_config(|config| config.add_lazy_context(key, supplier))
    }

    pub fn with_context(self, entries: impl IntoIterator<Item = ContextEntry>) -> Self {
        self.map_config(|config| config.with_context(entries))
    }

    pub fn with_diff(self) -> Self {
        self.map_config(Configuration::with_diff)
    }

    pub fn without_diff(self) -> Self {
        self.map_config(Configuration::without_diff)
    }

    /// The name in double quotes, as failure messages open with it
    pub(crate) fn quoted_name(&self) -> String {
        quote(&self.name)
    }

    /// Start a failure message for this value
    pub(crate) fn failure(
        &self,
        op: &'static str,
        kind: ExceptionKind,
        message: String,
    ) -> ExceptionBuilder<'_> {
        exception_builder(&self.config, kind, message)
            .op(op)
            .name(self.name.as_str())
    }

    /// Pass the verifier on if `passed` holds; otherwise raise `failure`
    ///
    /// Neither closure runs when the verifier is disabled.
    pub(crate) fn verify<P, F>(self, passed: P, failure: F) -> Result<Self>
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&Self) -> VerificationError,
    {
        if !self.enabled || passed(&self.value) {
            return Ok(self);
        }
        Err(failure(&self))
    }
}

pub(crate) fn quote(name: &str) -> String {
    format!("\"{}\"", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier<T>(value: T) -> Verifier<T> {
        Verifier::new(value, "value".to_string(), Configuration::new(), true)
    }

    #[test]
    fn test_disabled_verifier_skips_predicates() {
        let disabled = Verifier::new(1, "value".to_string(), Configuration::new(), false);
        let result = disabled.verify(
            |_| panic!("predicate must not run"),
            |_| panic!("failure must not be built"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_isolate_returns_original_verifier() {
        let v = verifier(5).isolate(|v| v.verify(|x| *x == 5, |_| unreachable!()));
        assert_eq!(v.unwrap().into_value(), 5);
    }

    #[test]
    fn test_isolate_propagates_failure() {
        let err = verifier(5)
            .isolate(|v| {
                v.verify(
                    |x| *x > 10,
                    |v| v.failure("test", ExceptionKind::InvalidArgument, "nope".to_string()).build(),
                )
            })
            .unwrap_err();
        assert_eq!(err.message(), "nope");
    }

    #[test]
    fn test_configuration_updates_are_scoped_to_the_verifier() {
        let v = verifier(1).add_context("k", "v").unwrap().without_diff();
        assert_eq!(v.configuration().context().len(), 1);
        assert!(!v.configuration().diff_enabled());
    }
}
