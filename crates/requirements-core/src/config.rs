//! Per-chain configuration
//!
//! A [`Configuration`] is an immutable value threaded through a verifier chain.
//! Every `with_*` operation consumes the configuration and returns the updated
//! one; when the requested value is already in place the receiver is returned
//! unchanged.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::errors::{ConfigError, ExceptionKind, Result};
use crate::exceptions;
use crate::log_op_error;
use crate::message::Describe;

type LazyValue = Arc<dyn Fn() -> String + Send + Sync>;

/// A context value compared by its own `PartialEq`
trait ContextObject: Describe + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn eq_object(&self, other: &dyn ContextObject) -> bool;
}

impl<V> ContextObject for V
where
    V: Describe + PartialEq + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn ContextObject) -> bool {
        other
            .as_any()
            .downcast_ref::<V>()
            .map_or(false, |other| self == other)
    }
}

#[derive(Clone)]
enum ContextValue {
    Eager(Arc<dyn ContextObject>),
    Lazy(LazyValue),
}

impl ContextValue {
    fn render(&self) -> String {
        match self {
            ContextValue::Eager(value) => value.describe(),
            ContextValue::Lazy(supplier) => supplier(),
        }
    }

    fn lazy_address(supplier: &LazyValue) -> *const () {
        Arc::as_ptr(supplier) as *const ()
    }
}

impl PartialEq for ContextValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ContextValue::Eager(a), ContextValue::Eager(b)) => a.eq_object(b.as_ref()),
            (ContextValue::Lazy(a), ContextValue::Lazy(b)) => {
                std::ptr::eq(Self::lazy_address(a), Self::lazy_address(b))
            }
            _ => false,
        }
    }
}

impl Eq for ContextValue {}

// Values of one type may hash alike; equal values always share a type.
impl Hash for ContextValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ContextValue::Eager(value) => {
                0u8.hash(state);
                Any::type_id(value.as_ref().as_any()).hash(state);
            }
            ContextValue::Lazy(supplier) => {
                1u8.hash(state);
                (Self::lazy_address(supplier) as usize).hash(state);
            }
        }
    }
}

/// One label/value pair appended to failure messages
///
/// Lazy entries hold a supplier that runs only when a failure message is
/// actually built.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ContextEntry {
    key: String,
    value: ContextValue,
}

impl ContextEntry {
    /// An entry holding a value
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty or whitespace-only.
    pub fn new<V>(key: impl Into<String>, value: V) -> Result<Self>
    where
        V: Describe + PartialEq + Send + Sync + 'static,
    {
        Ok(Self {
            key: Self::checked_key(key.into())?,
            value: ContextValue::Eager(Arc::new(value)),
        })
    }

    /// An entry whose value is computed on demand
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty or whitespace-only.
    pub fn lazy<F>(key: impl Into<String>, supplier: F) -> Result<Self>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Ok(Self {
            key: Self::checked_key(key.into())?,
            value: ContextValue::Lazy(Arc::new(supplier)),
        })
    }

    fn checked_key(key: String) -> Result<String> {
        if key.trim().is_empty() {
            let err = ConfigError::EmptyContextKey;
            log_op_error!("add_context", err);
            return Err(err.into());
        }
        Ok(key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value's string form. Runs the supplier of a lazy entry.
    pub fn render(&self) -> String {
        self.value.render()
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.value, ContextValue::Lazy(_))
    }
}

impl fmt::Debug for ContextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entry = f.debug_struct("ContextEntry");
        entry.field("key", &self.key);
        match &self.value {
            ContextValue::Eager(value) => entry.field("value", &value.describe()),
            ContextValue::Lazy(_) => entry.field("value", &"<lazy>"),
        };
        entry.finish()
    }
}

/// Immutable settings threaded through a verifier chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    exception: Option<ExceptionKind>,
    context: Arc<Vec<ContextEntry>>,
    assertions_enabled: bool,
    diff_enabled: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            exception: None,
            context: Arc::new(Vec::new()),
            assertions_enabled: cfg!(debug_assertions),
            diff_enabled: true,
        }
    }
}

impl Configuration {
    /// No exception override, no context, assertions enabled in debug builds,
    /// diffs enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The exception kind that overrides each failure's default, if any
    pub fn exception(&self) -> Option<ExceptionKind> {
        self.exception
    }

    /// Context appended to every failure message, in insertion order
    pub fn context(&self) -> &[ContextEntry] {
        &self.context
    }

    pub fn assertions_enabled(&self) -> bool {
        self.assertions_enabled
    }

    pub fn diff_enabled(&self) -> bool {
        self.diff_enabled
    }

    /// Raise `kind` on failure instead of each failure's default kind
    ///
    /// # Errors
    ///
    /// `Configuration` if `kind` is a custom kind with no registered factory.
    /// The check happens here rather than when a failure is raised.
    pub fn with_exception(self, kind: ExceptionKind) -> Result<Self> {
        if self.exception == Some(kind) {
            return Ok(self);
        }
        exceptions::check_constructible(kind)?;
        Ok(Self {
            exception: Some(kind),
            ..self
        })
    }

    /// Raise each failure's default kind
    pub fn with_default_exception(self) -> Self {
        if self.exception.is_none() {
            return self;
        }
        Self {
            exception: None,
            ..self
        }
    }

    /// Append a context entry
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty or whitespace-only.
    pub fn add_context<V>(self, key: impl Into<String>, value: V) -> Result<Self>
    where
        V: Describe + PartialEq + Send + Sync + 'static,
    {
        let entry = ContextEntry::new(key, value)?;
        Ok(self.push_context(entry))
    }

    /// Append a context entry whose value is computed only if a failure
    /// message is built
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` is empty or whitespace-only.
    pub fn add_lazy_context<F>(self, key: impl Into<String>, supplier: F) -> Result<Self>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        let entry = ContextEntry::lazy(key, supplier)?;
        Ok(self.push_context(entry))
    }

    fn push_context(self, entry: ContextEntry) -> Self {
        let mut context = Vec::clone(&self.context);
        context.push(entry);
        Self {
            context: Arc::new(context),
            ..self
        }
    }

    /// Replace the entire context
    pub fn with_context(self, entries: impl IntoIterator<Item = ContextEntry>) -> Self {
        let entries: Vec<ContextEntry> = entries.into_iter().collect();
        if *self.context == entries {
            return self;
        }
        Self {
            context: Arc::new(entries),
            ..self
        }
    }

    pub fn with_assertions_enabled(self) -> Self {
        self.with_assertions(true)
    }

    pub fn with_assertions_disabled(self) -> Self {
        self.with_assertions(false)
    }

    fn with_assertions(self, enabled: bool) -> Self {
        if self.assertions_enabled == enabled {
            return self;
        }
        Self {
            assertions_enabled: enabled,
            ..self
        }
    }

    /// Include a diff of actual and expected values in failure messages
    pub fn with_diff(self) -> Self {
        self.with_diff_enabled(true)
    }

    /// Render actual and expected values as plain lines
    pub fn without_diff(self) -> Self {
        self.with_diff_enabled(false)
    }

    fn with_diff_enabled(self, enabled: bool) -> Self {
        if self.diff_enabled == enabled {
            return self;
        }
        Self {
            diff_enabled: enabled,
            ..self
        }
    }

    /// True if both configurations share one context allocation
    pub fn shares_context_with(&self, other: &Configuration) -> bool {
        Arc::ptr_eq(&self.context, &other.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::new();
        assert_eq!(config.exception(), None);
        assert!(config.context().is_empty());
        assert!(config.diff_enabled());
        assert_eq!(config.assertions_enabled(), cfg!(debug_assertions));
    }

    #[test]
    fn test_unchanged_settings_keep_context_allocation() {
        let config = Configuration::new().add_context("a", 1).unwrap();
        let same = config.clone().with_diff().with_default_exception();
        assert_eq!(same, config);
        assert!(same.shares_context_with(&config));
    }

    #[test]
    fn test_add_context_preserves_order() {
        let config = Configuration::new()
            .add_context("a", 1)
            .unwrap()
            .add_context("b", "two")
            .unwrap();
        let keys: Vec<&str> = config.context().iter().map(ContextEntry::key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(config.context()[1].render(), "two");
    }

    #[test]
    fn test_empty_context_key_rejected() {
        let err = Configuration::new().add_context(" ", 1).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
    }

    #[test]
    fn test_lazy_context_is_not_evaluated_eagerly() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = Configuration::new()
            .add_lazy_context("expensive", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                "value".to_string()
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(config.context()[0].is_lazy());
        assert_eq!(config.context()[0].render(), "value");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_context_replaces_entries() {
        let config = Configuration::new().add_context("old", 1).unwrap();
        let replaced =
            config.with_context(vec![ContextEntry::new("new", 2).unwrap()]);
        assert_eq!(replaced.context().len(), 1);
        assert_eq!(replaced.context()[0].key(), "new");
    }

    #[test]
    fn test_equality_compares_context_values() {
        let a = Configuration::new().add_context("k", 1).unwrap();
        assert_eq!(a, Configuration::new().add_context("k", 1).unwrap());
        assert_ne!(a, Configuration::new().add_context("k", 2).unwrap());
    }

    #[test]
    fn test_values_with_same_rendering_differ_across_types() {
        let number = Configuration::new().add_context("k", 1).unwrap();
        let text = Configuration::new().add_context("k", "1").unwrap();
        assert_eq!(number.context()[0].render(), text.context()[0].render());
        assert_ne!(number, text);
        assert_ne!(number.clone().with_context(text.context().to_vec()), number);
    }

    #[test]
    fn test_equal_configurations_hash_alike() {
        use std::collections::hash_map::DefaultHasher;
        let hash = |config: &Configuration| {
            let mut hasher = DefaultHasher::new();
            config.hash(&mut hasher);
            hasher.finish()
        };
        let a = Configuration::new().add_context("k", 1.5).unwrap();
        let b = Configuration::new().add_context("k", 1.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_builtin_exception_override() {
        let config = Configuration::new()
            .with_exception(ExceptionKind::IllegalState)
            .unwrap();
        assert_eq!(config.exception(), Some(ExceptionKind::IllegalState));
        assert_eq!(config.with_default_exception().exception(), None);
    }
}
