//! Registry of caller-defined exception kinds
//!
//! A custom kind can be selected with `with_exception()` only after a factory
//! that builds it from a message has been registered. Registration is
//! process-wide.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, OnceLock};

use crate::errors::{ConfigError, ExceptionKind, Result};
use crate::log_op_error;

type Factory = Arc<dyn Fn(String) -> Box<dyn Error + Send + Sync> + Send + Sync>;

static REGISTRY: OnceLock<RwLock<HashMap<&'static str, Factory>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<&'static str, Factory>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Register `E` as a custom exception kind
///
/// `E` must be constructible from the failure message alone. Registering the
/// same type again is a no-op.
///
/// ```
/// use requirements_core::exceptions::register_exception;
///
/// #[derive(Debug)]
/// struct ContractViolation(String);
/// impl std::fmt::Display for ContractViolation {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str(&self.0)
///     }
/// }
/// impl std::error::Error for ContractViolation {}
/// impl From<String> for ContractViolation {
///     fn from(message: String) -> Self {
///         Self(message)
///     }
/// }
///
/// let kind = register_exception::<ContractViolation>();
/// assert!(!kind.is_builtin());
/// ```
pub fn register_exception<E>() -> ExceptionKind
where
    E: From<String> + Error + Send + Sync + 'static,
{
    let kind = ExceptionKind::custom::<E>();
    if let ExceptionKind::Custom(name) = kind {
        registry()
            .write()
            .entry(name)
            .or_insert_with(|| {
                Arc::new(|message: String| -> Box<dyn Error + Send + Sync> {
                    Box::new(E::from(message))
                })
            });
    }
    kind
}

/// True if `kind` is built in or has a registered factory
pub fn is_constructible(kind: ExceptionKind) -> bool {
    match kind {
        ExceptionKind::Custom(name) => registry().read().contains_key(name),
        _ => true,
    }
}

pub(crate) fn check_constructible(kind: ExceptionKind) -> Result<()> {
    if is_constructible(kind) {
        return Ok(());
    }
    let err = ConfigError::UnregisteredException {
        name: kind.name().to_string(),
    };
    log_op_error!("with_exception", err);
    Err(err.into())
}

/// Build the custom error for `kind`, if it is a registered custom kind
pub(crate) fn construct(kind: ExceptionKind, message: &str) -> Option<Box<dyn Error + Send + Sync>> {
    let ExceptionKind::Custom(name) = kind else {
        return None;
    };
    let factory = registry().read().get(name).cloned()?;
    Some(factory(message.to_string()))
}
