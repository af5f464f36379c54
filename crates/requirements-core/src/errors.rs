use std::any::type_name;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;
use thiserror::Error;

use crate::global::global_configuration;

/// Result type alias using VerificationError
pub type Result<T> = std::result::Result<T, VerificationError>;

/// Prefix shared by every symbol defined in this crate, used to filter backtraces
const API_FRAME_PREFIX: &str = "requirements_core::";

// ========== Error Facility ==========

/// Canonical exception kind taxonomy
///
/// Every failure raised by a verifier is classified by one of these kinds.
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing. `Custom` kinds are caller-registered (see
/// [`crate::exceptions`]) and carry the name they were registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// A value failed a stated contract
    InvalidArgument,
    /// A value that was required to be present was absent
    NullReference,
    /// An object was asked to do something its state does not allow
    IllegalState,
    /// The library itself was misconfigured
    Configuration,
    /// A caller-registered kind
    Custom(&'static str),
}

impl ExceptionKind {
    /// The custom kind named after `E`
    ///
    /// Only usable with `with_exception()` once a factory for `E` has been
    /// registered.
    pub fn custom<E: 'static>() -> Self {
        ExceptionKind::Custom(type_name::<E>())
    }

    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExceptionKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExceptionKind::NullReference => "ERR_NULL_REFERENCE",
            ExceptionKind::IllegalState => "ERR_ILLEGAL_STATE",
            ExceptionKind::Configuration => "ERR_CONFIGURATION",
            ExceptionKind::Custom(_) => "ERR_CUSTOM",
        }
    }

    /// Human-readable name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            ExceptionKind::InvalidArgument => "InvalidArgument",
            ExceptionKind::NullReference => "NullReference",
            ExceptionKind::IllegalState => "IllegalState",
            ExceptionKind::Configuration => "Configuration",
            ExceptionKind::Custom(name) => name,
        }
    }

    /// True for the kinds that need no registered factory
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ExceptionKind::Custom(_))
    }
}

impl std::fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical structured error type
///
/// Carries the resolved kind, the fully composed failure message and, for
/// custom kinds, the error produced by the registered factory.
#[derive(Debug, Clone)]
pub struct VerificationError {
    kind: ExceptionKind,
    message: String,
    custom: Option<Arc<dyn std::error::Error + Send + Sync>>,
    backtrace: Arc<Backtrace>,
    api_in_backtrace: bool,
}

impl VerificationError {
    /// Create a new error with the specified kind and composed message
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            custom: None,
            backtrace: Arc::new(Backtrace::capture()),
            api_in_backtrace: global_configuration().is_api_in_stacktrace(),
        }
    }

    /// Attach the error built by a custom kind's factory
    pub(crate) fn with_custom(mut self, custom: Box<dyn std::error::Error + Send + Sync>) -> Self {
        self.custom = Some(Arc::from(custom));
        self
    }

    /// Get the exception kind
    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the composed failure message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the error built by a custom kind's factory, if any
    pub fn custom_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.custom.as_deref()
    }

    /// Downcast the custom error to its concrete type
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.custom.as_deref().and_then(|e| e.downcast_ref::<E>())
    }

    /// Render the backtrace captured when the error was raised
    ///
    /// Returns `None` unless backtraces are enabled (`RUST_BACKTRACE`). Frames
    /// inside this library are omitted unless the global configuration keeps
    /// them.
    pub fn backtrace_text(&self) -> Option<String> {
        if self.backtrace.status() != BacktraceStatus::Captured {
            return None;
        }
        let rendered = self.backtrace.to_string();
        if self.api_in_backtrace {
            return Some(rendered);
        }
        Some(filter_api_frames(&rendered))
    }
}

/// Drop backtrace frames (and their `at file:line` continuation lines) that
/// belong to this library.
fn filter_api_frames(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len());
    let mut skipping = false;
    for line in rendered.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("at ") {
            if !skipping {
                out.push_str(line);
                out.push('\n');
            }
            continue;
        }
        let symbol = trimmed
            .split_once(": ")
            .map(|(_, symbol)| symbol)
            .unwrap_or(trimmed);
        skipping = symbol.starts_with(API_FRAME_PREFIX) || symbol.starts_with("<requirements_core::");
        if !skipping {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

impl std::fmt::Display for VerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for VerificationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.custom {
            Some(custom) => Some(custom.as_ref()),
            None => None,
        }
    }
}

// ========== End Error Facility ==========

/// Misuse of the library's own API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `with_exception()` named a custom kind without a registered factory
    #[error("{name} cannot be constructed from a message. Register a factory for it before passing it to with_exception().")]
    UnregisteredException { name: String },

    /// A name parameter was empty or whitespace-only
    #[error("{parameter} may not be empty")]
    EmptyName { parameter: String },

    /// A name parameter contained leading or trailing whitespace
    #[error("{parameter} may not contain leading or trailing whitespace.\nActual: \"{value}\"")]
    UntrimmedName { parameter: String, value: String },

    /// A context key was empty
    #[error("The context key may not be empty")]
    EmptyContextKey,

    /// A range with its bounds reversed
    #[error("{parameter} must be less than or equal to its upper bound.\nActual: {first}\nUpper bound: {last}")]
    ReversedBounds {
        parameter: String,
        first: String,
        last: String,
    },
}

/// Conversion from ConfigError to VerificationError
impl From<ConfigError> for VerificationError {
    fn from(err: ConfigError) -> Self {
        let kind = match &err {
            ConfigError::UnregisteredException { .. } => ExceptionKind::Configuration,
            ConfigError::EmptyName { .. }
            | ConfigError::UntrimmedName { .. }
            | ConfigError::EmptyContextKey
            | ConfigError::ReversedBounds { .. } => ExceptionKind::InvalidArgument,
        };
        VerificationError::new(kind, err.to_string())
    }
}

/// Validate a name passed to the API: non-empty and trimmed
pub(crate) fn check_name(name: &str, parameter: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::EmptyName {
            parameter: parameter.to_string(),
        }
        .into());
    }
    if name.trim() != name {
        return Err(ConfigError::UntrimmedName {
            parameter: parameter.to_string(),
            value: name.to_string(),
        }
        .into());
    }
    Ok(())
}
