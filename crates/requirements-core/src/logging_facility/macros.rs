//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use requirements_core::log_op_start;
/// log_op_start!("with_exception");
/// log_op_start!("with_exception", name = "age");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use requirements_core::log_op_end;
/// log_op_end!("render_diff", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into a `VerificationError` by reference,
/// including `ConfigError`.
///
/// # Example
///
/// ```
/// # use requirements_core::log_op_error;
/// # use requirements_core::errors::ConfigError;
/// let err = ConfigError::EmptyContextKey;
/// log_op_error!("add_context", err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr) => {{
        let v_err: $crate::errors::VerificationError = ::std::clone::Clone::clone(&$err).into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            err.kind = %v_err.kind(),
            err.code = v_err.code(),
        );
    }};
    ($op:expr, $err:expr, $($field:tt)*) => {{
        let v_err: $crate::errors::VerificationError = ::std::clone::Clone::clone(&$err).into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            err.kind = %v_err.kind(),
            err.code = v_err.code(),
            $($field)*
        );
    }};
}

/// Log a raised verification failure
///
/// Emitted once per failure by the exception builder.
#[macro_export]
macro_rules! log_failure {
    ($op:expr, $name:expr, $err:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_FAILURE,
            name = $name,
            err.kind = %$err.kind(),
            err.code = $err.code(),
        );
    };
}
