#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::error::Error;
use std::fmt;

use requirements_core::errors::ConfigError;
use requirements_core::{
    global_configuration, is_constructible, register_exception, require_that, ExceptionKind,
    Requirements, VerificationError,
};

#[derive(Debug)]
struct QuotaExceeded {
    message: String,
}

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quota: {}", self.message)
    }
}

impl Error for QuotaExceeded {}

impl From<String> for QuotaExceeded {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExceptionKind::InvalidArgument, "ERR_INVALID_ARGUMENT"),
        (ExceptionKind::NullReference, "ERR_NULL_REFERENCE"),
        (ExceptionKind::IllegalState, "ERR_ILLEGAL_STATE"),
        (ExceptionKind::Configuration, "ERR_CONFIGURATION"),
        (ExceptionKind::custom::<QuotaExceeded>(), "ERR_CUSTOM"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_failure_verifiable_by_kind() {
    let err = require_that(-3, "delta").unwrap().is_positive().unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
    assert_eq!(err.code(), "ERR_INVALID_ARGUMENT");
    assert_eq!(err.to_string(), err.message());
    assert!(err.source().is_none());
    assert!(err.custom_error().is_none());
}

#[test]
fn test_override_applies_to_every_failure_in_chain() {
    let requirements = Requirements::new()
        .with_exception(ExceptionKind::IllegalState)
        .unwrap();
    let err = requirements
        .require_that(None::<i32>, "slot")
        .unwrap()
        .is_not_null()
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::IllegalState);

    let err = requirements
        .require_that(vec![1], "queue")
        .unwrap()
        .is_empty()
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::IllegalState);
}

#[test]
fn test_config_error_conversions() {
    let cases = vec![
        (
            ConfigError::UnregisteredException {
                name: "Foo".to_string(),
            },
            ExceptionKind::Configuration,
        ),
        (
            ConfigError::EmptyName {
                parameter: "name".to_string(),
            },
            ExceptionKind::InvalidArgument,
        ),
        (
            ConfigError::UntrimmedName {
                parameter: "name".to_string(),
                value: " x".to_string(),
            },
            ExceptionKind::InvalidArgument,
        ),
        (ConfigError::EmptyContextKey, ExceptionKind::InvalidArgument),
        (
            ConfigError::ReversedBounds {
                parameter: "range".to_string(),
                first: "5".to_string(),
                last: "1".to_string(),
            },
            ExceptionKind::InvalidArgument,
        ),
    ];

    for (config_err, kind) in cases {
        let text = config_err.to_string();
        let err: VerificationError = config_err.into();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.message(), text);
    }
}

#[test]
fn test_reversed_range_is_a_misuse() {
    let err = require_that(3, "x").unwrap().is_in_range(5..=1).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
    assert!(err.message().starts_with("range must be less than or equal to its upper bound."));
}

#[test]
fn test_registered_factory_builds_source_error() {
    let kind = register_exception::<QuotaExceeded>();
    assert!(is_constructible(kind));
    assert_eq!(kind, ExceptionKind::custom::<QuotaExceeded>());

    let err = Requirements::new()
        .with_exception(kind)
        .unwrap()
        .require_that(101, "requests")
        .unwrap()
        .is_less_than_or_equal_to(100)
        .unwrap_err();
    assert_eq!(err.code(), "ERR_CUSTOM");
    assert_eq!(
        err.source().unwrap().to_string(),
        format!("quota: {}", err.message())
    );
    assert_eq!(err.downcast_ref::<QuotaExceeded>().unwrap().message, err.message());
    assert!(err.downcast_ref::<fmt::Error>().is_none());
}

#[test]
fn test_errors_are_cloneable_and_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VerificationError>();

    let err = require_that("", "title").unwrap().is_not_empty().unwrap_err();
    let copy = err.clone();
    assert_eq!(copy.message(), err.message());
    assert_eq!(copy.kind(), err.kind());
}

#[test]
fn test_backtrace_hides_library_frames_by_default() {
    let _globals = common::plain_globals();
    global_configuration().without_api_in_stacktrace();
    let err = require_that(1, "x").unwrap().is_zero().unwrap_err();

    // Only captured when RUST_BACKTRACE is set
    if let Some(text) = err.backtrace_text() {
        let leaked = text.lines().any(|line| {
            let symbol = line.trim_start().split_once(": ").map_or("", |(_, s)| s);
            symbol.starts_with("requirements_core::")
        });
        assert!(!leaked, "library frames leaked:\n{}", text);
    }
}
