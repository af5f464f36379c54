#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use proptest::prelude::*;
use requirements_core::message::builder::SAME_RENDERING_NOTE;
use requirements_core::{
    assert_that, describe_via_display, register_exception, require_that, ExceptionKind,
    Requirements, VerificationError,
};

#[derive(Debug)]
struct ContractViolation(String);

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ContractViolation {}

impl From<String> for ContractViolation {
    fn from(message: String) -> Self {
        Self(message)
    }
}

#[derive(Debug)]
struct NeverRegistered;

/// Equal only to its zero-padded text
#[derive(Debug)]
struct TicketCode(u32);

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for TicketCode {
    fn eq(&self, other: &&str) -> bool {
        format!("{:04}", self.0) == *other
    }
}

describe_via_display!(TicketCode);

// ===== Failure messages =====

#[test]
fn test_greater_than_failure_names_value_and_bound() {
    let err = require_that(5, "age").unwrap().is_greater_than(10).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
    assert!(err.message().contains("\"age\""));
    assert!(err.message().contains("10"));
    assert!(err.message().contains("5"));
}

#[test]
fn test_missing_value_is_a_null_reference() {
    let name: Option<String> = None;
    let err = require_that(name, "name").unwrap().is_not_null().unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::NullReference);
    assert!(err.message().contains("\"name\""));
}

#[test]
fn test_contains_all_lists_missing_elements() {
    let err = require_that(vec![1, 2, 3], "list")
        .unwrap()
        .contains_all(vec![2, 3, 4])
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
    assert!(err.message().lines().any(|line| line == "Missing: [4]"));
}

#[test]
fn test_equality_without_diff_shows_plain_lines() {
    let _globals = common::plain_globals();
    let err = Requirements::new()
        .without_diff()
        .require_that("abc", "s")
        .unwrap()
        .is_equal_to("abd")
        .unwrap_err();
    assert_eq!(
        common::lines(err.message()),
        vec!["\"s\" must be equal to abd.", "Actual: abc", "Expected: abd"]
    );
}

#[test]
fn test_equality_with_diff_shows_aligned_block() {
    let _globals = common::plain_globals();
    let err = require_that("abc", "s").unwrap().is_equal_to("abd").unwrap_err();
    assert_eq!(
        common::lines(err.message()),
        vec![
            "\"s\" must be equal to abd.",
            "Actual  : abc ",
            "Diff    :   -+",
            "Expected: ab d",
        ]
    );
}

#[test]
fn test_unequal_values_with_one_rendering_show_types() {
    let _globals = common::plain_globals();
    let err = require_that(TicketCode(7), "ticket")
        .unwrap()
        .is_equal_to("7")
        .unwrap_err();
    let lines = common::lines(err.message());
    assert_eq!(&lines[1..3], ["Actual: 7", "Expected: 7"]);
    assert!(lines[3].starts_with("Actual.type: ") && lines[3].ends_with("TicketCode"));
    assert_eq!(lines[4], "Expected.type: &str");
}

#[test]
fn test_nan_inequality_is_explained() {
    let _globals = common::plain_globals();
    let err = require_that(f64::NAN, "ratio")
        .unwrap()
        .is_equal_to(f64::NAN)
        .unwrap_err();
    assert_eq!(common::lines(err.message()).last().copied(), Some(SAME_RENDERING_NOTE));
}

#[test]
fn test_unregistered_exception_fails_at_configuration_time() {
    let err = Requirements::new()
        .with_exception(ExceptionKind::custom::<NeverRegistered>())
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::Configuration);
    assert!(err.message().contains("NeverRegistered"));
}

// ===== Exception selection =====

#[test]
fn test_registered_exception_is_raised_and_downcastable() {
    let kind = register_exception::<ContractViolation>();
    let err = Requirements::new()
        .with_exception(kind)
        .unwrap()
        .require_that(3, "count")
        .unwrap()
        .is_zero()
        .unwrap_err();
    assert_eq!(err.kind(), kind);
    let custom = err.downcast_ref::<ContractViolation>().unwrap();
    assert_eq!(custom.0, err.message());
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_default_exception_restores_failure_defaults() {
    let err = Requirements::new()
        .with_exception(ExceptionKind::IllegalState)
        .unwrap()
        .with_default_exception()
        .require_that(None::<u8>, "port")
        .unwrap()
        .is_not_null()
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::NullReference);
}

// ===== Chaining =====

#[test]
fn test_chain_returns_value() {
    let name = require_that("alice".to_string(), "user")
        .and_then(|v| v.is_not_blank())
        .and_then(|v| v.is_trimmed())
        .and_then(|v| v.length().is_between(3..=16))
        .map(|size| size.parent().into_value())
        .unwrap();
    assert_eq!(name, "alice");
}

#[test]
fn test_first_failure_wins() {
    let err = require_that(vec![1, 1], "ids")
        .and_then(|v| v.does_not_contain_duplicates())
        .and_then(|v| v.contains(5))
        .unwrap_err();
    assert!(err.message().starts_with("\"ids\" may not contain any duplicate elements."));
}

#[test]
fn test_isolate_keeps_chain_value() -> Result<(), VerificationError> {
    let port = require_that(8080_u32, "port")?
        .isolate(|v| v.is_greater_than(1023)?.is_less_than(65536))?
        .is_not_zero()?
        .into_value();
    assert_eq!(port, 8080);
    Ok(())
}

#[test]
fn test_isolate_surfaces_inner_failure() {
    let err = require_that(80_u32, "port")
        .unwrap()
        .isolate(|v| v.is_greater_than(1023))
        .unwrap_err();
    assert!(err.message().starts_with("\"port\" must be greater than 1023."));
}

#[test]
fn test_verifier_context_is_appended_in_order() {
    let err = require_that(0, "retries")
        .unwrap()
        .add_context("job", "import")
        .unwrap()
        .add_lazy_context("attempt", || "3".to_string())
        .unwrap()
        .is_positive()
        .unwrap_err();
    assert_eq!(
        common::lines(err.message()),
        vec!["\"retries\" must be positive.", "Actual: 0", "job: import", "attempt: 3"]
    );
}

#[test]
fn test_lazy_context_is_not_evaluated_on_success() {
    let v = require_that(1, "x")
        .unwrap()
        .add_lazy_context("expensive", || panic!("supplier must not run"))
        .unwrap();
    assert!(v.is_positive().is_ok());
}

// ===== Assertions =====

#[test]
fn test_disabled_assertions_skip_every_predicate() {
    let requirements = Requirements::new().with_assertions_disabled();
    let v = requirements.assert_that(vec![1, 1], "ids").unwrap();
    let v = v.does_not_contain_duplicates().unwrap().is_empty().unwrap();
    assert!(v.size().is_greater_than(10).is_ok());
}

#[test]
fn test_assert_that_checks_when_enabled() {
    let requirements = Requirements::new().with_assertions_enabled();
    assert!(requirements
        .assert_that(1, "x")
        .unwrap()
        .is_negative()
        .is_err());
}

#[test]
fn test_assert_that_follows_build_profile() {
    let v = assert_that(1, "x").unwrap();
    assert_eq!(v.is_enabled(), cfg!(debug_assertions));
}

// ===== Collections =====

#[test]
fn test_duplicates_lists_every_repeated_value() {
    let err = require_that(vec!["a", "b", "a", "c", "b"], "tags")
        .unwrap()
        .does_not_contain_duplicates()
        .unwrap_err();
    assert!(err.message().lines().any(|line| line == "Duplicates: [a, b]"));
}

#[test]
fn test_sets_never_contain_duplicates() {
    let set: BTreeSet<i32> = (0..10).collect();
    assert!(require_that(set, "set").unwrap().does_not_contain_duplicates().is_ok());
}

#[test]
fn test_size_of_map_and_string() {
    let ports: std::collections::HashMap<&str, u16> = [("http", 80)].into_iter().collect();
    let err = require_that(ports, "ports")
        .unwrap()
        .size()
        .is_greater_than(1)
        .unwrap_err();
    assert!(err.message().starts_with("\"ports.size()\" must contain more than 1 elements."));
    assert!(err.message().contains("ports: {http=80}"));

    let err = require_that("", "title").unwrap().length().is_positive().unwrap_err();
    assert!(err.message().starts_with("\"title.length()\" must be positive."));
}

#[test]
fn test_instance_of_through_boxed_any() {
    let value: Box<dyn std::any::Any> = Box::new(42_i64);
    assert!(require_that(value, "value").unwrap().is_instance_of::<i64>().is_ok());
}

// ===== Properties =====

proptest! {
    #[test]
    #[allow(deprecated)]
    fn prop_sizes_are_never_negative(values in prop::collection::vec(any::<i32>(), 0..20), text in ".{0,20}") {
        let sizes = require_that(values.clone(), "values").unwrap().size();
        prop_assert!(sizes.clone().is_not_negative().is_ok());
        prop_assert!(sizes.is_negative().is_err());

        let length = require_that(text, "text").unwrap().length();
        prop_assert!(length.clone().is_not_negative().is_ok());
        prop_assert!(length.is_negative().is_err());

        let array = [values.len(); 3];
        let sizes = require_that(array, "array").unwrap().size();
        prop_assert!(sizes.is_negative().is_err());
    }

    #[test]
    fn prop_contains_exactly_reports_set_differences(
        actual in prop::collection::vec(0u8..8, 0..10),
        expected in prop::collection::vec(0u8..8, 0..10),
    ) {
        let actual_set: HashSet<u8> = actual.iter().copied().collect();
        let expected_set: HashSet<u8> = expected.iter().copied().collect();
        let result = require_that(actual.clone(), "actual")
            .unwrap()
            .contains_exactly(expected.clone());

        if actual_set == expected_set {
            prop_assert!(result.is_ok());
        } else {
            let err = result.unwrap_err();
            let listed = |label: &str| -> HashSet<u8> {
                let line = err
                    .message()
                    .lines()
                    .find_map(|line| line.strip_prefix(label))
                    .unwrap();
                line.trim_matches(|c| c == '[' || c == ']')
                    .split(", ")
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse().unwrap())
                    .collect()
            };
            let missing: HashSet<u8> = expected_set.difference(&actual_set).copied().collect();
            let unwanted: HashSet<u8> = actual_set.difference(&expected_set).copied().collect();
            prop_assert_eq!(listed("Missing: "), missing);
            prop_assert_eq!(listed("Unwanted: "), unwanted);
        }
    }
}
