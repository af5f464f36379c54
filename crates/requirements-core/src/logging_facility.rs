//! Structured logging facility
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The library itself never installs a subscriber. Applications call `init`
//! once at startup; the events below are then visible to them:
//!
//! - `failure` (debug): every raised verification failure
//! - `config_change` (info): every global configuration mutation
//! - `diff_fallback` (debug): the diff engine rendered plain blocks
//! - `end_error` (warn): a rejected `with_exception()`
//!
//! # Usage
//!
//! ```rust
//! use requirements_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
