//! Core types shared across the requirements facilities
//!
//! This crate provides foundational types used by both the logging facility
//! and the diff/terminal layer:
//!
//! - **Schema constants**: Canonical field keys and event names
//! - **Terminal vocabulary**: TerminalEncoding, TerminalCapability

pub mod schema;
pub mod terminal;

pub use terminal::{FixedTerminalCapability, ParseEncodingError, TerminalCapability, TerminalEncoding};
