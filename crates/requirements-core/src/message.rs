//! Failure message composition
//!
//! [`Describe`] turns values into the strings that appear in failure messages;
//! [`ExceptionBuilder`] assembles those strings, the optional diff block and the
//! configuration's context into a [`crate::errors::VerificationError`].

pub mod builder;
pub mod describe;

pub use builder::{exception_builder, ExceptionBuilder};
pub use describe::Describe;
