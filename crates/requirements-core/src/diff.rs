//! Diff of the string forms of two values
//!
//! Compares actual and expected text character by character, coarsens the
//! result to whole words where a word changed in several places, and renders
//! three aligned lines per row: actual, markers, expected.
//!
//! ## Entry point
//!
//! ```
//! use requirements_core::diff::compute_diff;
//! use requirements_core_types::TerminalEncoding;
//!
//! let result = compute_diff("abc", "abd", TerminalEncoding::None);
//! let row = &result.rows()[0];
//! assert_eq!(row.actual, "abc ");
//! assert_eq!(row.diff, "  -+");
//! assert_eq!(row.expected, "ab d");
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce byte-identical rows.
//! - **Alignment**: in every row the actual and expected lines have the same
//!   display width, and in text mode the marker line has that width too.
//! - **No failure**: inputs too large to diff degrade to plain blocks.

pub mod engine;
pub mod model;
pub mod writer;

pub use engine::{compute_diff, compute_diff_within};
pub use model::{DiffResult, DiffRow, Edit};
