//! Terminal vocabulary shared by the global configuration and the diff engine
//!
//! Detection itself lives behind [`TerminalCapability`]; this module only
//! defines the encodings a terminal may support and a fixed provider.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How a terminal renders text, ordered from least to most capable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalEncoding {
    /// Plain text, no escape sequences
    None,
    /// The 8 base ANSI colors
    #[serde(rename = "xterm-8-colors")]
    Xterm8Colors,
    /// The 8 base colors plus their bright variants
    #[serde(rename = "xterm-16-colors")]
    Xterm16Colors,
    /// The xterm 256-color palette
    #[serde(rename = "xterm-256-colors")]
    Xterm256Colors,
    /// 24-bit true color
    #[serde(rename = "rgb-888-colors")]
    Rgb888Colors,
}

impl TerminalEncoding {
    /// All encodings, least capable first
    pub const ALL: [TerminalEncoding; 5] = [
        TerminalEncoding::None,
        TerminalEncoding::Xterm8Colors,
        TerminalEncoding::Xterm16Colors,
        TerminalEncoding::Xterm256Colors,
        TerminalEncoding::Rgb888Colors,
    ];

    /// Stable kebab-case name, also accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            TerminalEncoding::None => "none",
            TerminalEncoding::Xterm8Colors => "xterm-8-colors",
            TerminalEncoding::Xterm16Colors => "xterm-16-colors",
            TerminalEncoding::Xterm256Colors => "xterm-256-colors",
            TerminalEncoding::Rgb888Colors => "rgb-888-colors",
        }
    }

    /// True if this encoding emits color escape sequences
    pub fn is_colored(&self) -> bool {
        *self != TerminalEncoding::None
    }
}

impl fmt::Display for TerminalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEncodingError {
    input: String,
}

impl ParseEncodingError {
    /// The rejected input
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown terminal encoding: {}", self.input)
    }
}

impl std::error::Error for ParseEncodingError {}

impl FromStr for TerminalEncoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        TerminalEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.name() == normalized)
            .ok_or_else(|| ParseEncodingError {
                input: s.to_string(),
            })
    }
}

/// Collaborator that reports what the attached terminal can render
///
/// Implementations probe once; callers treat the answers as an immutable
/// snapshot.
pub trait TerminalCapability: Send + Sync {
    /// True if the terminal renders color escape sequences
    fn supports_color(&self) -> bool;

    /// Every encoding the terminal can render. Always contains `None`.
    fn supported_encodings(&self) -> BTreeSet<TerminalEncoding>;

    /// The most capable supported encoding
    fn best_encoding(&self) -> TerminalEncoding {
        self.supported_encodings()
            .into_iter()
            .next_back()
            .unwrap_or(TerminalEncoding::None)
    }
}

/// A capability with a fixed answer, for tests and embedders that know better
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTerminalCapability {
    encodings: BTreeSet<TerminalEncoding>,
}

impl FixedTerminalCapability {
    /// Supports every encoding up to and including `best`
    pub fn up_to(best: TerminalEncoding) -> Self {
        Self {
            encodings: TerminalEncoding::ALL
                .into_iter()
                .filter(|encoding| *encoding <= best)
                .collect(),
        }
    }

    /// Plain text only
    pub fn plain() -> Self {
        Self::up_to(TerminalEncoding::None)
    }
}

impl TerminalCapability for FixedTerminalCapability {
    fn supports_color(&self) -> bool {
        self.encodings.iter().any(TerminalEncoding::is_colored)
    }

    fn supported_encodings(&self) -> BTreeSet<TerminalEncoding> {
        self.encodings.clone()
    }
}
