//! Terminal capability detection

use std::collections::BTreeSet;

use requirements_core_types::{TerminalCapability, TerminalEncoding};

/// Probes stdout and the environment once
///
/// Colour needs a stdout that `console` reports as colour-capable and no
/// `NO_COLOR`. The depth comes from `COLORTERM` (`truecolor`, `24bit`) and
/// `TERM` (`*-256color`, `*-16color`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvTerminalCapability {
    encodings: BTreeSet<TerminalEncoding>,
}

impl EnvTerminalCapability {
    pub fn detect() -> Self {
        let colors_supported = console::Term::stdout().features().colors_supported();
        let term = std::env::var("TERM").ok();
        let colorterm = std::env::var("COLORTERM").ok();
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::from_probe(
            colors_supported && !no_color,
            term.as_deref(),
            colorterm.as_deref(),
        )
    }

    fn from_probe(colors_supported: bool, term: Option<&str>, colorterm: Option<&str>) -> Self {
        let best = if !colors_supported {
            TerminalEncoding::None
        } else if matches!(colorterm, Some("truecolor") | Some("24bit")) {
            TerminalEncoding::Rgb888Colors
        } else if term.is_some_and(|t| t.contains("256color")) {
            TerminalEncoding::Xterm256Colors
        } else if term.is_some_and(|t| t.contains("16color")) {
            TerminalEncoding::Xterm16Colors
        } else {
            TerminalEncoding::Xterm8Colors
        };
        Self {
            encodings: TerminalEncoding::ALL
                .into_iter()
                .filter(|encoding| *encoding <= best)
                .collect(),
        }
    }
}

impl TerminalCapability for EnvTerminalCapability {
    fn supports_color(&self) -> bool {
        self.encodings.iter().any(TerminalEncoding::is_colored)
    }

    fn supported_encodings(&self) -> BTreeSet<TerminalEncoding> {
        self.encodings.clone()
    }
}
