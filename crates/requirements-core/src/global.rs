//! Process-wide configuration
//!
//! One [`GlobalConfiguration`] exists per process. It is created on first use,
//! seeded from the environment, and guarded by a lock so that verifier chains
//! on any thread can read it while another thread updates it.
//!
//! | Variable | Effect |
//! |---|---|
//! | `REQUIREMENTS_DIFF` | `0`, `false` or `off` disables diffs |
//! | `REQUIREMENTS_API_IN_STACKTRACE` | `1`, `true` or `on` keeps library frames in backtraces |
//! | `REQUIREMENTS_TERMINAL_ENCODING` | forces a terminal encoding, e.g. `xterm-256-colors` |

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use requirements_core_types::schema::EVENT_CONFIG_CHANGE;
use requirements_core_types::{TerminalCapability, TerminalEncoding};

use crate::terminal::EnvTerminalCapability;

pub const ENV_DIFF: &str = "REQUIREMENTS_DIFF";
pub const ENV_API_IN_STACKTRACE: &str = "REQUIREMENTS_API_IN_STACKTRACE";
pub const ENV_TERMINAL_ENCODING: &str = "REQUIREMENTS_TERMINAL_ENCODING";

/// A value copy of the global settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub diff_enabled: bool,
    pub api_in_stacktrace: bool,
    /// The encoding in effect (override or detected)
    pub terminal_encoding: TerminalEncoding,
    /// The explicit override, if any
    pub terminal_encoding_override: Option<TerminalEncoding>,
}

/// Initial values read from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Seed {
    diff_enabled: bool,
    api_in_stacktrace: bool,
    encoding_override: Option<TerminalEncoding>,
}

impl Seed {
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| lookup(name).map(|v| v.trim().to_ascii_lowercase());
        let diff_enabled = !matches!(flag(ENV_DIFF).as_deref(), Some("0" | "false" | "off"));
        let api_in_stacktrace = matches!(
            flag(ENV_API_IN_STACKTRACE).as_deref(),
            Some("1" | "true" | "on")
        );
        let encoding_override = lookup(ENV_TERMINAL_ENCODING).and_then(|raw| {
            raw.parse::<TerminalEncoding>()
                .map_err(|err| {
                    tracing::warn!(
                        component = module_path!(),
                        op = "seed_global_configuration",
                        setting = ENV_TERMINAL_ENCODING,
                        error = %err,
                        "ignoring unknown terminal encoding"
                    );
                })
                .ok()
        });
        Self {
            diff_enabled,
            api_in_stacktrace,
            encoding_override,
        }
    }
}

struct State {
    diff_enabled: bool,
    api_in_stacktrace: bool,
    encoding_override: Option<TerminalEncoding>,
    capability: Arc<dyn TerminalCapability>,
}

impl State {
    fn terminal_encoding(&self) -> TerminalEncoding {
        self.encoding_override
            .unwrap_or_else(|| self.capability.best_encoding())
    }
}

/// Settings shared by every verifier in the process
pub struct GlobalConfiguration {
    seed: Seed,
    state: RwLock<State>,
}

static GLOBAL: OnceLock<GlobalConfiguration> = OnceLock::new();

/// The process-wide configuration
pub fn global_configuration() -> &'static GlobalConfiguration {
    GLOBAL.get_or_init(|| {
        GlobalConfiguration::new(
            Seed::from_vars(|name| std::env::var(name).ok()),
            Arc::new(EnvTerminalCapability::detect()),
        )
    })
}

fn log_change(op: &str, setting: &str, value: impl std::fmt::Display) {
    tracing::info!(
        component = module_path!(),
        op = op,
        event = EVENT_CONFIG_CHANGE,
        setting = setting,
        value = %value,
    );
}

impl GlobalConfiguration {
    fn new(seed: Seed, capability: Arc<dyn TerminalCapability>) -> Self {
        Self {
            seed,
            state: RwLock::new(State {
                diff_enabled: seed.diff_enabled,
                api_in_stacktrace: seed.api_in_stacktrace,
                encoding_override: seed.encoding_override,
                capability,
            }),
        }
    }

    /// True if failure messages may include a diff
    pub fn is_diff_enabled(&self) -> bool {
        self.state.read().diff_enabled
    }

    pub fn with_diff(&self) -> &Self {
        self.set_diff(true, "with_diff")
    }

    pub fn without_diff(&self) -> &Self {
        self.set_diff(false, "without_diff")
    }

    fn set_diff(&self, enabled: bool, op: &str) -> &Self {
        self.state.write().diff_enabled = enabled;
        log_change(op, "diff_enabled", enabled);
        self
    }

    /// True if backtraces keep the frames of this library
    pub fn is_api_in_stacktrace(&self) -> bool {
        self.state.read().api_in_stacktrace
    }

    pub fn with_api_in_stacktrace(&self) -> &Self {
        self.set_api_in_stacktrace(true, "with_api_in_stacktrace")
    }

    pub fn without_api_in_stacktrace(&self) -> &Self {
        self.set_api_in_stacktrace(false, "without_api_in_stacktrace")
    }

    fn set_api_in_stacktrace(&self, enabled: bool, op: &str) -> &Self {
        self.state.write().api_in_stacktrace = enabled;
        log_change(op, "api_in_stacktrace", enabled);
        self
    }

    /// The encoding diffs are rendered with: the override if one is set,
    /// otherwise the best encoding the terminal supports
    pub fn terminal_encoding(&self) -> TerminalEncoding {
        self.state.read().terminal_encoding()
    }

    /// Force an encoding regardless of what the terminal reports
    pub fn with_terminal_encoding(&self, encoding: TerminalEncoding) -> &Self {
        self.state.write().encoding_override = Some(encoding);
        log_change("with_terminal_encoding", "terminal_encoding", encoding);
        self
    }

    /// Drop the override and use the detected encoding
    pub fn with_default_terminal_encoding(&self) -> &Self {
        let detected = {
            let mut state = self.state.write();
            state.encoding_override = None;
            state.terminal_encoding()
        };
        log_change("with_default_terminal_encoding", "terminal_encoding", detected);
        self
    }

    /// Every encoding the terminal supports
    pub fn available_terminal_encodings(&self) -> BTreeSet<TerminalEncoding> {
        self.state.read().capability.supported_encodings()
    }

    /// Replace the terminal capability provider
    pub fn with_terminal_capability(&self, capability: Arc<dyn TerminalCapability>) -> &Self {
        let detected = {
            let mut state = self.state.write();
            state.capability = capability;
            state.capability.best_encoding()
        };
        log_change("with_terminal_capability", "terminal_capability", detected);
        self
    }

    /// A serialisable copy of the current settings
    pub fn snapshot(&self) -> GlobalSettings {
        let state = self.state.read();
        GlobalSettings {
            diff_enabled: state.diff_enabled,
            api_in_stacktrace: state.api_in_stacktrace,
            terminal_encoding: state.terminal_encoding(),
            terminal_encoding_override: state.encoding_override,
        }
    }

    /// Restore the values read from the environment at startup
    ///
    /// The terminal capability provider is kept.
    pub fn reset(&self) -> &Self {
        {
            let mut state = self.state.write();
            state.diff_enabled = self.seed.diff_enabled;
            state.api_in_stacktrace = self.seed.api_in_stacktrace;
            state.encoding_override = self.seed.encoding_override;
        }
        log_change("reset", "all", "environment defaults");
        self
    }
}

impl std::fmt::Debug for GlobalConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalConfiguration")
            .field("settings", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use requirements_core_types::FixedTerminalCapability;
    use std::collections::HashMap;

    fn seed(vars: &[(&str, &str)]) -> Seed {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Seed::from_vars(|name| vars.get(name).cloned())
    }

    fn local(seed: Seed, best: TerminalEncoding) -> GlobalConfiguration {
        GlobalConfiguration::new(seed, Arc::new(FixedTerminalCapability::up_to(best)))
    }

    #[test]
    fn test_seed_defaults() {
        let seed = seed(&[]);
        assert!(seed.diff_enabled);
        assert!(!seed.api_in_stacktrace);
        assert_eq!(seed.encoding_override, None);
    }

    #[test]
    fn test_seed_from_environment() {
        let seed = seed(&[
            (ENV_DIFF, "off"),
            (ENV_API_IN_STACKTRACE, "TRUE"),
            (ENV_TERMINAL_ENCODING, "xterm_16_colors"),
        ]);
        assert!(!seed.diff_enabled);
        assert!(seed.api_in_stacktrace);
        assert_eq!(seed.encoding_override, Some(TerminalEncoding::Xterm16Colors));
    }

    #[test]
    fn test_seed_ignores_unknown_encoding() {
        let seed = seed(&[(ENV_TERMINAL_ENCODING, "vt52")]);
        assert_eq!(seed.encoding_override, None);
    }

    #[test]
    fn test_encoding_override_and_default() {
        let config = local(seed(&[]), TerminalEncoding::Xterm256Colors);
        assert_eq!(config.terminal_encoding(), TerminalEncoding::Xterm256Colors);

        config.with_terminal_encoding(TerminalEncoding::None);
        assert_eq!(config.terminal_encoding(), TerminalEncoding::None);
        assert_eq!(config.available_terminal_encodings().len(), 4);

        config.with_default_terminal_encoding();
        assert_eq!(config.terminal_encoding(), TerminalEncoding::Xterm256Colors);
    }

    #[test]
    fn test_toggles_and_reset() {
        let config = local(seed(&[]), TerminalEncoding::None);
        config.without_diff().with_api_in_stacktrace();
        assert!(!config.is_diff_enabled());
        assert!(config.is_api_in_stacktrace());

        config.reset();
        assert!(config.is_diff_enabled());
        assert!(!config.is_api_in_stacktrace());
    }

    #[test]
    fn test_snapshot_serializes() {
        let config = local(seed(&[]), TerminalEncoding::Xterm8Colors);
        let json = serde_json::to_value(config.snapshot()).unwrap();
        assert_eq!(json["diff_enabled"], true);
        assert_eq!(json["terminal_encoding"], "xterm-8-colors");
        assert!(json["terminal_encoding_override"].is_null());
    }
}
