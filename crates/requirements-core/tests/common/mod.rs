use std::sync::Arc;

use parking_lot::{const_mutex, Mutex, MutexGuard};
use requirements_core::core_types::FixedTerminalCapability;
use requirements_core::{global_configuration, TerminalEncoding};

static GLOBAL_LOCK: Mutex<()> = const_mutex(());

/// Serialises tests that touch the global configuration
///
/// While the guard is held the global configuration renders plain-text diffs
/// with diffs enabled. Dropping the guard restores the defaults.
pub struct GlobalGuard {
    _lock: MutexGuard<'static, ()>,
}

impl Drop for GlobalGuard {
    fn drop(&mut self) {
        global_configuration().reset();
    }
}

/// Take the global lock and reset the global configuration to plain text
#[allow(dead_code)]
pub fn plain_globals() -> GlobalGuard {
    let lock = GLOBAL_LOCK.lock();
    global_configuration()
        .reset()
        .with_diff()
        .with_terminal_encoding(TerminalEncoding::None);
    GlobalGuard { _lock: lock }
}

/// Take the global lock and pretend the terminal supports up to `best`
#[allow(dead_code)]
pub fn globals_with_terminal(best: TerminalEncoding) -> GlobalGuard {
    let lock = GLOBAL_LOCK.lock();
    global_configuration()
        .reset()
        .with_diff()
        .with_default_terminal_encoding()
        .with_terminal_capability(Arc::new(FixedTerminalCapability::up_to(best)));
    GlobalGuard { _lock: lock }
}

/// Lines of a failure message, for order-sensitive assertions
#[allow(dead_code)]
pub fn lines(message: &str) -> Vec<&str> {
    message.lines().collect()
}
