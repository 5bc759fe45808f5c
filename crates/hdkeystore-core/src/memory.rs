//! Process hardening for key material
//!
//! Disables core dumps via `setrlimit(RLIMIT_CORE, 0)` so a crash never
//! writes seeds or derived keys to disk. Best-effort: containers and
//! unprivileged users may refuse it, in which case a warning is logged.

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_DUMPS_DISABLED: AtomicBool = AtomicBool::new(false);

/// Disable core dumps for the current process.
///
/// Returns `true` once core dumps are off. Later calls are no-ops.
///
/// # Example
/// ```
/// hdkeystore_core::memory::disable_core_dumps();
/// ```
pub fn disable_core_dumps() -> bool {
    if CORE_DUMPS_DISABLED.load(Ordering::SeqCst) {
        return true;
    }

    let disabled = disable_core_dumps_impl();
    if disabled {
        CORE_DUMPS_DISABLED.store(true, Ordering::SeqCst);
    }
    disabled
}

#[cfg(unix)]
fn disable_core_dumps_impl() -> bool {
    let rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: setrlimit only reads the struct we pass by reference
    let result = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &rlim) };
    if result != 0 {
        log::warn!(
            "failed to disable core dumps: {}",
            std::io::Error::last_os_error()
        );
        return false;
    }
    log::debug!("core dumps disabled");
    true
}

#[cfg(not(unix))]
fn disable_core_dumps_impl() -> bool {
    log::warn!("core dump prevention is not supported on this platform");
    false
}
