//! Shared helpers for tests that mutate process-wide state.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serialize tests that touch environment variables. Environment state is
/// process-wide, so concurrent tests would otherwise race.
pub fn lock_env() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
