//! In-flight guards: at most one running call per action kind.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{ActionKind, VaultError};

/// One flag per action kind.
#[derive(Debug, Default)]
pub struct InFlight {
    flags: [AtomicBool; ActionKind::ALL.len()],
}

impl InFlight {
    /// Claim `kind`, or fail with `ActionInProgress` if it is taken.
    pub fn try_begin(&self, kind: ActionKind) -> Result<InFlightGuard<'_>, VaultError> {
        self.flags[kind.index()]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| VaultError::ActionInProgress(kind))?;
        Ok(InFlightGuard { owner: self, kind })
    }

    /// Check whether `kind` is running.
    pub fn is_busy(&self, kind: ActionKind) -> bool {
        self.flags[kind.index()].load(Ordering::Acquire)
    }
}

/// Releases its action kind on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    kind: ActionKind,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.flags[self.kind.index()].store(false, Ordering::Release);
    }
}
