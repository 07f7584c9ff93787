//! Modal lock
//!
//! Scoped acquisition of the one-modal-at-a-time resource (scroll lock,
//! escape handling) independent of any UI toolkit. The guard releases the
//! lock when dropped, so release is guaranteed on every close path.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ModalLock {
    held: AtomicBool,
}

impl ModalLock {
    pub const fn new() -> Self {
        Self { held: AtomicBool::new(false) }
    }

    /// Acquire the modal resource. Returns `None` while another guard lives.
    pub fn acquire(&self) -> Option<ModalGuard<'_>> {
        if self
            .held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(ModalGuard { lock: self })
        } else {
            None
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

#[must_use = "the modal lock releases when the guard drops"]
#[derive(Debug)]
pub struct ModalGuard<'a> {
    lock: &'a ModalLock,
}

impl Drop for ModalGuard<'_> {
    fn drop(&mut self) {
        self.lock.held.store(false, Ordering::Release);
    }
}
