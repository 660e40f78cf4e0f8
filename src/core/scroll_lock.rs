//! Page scroll suspension as a scoped resource.
//!
//! Any component that needs the page to stop scrolling (an open modal) takes
//! a [`ScrollLockGuard`]; the page stays locked while at least one guard is
//! alive.  Dropping the guard is the only way to release, so an owner that is
//! torn down mid-animation still releases exactly once.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct LockInner {
    holders: Cell<usize>,
    acquired: Cell<u64>,
    released: Cell<u64>,
}

/// Shared handle to the page's scroll lock.  Clones refer to the same lock.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    inner: Rc<LockInner>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let holders = self.inner.holders.get() + 1;
        self.inner.holders.set(holders);
        self.inner.acquired.set(self.inner.acquired.get() + 1);
        if holders == 1 {
            tracing::debug!("page scroll locked");
        }
        ScrollLockGuard {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.inner.holders.get() > 0
    }

    #[cfg(test)]
    pub fn holders(&self) -> usize {
        self.inner.holders.get()
    }

    /// Total guards handed out over the lock's lifetime.
    pub fn acquire_count(&self) -> u64 {
        self.inner.acquired.get()
    }

    /// Total guards dropped over the lock's lifetime.
    pub fn release_count(&self) -> u64 {
        self.inner.released.get()
    }
}

/// Keeps the page locked until dropped.
#[derive(Debug)]
#[must_use = "the page unlocks as soon as the guard is dropped"]
pub struct ScrollLockGuard {
    inner: Rc<LockInner>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let holders = self.inner.holders.get().saturating_sub(1);
        self.inner.holders.set(holders);
        self.inner.released.set(self.inner.released.get() + 1);
        if holders == 0 {
            tracing::debug!("page scroll unlocked");
        }
    }
}
