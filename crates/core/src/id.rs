// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manager identity.
//!
//! `ManagerId` is the concrete mechanism behind the spec's abstract
//! "listener binding": every manager the Warden spawns gets a fresh,
//! monotonically increasing id, used both as the `activeManagers` key and as
//! the generation a listener callback is checked against (§4.3).

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, monotonically increasing identifier for one manager instance.
///
/// Ordering (`Ord`) tracks recency: a higher id was allocated later. The
/// Warden uses this to tell a fresh listener from a stale one without
/// needing a separate generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManagerId(u64);

impl ManagerId {
    /// Allocate the next id in process-wide monotonic order.
    ///
    /// Never reused: ids are never recycled even after their manager
    /// terminates, so a late callback tagged with an old id can never alias
    /// a newer manager occupying the same logical slot.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ManagerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mgr-{}", self.0)
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ManagerId {
    /// Construct a specific id for test fixtures. Bypasses the global
    /// counter; do not mix fixture ids with `next()`-allocated ones in the
    /// same test unless the test means to collide them.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
