//! Identifiers and simple allocators for core entities.
//!
//! Outputs are addressed by a per-animation [`OutputIndex`] that survives
//! rebinding. Layers, strips and curves carry process-unique identity handles
//! so that ownership checks never confuse two structurally equal objects.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Stable index of an output within its animation. Starts at 1, never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct OutputIndex(pub u32);

impl fmt::Display for OutputIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LayerId(u64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StripId(u64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CurveId(u64);

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_uid() -> u64 {
    NEXT_UID.fetch_add(1, Ordering::Relaxed)
}

impl LayerId {
    #[inline]
    pub(crate) fn alloc() -> Self {
        Self(next_uid())
    }
}

impl StripId {
    #[inline]
    pub(crate) fn alloc() -> Self {
        Self(next_uid())
    }
}

impl CurveId {
    #[inline]
    pub(crate) fn alloc() -> Self {
        Self(next_uid())
    }
}

/// Monotonic allocator for output stable indices.
/// The counter only ever moves forward, so removed outputs never hand their
/// index to a newcomer.
#[derive(Default, Debug, Clone)]
pub struct StableIndexAllocator {
    last: u32,
}

impl StableIndexAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> OutputIndex {
        self.last += 1;
        OutputIndex(self.last)
    }

    /// Most recently allocated index, 0 when nothing was allocated yet.
    #[inline]
    pub fn last(&self) -> u32 {
        self.last
    }
}
