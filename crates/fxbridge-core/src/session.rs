//! Session id allocation for engine communication channels.
//!
//! Some engines talk to a worker over three independent message channels
//! (send, receive, options). Each engine instance needs a fresh triple of
//! consecutive ids that no other live instance in the process is using.
//!
//! [`SessionIdAllocator`] hands out triples from one atomic counter that
//! starts at 1 and advances by 3 per allocation. A triple touching either
//! reserved value (`0` or `u32::MAX`) is skipped and the counter is advanced
//! again until a clean triple is drawn.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, LazyLock};

/// Reserved low id, never handed out.
pub const RESERVED_LOW: u32 = 0;

/// Reserved high id, never handed out.
pub const RESERVED_HIGH: u32 = u32::MAX;

/// Ids consumed per allocation.
pub const IDS_PER_SESSION: u32 = 3;

static SHARED: LazyLock<Arc<SessionIdAllocator>> =
    LazyLock::new(|| Arc::new(SessionIdAllocator::new()));

/// Three consecutive ids addressing one engine instance's channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionIds {
    /// Channel the adapter sends samples on.
    pub send_id: u32,
    /// Channel the adapter receives results on.
    pub receive_id: u32,
    /// Channel carrying option updates.
    pub options_id: u32,
}

impl SessionIds {
    /// Build the triple starting at `base`, or `None` if any id would be
    /// reserved (or the triple would wrap past `u32::MAX`).
    pub fn from_base(base: u32) -> Option<Self> {
        if base == RESERVED_LOW || base > RESERVED_HIGH - IDS_PER_SESSION {
            return None;
        }
        Some(Self {
            send_id: base,
            receive_id: base + 1,
            options_id: base + 2,
        })
    }

    /// The three ids in channel order.
    pub fn as_array(&self) -> [u32; 3] {
        [self.send_id, self.receive_id, self.options_id]
    }
}

/// Monotonic, thread-safe allocator of [`SessionIds`].
///
/// Inject one instance into every filter that should share an id space.
/// [`SessionIdAllocator::shared`] returns the process-wide instance; tests
/// build their own so they stay isolated.
#[derive(Debug)]
pub struct SessionIdAllocator {
    next: AtomicU32,
}

impl SessionIdAllocator {
    /// Create an allocator whose first triple starts at 1.
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an allocator whose counter starts at `start`.
    ///
    /// Useful for exercising wraparound near `u32::MAX`.
    pub const fn starting_at(start: u32) -> Self {
        Self {
            next: AtomicU32::new(start),
        }
    }

    /// The process-wide allocator.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Draw a fresh triple.
    ///
    /// The increment-and-read is a single `fetch_add`, so concurrent callers
    /// always receive disjoint ranges.
    pub fn allocate(&self) -> SessionIds {
        loop {
            // fetch_add wraps at u32::MAX
            let base = self.next.fetch_add(IDS_PER_SESSION, Ordering::Relaxed);
            if let Some(ids) = SessionIds::from_base(base) {
                return ids;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(base, "session id range touches a reserved id, drawing again");
        }
    }
}

impl Default for SessionIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
