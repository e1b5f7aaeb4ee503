//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; prefer
//! the `.index()` helper when using an ID to index a `Vec`.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a live agent.  Allocated monotonically by the world and
    /// never reused, so ascending `AgentId` order is spawn order.
    pub struct AgentId(u32);
}

typed_id! {
    /// Position of a node in a behavior tree's flattened (pre-order) arena.
    /// Stable for the lifetime of the tree.
    pub struct NodeId(u32);
}

typed_id! {
    /// Identity of one constructed behavior tree.  Per-agent execution state
    /// records the tree it was sized for so stale state is detected.
    pub struct TreeId(u32);
}

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(0);

impl TreeId {
    /// Allocate a process-unique tree identity.
    pub fn next() -> TreeId {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}
