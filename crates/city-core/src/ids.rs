//! Strongly typed identifier wrappers.
//!
//! Ids are allocated by the engine from per-kind counters starting at 1 and
//! are never reused.  Because nothing is ever removed, an id maps directly
//! onto an arena slot: `slot() == id - 1`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The first id handed out by a fresh counter.
            pub const FIRST: $name = $name(1);

            /// Zero-based arena index for this id.
            ///
            /// # Panics
            /// Panics in debug mode for the unallocatable id 0.
            #[inline(always)]
            pub fn slot(self) -> usize {
                (self.0 - 1) as usize
            }

            /// The id allocated right after this one.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of a mobile agent.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identifier of a fixed place of interest.
    pub struct PlaceId(u32);
}
