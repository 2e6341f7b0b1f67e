//! Dense, index-based collections shared by the planner's core data structures.
//!
//! The planner represents almost everything (objects, symbols, state variables,
//! ground atoms) as small dense integers so that large tables (tuple indexes,
//! relaxed layers, RPG bookkeeping maps) can be backed by plain vectors instead
//! of hash maps.

pub mod ref_store;

/// Declares a newtype wrapping a `u32` that can be used as a key into the
/// [`ref_store`] collections. The type is guaranteed to round-trip through
/// `usize` so it can directly index a `Vec`.
#[macro_export]
macro_rules! create_ref_type {
    ($name:ident) => {
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(u32);

        impl $name {
            pub const fn from_u32(v: u32) -> Self {
                $name(v)
            }
            pub const fn to_u32(self) -> u32 {
                self.0
            }
        }
        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                $name(v as u32)
            }
        }
        impl From<$name> for usize {
            fn from(v: $name) -> Self {
                v.0 as usize
            }
        }
    };
}
