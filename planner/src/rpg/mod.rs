//! Relaxed Planning Graph machinery (§4.B, §4.E): the reachable-tuple layer
//! and the bookkeeping of per-tuple supports that the extractor walks.

pub mod bookkeeping;
pub mod layer;

pub use bookkeeping::{Bookkeeping, Support};
pub use layer::RelaxedLayer;
