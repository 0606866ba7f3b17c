//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts parsed regions to a stable `Snap` tree for
//!   `insta` debug snapshots
//! - **`invariants`**: Runtime checks for parser correctness (offsets in bounds,
//!   fence lines where the offsets say they are, children contained in parents)
//!
//! Parsing behavior is pinned down by fixture snapshots rather than a separate
//! grammar. Snapshots record spans, attributes and a preview of each region.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{ContentSnap, DivSnap, Snap, normalize};
