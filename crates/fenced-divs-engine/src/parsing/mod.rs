//! # Fenced Div Parsing
//!
//! Line-oriented recognition of Pandoc-style fenced divs:
//!
//! ```text
//! ::: {#intro .note}
//! Inner *markdown*
//!
//! ::: warning
//! Nested divs close innermost first.
//! :::
//! :::
//! ```
//!
//! ## Modules
//!
//! - **`fence`**: `ColonFence` classifies opening and closing fence lines
//! - **`builder`**: `FencedDivParser` keeps a stack of open regions and yields
//!   each top-level region once its closing fence is seen
//! - **`types`**: `FencedDivInfo` region descriptors
//! - **`rope`**: line iteration and slicing over the `xi_rope::Rope` buffer
//! - **`snapshot`**: normalization and invariant checks used by tests
//!
//! ## Key Invariants
//!
//! - Nesting depth is unbounded and strictly LIFO
//! - Regions that never close are dropped with everything inside them
//! - Nothing in this module returns an error; unrecognized lines are text

pub mod builder;
pub mod fence;
pub mod rope;
pub mod snapshot;
pub mod types;

use xi_rope::Rope;

pub use builder::{FencedDivParser, parse_fenced_divs};
pub use fence::{ColonFence, Opener};
pub use types::{DivAttrs, FencedDivInfo, InfoContent};

use rope::lines_with_offsets;

#[derive(Debug)]
pub struct ParsedDoc {
    pub divs: Vec<FencedDivInfo>,
}

/// Parses every top-level fenced div in the rope.
pub fn parse_document(rope: &Rope) -> ParsedDoc {
    ParsedDoc {
        divs: parse_fenced_divs(lines_with_offsets(rope).map(|l| l.text)).collect(),
    }
}
