//! # Editing Model
//!
//! The editor side that fenced div state is derived from:
//!
//! - **`document`**: `Document` owns the `xi_rope::Rope` buffer and the
//!   current `Selection`; every mutation yields a `Transaction`
//! - **`selection`**: `Selection` / `SelRange` and the inclusive
//!   `range_in_selection` test used to hide rendered divs under the caret
//!
//! Transactions are applied strictly in order, one per edit or caret move.

pub mod document;
pub mod selection;

pub use document::{Document, DocumentError};
pub use selection::{SelRange, Selection, range_in_selection};

use xi_rope::Rope;

/// What one editor update did to the document and selection.
///
/// `doc` is the buffer after the update. Cloning a rope is cheap, it shares
/// its tree with the document.
#[derive(Clone, Debug)]
pub struct Transaction {
    pub doc: Rope,
    pub selection: Selection,
    pub doc_changed: bool,
    pub selection_changed: bool,
    /// Document version after the update.
    pub version: u64,
}

impl Transaction {
    /// True if neither the text nor the selection changed.
    pub fn is_noop(&self) -> bool {
        !self.doc_changed && !self.selection_changed
    }
}
