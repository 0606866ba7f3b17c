use std::ops::Range;

use thiserror::Error;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::{SelRange, Selection, Transaction};
use crate::models::FencedDiv;
use crate::parsing::rope::{LineRef, lines_with_offsets};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Range {start}..{end} is out of bounds for a document of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// The editor document: an `xi_rope::Rope` buffer plus the current selection.
///
/// Every mutation returns a [`Transaction`] describing what changed, which
/// is what the derived fenced div state is updated from.
pub struct Document {
    buffer: Rope,
    selection: Selection,
    /// Incremented on each text edit.
    version: u64,
}

impl Document {
    /// Create a new document from raw bytes. The caret starts at offset 0.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selection: Selection::cursor(0),
            version: 0,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Lines without terminators, with their starting offsets.
    pub fn lines(&self) -> impl Iterator<Item = LineRef> + '_ {
        lines_with_offsets(&self.buffer)
    }

    /// A transaction describing the current state as freshly loaded.
    pub fn load_transaction(&self) -> Transaction {
        self.transaction(true, true)
    }

    /// Replaces `range` with `text` and leaves the caret after the insertion.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<Transaction, DocumentError> {
        self.check_range(&range)?;

        let delta: Delta<RopeInfo> =
            Delta::simple_edit(range.clone(), Rope::from(text), self.buffer.len());
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;
        self.selection = Selection::cursor(range.start + text.len());

        Ok(self.transaction(true, true))
    }

    pub fn insert(&mut self, at: usize, text: &str) -> Result<Transaction, DocumentError> {
        self.replace(at..at, text)
    }

    /// Moves the selection. The transaction only reports a selection change
    /// if the new selection differs from the current one.
    pub fn set_selection(&mut self, selection: Selection) -> Result<Transaction, DocumentError> {
        for r in selection.ranges() {
            self.check_range(&(r.from()..r.to()))?;
        }

        let changed = selection != self.selection;
        self.selection = selection;
        Ok(self.transaction(false, changed))
    }

    /// Handles a click on a rendered div by putting the caret at the start of
    /// its inner text, which also makes the div show as source again.
    pub fn click(&mut self, div: &FencedDiv) -> Result<Transaction, DocumentError> {
        self.set_selection(Selection::new([SelRange::cursor(div.text_start)]))
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), DocumentError> {
        let len = self.buffer.len();
        if range.start > range.end || range.end > len {
            return Err(DocumentError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for offset in [range.start, range.end] {
            if !self.buffer.is_codepoint_boundary(offset) {
                return Err(DocumentError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }

    fn transaction(&self, doc_changed: bool, selection_changed: bool) -> Transaction {
        Transaction {
            doc: self.buffer.clone(),
            selection: self.selection.clone(),
            doc_changed,
            selection_changed,
            version: self.version,
        }
    }
}
