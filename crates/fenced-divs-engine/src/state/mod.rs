//! # Derived Fenced Div State
//!
//! Keeps the parsed fenced divs of a document, and the subset that should be
//! shown rendered, in step with editor transactions.
//!
//! - A text change reparses the whole document.
//! - A selection-only change refilters the existing parse.
//! - Anything else returns the previous state untouched.
//!
//! Divs touched by any selection range are left out of `filtered` so the
//! user sees their source while the caret is inside them.

pub mod decoration;

use std::sync::Arc;

use xi_rope::Rope;

use crate::editing::{Selection, Transaction};
use crate::models::FencedDiv;
use crate::parsing::parse_document;

pub use decoration::{Decoration, DecorationField, DecorationSet, WidgetBuilder};

/// How an update affects the derived state.
pub enum Change<'a> {
    /// Neither text nor selection changed.
    None,
    /// Only the selection moved.
    Selection { selection: &'a Selection },
    /// The text changed; `selection` is the selection after the edit.
    Document {
        doc: &'a Rope,
        selection: &'a Selection,
    },
}

impl<'a> Change<'a> {
    /// A text change takes priority over a selection change in the same transaction.
    pub fn from_transaction(tr: &'a Transaction) -> Self {
        if tr.is_noop() {
            Change::None
        } else if tr.doc_changed {
            Change::Document {
                doc: &tr.doc,
                selection: &tr.selection,
            }
        } else {
            Change::Selection {
                selection: &tr.selection,
            }
        }
    }
}

/// Immutable snapshot of the fenced divs in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct FencedDivState {
    parsed: Arc<[FencedDiv]>,
    filtered: Vec<FencedDiv>,
}

impl FencedDivState {
    pub fn new(doc: &Rope, selection: &Selection) -> Self {
        let parsed = parse_divs(doc);
        let filtered = filter_divs(&parsed, selection);
        Self { parsed, filtered }
    }

    /// Top-level divs of the whole document.
    pub fn parsed(&self) -> &[FencedDiv] {
        &self.parsed
    }

    /// Top-level divs not touched by the selection, in document order.
    pub fn filtered(&self) -> &[FencedDiv] {
        &self.filtered
    }

    /// Whether two states share the same parse, i.e. no reparse happened between them.
    pub fn shares_parse_with(&self, other: &FencedDivState) -> bool {
        Arc::ptr_eq(&self.parsed, &other.parsed)
    }

    /// Produces the state after `change`.
    ///
    /// Returns `self` itself when nothing changed, so callers can detect a
    /// no-op with `Arc::ptr_eq`.
    pub fn update(self: Arc<Self>, change: Change<'_>) -> Arc<Self> {
        match change {
            Change::None => self,
            Change::Selection { selection } => {
                let filtered = filter_divs(&self.parsed, selection);
                log::trace!(
                    "selection changed, {} of {} fenced divs rendered",
                    filtered.len(),
                    self.parsed.len()
                );
                Arc::new(Self {
                    parsed: Arc::clone(&self.parsed),
                    filtered,
                })
            }
            Change::Document { doc, selection } => Arc::new(Self::new(doc, selection)),
        }
    }

    /// The innermost div whose `from..=to` contains `pos`.
    ///
    /// Used to map a position in the rendered view back to source.
    pub fn div_at(&self, pos: usize) -> Option<&FencedDiv> {
        let mut found = self.parsed.iter().find(|d| d.contains(pos))?;
        while let Some(child) = found.children().find(|d| d.contains(pos)) {
            found = child;
        }
        Some(found)
    }
}

fn parse_divs(doc: &Rope) -> Arc<[FencedDiv]> {
    let parsed: Arc<[FencedDiv]> = parse_document(doc)
        .divs
        .iter()
        .map(FencedDiv::from_info)
        .collect();
    log::debug!("reparsed document: {} top-level fenced divs", parsed.len());
    parsed
}

fn filter_divs(parsed: &[FencedDiv], selection: &Selection) -> Vec<FencedDiv> {
    parsed
        .iter()
        .filter(|d| !selection.touches(d.from, d.to))
        .cloned()
        .collect()
}

/// Holds the current [`FencedDivState`] and replaces it on each transaction.
pub struct FencedDivField {
    state: Arc<FencedDivState>,
}

impl FencedDivField {
    pub fn new(tr: &Transaction) -> Self {
        Self {
            state: Arc::new(FencedDivState::new(&tr.doc, &tr.selection)),
        }
    }

    pub fn state(&self) -> &Arc<FencedDivState> {
        &self.state
    }

    pub fn apply(&mut self, tr: &Transaction) -> &Arc<FencedDivState> {
        let prev = Arc::clone(&self.state);
        self.state = prev.update(Change::from_transaction(tr));
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Document, SelRange};
    use pretty_assertions::assert_eq;

    const DOC: &str = "intro\n::: a\none\n:::\n\n::: {#b}\ntwo\n::: c\nthree\n:::\n:::\n";
    // "intro\n"           0..6
    // "::: a\n"           6..12   div a: 6..19
    // "one\n"             12..16
    // ":::\n"             16..20
    // "\n"                20..21
    // "::: {#b}\n"        21..30  div b: 21..53
    // "two\n"             30..34
    // "::: c\n"           34..40  div c: 34..49
    // "three\n"           40..46
    // ":::\n"             46..50
    // ":::\n"             50..54

    fn spans(divs: &[FencedDiv]) -> Vec<(usize, usize)> {
        divs.iter().map(|d| (d.from, d.to)).collect()
    }

    fn state_for(doc: &Document) -> Arc<FencedDivState> {
        Arc::new(FencedDivState::new(doc.rope(), doc.selection()))
    }

    #[test]
    fn new_state_parses_and_filters() {
        let doc = Document::from_text(DOC);
        let state = state_for(&doc);

        assert_eq!(spans(state.parsed()), vec![(6, 19), (21, 53)]);
        assert_eq!(spans(state.filtered()), vec![(6, 19), (21, 53)]);
    }

    #[test]
    fn no_change_returns_same_state() {
        let doc = Document::from_text(DOC);
        let state = state_for(&doc);

        let next = Arc::clone(&state).update(Change::None);

        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn unchanged_transaction_maps_to_no_change() {
        let mut doc = Document::from_text(DOC);
        let tr = doc.set_selection(Selection::cursor(0)).unwrap();

        assert!(tr.is_noop());
        assert!(matches!(Change::from_transaction(&tr), Change::None));
    }

    #[test]
    fn selection_change_refilters_without_reparsing() {
        let mut doc = Document::from_text(DOC);
        let state = state_for(&doc);

        let tr = doc.set_selection(Selection::cursor(15)).unwrap();
        let next = Arc::clone(&state).update(Change::from_transaction(&tr));

        assert!(next.shares_parse_with(&state));
        assert_eq!(spans(next.filtered()), vec![(21, 53)]);
    }

    #[test]
    fn caret_on_closing_fence_end_still_hides_div() {
        let mut doc = Document::from_text(DOC);
        let state = state_for(&doc);

        let tr = doc.set_selection(Selection::cursor(19)).unwrap();
        let next = state.update(Change::from_transaction(&tr));

        assert_eq!(spans(next.filtered()), vec![(21, 53)]);
    }

    #[test]
    fn multiple_ranges_hide_multiple_divs() {
        let mut doc = Document::from_text(DOC);
        let state = state_for(&doc);

        let tr = doc
            .set_selection(Selection::new([SelRange::cursor(7), SelRange::new(45, 40)]))
            .unwrap();
        let next = state.update(Change::from_transaction(&tr));

        assert!(next.filtered().is_empty());
        assert_eq!(next.parsed().len(), 2);
    }

    #[test]
    fn document_change_reparses() {
        let mut doc = Document::from_text(DOC);
        let state = state_for(&doc);

        // Break the first div's closing fence; the caret ends up at 18.
        let tr = doc.replace(16..19, "::").unwrap();
        let next = Arc::clone(&state).update(Change::from_transaction(&tr));

        assert!(!next.shares_parse_with(&state));
        assert_eq!(next.parsed().len(), 0);
    }

    #[test]
    fn document_change_filters_against_new_selection() {
        let mut doc = Document::from_text("x\n");
        let state = state_for(&doc);
        assert!(state.parsed().is_empty());

        let tr = doc.insert(2, ":::\nnew\n:::\n").unwrap();
        let next = state.update(Change::from_transaction(&tr));

        assert_eq!(spans(next.parsed()), vec![(2, 13)]);
        // The caret sits right after the inserted text, past the div.
        assert_eq!(spans(next.filtered()), vec![(2, 13)]);
    }

    #[test]
    fn div_at_finds_innermost() {
        let doc = Document::from_text(DOC);
        let state = state_for(&doc);

        assert_eq!(state.div_at(0), None);
        assert_eq!(state.div_at(8).map(|d| d.from), Some(6));
        assert_eq!(state.div_at(31).map(|d| d.from), Some(21));
        assert_eq!(state.div_at(42).map(|d| d.from), Some(34));
        assert_eq!(state.div_at(20), None);
    }

    #[test]
    fn field_applies_transactions_in_order() {
        let mut doc = Document::from_text(DOC);
        let mut field = FencedDivField::new(&doc.load_transaction());
        assert_eq!(field.state().filtered().len(), 2);

        let tr = doc.set_selection(Selection::cursor(25)).unwrap();
        assert_eq!(spans(field.apply(&tr).filtered()), vec![(6, 19)]);

        let before = Arc::clone(field.state());
        let tr = doc.set_selection(Selection::cursor(25)).unwrap();
        assert!(Arc::ptr_eq(&before, field.apply(&tr)));
    }
}
