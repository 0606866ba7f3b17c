//! Widgets replacing fenced div source in the editor view.
//!
//! Building widgets means rendering markdown, so [`DecorationField`] keeps
//! the filtered list it last built from and only rebuilds when the new list
//! is structurally different. Moving the caret around outside any div, or
//! typing in plain text that does not shift a div, leaves the widgets alone.

use std::sync::Arc;

use crate::models::FencedDiv;
use crate::state::FencedDivState;

/// Turns a fenced div into whatever the view displays in its place.
pub trait WidgetBuilder {
    type Widget;

    fn build(&self, div: &FencedDiv) -> Self::Widget;
}

/// A widget covering `from..to` of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration<W> {
    pub from: usize,
    pub to: usize,
    pub div: FencedDiv,
    pub widget: W,
}

/// Decorations in document order, never overlapping.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationSet<W> {
    decorations: Vec<Decoration<W>>,
}

impl<W> DecorationSet<W> {
    pub fn none() -> Self {
        Self {
            decorations: Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration<W>> {
        self.decorations.iter()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// The decoration starting exactly at `from`, if any.
    pub fn starting_at(&self, from: usize) -> Option<&Decoration<W>> {
        self.decorations.iter().find(|d| d.from == from)
    }
}

/// Rebuilds widgets from [`FencedDivState::filtered`] only when needed.
pub struct DecorationField<W> {
    live_preview: bool,
    /// The filtered list the current decorations were built from.
    built_from: Option<Vec<FencedDiv>>,
    decorations: Arc<DecorationSet<W>>,
    rebuilds: usize,
}

impl<W> DecorationField<W> {
    pub fn new(live_preview: bool) -> Self {
        Self {
            live_preview,
            built_from: None,
            decorations: Arc::new(DecorationSet::none()),
            rebuilds: 0,
        }
    }

    pub fn live_preview(&self) -> bool {
        self.live_preview
    }

    /// In source mode nothing is rendered.
    pub fn set_live_preview(&mut self, live_preview: bool) {
        if self.live_preview != live_preview {
            self.live_preview = live_preview;
            self.invalidate();
        }
    }

    /// Forces the next update to rebuild, e.g. after style settings changed.
    pub fn invalidate(&mut self) {
        self.built_from = None;
    }

    pub fn decorations(&self) -> &Arc<DecorationSet<W>> {
        &self.decorations
    }

    /// How many times widgets have been rebuilt.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Brings the decorations in line with `state`. Returns whether they were rebuilt.
    pub fn update<B>(&mut self, state: &FencedDivState, builder: &B) -> bool
    where
        B: WidgetBuilder<Widget = W>,
    {
        if !self.live_preview {
            let had_decorations = !self.decorations.is_empty();
            if had_decorations {
                self.decorations = Arc::new(DecorationSet::none());
            }
            self.built_from = None;
            return had_decorations;
        }

        let filtered = state.filtered();
        if self.built_from.as_deref() == Some(filtered) {
            log::trace!("fenced divs unchanged, reusing {} widgets", filtered.len());
            return false;
        }

        let decorations = filtered
            .iter()
            .map(|div| Decoration {
                from: div.from,
                to: div.to,
                div: div.clone(),
                widget: builder.build(div),
            })
            .collect();
        self.decorations = Arc::new(DecorationSet { decorations });
        self.built_from = Some(filtered.to_vec());
        self.rebuilds += 1;
        log::trace!("rebuilt {} fenced div widgets", filtered.len());
        true
    }
}
