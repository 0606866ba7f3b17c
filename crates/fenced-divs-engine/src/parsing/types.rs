/// Attributes written on an opening fence line.
///
/// The two syntaxes are mutually exclusive; an opener with neither
/// (a plain `:::`) has no `DivAttrs` at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivAttrs {
    /// `::: name`: the single token after the colons.
    BareClassName(String),
    /// `::: {#id .class}`: the braces and everything inside them.
    FencedAttrs(String),
}

/// One element of a region's inner content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoContent {
    /// A raw line without its terminator.
    Line(String),
    /// A nested, fully closed region.
    Div(FencedDivInfo),
}

/// A closed fenced div region as found by the parser.
///
/// All offsets are UTF-8 byte offsets into the whole document, the same
/// indexing `xi_rope::Rope` and [`crate::editing::Selection`] use. A host that
/// counts characters (or UTF-16 units) must convert: after a line `é`, a
/// region starts at byte 3, not character 2.
///
/// Dropping a region releases nested regions with an explicit stack, so
/// arbitrarily deep nesting is safe to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedDivInfo {
    /// Start of the opening fence line.
    pub from: usize,
    /// End of the closing fence line, terminator excluded.
    pub to: usize,
    /// Start of the first line after the opening fence.
    pub text_start: usize,
    pub content: Vec<InfoContent>,
    pub attrs: Option<DivAttrs>,
}

impl FencedDivInfo {
    pub fn bare_class_name(&self) -> Option<&str> {
        match &self.attrs {
            Some(DivAttrs::BareClassName(name)) => Some(name),
            _ => None,
        }
    }

    pub fn fenced_attrs(&self) -> Option<&str> {
        match &self.attrs {
            Some(DivAttrs::FencedAttrs(attrs)) => Some(attrs),
            _ => None,
        }
    }

    /// Nested regions in document order.
    pub fn children(&self) -> impl Iterator<Item = &FencedDivInfo> {
        self.content.iter().filter_map(|c| match c {
            InfoContent::Div(d) => Some(d),
            InfoContent::Line(_) => None,
        })
    }
}

impl Drop for FencedDivInfo {
    fn drop(&mut self) {
        let mut pending: Vec<FencedDivInfo> = take_nested(&mut self.content).collect();
        while let Some(mut div) = pending.pop() {
            pending.extend(take_nested(&mut div.content));
        }
    }
}

fn take_nested(content: &mut Vec<InfoContent>) -> impl Iterator<Item = FencedDivInfo> + '_ {
    content.drain(..).filter_map(|c| match c {
        InfoContent::Div(d) => Some(d),
        InfoContent::Line(_) => None,
    })
}
