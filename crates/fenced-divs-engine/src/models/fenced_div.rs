use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::{DivAttrs, FencedDivInfo, InfoContent};

/// One element of a rendered div's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivContent {
    /// Consecutive raw lines joined with `\n`, plus one trailing `\n`.
    Text(String),
    Div(FencedDiv),
}

/// A fenced div ready for presentation.
///
/// Equality is structural: spans, classes, id, name and the whole content
/// tree. The decoration layer relies on this to skip rebuilding widgets.
///
/// Nesting depth is unbounded, so building, cloning, comparing and dropping
/// walk the tree with an explicit stack rather than recursing.
#[derive(Debug)]
pub struct FencedDiv {
    pub from: usize,
    pub to: usize,
    /// Where the caret goes when the rendered div is clicked.
    pub text_start: usize,
    pub content: Vec<DivContent>,
    /// Class names in source order, duplicates kept.
    pub class_list: Vec<String>,
    /// The last `#id` of the attribute block.
    pub id: Option<String>,
    /// The bare class name, shown as a banner.
    pub name: Option<String>,
}

/// A region being materialized: its source and the content built so far.
struct MaterializeFrame<'a> {
    info: &'a FencedDivInfo,
    next: usize,
    lines: Vec<&'a str>,
    content: Vec<DivContent>,
}

impl<'a> MaterializeFrame<'a> {
    fn new(info: &'a FencedDivInfo) -> Self {
        Self {
            info,
            next: 0,
            lines: Vec::new(),
            content: Vec::new(),
        }
    }

    fn finish(mut self) -> FencedDiv {
        flush_lines(&mut self.lines, &mut self.content);
        let info = self.info;
        let (id, class_list, name) = match &info.attrs {
            Some(DivAttrs::BareClassName(bare)) if !bare.is_empty() => {
                (None, first_token(bare), Some(bare.clone()))
            }
            Some(DivAttrs::FencedAttrs(attrs)) => {
                let (id, class_list) = parse_id_and_class(attrs);
                (id, class_list, None)
            }
            _ => (None, Vec::new(), None),
        };

        FencedDiv {
            from: info.from,
            to: info.to,
            text_start: info.text_start,
            content: std::mem::take(&mut self.content),
            class_list,
            id,
            name,
        }
    }
}

impl FencedDiv {
    /// Builds the presentation tree for a parsed region.
    ///
    /// Contiguous lines are merged into one text block; nested regions are
    /// materialized in place, innermost first.
    pub fn from_info(info: &FencedDivInfo) -> Self {
        let mut current = MaterializeFrame::new(info);
        let mut parents: Vec<MaterializeFrame<'_>> = Vec::new();

        loop {
            let source = current.info;
            match source.content.get(current.next) {
                Some(InfoContent::Line(line)) => {
                    current.lines.push(line);
                    current.next += 1;
                }
                Some(InfoContent::Div(child)) => {
                    current.next += 1;
                    flush_lines(&mut current.lines, &mut current.content);
                    parents.push(std::mem::replace(&mut current, MaterializeFrame::new(child)));
                }
                None => {
                    let div = current.finish();
                    match parents.pop() {
                        Some(parent) => {
                            current = parent;
                            current.content.push(DivContent::Div(div));
                        }
                        None => return div,
                    }
                }
            }
        }
    }

    /// Nested divs in document order.
    pub fn children(&self) -> impl Iterator<Item = &FencedDiv> {
        self.content.iter().filter_map(|c| match c {
            DivContent::Div(d) => Some(d),
            DivContent::Text(_) => None,
        })
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c == class)
    }

    /// True if `pos` lies within `from..=to`.
    pub fn contains(&self, pos: usize) -> bool {
        self.from <= pos && pos <= self.to
    }

    fn same_attrs(&self, other: &FencedDiv) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.text_start == other.text_start
            && self.class_list == other.class_list
            && self.id == other.id
            && self.name == other.name
    }

    fn shallow_clone(&self) -> FencedDiv {
        FencedDiv {
            from: self.from,
            to: self.to,
            text_start: self.text_start,
            content: Vec::with_capacity(self.content.len()),
            class_list: self.class_list.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

impl PartialEq for FencedDiv {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if !a.same_attrs(b) || a.content.len() != b.content.len() {
                return false;
            }
            for pair in a.content.iter().zip(&b.content) {
                match pair {
                    (DivContent::Text(x), DivContent::Text(y)) if x == y => {}
                    (DivContent::Div(x), DivContent::Div(y)) => pending.push((x, y)),
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for FencedDiv {}

impl Clone for FencedDiv {
    fn clone(&self) -> Self {
        let mut current = (self, 0, self.shallow_clone());
        let mut parents: Vec<(&FencedDiv, usize, FencedDiv)> = Vec::new();

        loop {
            let (source, next, _) = current;
            current.1 += 1;
            match source.content.get(next) {
                Some(DivContent::Text(text)) => {
                    current.2.content.push(DivContent::Text(text.clone()));
                }
                Some(DivContent::Div(child)) => {
                    parents.push(std::mem::replace(&mut current, (child, 0, child.shallow_clone())));
                }
                None => {
                    let (_, _, div) = current;
                    match parents.pop() {
                        Some(parent) => {
                            current = parent;
                            current.2.content.push(DivContent::Div(div));
                        }
                        None => return div,
                    }
                }
            }
        }
    }
}

impl Drop for FencedDiv {
    fn drop(&mut self) {
        let mut pending: Vec<FencedDiv> = take_nested(&mut self.content).collect();
        while let Some(mut div) = pending.pop() {
            pending.extend(take_nested(&mut div.content));
        }
    }
}

fn take_nested(content: &mut Vec<DivContent>) -> impl Iterator<Item = FencedDiv> + '_ {
    content.drain(..).filter_map(|c| match c {
        DivContent::Div(d) => Some(d),
        DivContent::Text(_) => None,
    })
}

impl From<&FencedDivInfo> for FencedDiv {
    fn from(info: &FencedDivInfo) -> Self {
        Self::from_info(info)
    }
}

fn flush_lines(buffer: &mut Vec<&str>, result: &mut Vec<DivContent>) {
    if buffer.is_empty() {
        return;
    }
    let mut text = buffer.join("\n");
    text.push('\n');
    result.push(DivContent::Text(text));
    buffer.clear();
}

/// The class list of a bare-named div: its first whitespace-delimited token.
fn first_token(bare: &str) -> Vec<String> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| Regex::new(r"\S+").expect("Invalid token regex"));
    token
        .find(bare)
        .map(|m| vec![m.as_str().to_string()])
        .unwrap_or_default()
}

fn parse_id_and_class(attrs: &str) -> (Option<String>, Vec<String>) {
    static ID: OnceLock<Regex> = OnceLock::new();
    static CLASS: OnceLock<Regex> = OnceLock::new();
    let id_regex = ID.get_or_init(|| Regex::new(r"#[A-Za-z0-9_-]+").expect("Invalid id regex"));
    let class_regex =
        CLASS.get_or_init(|| Regex::new(r"\.[A-Za-z0-9_-]+").expect("Invalid class regex"));

    let id = id_regex
        .find_iter(attrs)
        .last()
        .map(|m| m.as_str()[1..].to_string());
    let class_list = class_regex
        .find_iter(attrs)
        .map(|m| m.as_str()[1..].to_string())
        .collect();

    (id, class_list)
}
