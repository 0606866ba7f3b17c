use xi_rope::Rope;

use crate::parsing::{
    rope::slice::preview,
    types::{DivAttrs, FencedDivInfo, InfoContent},
};

#[derive(Debug)]
pub struct Snap {
    pub divs: Vec<DivSnap>,
}

#[derive(Debug)]
pub struct DivSnap {
    pub span: (usize, usize),
    pub text_start: usize,
    pub attrs: String,
    pub text: String,
    pub content: Vec<ContentSnap>,
}

#[derive(Debug)]
pub enum ContentSnap {
    Line(String),
    Div(DivSnap),
}

pub fn normalize(rope: &Rope, divs: &[FencedDivInfo]) -> Snap {
    Snap {
        divs: divs.iter().map(|d| normalize_div(rope, d)).collect(),
    }
}

fn normalize_div(rope: &Rope, div: &FencedDivInfo) -> DivSnap {
    let attrs = match &div.attrs {
        None => "none".to_string(),
        Some(DivAttrs::BareClassName(name)) => format!("bare: {name}"),
        Some(DivAttrs::FencedAttrs(attrs)) => format!("fenced: {attrs}"),
    };

    let content = div
        .content
        .iter()
        .map(|c| match c {
            InfoContent::Line(line) => ContentSnap::Line(line.clone()),
            InfoContent::Div(nested) => ContentSnap::Div(normalize_div(rope, nested)),
        })
        .collect();

    DivSnap {
        span: (div.from, div.to),
        text_start: div.text_start,
        attrs,
        text: preview(rope, div.from, div.to, 60),
        content,
    }
}
