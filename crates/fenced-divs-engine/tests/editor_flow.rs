use std::sync::Arc;

use fenced_divs_config::{RuleKind, StyleSettings, StylingRule};
use fenced_divs_engine::{
    DecorationField, Document, FencedDivField, HtmlRenderer, Selection,
};

const DOC: &str = "# Title\n::: {.note}\nHello *world*\n:::\n";

/// Load, click into a rendered div, edit it, then move away again.
#[test]
fn click_edit_and_leave_a_div() {
    let settings = StyleSettings::default();
    let renderer = HtmlRenderer::new(&settings);

    let mut doc = Document::from_text(DOC);
    let mut field = FencedDivField::new(&doc.load_transaction());
    let mut decorations = DecorationField::new(true);

    assert!(decorations.update(field.state(), &renderer));
    let rendered = decorations.decorations();
    assert_eq!(rendered.len(), 1);
    let deco = rendered.starting_at(8).expect("div decoration at its opening fence");
    assert_eq!((deco.from, deco.to), (8, 37));
    assert!(deco.widget.contains("<div class=\"fenced-div note\""));
    assert!(deco.widget.contains("data-text-start=\"20\""));
    assert!(deco.widget.contains("<em>world</em>"));

    // Clicking shows the source of the div.
    let div = deco.div.clone();
    let tr = doc.click(&div).unwrap();
    assert_eq!(doc.selection(), &Selection::cursor(20));
    assert!(decorations.update(field.apply(&tr), &renderer));
    assert!(decorations.decorations().is_empty());

    // Typing inside the div reparses but nothing is rendered while the caret is there.
    let tr = doc.insert(26, "big ").unwrap();
    let state = field.apply(&tr);
    assert_eq!(state.parsed()[0].to, 41);
    assert!(!decorations.update(state, &renderer));

    // Leaving the div renders the edited content.
    let tr = doc.set_selection(Selection::cursor(0)).unwrap();
    assert!(decorations.update(field.apply(&tr), &renderer));
    let widget = &decorations.decorations().iter().next().unwrap().widget;
    assert!(widget.contains("Hello big <em>world</em>"));

    // Moving around outside the div reuses the widget.
    let before = Arc::clone(decorations.decorations());
    let tr = doc.set_selection(Selection::cursor(3)).unwrap();
    assert!(!decorations.update(field.apply(&tr), &renderer));
    assert!(Arc::ptr_eq(&before, decorations.decorations()));
}

#[test]
fn styling_rules_reach_the_widget() {
    let mut settings = StyleSettings::default();
    settings.add_rule(StylingRule::new(RuleKind::Class, "note", "border: 1px solid;"));
    let renderer = HtmlRenderer::new(&settings);

    let doc = Document::from_text(DOC);
    let field = FencedDivField::new(&doc.load_transaction());
    let mut decorations = DecorationField::new(true);
    decorations.update(field.state(), &renderer);

    let widget = &decorations.decorations().iter().next().unwrap().widget;
    assert!(widget.contains("style=\"\nborder: 1px solid;\""));
}

#[test]
fn invalid_utf8_is_rejected() {
    assert!(Document::from_bytes(&[0x3a, 0xff, 0x3a]).is_err());
}

#[test]
fn deeply_nested_document_renders_and_reparses() {
    const DEPTH: usize = 10_000;
    let text = "::: a\n".repeat(DEPTH) + &":::\n".repeat(DEPTH);
    let settings = StyleSettings::default();
    let renderer = HtmlRenderer::new(&settings);

    let mut doc = Document::from_text(&text);
    let mut field = FencedDivField::new(&doc.load_transaction());
    let mut decorations = DecorationField::new(true);

    // The caret starts inside the outermost div, so nothing is rendered.
    decorations.update(field.state(), &renderer);
    assert!(decorations.decorations().is_empty());
    assert_eq!(field.state().parsed().len(), 1);

    let tr = doc.insert(text.len(), "after\n").unwrap();
    assert!(decorations.update(field.apply(&tr), &renderer));
    let widget = &decorations.decorations().iter().next().unwrap().widget;
    assert_eq!(widget.matches("fenced-div-banner").count(), DEPTH);
}
