//! # Rendering
//!
//! Turns fenced divs into something a reader sees instead of fence lines.
//!
//! - **`styling`**: matches user styling rules against a div's classes and id
//!   and computes its inline style
//! - **`html`**: `HtmlRenderer` emits one `<div>` element per fenced div, with
//!   the inner markdown rendered by `pulldown-cmark`
//!
//! `HtmlRenderer` implements [`crate::state::WidgetBuilder`] so it can feed a
//! [`crate::state::DecorationField`] directly.

pub mod html;
pub mod styling;

pub use html::{HtmlRenderer, MarkdownRenderer, PulldownMarkdown};
pub use styling::{computed_style, rule_matches};
