pub mod editing;
pub mod models;
pub mod parsing;
pub mod render;
pub mod state;

// Re-export key types for easier usage
pub use editing::{Document, DocumentError, SelRange, Selection, Transaction};
pub use models::{DivContent, FencedDiv};
pub use parsing::{FencedDivInfo, parse_document, parse_fenced_divs};
pub use render::{HtmlRenderer, computed_style};
pub use state::{Change, DecorationField, FencedDivField, FencedDivState, WidgetBuilder};
