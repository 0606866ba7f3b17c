pub mod fenced_div;

pub use fenced_div::{DivContent, FencedDiv};
