pub mod lines;
pub mod slice;

pub use lines::{LineRef, lines_with_offsets};
pub use slice::{preview, slice_to_string};
