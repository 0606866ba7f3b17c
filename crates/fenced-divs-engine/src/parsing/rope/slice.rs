use xi_rope::Rope;

/// Extracts the text for `start..end` from the rope as an owned String.
///
/// This allocates; prefer working with offsets where possible.
pub fn slice_to_string(rope: &Rope, start: usize, end: usize) -> String {
    rope.slice_to_cow(start..end).into_owned()
}

/// Extracts text for `start..end`, truncating to `max` bytes with "..." suffix if needed.
///
/// Used for human-readable snapshot output. Truncation backs off to the
/// nearest char boundary.
pub fn preview(rope: &Rope, start: usize, end: usize, max: usize) -> String {
    let mut s = slice_to_string(rope, start, end);
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}
