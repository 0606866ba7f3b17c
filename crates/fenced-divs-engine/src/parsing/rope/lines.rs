use xi_rope::Rope;

/// A single line of the rope without its `\n` terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Byte offset of the first byte of the line.
    pub start: usize,
    /// The line text. A `\r` before the terminator is kept so that
    /// `start + text.len() + 1` is always the start of the next line.
    pub text: String,
}

/// Returns an iterator over the rope's lines with their starting byte offsets.
///
/// Lines are split on `\n` only. A trailing newline does not produce an
/// extra empty line.
pub fn lines_with_offsets(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        let line: &str = &line;
        let text = line.strip_suffix('\n').unwrap_or(line).to_string();
        LineRef { start, text }
    })
}
