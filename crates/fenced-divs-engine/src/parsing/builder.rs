use super::{
    fence::ColonFence,
    types::{DivAttrs, FencedDivInfo, InfoContent},
};

/// A region whose opening fence has been seen but not its closing fence.
#[derive(Debug)]
struct OpenDiv {
    from: usize,
    text_start: usize,
    content: Vec<InfoContent>,
    attrs: Option<DivAttrs>,
}

impl OpenDiv {
    fn close(self, to: usize) -> FencedDivInfo {
        FencedDivInfo {
            from: self.from,
            to,
            text_start: self.text_start,
            content: self.content,
            attrs: self.attrs,
        }
    }
}

/// Pull-based parser yielding top-level fenced divs in document order.
///
/// Each line contributes `len + 1` bytes to the running offset, as if it were
/// followed by a single `\n`. Offsets are therefore UTF-8 byte offsets, not
/// character counts: `["é", ":::", "x", ":::"]` yields a region at
/// `from = 3, to = 12, text_start = 7`. Regions still open when the lines run
/// out are dropped together with everything nested inside them.
pub struct FencedDivParser<I> {
    lines: I,
    pos: usize,
    stack: Vec<OpenDiv>,
}

impl<I> FencedDivParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            pos: 0,
            stack: Vec::new(),
        }
    }

    /// Consumes one line, returning a region if it closed a top-level one.
    fn push_line(&mut self, line: &str) -> Option<FencedDivInfo> {
        let pos = self.pos;
        self.pos += line.len() + 1;

        if !self.stack.is_empty() && ColonFence::closes(line) {
            let div = self.stack.pop()?.close(pos + line.len());
            return match self.stack.last_mut() {
                Some(parent) => {
                    parent.content.push(InfoContent::Div(div));
                    None
                }
                None => Some(div),
            };
        }

        if let Some(opener) = ColonFence::opens(line) {
            self.stack.push(OpenDiv {
                from: pos,
                text_start: pos + line.len() + 1,
                content: Vec::new(),
                attrs: opener.attrs,
            });
            return None;
        }

        // Lines outside any region are not part of the output.
        if let Some(parent) = self.stack.last_mut() {
            parent.content.push(InfoContent::Line(line.to_string()));
        }
        None
    }
}

impl<I> Iterator for FencedDivParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = FencedDivInfo;

    fn next(&mut self) -> Option<FencedDivInfo> {
        while let Some(line) = self.lines.next() {
            if let Some(div) = self.push_line(line.as_ref()) {
                return Some(div);
            }
        }
        self.stack.clear();
        None
    }
}

/// Parses fenced divs out of a sequence of lines (terminators excluded).
pub fn parse_fenced_divs<I>(lines: I) -> FencedDivParser<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    FencedDivParser::new(lines.into_iter())
}
