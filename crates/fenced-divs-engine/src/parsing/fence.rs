use std::sync::OnceLock;

use regex::Regex;

use super::types::DivAttrs;

/// An opening fence line and the attributes it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    pub attrs: Option<DivAttrs>,
}

/// Recognizes the colon fence lines that delimit fenced divs.
pub struct ColonFence;

impl ColonFence {
    /// Three or more colons followed only by whitespace.
    pub fn closes(line: &str) -> bool {
        static CLOSE: OnceLock<Regex> = OnceLock::new();
        CLOSE
            .get_or_init(|| Regex::new(r"^:{3,}\s*$").expect("Invalid fence close regex"))
            .is_match(line)
    }

    /// Matches an opening fence, trying the `{…}` attribute form before the
    /// bare form. The whole line must match; anything else is plain text.
    pub fn opens(line: &str) -> Option<Opener> {
        static ATTRS: OnceLock<Regex> = OnceLock::new();
        static BARE: OnceLock<Regex> = OnceLock::new();

        let attrs = ATTRS.get_or_init(|| {
            Regex::new(r"^:{3,}\s*?(\{(?:\s*[#.][A-Za-z0-9_-]+?)*\s*\})(?:\s*?:*?)$")
                .expect("Invalid fenced attrs regex")
        });
        if let Some(caps) = attrs.captures(line) {
            return Some(Opener {
                attrs: Some(DivAttrs::FencedAttrs(caps[1].to_string())),
            });
        }

        let bare = BARE.get_or_init(|| {
            Regex::new(r"^:{3,}\s*?(\S+?)?(?:\s*?:*?)$").expect("Invalid bare class name regex")
        });
        let caps = bare.captures(line)?;
        Some(Opener {
            attrs: caps
                .get(1)
                .map(|m| DivAttrs::BareClassName(m.as_str().to_string())),
        })
    }
}
