use fenced_divs_config::StyleSettings;
use pulldown_cmark::{Options, Parser, html};

use crate::models::{DivContent, FencedDiv};
use crate::render::styling::computed_style;
use crate::state::WidgetBuilder;

pub const CONTAINER_CLASS: &str = "fenced-div";
pub const BANNER_CLASS: &str = "fenced-div-banner";
pub const CHUNK_CLASS: &str = "fenced-div-chunk";

/// Renders the markdown text inside a fenced div.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// CommonMark (plus tables, strikethrough and task lists) via `pulldown-cmark`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PulldownMarkdown;

impl MarkdownRenderer for PulldownMarkdown {
    fn render(&self, markdown: &str) -> String {
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }
}

/// Renders fenced divs to HTML elements carrying their classes, id and style.
pub struct HtmlRenderer<'a, M = PulldownMarkdown> {
    settings: &'a StyleSettings,
    markdown: M,
}

impl<'a> HtmlRenderer<'a, PulldownMarkdown> {
    pub fn new(settings: &'a StyleSettings) -> Self {
        Self::with_markdown(settings, PulldownMarkdown)
    }
}

impl<'a, M: MarkdownRenderer> HtmlRenderer<'a, M> {
    pub fn with_markdown(settings: &'a StyleSettings, markdown: M) -> Self {
        Self { settings, markdown }
    }

    pub fn render(&self, div: &FencedDiv) -> String {
        let mut out = String::new();
        self.render_into(div, &mut out);
        out
    }

    /// Nested divs are written with an explicit stack of open elements so
    /// nesting depth is not limited by the call stack.
    fn render_into(&self, root: &FencedDiv, out: &mut String) {
        self.open_div(root, out);
        let mut open: Vec<(&FencedDiv, usize)> = vec![(root, 0)];

        while let Some(top) = open.last_mut() {
            let (div, next) = *top;
            top.1 += 1;
            match div.content.get(next) {
                Some(DivContent::Text(text)) => {
                    out.push_str(&format!("<div class=\"{CHUNK_CLASS}\">"));
                    out.push_str(&self.markdown.render(text));
                    out.push_str("</div>\n");
                }
                Some(DivContent::Div(nested)) => {
                    self.open_div(nested, out);
                    open.push((nested, 0));
                }
                None => {
                    out.push_str("</div>\n");
                    open.pop();
                }
            }
        }
    }

    /// The opening tag and, for named divs, the banner.
    fn open_div(&self, div: &FencedDiv, out: &mut String) {
        let mut classes = vec![CONTAINER_CLASS];
        classes.extend(div.class_list.iter().map(String::as_str));

        out.push_str("<div class=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&classes.join(" ")));
        out.push('"');
        if let Some(id) = &div.id {
            out.push_str(" id=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(id));
            out.push('"');
        }
        let style = computed_style(div, self.settings);
        if !style.trim().is_empty() {
            out.push_str(" style=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(&style));
            out.push('"');
        }
        out.push_str(&format!(" data-text-start=\"{}\">\n", div.text_start));

        if let Some(name) = &div.name {
            out.push_str(&format!(
                "<div class=\"{BANNER_CLASS}\">{}</div>\n",
                html_escape::encode_text(name)
            ));
        }
    }
}

impl<M: MarkdownRenderer> WidgetBuilder for HtmlRenderer<'_, M> {
    type Widget = String;

    fn build(&self, div: &FencedDiv) -> String {
        self.render(div)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_fenced_divs;
    use fenced_divs_config::{RuleKind, StylingRule};
    use pretty_assertions::assert_eq;

    /// Keeps the markdown verbatim so structure is easy to assert on.
    struct Verbatim;

    impl MarkdownRenderer for Verbatim {
        fn render(&self, markdown: &str) -> String {
            format!("[{}]", markdown.trim_end())
        }
    }

    fn first_div(lines: &[&str]) -> FencedDiv {
        let info = parse_fenced_divs(lines).next().unwrap();
        FencedDiv::from_info(&info)
    }

    #[test]
    fn renders_nested_structure_with_banner() {
        let div = first_div(&["::: foo", "a", "::: {#x .bar}", "b", ":::", "c", ":::"]);
        let settings = StyleSettings::default();
        let html = HtmlRenderer::with_markdown(&settings, Verbatim).render(&div);

        assert_eq!(
            html,
            "<div class=\"fenced-div foo\" data-text-start=\"8\">\n\
             <div class=\"fenced-div-banner\">foo</div>\n\
             <div class=\"fenced-div-chunk\">[a]</div>\n\
             <div class=\"fenced-div bar\" id=\"x\" data-text-start=\"24\">\n\
             <div class=\"fenced-div-chunk\">[b]</div>\n\
             </div>\n\
             <div class=\"fenced-div-chunk\">[c]</div>\n\
             </div>\n"
        );
    }

    #[test]
    fn applies_computed_style() {
        let div = first_div(&["::: {.warn}", "x", ":::"]);
        let mut settings = StyleSettings::default();
        settings.global_styling = "margin: 0;".to_string();
        settings.add_rule(StylingRule::new(RuleKind::Class, "warn", "color: \"red\";"));

        let html = HtmlRenderer::with_markdown(&settings, Verbatim).render(&div);

        assert!(html.starts_with(
            "<div class=\"fenced-div warn\" style=\"margin: 0;\ncolor: &quot;red&quot;;\""
        ));
    }

    #[test]
    fn escapes_banner_text() {
        let div = first_div(&["::: <b>", ":::"]);
        let settings = StyleSettings::default();
        let html = HtmlRenderer::with_markdown(&settings, Verbatim).render(&div);

        assert!(html.contains("<div class=\"fenced-div-banner\">&lt;b&gt;</div>"));
    }

    #[test]
    fn pulldown_renders_markdown() {
        let div = first_div(&[":::", "some *emphasis*", ":::"]);
        let settings = StyleSettings::default();
        let html = HtmlRenderer::new(&settings).render(&div);

        assert!(html.contains("<p>some <em>emphasis</em></p>"));
    }

    #[test]
    fn renders_deep_nesting() {
        const DEPTH: usize = 10_000;
        let lines: Vec<&str> = std::iter::repeat_n("::: {.a}", DEPTH)
            .chain(std::iter::repeat_n(":::", DEPTH))
            .collect();
        let settings = StyleSettings::default();
        let html = HtmlRenderer::with_markdown(&settings, Verbatim).render(&first_div(&lines));

        assert_eq!(html.matches("<div class=\"fenced-div a\"").count(), DEPTH);
        assert_eq!(html.matches("</div>\n").count(), DEPTH);
    }

    #[test]
    fn widget_builder_renders_html() {
        let div = first_div(&[":::", "x", ":::"]);
        let settings = StyleSettings::default();
        let renderer = HtmlRenderer::with_markdown(&settings, Verbatim);

        assert_eq!(renderer.build(&div), renderer.render(&div));
    }
}
