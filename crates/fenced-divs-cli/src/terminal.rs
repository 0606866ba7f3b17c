use fenced_divs_config::StyleSettings;
use fenced_divs_engine::{DivContent, FencedDiv, WidgetBuilder, computed_style};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Draws fenced divs as boxed blocks of terminal lines.
pub struct TerminalWidgets {
    settings: StyleSettings,
}

impl TerminalWidgets {
    pub fn new(settings: StyleSettings) -> Self {
        Self { settings }
    }

    fn border(&self, div: &FencedDiv) -> Style {
        // Divs matched by a styling rule stand out from plain ones.
        if computed_style(div, &self.settings).trim().is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        }
    }

    fn push_header(&self, div: &FencedDiv, depth: usize, lines: &mut Vec<Line<'static>>) {
        lines.push(Line::from(vec![
            Span::styled("│ ".repeat(depth), self.border(div)),
            Span::styled("┌─ ", self.border(div)),
            Span::styled(title(div), Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    /// Walks nested divs with an explicit stack; depth is the stack height.
    fn push_div(&self, root: &FencedDiv, lines: &mut Vec<Line<'static>>) {
        self.push_header(root, 0, lines);
        let mut open: Vec<(&FencedDiv, usize)> = vec![(root, 0)];

        while let Some(top) = open.last_mut() {
            let (div, next) = *top;
            top.1 += 1;
            let indent = "│ ".repeat(open.len() - 1);
            let border = self.border(div);
            match div.content.get(next) {
                Some(DivContent::Text(text)) => {
                    for text_line in text.lines() {
                        lines.push(Line::from(vec![
                            Span::styled(format!("{indent}│ "), border),
                            Span::raw(text_line.to_string()),
                        ]));
                    }
                }
                Some(DivContent::Div(nested)) => {
                    self.push_header(nested, open.len(), lines);
                    open.push((nested, 0));
                }
                None => {
                    lines.push(Line::from(Span::styled(format!("{indent}└─"), border)));
                    open.pop();
                }
            }
        }
    }
}

impl WidgetBuilder for TerminalWidgets {
    type Widget = Vec<Line<'static>>;

    fn build(&self, div: &FencedDiv) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        self.push_div(div, &mut lines);
        lines
    }
}

/// The banner for a named div, otherwise its `.class` and `#id` attributes.
pub fn title(div: &FencedDiv) -> String {
    if let Some(name) = &div.name {
        return name.clone();
    }
    let attrs: Vec<String> = div
        .class_list
        .iter()
        .map(|c| format!(".{c}"))
        .chain(div.id.iter().map(|id| format!("#{id}")))
        .collect();
    if attrs.is_empty() {
        "div".to_string()
    } else {
        attrs.join(" ")
    }
}
