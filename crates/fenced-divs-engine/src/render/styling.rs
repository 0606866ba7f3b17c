use fenced_divs_config::{RuleKind, StyleSettings, StylingRule};

use crate::models::FencedDiv;

/// Whether `rule` applies to `div`.
pub fn rule_matches(rule: &StylingRule, div: &FencedDiv) -> bool {
    if rule.is_empty() {
        return false;
    }
    match rule.kind {
        RuleKind::Class => div.has_class(&rule.name),
        RuleKind::Id => div.id.as_deref() == Some(rule.name.as_str()),
    }
}

/// The global style followed by every matching rule's style, one per line.
///
/// An empty global style still contributes its (empty) line so rule styles
/// always start on a fresh line.
pub fn computed_style(div: &FencedDiv, settings: &StyleSettings) -> String {
    std::iter::once(settings.global_styling.as_str())
        .chain(
            settings
                .rules()
                .filter(|rule| rule_matches(rule, div))
                .map(|rule| rule.style.as_str()),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn div(classes: &[&str], id: Option<&str>) -> FencedDiv {
        FencedDiv {
            from: 0,
            to: 0,
            text_start: 0,
            content: vec![],
            class_list: classes.iter().map(|c| c.to_string()).collect(),
            id: id.map(str::to_string),
            name: None,
        }
    }

    fn settings() -> StyleSettings {
        let mut settings = StyleSettings {
            global_styling: "padding: 1em;".to_string(),
            special_styling: vec![],
        };
        settings.add_rule(StylingRule::new(RuleKind::Class, "note", "color: blue;"));
        settings.add_rule(StylingRule::new(RuleKind::Id, "intro", "font-weight: bold;"));
        settings.add_rule(StylingRule::new(RuleKind::Class, "intro", "color: red;"));
        settings
    }

    #[test]
    fn class_rule_matches_any_class() {
        let rule = StylingRule::new(RuleKind::Class, "note", "x: 1;");
        assert!(rule_matches(&rule, &div(&["a", "note"], None)));
        assert!(!rule_matches(&rule, &div(&["a"], Some("note"))));
    }

    #[test]
    fn id_rule_matches_id_only() {
        let rule = StylingRule::new(RuleKind::Id, "intro", "x: 1;");
        assert!(rule_matches(&rule, &div(&[], Some("intro"))));
        assert!(!rule_matches(&rule, &div(&["intro"], None)));
    }

    #[test]
    fn empty_rule_never_matches() {
        let rule = StylingRule::new(RuleKind::Class, "note", "");
        assert!(!rule_matches(&rule, &div(&["note"], None)));
    }

    #[test]
    fn computed_style_joins_matching_rules_in_order() {
        assert_eq!(
            computed_style(&div(&["note"], Some("intro")), &settings()),
            "padding: 1em;\ncolor: blue;\nfont-weight: bold;"
        );
    }

    #[test]
    fn computed_style_without_matches_is_global_only() {
        assert_eq!(computed_style(&div(&[], None), &settings()), "padding: 1em;");
    }

    #[test]
    fn computed_style_with_empty_global() {
        let mut settings = settings();
        settings.global_styling.clear();
        assert_eq!(
            computed_style(&div(&["intro"], None), &settings),
            "\ncolor: red;"
        );
    }
}
