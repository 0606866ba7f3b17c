//! User style rules applied to rendered fenced divs.
//!
//! Rules are kept in insertion order; each has a stable [`Uuid`] so a
//! settings UI can edit or delete a rule without relying on its position.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a [`StylingRule`] matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Matches when the div's class list contains the rule name.
    Class,
    /// Matches when the div's id equals the rule name.
    Id,
}

/// Style text applied to fenced divs with a given class or id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylingRule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    pub name: String,
    pub style: String,
}

impl StylingRule {
    pub fn new(kind: RuleKind, name: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            style: style.into(),
        }
    }

    /// A blank class rule, used as the starting point for a new row in a settings UI.
    pub fn empty() -> Self {
        Self::new(RuleKind::Class, "", "")
    }

    /// A rule with no name or no style never applies and is never saved.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() || self.style.is_empty()
    }
}

impl fmt::Display for StylingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sigil = match self.kind {
            RuleKind::Class => '.',
            RuleKind::Id => '#',
        };
        write!(f, "{sigil}{}", self.name)
    }
}

/// A rule together with its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialStyling {
    pub id: Uuid,
    #[serde(flatten)]
    pub rule: StylingRule,
}

/// Global style text plus the ordered list of special rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Applied to every fenced div.
    #[serde(default)]
    pub global_styling: String,
    #[serde(default)]
    pub special_styling: Vec<SpecialStyling>,
}

impl StyleSettings {
    /// Appends a rule under a freshly generated id.
    pub fn add_rule(&mut self, rule: StylingRule) -> Uuid {
        let id = Uuid::new_v4();
        self.special_styling.push(SpecialStyling { id, rule });
        id
    }

    /// Replaces the rule stored under `id`, or appends it if `id` is new.
    ///
    /// Returns `false` without touching anything when the rule is empty.
    pub fn set_rule(&mut self, id: Uuid, rule: StylingRule) -> bool {
        if rule.is_empty() {
            return false;
        }
        match self.special_styling.iter_mut().find(|s| s.id == id) {
            Some(existing) => existing.rule = rule,
            None => self.special_styling.push(SpecialStyling { id, rule }),
        }
        true
    }

    pub fn remove_rule(&mut self, id: Uuid) -> Option<StylingRule> {
        let index = self.special_styling.iter().position(|s| s.id == id)?;
        Some(self.special_styling.remove(index).rule)
    }

    pub fn rule(&self, id: Uuid) -> Option<&StylingRule> {
        self.special_styling
            .iter()
            .find(|s| s.id == id)
            .map(|s| &s.rule)
    }

    pub fn rules(&self) -> impl Iterator<Item = &StylingRule> {
        self.special_styling.iter().map(|s| &s.rule)
    }

    /// True when saving `rule` under `id` would change nothing.
    pub fn is_unmodified(&self, id: Uuid, rule: &StylingRule) -> bool {
        rule.is_empty() || self.rule(id) == Some(rule)
    }
}
