// File: form-validator/src/template.rs
// Purpose: {placeholder} interpolation for validation messages

use crate::rules::RuleSet;
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-zA-Z-]*)\}").unwrap());

const PLURAL_PREFIX: &str = "s-";

/// A message with `{key}` and `{s-key}` placeholders.
///
/// `{key}` is replaced by the rule's current value. `{s-key}` becomes `"s"`
/// when the rule's value is greater than one and disappears otherwise.
/// Placeholders that resolve to nothing are removed, never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate<'a> {
    source: &'a str,
}

impl<'a> MessageTemplate<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Resolve every placeholder against `rules`
    pub fn render(&self, rules: &RuleSet) -> String {
        PLACEHOLDER_REGEX
            .replace_all(self.source, |caps: &Captures| {
                resolve(&caps[1], rules).unwrap_or_default()
            })
            .into_owned()
    }

    /// Placeholder identifiers in order of appearance
    pub fn placeholders(&self) -> Vec<&'a str> {
        PLACEHOLDER_REGEX
            .captures_iter(self.source)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Placeholders `render` would silently drop
    pub fn unknown_placeholders(&self, rules: &RuleSet) -> Vec<&'a str> {
        self.placeholders()
            .into_iter()
            .filter(|key| resolve(key, rules).is_none() || is_dangling_plural(key, rules))
            .collect()
    }
}

fn resolve(key: &str, rules: &RuleSet) -> Option<String> {
    if let Some(value) = rules.get(key) {
        return Some(value.to_string());
    }
    key.strip_prefix(PLURAL_PREFIX).map(|base| {
        let count = rules.get(base).and_then(numeric);
        if count.is_some_and(|n| n > 1.0) {
            "s".to_string()
        } else {
            String::new()
        }
    })
}

// {s-key} always renders, but only means something when key is a rule
fn is_dangling_plural(key: &str, rules: &RuleSet) -> bool {
    !rules.contains_key(key)
        && key
            .strip_prefix(PLURAL_PREFIX)
            .is_some_and(|base| !rules.contains_key(base))
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rules(min_length: i32) -> RuleSet {
        RuleSet::from_defaults([("minLength", Value::from(min_length)), ("matches", Value::from("email"))])
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let template = MessageTemplate::new("Please select an option");
        assert_eq!(template.render(&rules(3)), "Please select an option");
    }

    #[test]
    fn test_value_substitution() {
        let template = MessageTemplate::new("This field must match the {matches} field.");
        assert_eq!(template.render(&rules(3)), "This field must match the email field.");
    }

    #[rstest]
    #[case(0, "at least 0 character")]
    #[case(1, "at least 1 character")]
    #[case(2, "at least 2 characters")]
    #[case(8, "at least 8 characters")]
    fn test_pluralization(#[case] min: i32, #[case] expected: &str) {
        let template = MessageTemplate::new("at least {minLength} character{s-minLength}");
        assert_eq!(template.render(&rules(min)), expected);
    }

    #[test]
    fn test_unknown_placeholder_disappears() {
        let template = MessageTemplate::new("a{nothing}b{s-nothing}c");
        assert_eq!(template.render(&rules(2)), "abc");
    }

    #[test]
    fn test_non_identifier_braces_are_literal() {
        let template = MessageTemplate::new("{min_length} {1}");
        assert_eq!(template.render(&rules(2)), "{min_length} {1}");
    }

    #[test]
    fn test_unknown_placeholders_are_reported() {
        let template = MessageTemplate::new("{minLength} {s-minLength} {minimum} {s-minimum}");
        assert_eq!(template.unknown_placeholders(&rules(2)), vec!["minimum", "s-minimum"]);
    }
}
