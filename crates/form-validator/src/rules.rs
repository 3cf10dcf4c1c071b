// File: form-validator/src/rules.rs
// Purpose: Requirement and message maps, and merging field options into them

use crate::error::ConfigError;
use crate::logger::{LogLevel, Logger};
use crate::template::MessageTemplate;
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Maximum-bound sentinel meaning "no ceiling"
pub const UNBOUNDED: f64 = -1.0;

/// Options passed through to controls without complaint in strict mode
pub const NATIVE_ATTRIBUTES: &[&str] = &[
    "required",
    "pattern",
    "minlength",
    "maxlength",
    "min",
    "max",
    "step",
    "placeholder",
    "title",
    "disabled",
    "readonly",
    "autocomplete",
    "multiple",
    "size",
];

/// Whether a maximum value is an actual bound
pub fn is_bounded(max: f64) -> bool {
    max > UNBOUNDED
}

/// Requirement name to bound value, for one field.
///
/// The key space is fixed by the defaults: overrides replace values but
/// never add or remove keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    entries: IndexMap<String, Value>,
}

impl RuleSet {
    pub fn from_defaults<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            entries: defaults
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Numeric rule value, if the rule exists and is a number
    pub fn number(&self, key: &str) -> Option<f64> {
        self.entries.get(key).and_then(Value::as_number)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace an existing rule; unknown keys are ignored
    pub(crate) fn set(&mut self, key: &str, value: Value) -> bool {
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Requirement name to message template, for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MessageSet {
    entries: IndexMap<String, String>,
}

impl MessageSet {
    pub fn from_defaults<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: defaults
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the template stored under `key`, or `None` if there is none
    pub fn render(&self, key: &str, rules: &RuleSet) -> Option<String> {
        self.get(key).map(|source| MessageTemplate::new(source).render(rules))
    }

    /// `(message key, placeholder)` pairs that would render as nothing
    pub fn unknown_placeholders(&self, rules: &RuleSet) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(key, source)| {
                MessageTemplate::new(source)
                    .unknown_placeholders(rules)
                    .into_iter()
                    .map(move |placeholder| (key.clone(), placeholder.to_string()))
            })
            .collect()
    }

    pub(crate) fn set(&mut self, key: &str, template: String) -> bool {
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = template;
                true
            }
            None => false,
        }
    }
}

/// Resolved configuration of one field, as reported by `settings()`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSettings {
    pub requirements: RuleSet,
    pub messages: MessageSet,
    /// Options applied directly to the bound control
    pub extra_attributes: IndexMap<String, Value>,
}

/// Result of merging a field's options over its defaults
#[derive(Debug, Clone)]
pub struct Merged {
    pub rules: RuleSet,
    pub messages: MessageSet,
    pub extra_attributes: IndexMap<String, Value>,
    pub diagnostics: Vec<ConfigError>,
}

/// Merge option entries, in order, over default rules and messages.
///
/// - A number for a known rule overrides it when it is not negative;
///   negative numbers are rejected and the default stays.
/// - A non-number for a known non-numeric rule (such as `required`)
///   overrides it.
/// - A string under `<key>Msg` replaces the message for `<key>`.
/// - Anything else is collected as an extra attribute for the control.
pub fn merge<'o, I>(
    field: &str,
    mut rules: RuleSet,
    mut messages: MessageSet,
    options: I,
    logger: &dyn Logger,
) -> Merged
where
    I: IntoIterator<Item = (&'o String, &'o Value)>,
{
    let mut extra_attributes = IndexMap::new();
    let mut diagnostics = Vec::new();

    for (key, value) in options {
        let numeric_default = rules.get(key).map(Value::is_number);
        let outcome = match (numeric_default, value) {
            (Some(_), Value::Number(n)) => {
                if *n >= 0.0 {
                    rules.set(key, value.clone());
                    Ok(())
                } else {
                    Err(ConfigError::RejectedOverride {
                        field: field.to_string(),
                        key: key.clone(),
                        value: *n,
                    })
                }
            }
            (Some(true), _) => Err(ConfigError::InvalidOption {
                field: field.to_string(),
                key: key.clone(),
                expected: "number",
                found: value.type_name(),
            }),
            (Some(false), _) => {
                rules.set(key, value.clone());
                Ok(())
            }
            (None, _) => match message_key(key, value, &messages) {
                Some((message, template)) => {
                    messages.set(&message, template.to_string());
                    Ok(())
                }
                None => {
                    extra_attributes.insert(key.clone(), value.clone());
                    if NATIVE_ATTRIBUTES.contains(&key.as_str()) {
                        Ok(())
                    } else {
                        Err(ConfigError::UnknownOption {
                            field: field.to_string(),
                            key: key.clone(),
                        })
                    }
                }
            },
        };

        match outcome {
            Ok(()) => logger.log(
                &format!("{}: Loaded option '{}' ({})", field, key, value),
                LogLevel::Debug,
            ),
            Err(err) => {
                logger.log(&err.to_string(), LogLevel::Publish);
                diagnostics.push(err);
            }
        }
    }

    Merged {
        rules,
        messages,
        extra_attributes,
        diagnostics,
    }
}

/// `minLengthMsg` → `minLength`, if that message exists and the value is a string
fn message_key<'v>(key: &str, value: &'v Value, messages: &MessageSet) -> Option<(String, &'v str)> {
    let template = value.as_str()?;
    if !key.contains("Msg") {
        return None;
    }
    let message = key.replacen("Msg", "", 1);
    messages
        .contains_key(&message)
        .then_some((message, template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RecordingLogger;
    use pretty_assertions::assert_eq;

    fn defaults() -> (RuleSet, MessageSet) {
        (
            RuleSet::from_defaults([
                ("minLength", Value::from(0)),
                ("maxLength", Value::from(-1)),
                ("required", Value::from(false)),
            ]),
            MessageSet::from_defaults([
                ("minLength", "At least {minLength}."),
                ("maxLength", "At most {maxLength}."),
            ]),
        )
    }

    fn options(entries: &[(&str, Value)]) -> IndexMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_numeric_override_and_total_key_space() {
        let (rules, messages) = defaults();
        let logger = RecordingLogger::new(LogLevel::Debug);
        let opts = options(&[("minLength", Value::from(8))]);
        let merged = merge("pw", rules, messages, &opts, &logger);

        assert_eq!(merged.rules.number("minLength"), Some(8.0));
        assert_eq!(merged.rules.number("maxLength"), Some(-1.0));
        assert_eq!(
            merged.rules.keys().collect::<Vec<_>>(),
            vec!["minLength", "maxLength", "required"]
        );
        assert!(merged.diagnostics.is_empty());
        assert!(logger.contains("pw: Loaded option 'minLength' (8)"));
    }

    #[test]
    fn test_negative_override_is_rejected() {
        let (rules, messages) = defaults();
        let logger = RecordingLogger::new(LogLevel::Debug);
        let opts = options(&[("maxLength", Value::from(-5)), ("minLength", Value::from(-1))]);
        let merged = merge("pw", rules, messages, &opts, &logger);

        assert_eq!(merged.rules.number("maxLength"), Some(-1.0));
        assert_eq!(merged.rules.number("minLength"), Some(0.0));
        assert!(merged.extra_attributes.is_empty());
        assert_eq!(merged.diagnostics.len(), 2);
        assert!(matches!(
            merged.diagnostics[0],
            ConfigError::RejectedOverride { value, .. } if value == -5.0
        ));
    }

    #[test]
    fn test_message_override_is_stored_verbatim() {
        let (rules, messages) = defaults();
        let logger = RecordingLogger::new(LogLevel::Publish);
        let opts = options(&[("minLengthMsg", Value::from("Need {minLength}!"))]);
        let merged = merge("pw", rules, messages, &opts, &logger);

        assert_eq!(merged.messages.get("minLength"), Some("Need {minLength}!"));
        assert_eq!(merged.messages.get("maxLength"), Some("At most {maxLength}."));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let (rules, messages) = defaults();
        let logger = RecordingLogger::new(LogLevel::Publish);
        let opts = options(&[
            ("pattern", Value::from("[a-z]+")),
            ("colour", Value::from("red")),
            ("fooMsg", Value::from("no such message")),
        ]);
        let merged = merge("pw", rules, messages, &opts, &logger);

        assert_eq!(merged.extra_attributes.len(), 3);
        assert_eq!(
            merged.diagnostics,
            vec![
                ConfigError::UnknownOption { field: "pw".into(), key: "colour".into() },
                ConfigError::UnknownOption { field: "pw".into(), key: "fooMsg".into() },
            ]
        );
    }

    #[test]
    fn test_non_numeric_rule_override() {
        let (rules, messages) = defaults();
        let logger = RecordingLogger::new(LogLevel::Publish);
        let opts = options(&[("required", Value::from(true)), ("minLength", Value::from("8"))]);
        let merged = merge("pw", rules, messages, &opts, &logger);

        assert_eq!(merged.rules.get("required"), Some(&Value::Bool(true)));
        assert_eq!(merged.rules.number("minLength"), Some(0.0));
        assert!(matches!(
            merged.diagnostics[0],
            ConfigError::InvalidOption { expected: "number", found: "string", .. }
        ));
    }

    #[test]
    fn test_unknown_placeholders_per_message() {
        let rules = RuleSet::from_defaults([("minSelect", 2)]);
        let messages = MessageSet::from_defaults([
            ("minSelect", "Pick {minSelect} option{s-minSelect}."),
            ("maxSelect", "Pick at most {maxSelect}."),
        ]);
        assert_eq!(
            messages.unknown_placeholders(&rules),
            vec![("maxSelect".to_string(), "maxSelect".to_string())]
        );
    }

    #[test]
    fn test_bound_sentinel() {
        assert!(!is_bounded(UNBOUNDED));
        assert!(is_bounded(0.0));
        assert!(is_bounded(12.0));
    }
}
