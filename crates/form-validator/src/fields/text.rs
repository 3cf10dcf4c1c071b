// File: form-validator/src/fields/text.rs
// Purpose: Character-class, length and cross-field checks for text-like inputs

use super::{FieldCore, FieldKind, FieldValidator};
use crate::config::FieldOptions;
use crate::control::{Binding, ControlLookup, ControlRef};
use crate::error::ConfigError;
use crate::logger::{LogLevel, Logger};
use crate::rules::{is_bounded, FieldSettings, MessageSet, RuleSet, UNBOUNDED};
use crate::value::Value;
use std::rc::Rc;

/// Characters counted by the `Symbols` class
pub const SYMBOLS: &[char] = &[
    '!', '@', '#', ':', '$', '%', '^', '&', '*', ')', '(', '+', '=', '_', '-',
];

/// Character classes with `min<Class>` / `max<Class>` requirements,
/// checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    /// Every character
    Length,
    Letters,
    UpperCase,
    LowerCase,
    Nums,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 6] = [
        CharacterClass::Length,
        CharacterClass::Letters,
        CharacterClass::UpperCase,
        CharacterClass::LowerCase,
        CharacterClass::Nums,
        CharacterClass::Symbols,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Length => "Length",
            CharacterClass::Letters => "Letters",
            CharacterClass::UpperCase => "UpperCase",
            CharacterClass::LowerCase => "LowerCase",
            CharacterClass::Nums => "Nums",
            CharacterClass::Symbols => "Symbols",
        }
    }

    pub fn contains(&self, c: char) -> bool {
        match self {
            CharacterClass::Length => true,
            CharacterClass::Letters => c.is_ascii_alphabetic(),
            CharacterClass::UpperCase => c.is_ascii_uppercase(),
            CharacterClass::LowerCase => c.is_ascii_lowercase(),
            CharacterClass::Nums => c.is_ascii_digit(),
            CharacterClass::Symbols => SYMBOLS.contains(&c),
        }
    }

    /// Number of characters of `value` in this class
    pub fn count(&self, value: &str) -> usize {
        value.chars().filter(|c| self.contains(*c)).count()
    }

    pub fn min_key(&self) -> String {
        format!("min{}", self.name())
    }

    pub fn max_key(&self) -> String {
        format!("max{}", self.name())
    }
}

fn default_rules(matches: &str) -> RuleSet {
    let mut defaults: Vec<(String, Value)> = Vec::new();
    for class in CharacterClass::ALL {
        defaults.push((class.min_key(), Value::from(0)));
        defaults.push((class.max_key(), Value::Number(UNBOUNDED)));
    }
    defaults.push(("matches".to_string(), Value::from(matches)));
    RuleSet::from_defaults(defaults)
}

fn default_messages() -> MessageSet {
    MessageSet::from_defaults([
        ("minLength", "This field must contain at least {minLength} character{s-minLength}."),
        ("maxLength", "This field cannot contain more than {maxLength} character{s-maxLength}."),
        ("minLetters", "This field must contain at least {minLetters} letter{s-minLetters}."),
        ("maxLetters", "This field cannot contain more than {maxLetters} letter{s-maxLetters}."),
        ("minUpperCase", "This field must contain at least {minUpperCase} uppercase letter{s-minUpperCase}."),
        ("maxUpperCase", "This field cannot contain more than {maxUpperCase} uppercase letter{s-maxUpperCase}."),
        ("minLowerCase", "This field must contain at least {minLowerCase} lowercase letter{s-minLowerCase}."),
        ("maxLowerCase", "This field cannot contain more than {maxLowerCase} lowercase letter{s-maxLowerCase}."),
        ("minNums", "This field must contain at least {minNums} digit{s-minNums}."),
        ("maxNums", "This field cannot contain more than {maxNums} digit{s-maxNums}."),
        ("minSymbols", "This field must contain at least {minSymbols} of the following: !@#$%^&*)(+=_-:"),
        ("maxSymbols", "This field cannot contain more than {maxSymbols} of the following: !@#$%^&*)(+=_-:"),
        ("matches", "This field must match the {matches} field."),
    ])
}

/// Validator for text, email, url, password and textarea controls
pub struct TextField {
    control: ControlRef,
    matches: ControlRef,
    core: FieldCore,
}

impl TextField {
    /// Build a text field validator.
    ///
    /// A `matches` option names another control, resolved through `lookup`;
    /// without one the field matches itself.
    pub fn new(
        control: ControlRef,
        options: &FieldOptions,
        lookup: &dyn ControlLookup,
        logger: Rc<dyn Logger>,
    ) -> Self {
        let name = control.name();
        logger.log(&format!("Loaded form text field '{}'", name), LogLevel::Debug);

        let (matches, match_error) = match options.get("matches") {
            None => (Rc::clone(&control), None),
            Some(Value::String(target)) => match lookup.lookup(target) {
                Some(Binding::Single(other)) => (other, None),
                Some(Binding::Group(group)) => match group.item(0) {
                    Some(first) => (Rc::clone(first), None),
                    None => (Rc::clone(&control), Some(unresolved(&name, target))),
                },
                None => (Rc::clone(&control), Some(unresolved(&name, target))),
            },
            Some(other) => (
                Rc::clone(&control),
                Some(ConfigError::InvalidOption {
                    field: name.clone(),
                    key: "matches".to_string(),
                    expected: "control name",
                    found: other.type_name(),
                }),
            ),
        };

        let options = options.iter().filter(|(key, _)| key.as_str() != "matches");
        let mut core = FieldCore::build(
            &name,
            default_rules(&matches.name()),
            default_messages(),
            options,
            logger,
        );
        if let Some(err) = match_error {
            core.push_diagnostic(err);
        }

        Self {
            control,
            matches,
            core,
        }
    }

    fn fail(&self, key: &str) -> bool {
        let message = self.core.message(key);
        self.control.set_custom_validity(&message);
        false
    }
}

fn unresolved(field: &str, target: &str) -> ConfigError {
    ConfigError::UnresolvedMatch {
        field: field.to_string(),
        target: target.to_string(),
    }
}

impl FieldValidator for TextField {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn binding(&self) -> Binding {
        Binding::Single(Rc::clone(&self.control))
    }

    fn validate(&self) -> bool {
        let value = self.control.value();
        self.control.set_custom_validity("");
        if !self.control.check_validity() {
            self.core.log("Native validation failed.", LogLevel::Alpha);
            return false;
        }

        let rules = self.core.rules();
        for class in CharacterClass::ALL {
            let count = class.count(&value) as f64;
            let (min_key, max_key) = (class.min_key(), class.max_key());

            let min = rules.number(&min_key).unwrap_or(0.0);
            if count < min {
                self.core.log(
                    &format!("{} is too small (min {})", class.name(), min),
                    LogLevel::Alpha,
                );
                return self.fail(&min_key);
            }

            let max = rules.number(&max_key).unwrap_or(UNBOUNDED);
            if is_bounded(max) && count > max {
                self.core.log(
                    &format!("{} is too large (max {})", class.name(), max),
                    LogLevel::Alpha,
                );
                return self.fail(&max_key);
            }
        }

        if value != self.matches.value() {
            self.core.log(
                &format!(
                    "Value does not match required field '{}'",
                    self.matches.name()
                ),
                LogLevel::Alpha,
            );
            return self.fail("matches");
        }

        true
    }

    fn settings(&self) -> FieldSettings {
        self.core.settings()
    }

    fn diagnostics(&self) -> &[ConfigError] {
        self.core.diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Control;
    use crate::document::{Document, FormControl};
    use crate::logger::RecordingLogger;
    use rstest::rstest;

    fn field(doc: &Document, name: &str, options: FieldOptions) -> TextField {
        let control = doc.control(name).unwrap();
        let field = TextField::new(control, &options, doc, Rc::new(RecordingLogger::new(LogLevel::Publish)));
        field.apply_attributes();
        field
    }

    #[rstest]
    #[case(CharacterClass::Length, "Ab1!é", 5)]
    #[case(CharacterClass::Letters, "Ab1!é", 2)]
    #[case(CharacterClass::UpperCase, "AbCd", 2)]
    #[case(CharacterClass::LowerCase, "AbCd", 2)]
    #[case(CharacterClass::Nums, "a1b22", 3)]
    #[case(CharacterClass::Symbols, "a!b@c.d_(", 4)]
    fn test_character_class_counts(
        #[case] class: CharacterClass,
        #[case] value: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(class.count(value), expected);
    }

    #[test]
    fn test_strong_password_passes() {
        let doc = Document::new().with(FormControl::new("pw", "password").with_value("Password1!"));
        let pw = field(
            &doc,
            "pw",
            FieldOptions::new()
                .with("minLength", 8)
                .with("minUpperCase", 1)
                .with("minNums", 1)
                .with("minSymbols", 1),
        );
        assert!(pw.validate());
        assert_eq!(doc.control("pw").unwrap().validation_message(), "");
    }

    #[test]
    fn test_short_value_gets_pluralized_message() {
        let doc = Document::new().with(FormControl::new("pw", "password").with_value("pw"));
        let pw = field(&doc, "pw", FieldOptions::new().with("minLength", 8));
        assert!(!pw.validate());
        assert_eq!(
            doc.control("pw").unwrap().validation_message(),
            "This field must contain at least 8 characters."
        );
    }

    #[test]
    fn test_maximum_checks() {
        let doc = Document::new().with(FormControl::new("code", "text").with_value("ab123"));
        let code = field(&doc, "code", FieldOptions::new().with("maxNums", 1));
        assert!(!code.validate());
        assert_eq!(
            doc.control("code").unwrap().validation_message(),
            "This field cannot contain more than 1 digit."
        );
    }

    #[test]
    fn test_first_violation_in_class_order_wins() {
        let doc = Document::new().with(FormControl::new("pw", "password").with_value("abc"));
        let pw = field(
            &doc,
            "pw",
            FieldOptions::new().with("minNums", 1).with("minLength", 5),
        );
        assert!(!pw.validate());
        assert!(doc
            .control("pw")
            .unwrap()
            .validation_message()
            .contains("at least 5 characters"));
    }

    #[test]
    fn test_matches_other_field() {
        let doc = Document::new()
            .with(FormControl::new("a", "text").with_value("abc"))
            .with(FormControl::new("b", "text").with_value("abc"));
        let a = field(&doc, "a", FieldOptions::new().with("matches", "b"));
        assert!(a.validate());

        doc.control("b").unwrap().set_value("abd");
        assert!(!a.validate());
        assert_eq!(
            doc.control("a").unwrap().validation_message(),
            "This field must match the b field."
        );
    }

    #[test]
    fn test_unresolved_match_falls_back_to_self() {
        let doc = Document::new().with(FormControl::new("a", "text").with_value("abc"));
        let a = field(&doc, "a", FieldOptions::new().with("matches", "ghost"));
        assert!(a.validate());
        assert_eq!(a.settings().requirements.get("matches"), Some(&Value::from("a")));
        assert!(matches!(
            a.diagnostics(),
            [ConfigError::UnresolvedMatch { target, .. }] if target == "ghost"
        ));
    }

    #[test]
    fn test_native_failure_leaves_no_custom_message() {
        let doc = Document::new().with(FormControl::new("email", "email").with_value("nope"));
        let email = field(&doc, "email", FieldOptions::new().with("minLength", 1));
        assert!(!email.validate());
        assert_eq!(doc.control("email").unwrap().validation_message(), "");
    }

    #[test]
    fn test_pass_through_attribute_reaches_control() {
        let doc = Document::new().with(FormControl::new("name", "text"));
        let name = field(&doc, "name", FieldOptions::new().with("required", true));
        let control = doc.control("name").unwrap();
        assert!(control.required());
        assert!(!name.validate());

        control.set_value("x");
        assert!(name.validate());
        assert!(name.settings().extra_attributes.contains_key("required"));
    }

    #[test]
    fn test_custom_message_renders_lazily() {
        let doc = Document::new().with(FormControl::new("pw", "password").with_value("abc"));
        let pw = field(
            &doc,
            "pw",
            FieldOptions::new()
                .with("minLengthMsg", "Need {minLength}, got fewer.")
                .with("minLength", 6),
        );
        assert!(!pw.validate());
        assert_eq!(doc.control("pw").unwrap().validation_message(), "Need 6, got fewer.");
    }
}
