// File: form-validator/src/form.rs
// Purpose: Build field validators from a configuration and run them in order

use crate::config::{FieldOptions, FormConfig};
use crate::control::{Binding, ControlKind, ControlLookup};
use crate::error::ConfigError;
use crate::fields::{CheckboxGroup, FieldKind, FieldValidator, RadioGroup, SingleSelect, TextField};
use crate::logger::{LogLevel, Logger, TracingLogger};
use crate::rules::FieldSettings;
use indexmap::IndexMap;
use std::rc::Rc;

/// Which validator a binding gets, if any
pub fn classify(binding: &Binding) -> Option<FieldKind> {
    match binding {
        Binding::Single(control) => match control.kind() {
            kind if kind.is_text_like() => Some(FieldKind::Text),
            ControlKind::SelectOne => Some(FieldKind::Select),
            _ => None,
        },
        Binding::Group(group) => match group.item(0).map(|first| first.kind()) {
            Some(ControlKind::Radio) => Some(FieldKind::Radio),
            Some(ControlKind::Checkbox) => Some(FieldKind::Checkbox),
            _ => None,
        },
    }
}

/// Configures how a [`FormValidator`] is built
pub struct FormValidatorBuilder {
    logger: Option<Rc<dyn Logger>>,
    verbosity: LogLevel,
    strict: bool,
}

impl Default for FormValidatorBuilder {
    fn default() -> Self {
        Self {
            logger: None,
            verbosity: LogLevel::Debug,
            strict: false,
        }
    }
}

impl FormValidatorBuilder {
    /// Threshold for the default `tracing` logger
    pub fn verbosity(mut self, level: LogLevel) -> Self {
        self.verbosity = level;
        self
    }

    /// Use a custom logger; `verbosity` is then the logger's own business
    pub fn logger(mut self, logger: Rc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Fail on unknown options, negative overrides, unresolvable names and
    /// unknown message placeholders instead of skipping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the validator. Controls are only touched once the
    /// configuration is accepted: a strict failure leaves them as they were.
    pub fn build(self, lookup: &dyn ControlLookup, config: &FormConfig) -> Result<FormValidator, ConfigError> {
        let strict = self.strict;
        let validator = self.construct(lookup, config);
        if strict {
            if let Some(err) = validator.diagnostics.iter().find(|d| !d.is_warning()) {
                return Err(err.clone());
            }
        }
        validator.apply_attributes();
        Ok(validator)
    }

    fn construct(self, lookup: &dyn ControlLookup, config: &FormConfig) -> FormValidator {
        let logger = self
            .logger
            .unwrap_or_else(|| Rc::new(TracingLogger::new(self.verbosity)));
        let mut form = FormValidator {
            items: Vec::with_capacity(config.len()),
            diagnostics: Vec::new(),
            logger,
        };

        for (name, options) in config.fields() {
            match form.build_field(name, options, lookup) {
                Ok(field) => form.insert(field),
                Err(err) => {
                    form.logger.log(&err.to_string(), LogLevel::Publish);
                    form.diagnostics.push(err);
                }
            }
        }

        form.logger.log(
            &format!("Loaded {} of {} configured fields", form.items.len(), config.len()),
            LogLevel::Beta,
        );
        form
    }
}

/// Ordered field validators for one form
pub struct FormValidator {
    items: Vec<Box<dyn FieldValidator>>,
    diagnostics: Vec<ConfigError>,
    logger: Rc<dyn Logger>,
}

impl FormValidator {
    /// Build validators for every configured field that resolves to a
    /// supported control. Misconfigured entries are logged and skipped.
    pub fn new(lookup: &dyn ControlLookup, config: &FormConfig) -> Self {
        let form = Self::builder().construct(lookup, config);
        form.apply_attributes();
        form
    }

    pub fn builder() -> FormValidatorBuilder {
        FormValidatorBuilder::default()
    }

    fn build_field(
        &self,
        name: &str,
        options: &FieldOptions,
        lookup: &dyn ControlLookup,
    ) -> Result<Box<dyn FieldValidator>, ConfigError> {
        let binding = lookup.lookup(name).ok_or_else(|| ConfigError::UnknownField {
            field: name.to_string(),
        })?;
        let logger = Rc::clone(&self.logger);

        let field: Box<dyn FieldValidator> = match (classify(&binding), binding) {
            (Some(FieldKind::Text), Binding::Single(control)) => {
                Box::new(TextField::new(control, options, lookup, logger))
            }
            (Some(FieldKind::Radio), Binding::Group(group)) => {
                Box::new(RadioGroup::new(group, options, logger))
            }
            (Some(FieldKind::Checkbox), Binding::Group(group)) => {
                Box::new(CheckboxGroup::new(group, options, logger))
            }
            (Some(FieldKind::Select), Binding::Single(control)) => {
                Box::new(SingleSelect::new(control, options, logger))
            }
            (_, binding) => {
                return Err(ConfigError::UnrecognizedKind {
                    field: name.to_string(),
                    kind: binding
                        .kind()
                        .map(|kind| kind.to_string())
                        .unwrap_or_else(|| "empty group".to_string()),
                })
            }
        };
        Ok(field)
    }

    /// Append a validator; it runs after the configured ones
    pub fn push(&mut self, field: Box<dyn FieldValidator>) {
        field.apply_attributes();
        self.insert(field);
    }

    fn insert(&mut self, field: Box<dyn FieldValidator>) {
        self.diagnostics.extend(field.diagnostics().iter().cloned());
        self.items.push(field);
    }

    fn apply_attributes(&self) {
        for field in &self.items {
            field.apply_attributes();
        }
    }

    /// Validate fields in order, stopping at the first failure
    pub fn validate(&self) -> bool {
        for field in &self.items {
            if !field.validate() {
                self.logger.log(
                    &format!("Validation stopped at '{}'", field.name()),
                    LogLevel::Beta,
                );
                return false;
            }
        }
        true
    }

    /// Validate every field without stopping; names of the failing ones
    pub fn validate_all(&self) -> Vec<String> {
        let failed: Vec<String> = self
            .items
            .iter()
            .filter(|field| !field.validate())
            .map(|field| field.name().to_string())
            .collect();
        self.logger.log(
            &format!("{} of {} fields failed", failed.len(), self.items.len()),
            LogLevel::Beta,
        );
        failed
    }

    /// The bound controls and groups, in validation order
    pub fn items(&self) -> Vec<Binding> {
        self.items.iter().map(|field| field.binding()).collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = &dyn FieldValidator> {
        self.items.iter().map(|field| field.as_ref())
    }

    pub fn field(&self, name: &str) -> Option<&dyn FieldValidator> {
        self.fields().find(|field| field.name() == name)
    }

    /// Every field's resolved settings, keyed by field name
    pub fn settings(&self) -> IndexMap<String, FieldSettings> {
        self.items
            .iter()
            .map(|field| (field.name().to_string(), field.settings()))
            .collect()
    }

    /// Everything reported while building, in configuration order
    pub fn diagnostics(&self) -> &[ConfigError] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Control;
    use crate::document::{Document, FormControl};
    use crate::logger::RecordingLogger;
    use crate::value::Value;

    fn document() -> Document {
        Document::new()
            .with(FormControl::new("name", "text").with_value("Ada"))
            .with(FormControl::new("age", "number").with_value("36"))
            .with(FormControl::new("plan", "radio"))
            .with(FormControl::new("opts", "checkbox"))
            .with(FormControl::new("size", "select-one").with_value("2"))
    }

    #[test]
    fn test_classification() {
        let doc = document();
        let kinds: Vec<Option<FieldKind>> = ["name", "age", "plan", "opts", "size"]
            .iter()
            .map(|name| classify(&doc.lookup(name).unwrap()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(FieldKind::Text),
                None,
                Some(FieldKind::Radio),
                Some(FieldKind::Checkbox),
                Some(FieldKind::Select),
            ]
        );
    }

    #[test]
    fn test_misconfigured_entries_are_skipped() {
        let doc = document();
        let config = FormConfig::new()
            .with_field("ghost", FieldOptions::new())
            .with_field("age", FieldOptions::new().with("minLength", 3))
            .with_field("name", FieldOptions::new().with("minLength", 2));
        let logger = Rc::new(RecordingLogger::new(LogLevel::Publish));
        let form = FormValidator::builder()
            .logger(logger.clone())
            .build(&doc, &config)
            .unwrap();

        assert_eq!(form.len(), 1);
        assert_eq!(form.items()[0].name(), "name");
        assert_eq!(
            form.diagnostics(),
            &[
                ConfigError::UnknownField { field: "ghost".into() },
                ConfigError::UnrecognizedKind { field: "age".into(), kind: "number".into() },
            ]
        );
        assert!(logger.contains("unknown field 'ghost'"));
        assert!(form.validate());
    }

    #[test]
    fn test_strict_mode_rejects_unknown_option() {
        let doc = document();
        let config = FormConfig::new()
            .with_field("name", FieldOptions::new().with("required", true).with("colour", "red"));
        let err = FormValidator::builder()
            .strict(true)
            .logger(Rc::new(RecordingLogger::new(LogLevel::Publish)))
            .build(&doc, &config)
            .err();
        assert_eq!(
            err,
            Some(ConfigError::UnknownOption { field: "name".into(), key: "colour".into() })
        );
    }

    #[test]
    fn test_strict_mode_rejects_unknown_placeholder() {
        let doc = document();
        let config = FormConfig::new().with_field(
            "name",
            FieldOptions::new().with("minLengthMsg", "At least {minimum} characters"),
        );
        let result = FormValidator::builder()
            .strict(true)
            .logger(Rc::new(RecordingLogger::new(LogLevel::Publish)))
            .build(&doc, &config);
        assert!(matches!(
            result,
            Err(ConfigError::UnknownPlaceholder { ref placeholder, .. }) if placeholder == "minimum"
        ));

        // The permissive default keeps the field and drops the placeholder
        let form = FormValidator::builder()
            .logger(Rc::new(RecordingLogger::new(LogLevel::Publish)))
            .build(&doc, &config)
            .unwrap();
        assert_eq!(
            form.field("name").unwrap().message("minLength").as_deref(),
            Some("At least  characters")
        );
    }

    #[test]
    fn test_rejected_strict_build_leaves_controls_untouched() {
        let doc = document();
        let config = FormConfig::new().with_field(
            "name",
            FieldOptions::new()
                .with("required", true)
                .with("pattern", "[a-z]+")
                .with("colour", "red"),
        );
        let result = FormValidator::builder()
            .strict(true)
            .logger(Rc::new(RecordingLogger::new(LogLevel::Publish)))
            .build(&doc, &config);
        assert!(result.is_err());

        let name = doc.control("name").unwrap();
        assert!(!name.required());
        assert_eq!(name.attribute("pattern"), None);
        assert_eq!(name.attribute("colour"), None);
        assert!(name.check_validity());

        // Accepted builds write the same attributes
        let form = FormValidator::builder()
            .logger(Rc::new(RecordingLogger::new(LogLevel::Publish)))
            .build(&doc, &config)
            .unwrap();
        assert!(name.required());
        assert_eq!(name.attribute("pattern"), Some(Value::from("[a-z]+")));
        assert!(!form.validate(), "'Ada' does not match [a-z]+");
    }

    #[test]
    fn test_strict_mode_allows_warnings() {
        let doc = document();
        let config = FormConfig::new().with_field("opts", FieldOptions::new().with("required", true));
        let form = FormValidator::builder()
            .strict(true)
            .logger(Rc::new(RecordingLogger::new(LogLevel::Publish)))
            .build(&doc, &config)
            .unwrap();
        assert_eq!(form.len(), 1);
        assert!(form.diagnostics()[0].is_warning());
    }
}
