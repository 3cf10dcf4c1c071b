//! Per-control-kind validators.
//!
//! Each variant binds one control (or group) to a [`RuleSet`] and a
//! [`MessageSet`] built once from its options. `validate` can be called any
//! number of times; it only touches the controls' validity messages.

mod checkbox;
mod radio;
mod select;
mod text;

pub use checkbox::{CheckboxGroup, RequiredSelection};
pub use radio::RadioGroup;
pub use select::{SingleSelect, SELECT_REQUIRED_MESSAGE};
pub use text::{CharacterClass, TextField, SYMBOLS};

use crate::control::Binding;
use crate::error::ConfigError;
use crate::logger::{LogLevel, Logger};
use crate::rules::{self, FieldSettings, MessageSet, RuleSet};
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Which validator variant a field uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Radio,
    Checkbox,
    Select,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text field"),
            FieldKind::Radio => write!(f, "radio button set"),
            FieldKind::Checkbox => write!(f, "checkbox set"),
            FieldKind::Select => write!(f, "select list"),
        }
    }
}

/// Validation for one configured field
pub trait FieldValidator {
    fn name(&self) -> &str;

    fn kind(&self) -> FieldKind;

    /// The control or group this validator is bound to
    fn binding(&self) -> Binding;

    /// Check the field, setting or clearing validity messages; `true` if it passes
    fn validate(&self) -> bool;

    /// Resolved requirements, messages and pass-through attributes
    fn settings(&self) -> FieldSettings;

    /// Problems found while building the validator
    fn diagnostics(&self) -> &[ConfigError] {
        &[]
    }

    /// Render one message with the current requirements
    fn message(&self, key: &str) -> Option<String> {
        let settings = self.settings();
        settings.messages.render(key, &settings.requirements)
    }

    /// Write the pass-through attributes onto every bound control
    fn apply_attributes(&self) {
        let attributes = self.settings().extra_attributes;
        if attributes.is_empty() {
            return;
        }
        for control in self.binding().controls() {
            for (key, value) in &attributes {
                control.set_attribute(key, value);
            }
        }
    }
}

/// State every validator variant shares
pub(crate) struct FieldCore {
    name: String,
    rules: RuleSet,
    messages: MessageSet,
    extra_attributes: IndexMap<String, Value>,
    diagnostics: Vec<ConfigError>,
    logger: Rc<dyn Logger>,
}

impl FieldCore {
    /// Merge options over the defaults. Pass-through attributes are kept
    /// for [`FieldValidator::apply_attributes`], not written yet.
    pub(crate) fn build<'o, I>(
        name: &str,
        defaults: RuleSet,
        messages: MessageSet,
        options: I,
        logger: Rc<dyn Logger>,
    ) -> Self
    where
        I: IntoIterator<Item = (&'o String, &'o Value)>,
    {
        let merged = rules::merge(name, defaults, messages, options, logger.as_ref());
        let mut diagnostics = merged.diagnostics;

        for (message, placeholder) in merged.messages.unknown_placeholders(&merged.rules) {
            let err = ConfigError::UnknownPlaceholder {
                field: name.to_string(),
                message,
                placeholder,
            };
            logger.log(&err.to_string(), LogLevel::Publish);
            diagnostics.push(err);
        }

        Self {
            name: name.to_string(),
            rules: merged.rules,
            messages: merged.messages,
            extra_attributes: merged.extra_attributes,
            diagnostics,
            logger,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub(crate) fn diagnostics(&self) -> &[ConfigError] {
        &self.diagnostics
    }

    pub(crate) fn push_diagnostic(&mut self, err: ConfigError) {
        self.logger.log(&err.to_string(), LogLevel::Publish);
        self.diagnostics.push(err);
    }

    pub(crate) fn log(&self, message: &str, level: LogLevel) {
        self.logger.log(&format!("{}: {}", self.name, message), level);
    }

    /// Render a message, logging the result
    pub(crate) fn message(&self, key: &str) -> String {
        let rendered = self.messages.render(key, &self.rules).unwrap_or_default();
        self.log(
            &format!("Parsed message '{}' as \"{}\"", key, rendered),
            LogLevel::Debug,
        );
        rendered
    }

    pub(crate) fn settings(&self) -> FieldSettings {
        FieldSettings {
            requirements: self.rules.clone(),
            messages: self.messages.clone(),
            extra_attributes: self.extra_attributes.clone(),
        }
    }
}
