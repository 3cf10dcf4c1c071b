// File: form-validator/src/fields/select.rs
// Purpose: Required-selection and value-range checks for single-select lists

use super::{FieldCore, FieldKind, FieldValidator};
use crate::config::FieldOptions;
use crate::control::{Binding, ControlRef};
use crate::error::ConfigError;
use crate::logger::{LogLevel, Logger};
use crate::rules::{is_bounded, FieldSettings, MessageSet, RuleSet, UNBOUNDED};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use std::rc::Rc;

static DECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap()
});

/// Message for a required list with nothing selected; not configurable
pub const SELECT_REQUIRED_MESSAGE: &str = "Please select an item in the list.";

/// Validator for `select-one` controls
pub struct SingleSelect {
    control: ControlRef,
    core: FieldCore,
}

impl SingleSelect {
    pub fn new(control: ControlRef, options: &FieldOptions, logger: Rc<dyn Logger>) -> Self {
        let name = control.name();
        logger.log(&format!("Loaded select list '{}'", name), LogLevel::Debug);
        let core = FieldCore::build(
            &name,
            RuleSet::from_defaults([("minVal", Value::from(0)), ("maxVal", Value::Number(UNBOUNDED))]),
            MessageSet::from_defaults([
                ("minVal", "The selected value is too low."),
                ("maxVal", "The selected value is too high."),
            ]),
            options,
            logger,
        );
        Self { control, core }
    }

    fn fail(&self, message: &str) -> bool {
        self.control.set_custom_validity(message);
        false
    }
}

/// Numeric reading of a selected value, as a browser converts a string
/// compared against a number: blank is zero, decimal and `0x`/`0o`/`0b`
/// literals and `Infinity` parse, anything else is NaN and so never out of
/// range
fn selected_number(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    if DECIMAL_REGEX.is_match(trimmed) {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

impl FieldValidator for SingleSelect {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Select
    }

    fn binding(&self) -> Binding {
        Binding::Single(Rc::clone(&self.control))
    }

    fn validate(&self) -> bool {
        self.control.set_custom_validity("");
        let value = self.control.value();
        if self.control.required() && value.is_empty() {
            self.core.log("No item selected.", LogLevel::Alpha);
            return self.fail(SELECT_REQUIRED_MESSAGE);
        }

        let selected = selected_number(&value);
        let rules = self.core.rules();

        let min = rules.number("minVal").unwrap_or(0.0);
        if selected < min {
            self.core.log(
                &format!("Selected value {} is too low (min {})", value, min),
                LogLevel::Alpha,
            );
            return self.fail(&self.core.message("minVal"));
        }

        let max = rules.number("maxVal").unwrap_or(UNBOUNDED);
        if is_bounded(max) && selected > max {
            self.core.log(
                &format!("Selected value {} is too high (max {})", value, max),
                LogLevel::Alpha,
            );
            return self.fail(&self.core.message("maxVal"));
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
