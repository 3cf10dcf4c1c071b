// File: form-validator/src/fields/checkbox.rs
// Purpose: Selection-count and required-member checks for checkbox sets

use super::{FieldCore, FieldKind, FieldValidator};
use crate::config::FieldOptions;
use crate::control::{Binding, ControlGroup};
use crate::error::ConfigError;
use crate::logger::{LogLevel, Logger};
use crate::rules::{is_bounded, FieldSettings, MessageSet, RuleSet, UNBOUNDED};
use crate::value::Value;
use std::rc::Rc;

/// Which checkboxes of a group must be checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredSelection {
    Unconstrained,
    /// `required = true`. Has no effect: use `minSelect = 1` to require a selection.
    Any,
    /// The member with this id
    Specific(String),
    /// Every member whose id is listed
    Set(Vec<String>),
}

impl RequiredSelection {
    /// Interpret a `required` value; `None` if it has an unusable shape
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(RequiredSelection::Unconstrained),
            Value::Bool(false) => Some(RequiredSelection::Unconstrained),
            Value::Bool(true) => Some(RequiredSelection::Any),
            Value::Number(_) if value.to_bool() => Some(RequiredSelection::Any),
            Value::Number(_) => Some(RequiredSelection::Unconstrained),
            Value::String(id) => Some(RequiredSelection::Specific(id.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(RequiredSelection::Set),
            Value::Object(_) => None,
        }
    }

    /// Whether the member with `id` must be checked
    pub fn requires(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        match self {
            RequiredSelection::Unconstrained | RequiredSelection::Any => false,
            RequiredSelection::Specific(required) => required == id,
            RequiredSelection::Set(ids) => ids.iter().any(|required| required == id),
        }
    }
}

/// Validator for a set of checkboxes sharing a name
pub struct CheckboxGroup {
    group: ControlGroup,
    required: RequiredSelection,
    core: FieldCore,
}

impl CheckboxGroup {
    pub fn new(group: ControlGroup, options: &FieldOptions, logger: Rc<dyn Logger>) -> Self {
        logger.log(
            &format!("Loaded form checkbox set '{}'", group.name()),
            LogLevel::Debug,
        );
        let mut core = FieldCore::build(
            group.name(),
            RuleSet::from_defaults([
                ("required", Value::Bool(false)),
                ("minSelect", Value::from(0)),
                ("maxSelect", Value::Number(UNBOUNDED)),
            ]),
            MessageSet::from_defaults([
                ("required", "Please select this checkbox."),
                ("minSelect", "You must select at least {minSelect} option{s-minSelect}."),
                ("maxSelect", "You cannot select more than {maxSelect} option{s-maxSelect}."),
            ]),
            options,
            logger,
        );

        let value = core.rules().get("required").cloned().unwrap_or(Value::Null);
        let required = match RequiredSelection::from_value(&value) {
            Some(RequiredSelection::Any) => {
                core.push_diagnostic(ConfigError::BooleanRequiredIgnored {
                    field: group.name().to_string(),
                });
                RequiredSelection::Any
            }
            Some(required) => required,
            None => {
                core.push_diagnostic(ConfigError::InvalidOption {
                    field: group.name().to_string(),
                    key: "required".to_string(),
                    expected: "boolean, id or list of ids",
                    found: value.type_name(),
                });
                RequiredSelection::Unconstrained
            }
        };

        Self {
            group,
            required,
            core,
        }
    }

    pub fn required_selection(&self) -> &RequiredSelection {
        &self.required
    }
}

impl FieldValidator for CheckboxGroup {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Checkbox
    }

    fn binding(&self) -> Binding {
        Binding::Group(self.group.clone())
    }

    fn validate(&self) -> bool {
        self.group.set_custom_validity("");

        let mut checked = 0usize;
        for checkbox in self.group.iter() {
            if checkbox.checked() {
                checked += 1;
                continue;
            }
            let id = checkbox.id();
            if self.required.requires(&id) {
                self.core.log(
                    &format!("Required checkbox '{}' not selected", id),
                    LogLevel::Alpha,
                );
                checkbox.set_custom_validity(&self.core.message("required"));
                return false;
            }
        }

        let rules = self.core.rules();
        let count = checked as f64;
        let min = rules.number("minSelect").unwrap_or(0.0);
        if count < min {
            self.core.log(
                &format!("Number of checked boxes is too small (min {})", min),
                LogLevel::Alpha,
            );
            self.group.set_custom_validity(&self.core.message("minSelect"));
            return false;
        }

        let max = rules.number("maxSelect").unwrap_or(UNBOUNDED);
        if is_bounded(max) && count > max {
            self.core.log(
                &format!("Number of checked boxes is too large (max {})", max),
                LogLevel::Alpha,
            );
            self.group.set_custom_validity(&self.core.message("maxSelect"));
            return false;
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
