// File: form-validator/src/fields/radio.rs
// Purpose: Required-selection check for radio button sets

use super::{FieldCore, FieldKind, FieldValidator};
use crate::config::FieldOptions;
use crate::control::{Binding, ControlGroup};
use crate::error::ConfigError;
use crate::logger::{LogLevel, Logger};
use crate::rules::{FieldSettings, MessageSet, RuleSet};
use crate::value::Value;
use std::rc::Rc;

/// Validator for a set of radio buttons sharing a name
pub struct RadioGroup {
    group: ControlGroup,
    core: FieldCore,
}

impl RadioGroup {
    pub fn new(group: ControlGroup, options: &FieldOptions, logger: Rc<dyn Logger>) -> Self {
        logger.log(
            &format!("Loaded radio button set '{}'", group.name()),
            LogLevel::Debug,
        );
        let core = FieldCore::build(
            group.name(),
            RuleSet::from_defaults([("required", false)]),
            MessageSet::from_defaults([("required", "Please select an option")]),
            options,
            logger,
        );
        Self { group, core }
    }

    fn required(&self) -> bool {
        self.core
            .rules()
            .get("required")
            .is_some_and(Value::to_bool)
    }
}

impl FieldValidator for RadioGroup {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Radio
    }

    fn binding(&self) -> Binding {
        Binding::Group(self.group.clone())
    }

    fn validate(&self) -> bool {
        self.group.set_custom_validity("");
        if !self.required() {
            return true;
        }
        if self.group.iter().any(|button| button.checked()) {
            return true;
        }
        self.core.log("Required button not selected.", LogLevel::Alpha);
        self.group.set_custom_validity(&self.core.message("required"));
        false
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
    use crate::control::ControlLookup;
    use crate::document::{Document, FormControl};
    use crate::logger::RecordingLogger;

    fn plan_document() -> Document {
        Document::new()
            .with(FormControl::new("plan", "radio").with_value("free"))
            .with(FormControl::new("plan", "radio").with_value("pro"))
            .with(FormControl::new("plan", "radio").with_value("team"))
    }

    fn radio(doc: &Document, options: FieldOptions) -> RadioGroup {
        let group = doc.lookup("plan").unwrap().as_group().unwrap().clone();
        RadioGroup::new(group, &options, Rc::new(RecordingLogger::new(LogLevel::Publish)))
    }

    #[test]
    fn test_not_required_always_passes() {
        let doc = plan_document();
        assert!(radio(&doc, FieldOptions::new()).validate());
    }

    #[test]
    fn test_required_sets_message_on_every_member() {
        let doc = plan_document();
        let plan = radio(&doc, FieldOptions::new().with("required", true));
        assert!(!plan.validate());
        for control in doc.controls() {
            assert_eq!(control.validation_message(), "Please select an option");
        }

        doc.controls()[1].set_checked(true);
        assert!(plan.validate());
        for control in doc.controls() {
            assert_eq!(control.validation_message(), "");
        }
    }

    #[test]
    fn test_custom_required_message() {
        let doc = plan_document();
        let plan = radio(
            &doc,
            FieldOptions::new()
                .with("required", true)
                .with("requiredMsg", "Choose a plan"),
        );
        assert!(!plan.validate());
        assert_eq!(doc.controls()[2].validation_message(), "Choose a plan");
    }
}
