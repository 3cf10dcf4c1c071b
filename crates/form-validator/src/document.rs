// File: form-validator/src/document.rs
// Purpose: In-memory controls and form document implementing the collaborator traits

use crate::control::{Binding, Control, ControlGroup, ControlKind, ControlLookup, ControlRef};
use crate::error::ConfigError;
use crate::native::{self, Constraints};
use crate::value::Value;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A form input held in memory
#[derive(Debug)]
pub struct FormControl {
    name: String,
    id: String,
    kind: ControlKind,
    value: RefCell<String>,
    required: Cell<bool>,
    checked: Cell<bool>,
    attributes: RefCell<IndexMap<String, Value>>,
    /// Compiled `pattern` attribute, refreshed whenever it is set
    pattern: RefCell<Option<Regex>>,
    validation_message: RefCell<String>,
}

impl FormControl {
    pub fn new(name: impl Into<String>, kind: impl Into<ControlKind>) -> Self {
        Self {
            name: name.into(),
            id: String::new(),
            kind: kind.into(),
            value: RefCell::new(String::new()),
            required: Cell::new(false),
            checked: Cell::new(false),
            attributes: RefCell::new(IndexMap::new()),
            pattern: RefCell::new(None),
            validation_message: RefCell::new(String::new()),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_required(self, required: bool) -> Self {
        self.required.set(required);
        self
    }

    pub fn with_checked(self, checked: bool) -> Self {
        self.checked.set(checked);
        self
    }

    pub fn with_attribute(self, key: &str, value: impl Into<Value>) -> Self {
        self.set_attribute(key, &value.into());
        self
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn set_required(&self, required: bool) {
        self.required.set(required);
    }

    /// Current custom validity message, empty when valid
    pub fn validation_message(&self) -> String {
        self.validation_message.borrow().clone()
    }

    pub fn attribute(&self, key: &str) -> Option<Value> {
        self.attributes.borrow().get(key).cloned()
    }

    fn length_attribute(&self, key: &str) -> Option<usize> {
        self.attributes
            .borrow()
            .get(key)
            .and_then(|v| match v {
                Value::Number(n) => Some(*n),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .filter(|n| *n >= 0.0)
            .map(|n| n as usize)
    }
}

impl Control for FormControl {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn kind(&self) -> ControlKind {
        self.kind.clone()
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn required(&self) -> bool {
        self.required.get()
    }

    fn checked(&self) -> bool {
        self.checked.get()
    }

    fn set_custom_validity(&self, message: &str) {
        *self.validation_message.borrow_mut() = message.to_string();
    }

    fn check_validity(&self) -> bool {
        if !self.validation_message.borrow().is_empty() {
            return false;
        }
        match self.kind {
            ControlKind::Checkbox => !self.required.get() || self.checked.get(),
            // Radio `required` spans the whole group, which a lone control can't see
            ControlKind::Radio => true,
            _ => {
                let pattern = self.pattern.borrow();
                let constraints = Constraints {
                    kind: Some(&self.kind),
                    required: self.required.get(),
                    pattern: pattern.as_ref(),
                    min_length: self.length_attribute("minlength"),
                    max_length: self.length_attribute("maxlength"),
                };
                native::check(&self.value.borrow(), &constraints)
            }
        }
    }

    fn set_attribute(&self, key: &str, value: &Value) {
        match key {
            "required" => self.required.set(value.to_bool()),
            "checked" => self.checked.set(value.to_bool()),
            "value" => self.set_value(value.to_string()),
            "pattern" => {
                *self.pattern.borrow_mut() = value.as_str().and_then(native::compile_pattern);
                self.attributes
                    .borrow_mut()
                    .insert(key.to_string(), value.clone());
            }
            _ => {
                self.attributes
                    .borrow_mut()
                    .insert(key.to_string(), value.clone());
            }
        }
    }
}

/// Serialized form of one control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSnapshot {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: ControlKind,
    #[serde(default = "empty_value")]
    pub value: Value,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

fn default_kind() -> ControlKind {
    ControlKind::Text
}

fn empty_value() -> Value {
    Value::String(String::new())
}

impl From<ControlSnapshot> for FormControl {
    fn from(snapshot: ControlSnapshot) -> Self {
        let control = FormControl::new(snapshot.name, snapshot.kind)
            .with_id(snapshot.id)
            .with_value(snapshot.value.to_string())
            .with_required(snapshot.required)
            .with_checked(snapshot.checked);
        for (key, value) in &snapshot.attributes {
            control.set_attribute(key, value);
        }
        control
    }
}

/// Serialized form of a whole document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    #[serde(default)]
    pub controls: Vec<ControlSnapshot>,
}

/// A control's custom validity message after validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlMessage {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub message: String,
}

/// Ordered controls of one form
#[derive(Debug, Default)]
pub struct Document {
    controls: Vec<Rc<FormControl>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control and return a shared handle to it
    pub fn add(&mut self, control: FormControl) -> Rc<FormControl> {
        let control = Rc::new(control);
        self.controls.push(Rc::clone(&control));
        control
    }

    pub fn with(mut self, control: FormControl) -> Self {
        self.add(control);
        self
    }

    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Self {
        Self {
            controls: snapshot
                .controls
                .into_iter()
                .map(|c| Rc::new(FormControl::from(c)))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let snapshot: DocumentSnapshot =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn controls(&self) -> &[Rc<FormControl>] {
        &self.controls
    }

    /// First control with the given name
    pub fn control(&self, name: &str) -> Option<Rc<FormControl>> {
        self.controls.iter().find(|c| c.name == name).cloned()
    }

    pub fn control_by_id(&self, id: &str) -> Option<Rc<FormControl>> {
        self.controls
            .iter()
            .find(|c| !c.id.is_empty() && c.id == id)
            .cloned()
    }

    /// Every non-empty custom validity message, in document order
    pub fn messages(&self) -> Vec<ControlMessage> {
        self.controls
            .iter()
            .filter_map(|c| {
                let message = c.validation_message();
                (!message.is_empty()).then(|| ControlMessage {
                    name: c.name.clone(),
                    id: c.id.clone(),
                    message,
                })
            })
            .collect()
    }
}

impl ControlLookup for Document {
    fn lookup(&self, name: &str) -> Option<Binding> {
        let members: Vec<&Rc<FormControl>> =
            self.controls.iter().filter(|c| c.name == name).collect();
        let first = members.first()?;

        if first.kind.is_grouped() {
            let members = members
                .into_iter()
                .map(|c| Rc::clone(c) as ControlRef)
                .collect();
            Some(Binding::Group(ControlGroup::new(name, members)))
        } else {
            Some(Binding::Single(Rc::clone(*first) as ControlRef))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "controls": [
            {"name": "email", "type": "email", "value": "a@b.co", "required": true},
            {"name": "plan", "type": "radio", "value": "free"},
            {"name": "plan", "type": "radio", "value": "pro", "checked": true},
            {"name": "qty", "type": "select-one", "value": 3}
        ]
    }"#;

    #[test]
    fn test_snapshot_parsing() {
        let doc = Document::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(doc.controls().len(), 4);
        let qty = doc.control("qty").unwrap();
        assert_eq!(qty.value(), "3");
        assert_eq!(qty.kind(), ControlKind::SelectOne);
    }

    #[test]
    fn test_lookup_groups_radios_by_name() {
        let doc = Document::from_json_str(SNAPSHOT).unwrap();
        let binding = doc.lookup("plan").unwrap();
        let group = binding.as_group().unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.item(1).unwrap().checked());

        assert!(doc.lookup("email").unwrap().as_single().is_some());
        assert!(doc.lookup("missing").is_none());
    }

    #[test]
    fn test_custom_validity_blocks_check_validity() {
        let control = FormControl::new("name", "text").with_value("x");
        assert!(control.check_validity());
        control.set_custom_validity("bad");
        assert!(!control.check_validity());
        control.set_custom_validity("");
        assert!(control.check_validity());
    }

    #[test]
    fn test_set_attribute_updates_native_state() {
        let control = FormControl::new("name", "text");
        control.set_attribute("required", &Value::Bool(true));
        assert!(control.required());
        assert!(!control.check_validity());

        control.set_attribute("pattern", &Value::from("[a-z]+"));
        control.set_value("abc");
        assert!(control.check_validity());
        control.set_value("ABC");
        assert!(!control.check_validity());

        control.set_attribute("pattern", &Value::from("[A-Z]+"));
        assert!(control.check_validity());
        control.set_attribute("pattern", &Value::from("("));
        assert!(control.check_validity(), "an invalid pattern is ignored");
    }

    #[test]
    fn test_messages_lists_only_failures() {
        let doc = Document::from_json_str(SNAPSHOT).unwrap();
        doc.control("email").unwrap().set_custom_validity("nope");
        let messages = doc.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].name, "email");
        assert_eq!(messages[0].message, "nope");
    }
}
