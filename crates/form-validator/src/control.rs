//! Form control collaborators.
//!
//! The engine never owns form inputs. It talks to them through the
//! [`Control`] trait, the same way a browser script talks to DOM nodes:
//! handles are shared (`Rc`) and the validity setters take `&self`.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// The `type` tag of a form control
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlKind {
    Text,
    Email,
    Url,
    Password,
    Textarea,
    Radio,
    Checkbox,
    SelectOne,
    Other(String),
}

impl ControlKind {
    pub fn as_str(&self) -> &str {
        match self {
            ControlKind::Text => "text",
            ControlKind::Email => "email",
            ControlKind::Url => "url",
            ControlKind::Password => "password",
            ControlKind::Textarea => "textarea",
            ControlKind::Radio => "radio",
            ControlKind::Checkbox => "checkbox",
            ControlKind::SelectOne => "select-one",
            ControlKind::Other(kind) => kind,
        }
    }

    /// Single-value kinds handled by the text field validator
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            ControlKind::Text
                | ControlKind::Email
                | ControlKind::Url
                | ControlKind::Password
                | ControlKind::Textarea
        )
    }

    /// Kinds whose controls are grouped by name
    pub fn is_grouped(&self) -> bool {
        matches!(self, ControlKind::Radio | ControlKind::Checkbox)
    }
}

impl From<&str> for ControlKind {
    fn from(kind: &str) -> Self {
        match kind {
            "text" => ControlKind::Text,
            "email" => ControlKind::Email,
            "url" => ControlKind::Url,
            "password" => ControlKind::Password,
            "textarea" => ControlKind::Textarea,
            "radio" => ControlKind::Radio,
            "checkbox" => ControlKind::Checkbox,
            "select-one" => ControlKind::SelectOne,
            other => ControlKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ControlKind {
    fn from(kind: String) -> Self {
        ControlKind::from(kind.as_str())
    }
}

impl From<ControlKind> for String {
    fn from(kind: ControlKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bindable form input
pub trait Control {
    fn name(&self) -> String;

    /// Element id, used to single out members of a checkbox group
    fn id(&self) -> String;

    fn kind(&self) -> ControlKind;

    /// Current raw value; the empty string for an empty selection
    fn value(&self) -> String;

    fn required(&self) -> bool;

    /// Checked state of a radio or checkbox member
    fn checked(&self) -> bool;

    /// Set the custom validity message; the empty string clears it
    fn set_custom_validity(&self, message: &str);

    /// Run the platform's own constraint checks
    fn check_validity(&self) -> bool;

    /// Apply an option the engine does not model as a requirement
    fn set_attribute(&self, key: &str, value: &Value);
}

/// Shared handle to a control
pub type ControlRef = Rc<dyn Control>;

/// Ordered controls sharing one name
#[derive(Clone)]
pub struct ControlGroup {
    name: String,
    members: Vec<ControlRef>,
}

impl ControlGroup {
    pub fn new(name: impl Into<String>, members: Vec<ControlRef>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item(&self, index: usize) -> Option<&ControlRef> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlRef> {
        self.members.iter()
    }

    /// Set the same validity message on every member
    pub fn set_custom_validity(&self, message: &str) {
        for member in &self.members {
            member.set_custom_validity(message);
        }
    }
}

impl fmt::Debug for ControlGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlGroup")
            .field("name", &self.name)
            .field("len", &self.members.len())
            .finish()
    }
}

/// What a configuration entry's name resolves to
#[derive(Clone)]
pub enum Binding {
    Single(ControlRef),
    Group(ControlGroup),
}

impl Binding {
    pub fn name(&self) -> String {
        match self {
            Binding::Single(control) => control.name(),
            Binding::Group(group) => group.name().to_string(),
        }
    }

    /// Kind of the control, or of the group's first member
    pub fn kind(&self) -> Option<ControlKind> {
        match self {
            Binding::Single(control) => Some(control.kind()),
            Binding::Group(group) => group.item(0).map(|c| c.kind()),
        }
    }

    pub fn as_single(&self) -> Option<&ControlRef> {
        match self {
            Binding::Single(control) => Some(control),
            Binding::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&ControlGroup> {
        match self {
            Binding::Single(_) => None,
            Binding::Group(group) => Some(group),
        }
    }

    /// Every control behind the binding
    pub fn controls(&self) -> Vec<ControlRef> {
        match self {
            Binding::Single(control) => vec![Rc::clone(control)],
            Binding::Group(group) => group.iter().cloned().collect(),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Single(control) => f
                .debug_tuple("Single")
                .field(&control.name())
                .finish(),
            Binding::Group(group) => f.debug_tuple("Group").field(group).finish(),
        }
    }
}

/// Resolves configuration names to controls
pub trait ControlLookup {
    fn lookup(&self, name: &str) -> Option<Binding>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_strings() {
        for tag in ["text", "email", "url", "password", "textarea", "radio", "checkbox", "select-one"] {
            assert_eq!(ControlKind::from(tag).as_str(), tag);
        }
        assert_eq!(ControlKind::from("range"), ControlKind::Other("range".into()));
    }

    #[test]
    fn test_text_like_kinds() {
        assert!(ControlKind::Textarea.is_text_like());
        assert!(!ControlKind::SelectOne.is_text_like());
        assert!(!ControlKind::Other("number".into()).is_text_like());
    }
}
