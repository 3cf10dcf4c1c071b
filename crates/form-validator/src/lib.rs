//! Form Validator
//!
//! Configurable validation for HTML-style form controls. A [`FormValidator`]
//! is built from a [`FormConfig`] against anything implementing
//! [`ControlLookup`], checks text inputs, radio sets, checkbox sets and
//! single-select lists in configuration order, and reports failures through
//! each control's custom validity message.
//!
//! ```
//! use form_validator::{Document, FieldOptions, FormConfig, FormControl, FormValidator};
//!
//! let doc = Document::new().with(FormControl::new("password", "password").with_value("hunter2"));
//! let config = FormConfig::new()
//!     .with_field("password", FieldOptions::new().with("minLength", 8).with("minNums", 1));
//!
//! let form = FormValidator::new(&doc, &config);
//! assert!(!form.validate());
//! assert_eq!(
//!     doc.control("password").unwrap().validation_message(),
//!     "This field must contain at least 8 characters."
//! );
//! ```

pub mod config;
pub mod control;
pub mod document;
pub mod error;
pub mod fields;
pub mod form;
pub mod logger;
pub mod native;
pub mod rules;
pub mod template;
pub mod value;

pub use config::{FieldOptions, FormConfig};
pub use control::{Binding, Control, ControlGroup, ControlKind, ControlLookup, ControlRef};
pub use document::{ControlMessage, ControlSnapshot, Document, DocumentSnapshot, FormControl};
pub use error::{ConfigError, Result};
pub use fields::{
    CharacterClass, CheckboxGroup, FieldKind, FieldValidator, RadioGroup, RequiredSelection,
    SingleSelect, TextField,
};
pub use form::{classify, FormValidator, FormValidatorBuilder};
pub use logger::{LogLevel, Logger, RecordingLogger, TracingLogger};
pub use rules::{FieldSettings, MessageSet, RuleSet, UNBOUNDED};
pub use template::MessageTemplate;
pub use value::Value;
