//! Form Validator WASM
//!
//! WebAssembly bindings for form-validator.
//! Validates a snapshot of the page's form controls against a field
//! configuration and hands the resulting messages back to JavaScript.

use form_validator::{
    ConfigError, ControlMessage, Document, DocumentSnapshot, FieldSettings, FormConfig,
    FormValidator, LogLevel, Logger,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Writes validator diagnostics to the browser console
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    threshold: LogLevel,
}

impl ConsoleLogger {
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }
}

impl Logger for ConsoleLogger {
    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, message: &str, level: LogLevel) {
        let line = JsValue::from_str(&format!("[{}] {}", level, message));
        match level {
            LogLevel::Publish => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }
}

/// Options accepted by every entry point
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOptions {
    #[serde(default)]
    pub verbosity: LogLevel,
    #[serde(default)]
    pub strict: bool,
    /// Keep validating after the first failing field
    #[serde(default)]
    pub all: bool,
}

/// Validation outcome returned to JavaScript
#[derive(Serialize, Debug)]
pub struct FormReport {
    pub valid: bool,
    pub messages: Vec<ControlMessage>,
    pub diagnostics: Vec<String>,
}

fn build(document: &Document, config: &FormConfig, options: &ValidateOptions) -> Result<FormValidator, ConfigError> {
    FormValidator::builder()
        .logger(Rc::new(ConsoleLogger::new(options.verbosity)))
        .strict(options.strict)
        .build(document, config)
}

/// Validate a parsed snapshot; the Rust side of `validateForm`
pub fn run(snapshot: DocumentSnapshot, config: &FormConfig, options: &ValidateOptions) -> Result<FormReport, ConfigError> {
    let document = Document::from_snapshot(snapshot);
    let form = build(&document, config, options)?;
    let valid = if options.all {
        form.validate_all().is_empty()
    } else {
        form.validate()
    };
    Ok(FormReport {
        valid,
        messages: document.messages(),
        diagnostics: form.diagnostics().iter().map(ToString::to_string).collect(),
    })
}

/// Resolved settings of every field; the Rust side of `fieldSettings`
pub fn settings(snapshot: DocumentSnapshot, config: &FormConfig, options: &ValidateOptions) -> Result<IndexMap<String, FieldSettings>, ConfigError> {
    let document = Document::from_snapshot(snapshot);
    let form = build(&document, config, options)?;
    Ok(form.settings())
}

fn parse_options(options: JsValue) -> Result<ValidateOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ValidateOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))
}

fn parse_inputs(form: JsValue, config: JsValue) -> Result<(DocumentSnapshot, FormConfig), JsValue> {
    let snapshot: DocumentSnapshot = serde_wasm_bindgen::from_value(form)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form: {}", e)))?;
    let config: FormConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    Ok((snapshot, config))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Validate a form snapshot
///
/// # Arguments
/// * `form` - `{ controls: [{ name, type, id?, value?, required?, checked? }] }`
/// * `config` - field name to options, in validation order
/// * `options` - optional `{ verbosity, strict, all }`
///
/// # Returns
/// `{ valid, messages: [{ name, id?, message }], diagnostics: [string] }`
///
/// # Example (JavaScript)
/// ```javascript
/// const report = validateForm(
///     { controls: [{ name: 'password', type: 'password', value: 'pw' }] },
///     { password: { minLength: 8, minNums: 1 } },
///     { verbosity: 'publish' }
/// );
/// ```
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: JsValue, config: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let options = parse_options(options)?;
    let (snapshot, config) = parse_inputs(form, config)?;
    let report = run(snapshot, &config, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&report)
}

/// Resolved requirements, messages and extra attributes of every field
#[wasm_bindgen(js_name = fieldSettings)]
pub fn field_settings(form: JsValue, config: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let options = parse_options(options)?;
    let (snapshot, config) = parse_inputs(form, config)?;
    let settings = settings(snapshot, &config, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&settings)
}

/// Quick email check, same rules as `type="email"` controls
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    form_validator::native::is_valid_email(email)
}

/// Quick URL check, same rules as `type="url"` controls
#[wasm_bindgen(js_name = isValidUrl)]
pub fn is_valid_url_js(url: &str) -> bool {
    form_validator::native::is_valid_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_validator::FieldOptions;
    use wasm_bindgen_test::*;

    fn snapshot(json: &str) -> DocumentSnapshot {
        serde_json::from_str(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_run_reports_messages() {
        let form = snapshot(r#"{"controls": [{"name": "password", "type": "password", "value": "pw"}]}"#);
        let config = FormConfig::new().with_field("password", FieldOptions::new().with("minLength", 8));
        let report = run(form, &config, &ValidateOptions::default()).unwrap();

        assert!(!report.valid);
        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.messages[0].message, "This field must contain at least 8 characters.");
    }

    #[wasm_bindgen_test]
    fn test_strict_option() {
        let form = snapshot(r#"{"controls": [{"name": "email", "type": "email"}]}"#);
        let config = FormConfig::new().with_field("email", FieldOptions::new().with("colour", "red"));
        let options = ValidateOptions { strict: true, ..Default::default() };
        assert!(run(form, &config, &options).is_err());
    }

    #[wasm_bindgen_test]
    fn test_quick_checks() {
        assert!(is_valid_email_js("user@example.com"));
        assert!(!is_valid_email_js("invalid-email"));
        assert!(is_valid_url_js("https://example.com"));
        assert!(!is_valid_url_js("not-a-url"));
    }
}
