// File: form-validator/src/native.rs
// Purpose: Platform-style constraint checks backing FormControl::check_validity

use crate::control::ControlKind;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/$.?#][^\s]*$").unwrap()
});

/// Constraint attributes a control carries
#[derive(Debug, Clone, Default)]
pub struct Constraints<'a> {
    pub kind: Option<&'a ControlKind>,
    pub required: bool,
    /// Compiled with [`compile_pattern`]
    pub pattern: Option<&'a Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate absolute URL format
pub fn is_valid_url(url: &str) -> bool {
    URL_REGEX.is_match(url)
}

/// Compile a `pattern` attribute for whole-value matching.
///
/// An invalid pattern gives `None` and is ignored, as browsers do.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).ok()
}

/// Check a value against its constraints; empty values only fail `required`
pub fn check(value: &str, constraints: &Constraints<'_>) -> bool {
    if value.is_empty() {
        return !constraints.required;
    }

    let length = value.chars().count();
    if constraints.min_length.is_some_and(|min| length < min) {
        return false;
    }
    if constraints.max_length.is_some_and(|max| length > max) {
        return false;
    }
    if constraints.pattern.is_some_and(|pattern| !pattern.is_match(value)) {
        return false;
    }

    match constraints.kind {
        Some(ControlKind::Email) => is_valid_email(value),
        Some(ControlKind::Url) => is_valid_url(value),
        _ => true,
    }
}
