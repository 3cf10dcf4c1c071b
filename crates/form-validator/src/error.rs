// File: form-validator/src/error.rs
// Purpose: Configuration diagnostics raised while building validators

use thiserror::Error;

/// Problems found while turning a configuration into validators.
///
/// Validation failures are not errors: they are reported through the
/// returned `bool` and the control's custom validity message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("unknown field '{field}': no control with that name")]
    UnknownField { field: String },

    #[error("unrecognized control kind '{kind}' for field '{field}'")]
    UnrecognizedKind { field: String, kind: String },

    #[error("{field}: unknown option '{key}'")]
    UnknownOption { field: String, key: String },

    #[error("{field}: option '{key}' expects {expected}, got {found}")]
    InvalidOption {
        field: String,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{field}: negative override {value} for '{key}' rejected, keeping the default")]
    RejectedOverride { field: String, key: String, value: f64 },

    #[error("{field}: message '{message}' references unknown placeholder '{{{placeholder}}}'")]
    UnknownPlaceholder {
        field: String,
        message: String,
        placeholder: String,
    },

    #[error("{field}: 'matches' names unknown control '{target}', matching the field itself")]
    UnresolvedMatch { field: String, target: String },

    #[error("{field}: required = true has no effect on a checkbox group, use minSelect = 1")]
    BooleanRequiredIgnored { field: String },
}

impl ConfigError {
    /// Warnings never fail construction, not even in strict mode
    pub fn is_warning(&self) -> bool {
        matches!(self, ConfigError::BooleanRequiredIgnored { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
