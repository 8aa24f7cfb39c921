//! Limits applied while building forms from raw request bodies.

use crate::ConfigError;
use serde::Deserialize;

/// Default maximum url-encoded body size (10 MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Default maximum multipart body size (32 MB).
pub const DEFAULT_MAX_MULTIPART_BODY_SIZE: usize = 32 * 1024 * 1024;

/// Default maximum size per multipart part (10 MB).
pub const DEFAULT_MAX_FIELD_SIZE: usize = 10 * 1024 * 1024;

/// Default maximum number of fields.
pub const DEFAULT_MAX_FIELDS: usize = 100;

/// Configuration for form parsing.
///
/// Can be built in code or loaded from TOML. Missing keys fall back to the
/// defaults; unknown keys are rejected.
///
/// # Example
///
/// ```rust
/// use safehttp_form::FormConfig;
///
/// let config = FormConfig::from_toml_str(
///     r#"
///     max_body_size = 4096
///     max_fields = 10
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.max_body_size, 4096);
/// assert_eq!(config.max_fields, 10);
/// assert_eq!(config.max_field_size, safehttp_form::DEFAULT_MAX_FIELD_SIZE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Maximum url-encoded body size in bytes.
    pub max_body_size: usize,
    /// Maximum multipart body size in bytes.
    pub max_multipart_body_size: usize,
    /// Maximum size per multipart part in bytes.
    pub max_field_size: usize,
    /// Maximum number of fields allowed.
    pub max_fields: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_multipart_body_size: DEFAULT_MAX_MULTIPART_BODY_SIZE,
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
            max_fields: DEFAULT_MAX_FIELDS,
        }
    }
}

impl FormConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum url-encoded body size.
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Set the maximum multipart body size.
    #[must_use]
    pub fn max_multipart_body_size(mut self, size: usize) -> Self {
        self.max_multipart_body_size = size;
        self
    }

    /// Set the maximum field size.
    #[must_use]
    pub fn max_field_size(mut self, size: usize) -> Self {
        self.max_field_size = size;
        self
    }

    /// Set the maximum number of fields.
    #[must_use]
    pub fn max_fields(mut self, count: usize) -> Self {
        self.max_fields = count;
        self
    }

    /// Parses and validates a configuration from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects limits that would refuse every request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_body_size", self.max_body_size),
            ("max_multipart_body_size", self.max_multipart_body_size),
            ("max_field_size", self.max_field_size),
            ("max_fields", self.max_fields),
        ];

        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}
