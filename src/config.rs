//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::validation::LengthBounds;

/// Wizard configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Allowed length of the display name.
    pub name_length: LengthBounds,
    /// Allowed length of the password.
    pub password_length: LengthBounds,
    /// Upper bound on each call to the registration backend.
    pub submission_timeout: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            name_length: LengthBounds::default(),
            password_length: LengthBounds::default(),
            submission_timeout: Duration::from_secs(10),
        }
    }
}

impl WizardConfig {
    /// Reject configurations the wizard cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bounds("name_length", &self.name_length)?;
        check_bounds("password_length", &self.password_length)?;
        if self.submission_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "submission_timeout".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn check_bounds(key: &str, bounds: &LengthBounds) -> Result<(), ConfigError> {
    if bounds.min == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "minimum must be at least 1, empty values are handled by the required rule"
                .to_string(),
        });
    }
    if bounds.min > bounds.max {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("minimum {} exceeds maximum {}", bounds.min, bounds.max),
        });
    }
    Ok(())
}
