//! Field identifiers and the validation error taxonomy.

use serde::Serialize;

/// A form field known to the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Email,
    Name,
    Password,
}

impl Field {
    /// Look up a field by the name the presentation layer uses for it.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(Self::Email),
            "name" => Some(Self::Name),
            "password" => Some(Self::Password),
            _ => None,
        }
    }

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email:",
            Self::Name => "Name:",
            Self::Password => "Password:",
        }
    }

    /// Whether the input should be masked when rendered.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Password => "password",
        };
        write!(f, "{s}")
    }
}

/// A single validation failure for a field value.
///
/// `TooShort` and `TooLong` together form the length rule; `Format` only
/// ever applies to the email field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: Field },

    #[error("{field} is not a valid email address")]
    Format { field: Field },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: Field, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: Field, max: usize },
}

impl FieldError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            Self::Required { field }
            | Self::Format { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. } => *field,
        }
    }

    /// Whether this is one of the two length errors.
    pub fn is_length(&self) -> bool {
        matches!(self, Self::TooShort { .. } | Self::TooLong { .. })
    }

    /// Message rendered inline beneath the field.
    pub fn message(&self) -> String {
        match self {
            Self::Required { field: Field::Email } => "Required!".to_string(),
            Self::Required { field: Field::Name } => "Name Required!".to_string(),
            Self::Required {
                field: Field::Password,
            } => "Password Required!".to_string(),
            Self::Format { .. } => "Invalid email format".to_string(),
            Self::TooShort { min, .. } => format!("Minimum {min} characters"),
            Self::TooLong { max, .. } => format!("Maximum {max} characters"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_matches_display() {
        for field in [Field::Email, Field::Name, Field::Password] {
            assert_eq!(Field::from_name(&field.to_string()), Some(field));
        }
        assert_eq!(Field::from_name("username"), None);
        assert_eq!(Field::from_name("Email"), None);
    }

    #[test]
    fn display_matches_serde() {
        for field in [Field::Email, Field::Name, Field::Password] {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(format!("\"{field}\""), json);
        }
    }

    #[test]
    fn required_messages_are_per_field() {
        assert_eq!(
            FieldError::Required { field: Field::Email }.message(),
            "Required!"
        );
        assert_eq!(
            FieldError::Required { field: Field::Name }.message(),
            "Name Required!"
        );
        assert_eq!(
            FieldError::Required {
                field: Field::Password
            }
            .message(),
            "Password Required!"
        );
    }

    #[test]
    fn length_messages_carry_bounds() {
        let short = FieldError::TooShort {
            field: Field::Name,
            min: 6,
        };
        let long = FieldError::TooLong {
            field: Field::Password,
            max: 16,
        };
        assert_eq!(short.message(), "Minimum 6 characters");
        assert_eq!(long.message(), "Maximum 16 characters");
        assert!(short.is_length());
        assert!(long.is_length());
        assert_eq!(long.field(), Field::Password);
    }

    #[test]
    fn field_error_serializes_with_kind_tag() {
        let err = FieldError::Format {
            field: Field::Email,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "format");
        assert_eq!(json["field"], "email");
    }

    #[test]
    fn only_password_is_secret() {
        assert!(Field::Password.is_secret());
        assert!(!Field::Email.is_secret());
        assert!(!Field::Name.is_secret());
    }
}
