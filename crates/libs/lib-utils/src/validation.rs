//! # Validation Utilities
//!
//! Field-level input validation helpers.
//!
//! Messages follow the `"<field>" ...` pattern so that clients can show them
//! verbatim, e.g. `"email" is required`.

/// Presence and length constraints for one string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name as it appears in the request body
    pub field: &'static str,
    /// Minimum length in characters (inclusive)
    pub min: usize,
    /// Maximum length in characters (inclusive)
    pub max: usize,
}

impl FieldRule {
    pub const fn new(field: &'static str, min: usize, max: usize) -> Self {
        Self { field, min, max }
    }

    /// Message for a value that is present but not a string.
    pub fn not_a_string(&self) -> String {
        format!("\"{}\" must be a string", self.field)
    }

    /// Check presence, then minimum length, then maximum length.
    ///
    /// Returns the borrowed value on success so callers can chain shape checks.
    pub fn check<'a>(&self, value: Option<&'a str>) -> Result<&'a str, String> {
        let value = value.ok_or_else(|| format!("\"{}\" is required", self.field))?;
        if value.is_empty() {
            return Err(format!("\"{}\" is not allowed to be empty", self.field));
        }
        validate_length(value, self.min, self.max, self.field)?;
        Ok(value)
    }
}

/// Validate that `value` has between `min` and `max` characters (inclusive).
pub fn validate_length(value: &str, min: usize, max: usize, field_name: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        Err(format!(
            "\"{}\" length must be at least {} characters long",
            field_name, min
        ))
    } else if len > max {
        Err(format!(
            "\"{}\" length must be less than or equal to {} characters long",
            field_name, max
        ))
    } else {
        Ok(())
    }
}

/// Check that `email` has a standard `local@domain.tld` shape.
pub fn validate_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !labels_ok {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}
