//! # Payload Validation
//!
//! Structural validation of request payloads before they reach the store.
//!
//! Each payload is checked field by field in a fixed order and the first
//! violated rule wins. Within one field the checks run presence, type,
//! emptiness, then length (and the email shape last). Validation is pure: no
//! store access, no side effects.
//!
//! A successful check hands back the typed, owned field values, so callers
//! never touch the raw JSON again.

use lib_utils::validation::{validate_email_shape, FieldRule};
use serde_json::Value;

use crate::dto::{CreatePostRequest, LoginRequest, RegisterRequest, UpdatePostRequest};

pub const NAME_RULE: FieldRule = FieldRule::new("name", 2, 255);
pub const EMAIL_RULE: FieldRule = FieldRule::new("email", 6, 255);
pub const PASSWORD_RULE: FieldRule = FieldRule::new("password", 6, 255);
pub const TITLE_RULE: FieldRule = FieldRule::new("title", 1, 255);
pub const DESCRIPTION_RULE: FieldRule = FieldRule::new("description", 1, 10_000);

/// The first rule a payload violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Client-facing message
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: String) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A registration that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login credentials that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCredentials {
    pub email: String,
    pub password: String,
}

/// A new post that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPost {
    pub title: String,
    pub description: String,
}

/// Payloads that can check themselves.
pub trait Validate {
    /// Typed view of the payload once it is known to be valid.
    type Valid;

    fn validate(&self) -> Result<Self::Valid, ValidationError>;
}

fn check(rule: &FieldRule, value: Option<&Value>) -> Result<String, ValidationError> {
    let text = match value {
        None => None,
        Some(Value::String(text)) => Some(text.as_str()),
        Some(_) => return Err(ValidationError::new(rule.field, rule.not_a_string())),
    };

    rule.check(text)
        .map(str::to_string)
        .map_err(|message| ValidationError::new(rule.field, message))
}

fn check_email(value: Option<&Value>) -> Result<String, ValidationError> {
    let email = check(&EMAIL_RULE, value)?;

    if validate_email_shape(&email) {
        Ok(email)
    } else {
        Err(ValidationError::new(
            EMAIL_RULE.field,
            "\"email\" must be a valid email".to_string(),
        ))
    }
}

impl Validate for RegisterRequest {
    type Valid = ValidRegistration;

    fn validate(&self) -> Result<ValidRegistration, ValidationError> {
        Ok(ValidRegistration {
            name: check(&NAME_RULE, self.name.as_ref())?,
            email: check_email(self.email.as_ref())?,
            password: check(&PASSWORD_RULE, self.password.as_ref())?,
        })
    }
}

impl Validate for LoginRequest {
    type Valid = ValidCredentials;

    fn validate(&self) -> Result<ValidCredentials, ValidationError> {
        Ok(ValidCredentials {
            email: check_email(self.email.as_ref())?,
            password: check(&PASSWORD_RULE, self.password.as_ref())?,
        })
    }
}

impl Validate for CreatePostRequest {
    type Valid = ValidPost;

    fn validate(&self) -> Result<ValidPost, ValidationError> {
        Ok(ValidPost {
            title: check(&TITLE_RULE, self.title.as_ref())?,
            description: check(&DESCRIPTION_RULE, self.description.as_ref())?,
        })
    }
}

impl Validate for UpdatePostRequest {
    /// The new title
    type Valid = String;

    fn validate(&self) -> Result<String, ValidationError> {
        check(&TITLE_RULE, self.title.as_ref())
    }
}
