//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, and field validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_parse, get_env_parse_or};
pub use time::{now_utc, format_time};
pub use validation::{validate_email_shape, validate_length, FieldRule};
