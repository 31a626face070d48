//! # Core Library
//!
//! Core models, database access, configuration, validation, and errors.

pub mod config;
pub mod dto;
pub mod error;
pub mod model;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{DbPool, create_pool};
pub use validation::ValidationError;
