//! Password Generation
//!
//! Character-class pools, option clamping, and uniform sampling over a
//! cryptographically secure RNG.

pub mod options;
pub mod password_gen;

use thiserror::Error;

/// Generator errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("Invalid password length: {0}")]
    InvalidLength(usize),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

// Re-exports
pub use options::{CharClass, CharClasses, GeneratorOptions, MAX_LENGTH, MIN_LENGTH};
pub use password_gen::{compose_pool, generate, generate_with, password_strength, strength_label};
