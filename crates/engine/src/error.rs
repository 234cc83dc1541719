//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`IncomeNotSet`] thrown when a percentage of income is requested but the
//!   user has no positive monthly income.
//! - [`InvalidAmount`] thrown when an amount is not a valid positive sum.
//! - [`KeyNotFound`] thrown when an item is not found.
//!
//!  [`IncomeNotSet`]: EngineError::IncomeNotSet
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("income not set")]
    IncomeNotSet,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid signup: {}", .0.join("; "))]
    InvalidSignup(Vec<String>),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Export(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::IncomeNotSet, Self::IncomeNotSet) => true,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidSignup(a), Self::InvalidSignup(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
