use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmortizationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl AmortizationError {
    /// the validation failure behind this error
    pub fn reason(&self) -> &InvalidInput {
        match self {
            AmortizationError::InvalidInput(reason) => reason,
        }
    }
}

/// reasons loan terms are rejected before any calculation runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("principal must be positive, got {principal}")]
    NonPositivePrincipal {
        principal: Money,
    },

    #[error("interest rate cannot be negative, got {rate}")]
    NegativeRate {
        rate: Rate,
    },

    #[error("term must be at least one period")]
    ZeroTerm,

    /// the payment formula has no upper bound; this crate caps schedule length
    #[error("term of {term} periods exceeds this crate's schedule limit of {max}")]
    TermTooLong {
        term: u32,
        max: u32,
    },

    #[error("extra payment cannot be negative, got {amount}")]
    NegativeExtraPayment {
        amount: Money,
    },

    #[error("unsupported payment frequency: {frequency}")]
    UnsupportedFrequency {
        frequency: String,
    },

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("malformed loan configuration: {message}")]
    Malformed {
        message: String,
    },

    #[error("payment at rate {rate} over {periods} periods exceeds decimal range")]
    OutOfRange {
        rate: Rate,
        periods: u32,
    },
}

pub type Result<T> = std::result::Result<T, AmortizationError>;
