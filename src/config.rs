use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::{Money, Rate};
use crate::errors::{InvalidInput, Result};
use crate::types::LoanTerms;

/// fractional digits of every currency amount
pub const CURRENCY_SCALE: u32 = 2;

/// fractional digits an annual rate is stored at
pub const RATE_SCALE: u32 = 4;

/// fractional digits of the per-period rate used in all period math
pub const PERIOD_RATE_SCALE: u32 = 10;

/// longest schedule this crate generates (100 years of monthly payments);
/// a limit of ours, not of the payment formula, which holds for any term.
/// It bounds the per-period vector and the power loop.
pub const MAX_TERM_PERIODS: u32 = 1200;

/// how often payments fall due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    BiWeekly,
    Weekly,
    Quarterly,
    Annually,
}

impl PaymentFrequency {
    /// divisor turning an annual rate into a per-period rate
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Annually => 1,
        }
    }

    /// only monthly schedules are generated
    pub fn is_supported(&self) -> bool {
        matches!(self, PaymentFrequency::Monthly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::BiWeekly => "bi_weekly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = InvalidInput;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "biweekly" | "bi-weekly" | "bi_weekly" => Ok(PaymentFrequency::BiWeekly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "annually" | "yearly" => Ok(PaymentFrequency::Annually),
            _ => Err(InvalidInput::UnsupportedFrequency {
                frequency: s.to_string(),
            }),
        }
    }
}

fn default_frequency() -> String {
    PaymentFrequency::Monthly.as_str().to_string()
}

/// raw, unvalidated loan configuration as it arrives from callers or
/// documents; convert with `into_terms` before calculating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    pub principal: Decimal,
    pub annual_rate: Decimal,
    pub term: u32,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default)]
    pub extra_payment: Decimal,
}

impl LoanConfig {
    pub fn new(principal: Money, annual_rate: Rate, term: u32) -> Self {
        Self {
            principal: principal.as_decimal(),
            annual_rate: annual_rate.as_decimal(),
            term,
            frequency: default_frequency(),
            extra_payment: Decimal::ZERO,
        }
    }

    /// create mortgage configuration, term given in years
    pub fn mortgage(amount: Money, rate: Rate, years: u32) -> Self {
        Self::new(amount, rate, years.saturating_mul(12))
    }

    /// create personal loan configuration, term given in months
    pub fn personal_loan(amount: Money, rate: Rate, months: u32) -> Self {
        Self::new(amount, rate, months)
    }

    pub fn with_extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = extra.as_decimal();
        self
    }

    /// parse a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            InvalidInput::Malformed {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// normalize and validate into loan terms
    pub fn into_terms(self) -> Result<LoanTerms> {
        LoanTerms::try_from(self)
    }
}
