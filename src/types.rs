use serde::{Deserialize, Serialize};

use crate::config::{LoanConfig, PaymentFrequency, MAX_TERM_PERIODS};
use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, InvalidInput, Result};

/// validated, immutable terms of a fixed-rate installment loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LoanConfig")]
pub struct LoanTerms {
    principal: Money,
    annual_rate: Rate,
    term: u32,
    frequency: PaymentFrequency,
    extra_payment: Money,
}

impl LoanTerms {
    /// create loan terms, normalizing the annual rate to 4 places and
    /// rejecting anything a schedule cannot be generated for
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term: u32,
        frequency: PaymentFrequency,
        extra_payment: Money,
    ) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate: annual_rate.to_annual_scale(),
            term,
            frequency,
            extra_payment,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// monthly loan without extra payments
    pub fn monthly(principal: Money, annual_rate: Rate, term: u32) -> Result<Self> {
        Self::new(principal, annual_rate, term, PaymentFrequency::Monthly, Money::ZERO)
    }

    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// load terms from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        LoanConfig::from_json(json)?.into_terms()
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    pub fn extra_payment(&self) -> Money {
        self.extra_payment
    }

    /// copy of these terms with the given fields replaced
    pub fn with_overrides(
        &self,
        extra_payment: Option<Money>,
        annual_rate: Option<Rate>,
    ) -> Result<Self> {
        Self::new(
            self.principal,
            annual_rate.unwrap_or(self.annual_rate),
            self.term,
            self.frequency,
            extra_payment.unwrap_or(self.extra_payment),
        )
    }

    /// check every precondition of schedule generation
    pub fn validate(&self) -> Result<()> {
        let failure = if !self.principal.is_positive() {
            Some(InvalidInput::NonPositivePrincipal {
                principal: self.principal,
            })
        } else if self.annual_rate.is_negative() {
            Some(InvalidInput::NegativeRate {
                rate: self.annual_rate,
            })
        } else if self.term == 0 {
            Some(InvalidInput::ZeroTerm)
        } else if self.term > MAX_TERM_PERIODS {
            Some(InvalidInput::TermTooLong {
                term: self.term,
                max: MAX_TERM_PERIODS,
            })
        } else if !self.frequency.is_supported() {
            Some(InvalidInput::UnsupportedFrequency {
                frequency: self.frequency.to_string(),
            })
        } else if self.extra_payment.is_negative() {
            Some(InvalidInput::NegativeExtraPayment {
                amount: self.extra_payment,
            })
        } else {
            None
        };

        match failure {
            Some(reason) => {
                tracing::warn!(%reason, "rejected loan terms");
                Err(reason.into())
            }
            None => Ok(()),
        }
    }
}

impl TryFrom<LoanConfig> for LoanTerms {
    type Error = AmortizationError;

    fn try_from(config: LoanConfig) -> Result<Self> {
        let frequency: PaymentFrequency = config.frequency.parse()?;
        Self::new(
            Money::from_decimal(config.principal),
            Rate::from_decimal(config.annual_rate),
            config.term,
            frequency,
            Money::from_decimal(config.extra_payment),
        )
    }
}

/// builder for loan terms
#[derive(Debug, Clone, Default)]
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    term: Option<u32>,
    frequency: Option<PaymentFrequency>,
    extra_payment: Option<Money>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn term(mut self, periods: u32) -> Self {
        self.term = Some(periods);
        self
    }

    pub fn frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = Some(extra);
        self
    }

    /// build the terms; rate defaults to zero, frequency to monthly and the
    /// extra payment to nothing
    pub fn build(self) -> Result<LoanTerms> {
        let principal = self
            .principal
            .ok_or(InvalidInput::MissingField { field: "principal" })?;
        let term = self.term.ok_or(InvalidInput::MissingField { field: "term" })?;

        LoanTerms::new(
            principal,
            self.annual_rate.unwrap_or(Rate::ZERO),
            term,
            self.frequency.unwrap_or_default(),
            self.extra_payment.unwrap_or(Money::ZERO),
        )
    }
}
