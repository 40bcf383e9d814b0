use rust_decimal::Decimal;

use crate::config::{PaymentFrequency, MAX_TERM_PERIODS};
use crate::decimal::{Money, Rate};
use crate::errors::{InvalidInput, Result};

/// payment calculator for fixed-rate annuity loans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentCalculator {
    frequency: PaymentFrequency,
}

impl PaymentCalculator {
    pub fn new(frequency: PaymentFrequency) -> Self {
        Self { frequency }
    }

    pub fn monthly() -> Self {
        Self::new(PaymentFrequency::Monthly)
    }

    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    /// per-period rate for an annual rate, at 10 places
    pub fn period_rate(&self, annual_rate: Rate) -> Rate {
        annual_rate.per_period(self.frequency.periods_per_year())
    }

    /// payment that fully amortizes `principal` over `periods`
    ///
    /// `PMT = P * r(1+r)^n / ((1+r)^n - 1)`, falling back to straight-line
    /// `P / n` when the per-period rate is zero. The power term is built by
    /// repeated exact multiplication and applied as the ratio
    /// `(1+r)^n / ((1+r)^n - 1)`, so `P * r * (1+r)^n` is never formed.
    /// Once the power leaves the decimal range that ratio is 1 at every
    /// representable digit and the payment is the interest-only `P * r`.
    /// `OutOfRange` is reserved for a payment that is itself too large.
    pub fn compute_periodic_payment(
        &self,
        principal: Money,
        annual_rate: Rate,
        periods: u32,
    ) -> Result<Money> {
        if !principal.is_positive() {
            return Err(InvalidInput::NonPositivePrincipal { principal }.into());
        }
        if annual_rate.is_negative() {
            return Err(InvalidInput::NegativeRate { rate: annual_rate }.into());
        }
        if periods == 0 {
            return Err(InvalidInput::ZeroTerm.into());
        }
        if periods > MAX_TERM_PERIODS {
            return Err(InvalidInput::TermTooLong {
                term: periods,
                max: MAX_TERM_PERIODS,
            }
            .into());
        }
        if !self.frequency.is_supported() {
            return Err(InvalidInput::UnsupportedFrequency {
                frequency: self.frequency.to_string(),
            }
            .into());
        }

        let r = self.period_rate(annual_rate).as_decimal();
        let p = principal.as_decimal();

        if r.is_zero() {
            return Ok(Money::from_decimal(p / Decimal::from(periods)));
        }

        let ratio = annuity_ratio(Decimal::ONE + r, periods);
        let payment = p
            .checked_mul(r)
            .and_then(|x| x.checked_mul(ratio))
            .ok_or(InvalidInput::OutOfRange {
                rate: annual_rate,
                periods,
            })?;

        Ok(Money::from_decimal(payment))
    }

    /// interest accrued on `balance` for one period
    pub fn interest_for_period(&self, balance: Money, period_rate: Rate) -> Money {
        balance.apply_rate(period_rate)
    }

    /// share of `payment` left for principal once interest is covered;
    /// not clamped to the outstanding balance
    pub fn principal_for_period(&self, payment: Money, interest: Money) -> Money {
        payment - interest
    }
}

/// `c / (c - 1)` for `c = base^periods`, with `base > 1`
fn annuity_ratio(base: Decimal, periods: u32) -> Decimal {
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        match compound.checked_mul(base) {
            Some(next) => compound = next,
            // 1 / (c - 1) is below the last representable digit
            None => return Decimal::ONE,
        }
    }
    compound / (compound - Decimal::ONE)
}
