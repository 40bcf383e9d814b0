use serde::Serialize;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::LoanTerms;

use super::calculator::PaymentCalculator;

/// one paid period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodRecord {
    period: u32,
    opening_balance: Money,
    payment: Money,
    principal_portion: Money,
    interest_portion: Money,
    remaining_balance: Money,
}

impl PeriodRecord {
    /// 1-based period index
    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    /// total paid this period, principal plus interest
    pub fn payment(&self) -> Money {
        self.payment
    }

    pub fn principal_portion(&self) -> Money {
        self.principal_portion
    }

    pub fn interest_portion(&self) -> Money {
        self.interest_portion
    }

    pub fn remaining_balance(&self) -> Money {
        self.remaining_balance
    }
}

/// amortization schedule for one set of loan terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    terms: LoanTerms,
    base_payment: Money,
    scheduled_payment: Money,
    periods: Vec<PeriodRecord>,
    total_interest: Money,
    total_principal: Money,
    total_paid: Money,
}

impl Schedule {
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// payment amortizing the loan over the full term with no extra payment
    pub fn base_payment(&self) -> Money {
        self.base_payment
    }

    /// base payment plus the extra payment, due every period but the last
    pub fn scheduled_payment(&self) -> Money {
        self.scheduled_payment
    }

    pub fn periods(&self) -> &[PeriodRecord] {
        &self.periods
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodRecord> {
        self.periods.iter()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// record for a 1-based period index
    pub fn get_period(&self, period: u32) -> Option<&PeriodRecord> {
        let index = period.checked_sub(1)? as usize;
        self.periods.get(index)
    }

    pub fn last(&self) -> Option<&PeriodRecord> {
        self.periods.last()
    }

    /// payment of the closing period, which absorbs accumulated rounding
    pub fn final_payment(&self) -> Money {
        self.last().map(|p| p.payment).unwrap_or(Money::ZERO)
    }

    /// remaining balance after a period; the principal before period 1
    pub fn balance_after_period(&self, period: u32) -> Money {
        match self.get_period(period) {
            Some(record) => record.remaining_balance,
            None if period == 0 => self.terms.principal(),
            None => Money::ZERO,
        }
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest
    }

    pub fn total_principal(&self) -> Money {
        self.total_principal
    }

    pub fn total_paid(&self) -> Money {
        self.total_paid
    }

    /// true when the balance closed before the nominal term
    pub fn paid_off_early(&self) -> bool {
        (self.periods.len() as u32) < self.terms.term()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PeriodRecord;
    type IntoIter = std::slice::Iter<'a, PeriodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

/// generates schedules whose final balance closes at exactly zero
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    pub fn new() -> Self {
        Self
    }

    /// generate the full schedule for validated loan terms
    pub fn generate(&self, terms: &LoanTerms) -> Result<Schedule> {
        terms.validate()?;

        let calculator = PaymentCalculator::new(terms.frequency());
        let period_rate = calculator.period_rate(terms.annual_rate());
        let base_payment =
            calculator.compute_periodic_payment(terms.principal(), terms.annual_rate(), terms.term())?;
        let scheduled_payment = base_payment + terms.extra_payment();

        let mut periods = Vec::with_capacity(terms.term() as usize);
        let mut balance = terms.principal();

        for period in 1..=terms.term() {
            if !balance.is_positive() {
                break;
            }
            let record = self.step(
                &calculator,
                period,
                terms.term(),
                balance,
                period_rate,
                scheduled_payment,
            );
            balance = record.remaining_balance;
            periods.push(record);
        }

        let total_interest: Money = periods.iter().map(|p| p.interest_portion).sum();
        let total_principal: Money = periods.iter().map(|p| p.principal_portion).sum();
        let total_paid: Money = periods.iter().map(|p| p.payment).sum();

        tracing::debug!(
            principal = %terms.principal(),
            rate = %terms.annual_rate(),
            periods = periods.len(),
            payment = %scheduled_payment,
            total_interest = %total_interest,
            "generated amortization schedule"
        );

        Ok(Schedule {
            terms: terms.clone(),
            base_payment,
            scheduled_payment,
            periods,
            total_interest,
            total_principal,
            total_paid,
        })
    }

    /// one period: split the payment, then close the loan if this is the
    /// last nominal period or the payment would overshoot the balance
    fn step(
        &self,
        calculator: &PaymentCalculator,
        period: u32,
        term: u32,
        balance: Money,
        period_rate: Rate,
        scheduled_payment: Money,
    ) -> PeriodRecord {
        let interest = calculator.interest_for_period(balance, period_rate);
        let mut principal_portion = calculator.principal_for_period(scheduled_payment, interest);
        let mut payment = scheduled_payment;

        if period == term || principal_portion > balance {
            principal_portion = balance;
            payment = principal_portion + interest;
        }

        PeriodRecord {
            period,
            opening_balance: balance,
            payment,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance - principal_portion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentFrequency;
    use crate::errors::InvalidInput;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn money(d: Decimal) -> Money {
        Money::from_decimal(d)
    }

    fn terms(principal: Decimal, rate: Decimal, term: u32, extra: Decimal) -> LoanTerms {
        LoanTerms::new(
            money(principal),
            Rate::from_decimal(rate),
            term,
            PaymentFrequency::Monthly,
            money(extra),
        )
        .unwrap()
    }

    fn assert_closed(schedule: &Schedule) {
        let last = schedule.last().unwrap();
        assert_eq!(last.remaining_balance(), Money::ZERO);
        assert_eq!(last.remaining_balance().to_string(), "0.00");
        assert_eq!(schedule.total_principal(), schedule.terms().principal());
    }

    #[test]
    fn test_standard_schedule() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(10000), dec!(0.05), 12, dec!(0)))
            .unwrap();

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule.base_payment(), money(dec!(856.07)));
        assert_eq!(schedule.scheduled_payment(), money(dec!(856.07)));

        let first = schedule.get_period(1).unwrap();
        assert_eq!(first.period(), 1);
        assert_eq!(first.opening_balance(), Money::from_major(10_000));
        assert_eq!(first.interest_portion(), money(dec!(41.67)));
        assert_eq!(first.principal_portion(), money(dec!(814.40)));
        assert_eq!(first.remaining_balance(), money(dec!(9185.60)));

        let last = schedule.get_period(12).unwrap();
        assert_eq!(last.principal_portion(), money(dec!(852.57)));
        assert_eq!(last.interest_portion(), money(dec!(3.55)));
        assert_eq!(last.payment(), money(dec!(856.12)));
        assert_eq!(schedule.final_payment(), money(dec!(856.12)));

        assert_eq!(schedule.total_interest(), money(dec!(272.89)));
        assert_eq!(schedule.total_paid(), money(dec!(10272.89)));
        assert!(!schedule.paid_off_early());
        assert_closed(&schedule);
    }

    #[test]
    fn test_zero_rate_absorbs_remainder() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(10000), dec!(0), 12, dec!(0)))
            .unwrap();

        assert_eq!(schedule.len(), 12);
        for record in &schedule.periods()[..11] {
            assert_eq!(record.principal_portion(), money(dec!(833.33)));
            assert_eq!(record.interest_portion(), Money::ZERO);
        }

        let last = schedule.last().unwrap();
        assert_eq!(last.principal_portion(), money(dec!(833.37)));
        assert_eq!(last.payment() - schedule.base_payment(), money(dec!(0.04)));
        assert_eq!(schedule.total_interest(), Money::ZERO);
        assert_closed(&schedule);
    }

    #[test]
    fn test_final_period_can_pay_less() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(5000), dec!(0.06), 6, dec!(0)))
            .unwrap();

        let principals: Vec<Money> = schedule.iter().map(|p| p.principal_portion()).collect();
        assert_eq!(
            principals,
            vec![
                money(dec!(822.98)),
                money(dec!(827.09)),
                money(dec!(831.23)),
                money(dec!(835.39)),
                money(dec!(839.56)),
                money(dec!(843.75)),
            ]
        );
        assert_eq!(schedule.final_payment(), money(dec!(847.97)));
        assert_closed(&schedule);
    }

    #[test]
    fn test_extra_payment_pays_off_early() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(10000), dec!(0.05), 12, dec!(500)))
            .unwrap();

        assert_eq!(schedule.scheduled_payment(), money(dec!(1356.07)));
        assert_eq!(schedule.len(), 8);
        assert!(schedule.paid_off_early());

        let last = schedule.last().unwrap();
        assert_eq!(last.period(), 8);
        assert_eq!(last.principal_portion(), money(dec!(683.36)));
        assert_eq!(last.payment(), money(dec!(686.21)));
        assert_eq!(schedule.total_interest(), money(dec!(178.70)));
        assert_closed(&schedule);
    }

    #[test]
    fn test_extra_payment_larger_than_principal() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(10000), dec!(0.05), 12, dec!(20000)))
            .unwrap();

        assert_eq!(schedule.len(), 1);
        let only = schedule.last().unwrap();
        assert_eq!(only.principal_portion(), Money::from_major(10_000));
        assert_eq!(only.payment(), money(dec!(10041.67)));
        assert_closed(&schedule);
    }

    #[test]
    fn test_single_period_loan() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(1000), dec!(0.12), 1, dec!(0)))
            .unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.base_payment(), money(dec!(1010.00)));
        assert_eq!(schedule.final_payment(), money(dec!(1010.00)));
        assert_closed(&schedule);
    }

    #[test]
    fn test_long_mortgage_closes() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(200000), dec!(0.065), 360, dec!(0)))
            .unwrap();

        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule.base_payment(), money(dec!(1264.14)));
        assert_eq!(schedule.final_payment(), money(dec!(1259.56)));
        assert_eq!(schedule.total_interest(), money(dec!(255085.82)));
        assert_closed(&schedule);

        // balances strictly decline
        for pair in schedule.periods().windows(2) {
            assert!(pair[1].remaining_balance() < pair[0].remaining_balance());
            assert_eq!(pair[1].opening_balance(), pair[0].remaining_balance());
        }
    }

    #[test]
    fn test_high_rate_maximum_term_closes() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(100000), dec!(0.60), 1200, dec!(0)))
            .unwrap();

        assert_eq!(schedule.len(), 1200);
        assert_eq!(schedule.base_payment(), money(dec!(5000.00)));

        // the payment only covers interest until the closing period
        let first = schedule.get_period(1).unwrap();
        assert_eq!(first.interest_portion(), money(dec!(5000.00)));
        assert_eq!(first.principal_portion(), Money::ZERO);
        assert_eq!(schedule.balance_after_period(1199), Money::from_major(100_000));

        assert_eq!(schedule.final_payment(), money(dec!(105000.00)));
        assert_eq!(schedule.total_interest(), money(dec!(6000000.00)));
        assert_closed(&schedule);
    }

    #[test]
    fn test_balance_lookup() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(10000), dec!(0.05), 12, dec!(0)))
            .unwrap();

        assert_eq!(schedule.balance_after_period(0), Money::from_major(10_000));
        assert_eq!(schedule.balance_after_period(1), money(dec!(9185.60)));
        assert_eq!(schedule.balance_after_period(12), Money::ZERO);
        assert_eq!(schedule.balance_after_period(13), Money::ZERO);
        assert!(schedule.get_period(0).is_none());
        assert!(schedule.get_period(13).is_none());
    }

    #[test]
    fn test_invalid_terms_produce_no_schedule() {
        let err = LoanTerms::monthly(Money::from_major(-100), Rate::from_percentage(5), 12)
            .and_then(|t| ScheduleGenerator::new().generate(&t))
            .unwrap_err();
        assert!(matches!(err.reason(), InvalidInput::NonPositivePrincipal { .. }));

        let err = serde_json::from_str::<LoanTerms>(
            r#"{ "principal": "-100", "annual_rate": "0.05", "term": 12 }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("principal must be positive"));
    }
}
