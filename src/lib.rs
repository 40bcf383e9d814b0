pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod types;

// re-export key types
pub use config::{LoanConfig, PaymentFrequency};
pub use decimal::{Money, Rate};
pub use errors::{AmortizationError, InvalidInput, Result};
pub use payments::{
    PaymentCalculator, PeriodRecord, ScenarioComparison, ScenarioOverrides, ScenarioRunner,
    Schedule, ScheduleGenerator,
};
pub use types::{LoanTerms, LoanTermsBuilder};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;

/// monthly payment fully amortizing `principal` over `periods`
pub fn compute_periodic_payment(principal: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
    PaymentCalculator::monthly().compute_periodic_payment(principal, annual_rate, periods)
}

/// amortization schedule for the given terms
pub fn generate_schedule(terms: &LoanTerms) -> Result<Schedule> {
    ScheduleGenerator::new().generate(terms)
}

/// schedule for `terms` with the present overrides applied
pub fn run_scenario(
    terms: &LoanTerms,
    extra_payment: Option<Money>,
    annual_rate: Option<Rate>,
) -> Result<Schedule> {
    ScenarioRunner::new().run_scenario(terms, extra_payment, annual_rate)
}
