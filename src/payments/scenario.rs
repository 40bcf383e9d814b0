use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::LoanTerms;

use super::schedule::{Schedule, ScheduleGenerator};

/// what-if changes applied on top of a base loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    pub extra_payment: Option<Money>,
    pub annual_rate: Option<Rate>,
}

impl ScenarioOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = Some(extra);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.extra_payment.is_none() && self.annual_rate.is_none()
    }
}

/// base and scenario schedules side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioComparison {
    pub base: Schedule,
    pub scenario: Schedule,
    /// negative when the scenario costs more interest
    pub interest_saved: Money,
    /// negative when the scenario takes longer
    pub periods_saved: i64,
}

/// recomputes schedules for modified copies of a loan
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioRunner {
    generator: ScheduleGenerator,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// schedule for `base` with the present overrides replacing its extra
    /// payment and annual rate
    pub fn run_scenario(
        &self,
        base: &LoanTerms,
        extra_payment: Option<Money>,
        annual_rate: Option<Rate>,
    ) -> Result<Schedule> {
        let terms = base.with_overrides(extra_payment, annual_rate)?;
        self.generator.generate(&terms)
    }

    pub fn run(&self, base: &LoanTerms, overrides: &ScenarioOverrides) -> Result<Schedule> {
        self.run_scenario(base, overrides.extra_payment, overrides.annual_rate)
    }

    /// generate both schedules and measure what the scenario changes
    pub fn compare(&self, base: &LoanTerms, overrides: &ScenarioOverrides) -> Result<ScenarioComparison> {
        let scenario = self.run(base, overrides)?;
        let base = self.generator.generate(base)?;

        let interest_saved = base.total_interest() - scenario.total_interest();
        let periods_saved = base.len() as i64 - scenario.len() as i64;

        tracing::info!(
            extra_payment = ?overrides.extra_payment.map(|m| m.to_string()),
            rate = ?overrides.annual_rate.map(|r| r.to_string()),
            interest_saved = %interest_saved,
            periods_saved,
            "compared loan scenario"
        );

        Ok(ScenarioComparison {
            base,
            scenario,
            interest_saved,
            periods_saved,
        })
    }
}
