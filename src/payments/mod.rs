pub mod calculator;
pub mod scenario;
pub mod schedule;

pub use calculator::PaymentCalculator;
pub use scenario::{ScenarioComparison, ScenarioOverrides, ScenarioRunner};
pub use schedule::{PeriodRecord, Schedule, ScheduleGenerator};
