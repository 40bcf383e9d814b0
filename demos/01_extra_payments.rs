/// extra payments - paying more each month closes the loan early
use amortization_rs::{LoanConfig, Money, Rate, ScheduleGenerator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    println!("=== extra payments example ===\n");

    let generator = ScheduleGenerator::new();

    // 30 year mortgage at 4.5%
    let plain = LoanConfig::mortgage(Money::from_major(250_000), Rate::from_bps(450), 30).into_terms()?;
    let with_extra = LoanConfig::mortgage(Money::from_major(250_000), Rate::from_bps(450), 30)
        .with_extra_payment(Money::from_major(200))
        .into_terms()?;

    for terms in [&plain, &with_extra] {
        let schedule = generator.generate(terms)?;
        println!("extra payment:   ${}", terms.extra_payment());
        println!("payment:         ${}", schedule.scheduled_payment());
        println!("periods paid:    {} of {}", schedule.len(), terms.term());
        println!("final payment:   ${}", schedule.final_payment());
        println!("total interest:  ${}\n", schedule.total_interest());
    }

    Ok(())
}
