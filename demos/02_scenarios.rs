/// scenarios - what-if comparisons against a base loan
use amortization_rs::{LoanTerms, Money, Rate, ScenarioOverrides, ScenarioRunner};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== scenario example ===\n");

    let base = LoanTerms::builder()
        .principal(Money::from_major(25_000))
        .rate(Rate::from_bps(699))
        .term(60)
        .build()?;

    let runner = ScenarioRunner::new();
    let scenarios = [
        ("extra $100/month", ScenarioOverrides::new().extra_payment(Money::from_major(100))),
        ("refinance at 4.99%", ScenarioOverrides::new().rate(Rate::from_bps(499))),
        (
            "both",
            ScenarioOverrides::new()
                .extra_payment(Money::from_major(100))
                .rate(Rate::from_bps(499)),
        ),
    ];

    for (name, overrides) in scenarios {
        let comparison = runner.compare(&base, &overrides)?;
        println!("{name}:");
        println!("  periods:        {} -> {}", comparison.base.len(), comparison.scenario.len());
        println!("  interest saved: ${}", comparison.interest_saved);
        println!("  periods saved:  {}\n", comparison.periods_saved);
    }

    Ok(())
}
