/// quick start - minimal example to get started
use amortization_rs::{generate_schedule, LoanTerms, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $10,000 over 12 months at 5%
    let terms = LoanTerms::monthly(Money::from_major(10_000), Rate::from_percentage(5), 12)?;
    let schedule = generate_schedule(&terms)?;

    println!("monthly payment: ${}", schedule.base_payment());
    println!("period | principal | interest | payment | balance");
    for p in &schedule {
        println!(
            "{:>6} | {:>9} | {:>8} | {:>7} | {:>9}",
            p.period(),
            p.principal_portion(),
            p.interest_portion(),
            p.payment(),
            p.remaining_balance()
        );
    }
    println!("total interest: ${}", schedule.total_interest());

    Ok(())
}
