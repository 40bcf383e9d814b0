/// json config - load terms from a document and export the schedule
use amortization_rs::{generate_schedule, LoanTerms};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::from_json(
        r#"{
            "principal": "18500.00",
            "annual_rate": "0.0625",
            "term": 36,
            "frequency": "Monthly",
            "extra_payment": "50"
        }"#,
    )?;

    let schedule = generate_schedule(&terms)?;
    println!("{}", serde_json::to_string_pretty(&schedule)?);

    // invalid documents are rejected before any calculation
    let rejected = LoanTerms::from_json(r#"{ "principal": "18500", "annual_rate": "0.0625", "term": 36, "frequency": "weekly" }"#);
    if let Err(e) = rejected {
        println!("rejected: {e}");
    }

    Ok(())
}
