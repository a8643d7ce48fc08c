//! The `modelrank parse` command.

use anyhow::Result;

use modelrank_core::parser::parse_claim;

pub fn execute(input: &str) -> Result<()> {
    let claim = parse_claim(input)?;

    println!("Cutoff: {}", claim.cutoff);
    println!(
        "  [creation] {} was created on {}",
        claim.creation.model, claim.creation.expected
    );
    println!(
        "  [position] {} is located at index {}",
        claim.position.model, claim.position.expected_index
    );
    println!(
        "  [ordering] {} was created {} models before {}",
        claim.ordering.model, claim.ordering.gap, claim.ordering.anchor
    );
    println!("Claim is valid.");

    Ok(())
}
