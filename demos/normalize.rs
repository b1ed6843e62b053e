//! Rewriting hand-edited documents into canonical form.
//!
//! Run with: cargo run --example normalize

use serde_dyaml::{is_canonical, normalize, parse};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let edited = "\
service:  \"api\"

replicas: 03
zones:
  - \"east\"
  -  west
owner:
  team: platform
  email: \"ops@example.com\"
";

    println!("Input:\n{}", edited);
    println!("Canonical already? {}\n", is_canonical(edited)?);

    let canonical = normalize(edited)?;
    println!("Normalized:\n{}", canonical);

    // Normalizing twice changes nothing.
    assert_eq!(normalize(&canonical)?, canonical);
    assert_eq!(parse(edited)?, parse(&canonical)?);
    println!("✓ Same value, one text form");

    Ok(())
}
