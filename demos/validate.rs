//! Reporting every grammar violation in a document at once.
//!
//! Run with: cargo run --example validate

use serde_dyaml::{validate, validate_with_options, Options};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let text = "\
# deployment settings
name: api
ports: [80, 443]
base: &defaults
env:\tprod
";

    let result = validate(text, false);
    println!("valid: {}", result.valid);
    for finding in result.findings() {
        println!("  {}", finding);
    }

    // Style findings only fail a document in strict mode.
    let unsorted = "name: api\nenv: prod\n";
    let lenient = validate(unsorted, false);
    let strict = validate_with_options(unsorted, &Options::strict());
    println!(
        "\nunsorted keys: lenient valid = {}, strict valid = {}",
        lenient.valid, strict.valid
    );

    println!("\nJSON report:\n{}", serde_json::to_string_pretty(&strict)?);

    Ok(())
}
