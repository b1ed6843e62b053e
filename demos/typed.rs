//! Serde round trips through Deterministic YAML.
//!
//! Run with: cargo run --example typed

use serde::{Deserialize, Serialize};
use serde_dyaml::{from_str, to_string, to_value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Role {
    Admin,
    Viewer { since: u32 },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: Option<String>,
    roles: Vec<Role>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: Some("alice@example.com".to_string()),
            roles: vec![Role::Admin],
        },
        User {
            id: 43,
            name: "Bob".to_string(),
            email: None,
            roles: vec![Role::Viewer { since: 2021 }],
        },
    ];

    let text = to_string(&users)?;
    println!("Canonical output:\n{}", text);

    let users_back: Vec<User> = from_str(&text)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    let value = to_value(&users[1])?;
    println!(
        "Dynamic view of the second user: {} with name {:?}",
        value.kind(),
        value.get("name")
    );

    Ok(())
}
