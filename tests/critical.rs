//! Critical test matrix: network resilience and credential handling.
//!
//! Run with: `cargo test --test critical`

mod support;

#[path = "critical/credential_leakage.rs"]
mod credential_leakage;
#[path = "critical/network_failures.rs"]
mod network_failures;
