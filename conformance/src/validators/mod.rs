//! Validators over a computed analysis run.
//!
//! Each validator checks one family of invariants and returns its own
//! [`ConformanceReport`](crate::ConformanceReport).

pub mod archetypes;
pub mod diagnostics;
pub mod filter_balance;
pub mod partition;
pub mod signatures;

/// Detail lines kept per failing check.
const MAX_DETAILS: usize = 20;

/// Truncates a violation list, noting how many entries were dropped.
fn capped(mut details: Vec<String>) -> Vec<String> {
    if details.len() > MAX_DETAILS {
        let dropped = details.len() - MAX_DETAILS;
        details.truncate(MAX_DETAILS);
        details.push(format!("... and {dropped} more"));
    }
    details
}
