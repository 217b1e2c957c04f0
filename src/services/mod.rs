//! Service layer module
//!
//! Contains the resilient upstream call wrapper

pub mod retry;

pub use retry::{AttemptOutcome, ResilientClient, RetryPolicy};
