//! HTTP request handlers.

pub mod date_input;

pub use date_input::{DateSubmission, submit_date};
