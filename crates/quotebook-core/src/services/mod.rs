//! Shared services used by front ends.

mod quote_service;

pub use quote_service::{QuoteService, QuoteView, Submission};
