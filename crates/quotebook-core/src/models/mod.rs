//! Data models for Quotebook

mod quote;

pub use quote::{decode_quote_list, Quote};
