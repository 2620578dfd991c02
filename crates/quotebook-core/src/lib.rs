//! quotebook-core - Core library for Quotebook
//!
//! This crate contains the quote model, key-value persistence, category
//! filtering, random display, import/export, and the server sync engine used
//! by every Quotebook front end.

pub mod category;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod form;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::Quote;
