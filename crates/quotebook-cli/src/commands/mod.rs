pub mod add;
pub mod categories;
pub mod common;
pub mod completions;
pub mod export;
pub mod import;
pub mod list;
pub mod session;
pub mod show;
pub mod sync;
