pub mod common;
pub mod dump;
pub mod libraries;
pub mod pack;
pub mod query;
pub mod types;
