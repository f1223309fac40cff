//! Support-table metadata and the compatibility resolver.
//!
//! This module contains everything above the byte level:
//!
//! - [`qualified`] - Grammar of qualified identifiers (`NetOffice.ExcelApi.Range::get_Value()`)
//! - [`library`] - The fixed set of host libraries and their resource names
//! - [`attributes`] - Custom attribute values and their blob encoding
//! - [`typedef`] - Types, members and fields of a support table
//! - [`loader`] / [`builder`] - Reading and writing the binary support-table format
//! - [`store`] - One loaded table per library
//! - [`resolver`] - Type, member and enum-field lookup
//! - [`support`] - Version-support annotations
//! - [`table`] - The [`table::SupportTable`] query facade
//! - [`config`] - Load configuration
//!
//! # Query Pipeline
//!
//! ```text
//! identifier -> qualified -> store -> resolver -> support -> Option<Vec<String>>
//! ```
//!
//! Each stage returns `None` as soon as it cannot continue, so callers see a
//! single "not found" outcome regardless of where resolution stopped.

pub mod attributes;
pub mod builder;
pub mod config;
pub mod library;
pub mod loader;
pub mod qualified;
pub mod resolver;
pub mod store;
pub mod support;
pub mod table;
pub mod typedef;
