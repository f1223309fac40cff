// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # netoffice-compat
//!
//! Answers the question "which Office versions support this call?" for code written
//! against the NetOffice wrapper libraries.
//!
//! Every public type, member and enum value of the NetOffice libraries carries an
//! annotation listing the host versions that support it. This crate ships those
//! annotations as compact per-library support tables, parses the qualified identifiers
//! a code analyzer produces, and resolves them to version lists.
//!
//! ## Features
//!
//! - **Six libraries** - Office, Excel, Word, Outlook, PowerPoint and Access
//! - **Member resolution** - Properties via `get_`/`set_`, events via `add_`/`remove_`, overloads by parameter count
//! - **Enum lookups** - Member names and support by integral value
//! - **Embedded data** - Tables are compiled in; a directory of tables can be used instead
//! - **Never fails at query time** - Unresolvable input yields `None`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netoffice_compat::SupportTable;
//!
//! let table = SupportTable::new()?;
//!
//! // Member call, with the parameter types of the call site
//! let versions = table.type_call_support("NetOffice.ExcelApi.Workbook::SaveAs(System.Object)");
//!
//! // Type reference
//! let versions = table.type_support("NetOffice.WordApi.Document");
//!
//! // Enum value
//! let name = table.enum_member_name("NetOffice.ExcelApi.Enums.XlFileFormat", 51);
//! let versions = table.enum_member_support("NetOffice.ExcelApi.Enums.XlFileFormat", 51);
//! # Ok::<(), netoffice_compat::Error>(())
//! ```
//!
//! ## Identifier Grammar
//!
//! ```text
//! <Namespace>.<Library>Api.<Type>[::<Member>(<Param1>,<Param2>,...)]
//! ```
//!
//! The library is taken from the second segment (`ExcelApi` -> `Excel`), the member
//! from the text between the last `::` and `(`, and the parameter count from the
//! comma-separated list inside the parentheses. A trailing `[]` on a type reference
//! is ignored.
//!
//! ## Support Tables
//!
//! Tables are stored as gzip-compressed binary files, one per library, produced by
//! [`metadata::builder::SupportTableBuilder`] and read by
//! [`metadata::loader::LibraryMetadata`]. The `nocompat` command line tool packs
//! tables from JSON listings and dumps loaded tables back to JSON.
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```

#[macro_use]
pub(crate) mod error;

/// Byte-level parsing and gzip handling for support-table resources.
pub mod file;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use netoffice_compat::prelude::*;
///
/// let table = SupportTable::with_config(SupportTableConfig::embedded())?;
/// let excel = table.metadata(LibraryKey::Excel);
/// # Ok::<(), netoffice_compat::Error>(())
/// ```
pub mod prelude;

/// Support-table model, loading and the compatibility resolver.
pub mod metadata;

/// `netoffice-compat` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `netoffice-compat` Error type
///
/// Only produced while loading support tables; queries report unresolvable input as `None`.
pub use error::Error;

/// Cursor-based reader over byte slices.
///
/// # Example
///
/// ```rust
/// use netoffice_compat::Parser;
///
/// let data = [0x4E, 0x4F, 0x53, 0x50, 0x81, 0x00];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_le::<u32>()?, 0x5053_4F4E);
/// assert_eq!(parser.read_compressed_uint()?, 0x100);
/// # Ok::<(), netoffice_compat::Error>(())
/// ```
pub use file::parser::Parser;

/// Main entry point for compatibility queries.
pub use metadata::table::{ResolvedMember, SupportTable};

/// Load configuration and the supported libraries.
pub use metadata::{
    config::{ResourceSource, SupportTableConfig},
    library::LibraryKey,
};
