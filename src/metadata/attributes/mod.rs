//! Custom attributes attached to support-table entries.
//!
//! Every type, member and field in a support table may carry custom attributes. The
//! attributes the resolver cares about are the version-support annotations
//! (`SupportByVersionAttribute`, `SupportByLibraryAttribute`), but any attribute is
//! preserved so tables can be dumped and re-packed without loss.
//!
//! # Blob Format
//!
//! Attribute values follow the ECMA-335 II.23.3 layout with one difference: since
//! a support table has no constructor signatures to consult, every fixed argument
//! carries its own `CorSerializationType` tag. See [`parser`] for the byte layout.
//!
//! # Examples
//!
//! ```rust
//! use netoffice_compat::metadata::attributes::{
//!     encode_attribute_data, parse_attribute_data, AttributeArgument, AttributeValue,
//! };
//!
//! let value = AttributeValue {
//!     fixed_args: vec![
//!         AttributeArgument::String("Outlook".into()),
//!         AttributeArgument::Array(vec![AttributeArgument::I4(12), AttributeArgument::I4(16)]),
//!     ],
//!     named_args: vec![],
//! };
//!
//! let decoded = parse_attribute_data(&encode_attribute_data(&value)?)?;
//! assert_eq!(decoded.fixed_args[1].to_string(), "12,16");
//! # Ok::<(), netoffice_compat::Error>(())
//! ```
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.3 - Custom Attributes

mod encoder;
pub mod parser;
mod types;

pub use encoder::{encode_attribute_data, write_tagged_argument};
pub use parser::{parse_attribute_data, read_argument, MAX_NESTING_DEPTH};
pub use types::*;
