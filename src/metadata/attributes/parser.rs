//! Custom attribute blob parsing.
//!
//! Support tables store every attribute as a self-describing blob modelled on
//! ECMA-335 II.23.3. Unlike assembly metadata, the constructor signature is not
//! available, so every fixed argument is preceded by its `CorSerializationType`
//! tag:
//!
//! ```text
//! u16  prolog      0x0001
//! u16  fixed count
//!      fixed count x { u8 tag, value }
//! u16  named count
//!      named count x { u8 0x53 (field) | 0x54 (property), u8 tag, SerString name, value }
//! ```
//!
//! Values are encoded per tag: primitives little-endian, `STRING`/`TYPE` as
//! `SerString` (`0xFF` = null), `SZARRAY` as element tag + `i32` length
//! (`-1` = null) + elements, `TAGGED_OBJECT` as a nested tag + value, and
//! `ENUM` as a `SerString` enum type name followed by an `i32`.
//!
//! Nested arrays and tagged objects are parsed iteratively with an explicit work
//! stack; nesting deeper than [`MAX_NESTING_DEPTH`] is rejected.
//!
//! # Examples
//!
//! ```rust
//! use netoffice_compat::metadata::attributes::{parse_attribute_data, AttributeArgument};
//!
//! let blob = [
//!     0x01, 0x00,                         // Prolog
//!     0x01, 0x00,                         // One fixed argument
//!     0x0E, 0x05, b'E', b'x', b'c', b'e', b'l', // STRING "Excel"
//!     0x00, 0x00,                         // No named arguments
//! ];
//!
//! let value = parse_attribute_data(&blob)?;
//! assert_eq!(value.fixed_args, vec![AttributeArgument::String("Excel".into())]);
//! # Ok::<(), netoffice_compat::Error>(())
//! ```

use crate::{
    file::parser::Parser,
    metadata::attributes::types::{
        AttributeArgument, AttributeNamedArgument, AttributeValue, SERIALIZATION_TYPE,
    },
    Error::DepthLimitExceeded,
    Result,
};

/// Maximum nesting depth of arrays and tagged objects inside one value.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Prolog every attribute blob starts with.
pub const ATTRIBUTE_PROLOG: u16 = 0x0001;

/// Parse a complete attribute blob.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for an invalid prolog, unknown tags or trailing
/// data, [`crate::Error::OutOfBounds`] for truncated blobs and
/// [`crate::Error::DepthLimitExceeded`] for excessive nesting.
pub fn parse_attribute_data(data: &[u8]) -> Result<AttributeValue> {
    let mut parser = Parser::new(data);

    let prolog = parser.read_le::<u16>()?;
    if prolog != ATTRIBUTE_PROLOG {
        return Err(malformed_error!(
            "Invalid custom attribute prolog - expected 0x0001, got 0x{:04X}",
            prolog
        ));
    }

    let fixed_count = parser.read_le::<u16>()?;
    let mut fixed_args = Vec::with_capacity(usize::from(fixed_count));
    for _ in 0..fixed_count {
        let tag = parser.read_le::<u8>()?;
        fixed_args.push(read_argument(&mut parser, tag)?);
    }

    let named_count = parser.read_le::<u16>()?;
    let mut named_args = Vec::with_capacity(usize::from(named_count));
    for _ in 0..named_count {
        named_args.push(parse_named_argument(&mut parser)?);
    }

    if parser.has_more_data() {
        return Err(malformed_error!(
            "Trailing data after custom attribute - {} bytes",
            parser.remaining()
        ));
    }

    Ok(AttributeValue {
        fixed_args,
        named_args,
    })
}

fn parse_named_argument(parser: &mut Parser<'_>) -> Result<AttributeNamedArgument> {
    let is_field = match parser.read_le::<u8>()? {
        SERIALIZATION_TYPE::FIELD => true,
        SERIALIZATION_TYPE::PROPERTY => false,
        other => {
            return Err(malformed_error!(
                "Invalid field/property indicator: 0x{:02X}",
                other
            ))
        }
    };

    let tag = parser.read_le::<u8>()?;
    let Some(name) = parser.read_ser_string()? else {
        return Err(malformed_error!("Named argument without a name"));
    };
    let value = read_argument(parser, tag)?;

    Ok(AttributeNamedArgument {
        is_field,
        name,
        value,
    })
}

/// Read a single value whose serialization tag has already been consumed.
///
/// Shared by attribute blobs and by field constants in support tables.
///
/// # Errors
/// - [`crate::Error::DepthLimitExceeded`]: Maximum nesting depth exceeded
/// - [`crate::Error::Malformed`]: Invalid type tags or malformed data format
/// - [`crate::Error::OutOfBounds`]: Truncated data
pub fn read_argument(parser: &mut Parser<'_>, type_tag: u8) -> Result<AttributeArgument> {
    /// Work item for iterative parsing stack
    enum WorkItem {
        /// Parse a type tag and push result
        ParseTag(u8),
        /// Build array from N elements on stack
        BuildArray(usize),
        /// Close a tagged object (its inner value is already on the result stack)
        TaggedObject,
    }

    let mut work_stack: Vec<WorkItem> = vec![WorkItem::ParseTag(type_tag)];
    let mut result_stack: Vec<AttributeArgument> = Vec::new();
    let mut depth = 0_usize;

    while let Some(work) = work_stack.pop() {
        match work {
            WorkItem::ParseTag(tag) => match tag {
                SERIALIZATION_TYPE::BOOLEAN => {
                    let val = parser.read_le::<u8>()?;
                    result_stack.push(AttributeArgument::Bool(val != 0));
                }
                SERIALIZATION_TYPE::CHAR => {
                    let val = parser.read_le::<u16>()?;
                    let character = char::from_u32(u32::from(val)).unwrap_or('\u{FFFD}');
                    result_stack.push(AttributeArgument::Char(character));
                }
                SERIALIZATION_TYPE::I1 => {
                    result_stack.push(AttributeArgument::I1(parser.read_le::<i8>()?));
                }
                SERIALIZATION_TYPE::U1 => {
                    result_stack.push(AttributeArgument::U1(parser.read_le::<u8>()?));
                }
                SERIALIZATION_TYPE::I2 => {
                    result_stack.push(AttributeArgument::I2(parser.read_le::<i16>()?));
                }
                SERIALIZATION_TYPE::U2 => {
                    result_stack.push(AttributeArgument::U2(parser.read_le::<u16>()?));
                }
                SERIALIZATION_TYPE::I4 => {
                    result_stack.push(AttributeArgument::I4(parser.read_le::<i32>()?));
                }
                SERIALIZATION_TYPE::U4 => {
                    result_stack.push(AttributeArgument::U4(parser.read_le::<u32>()?));
                }
                SERIALIZATION_TYPE::I8 => {
                    result_stack.push(AttributeArgument::I8(parser.read_le::<i64>()?));
                }
                SERIALIZATION_TYPE::U8 => {
                    result_stack.push(AttributeArgument::U8(parser.read_le::<u64>()?));
                }
                SERIALIZATION_TYPE::R4 => {
                    result_stack.push(AttributeArgument::R4(parser.read_le::<f32>()?));
                }
                SERIALIZATION_TYPE::R8 => {
                    result_stack.push(AttributeArgument::R8(parser.read_le::<f64>()?));
                }
                SERIALIZATION_TYPE::STRING => {
                    let s = parser.read_ser_string()?.unwrap_or_default();
                    result_stack.push(AttributeArgument::String(s));
                }
                SERIALIZATION_TYPE::TYPE => {
                    let s = parser.read_ser_string()?.unwrap_or_default();
                    result_stack.push(AttributeArgument::Type(s));
                }
                SERIALIZATION_TYPE::TAGGED_OBJECT => {
                    depth += 1;
                    if depth > MAX_NESTING_DEPTH {
                        return Err(DepthLimitExceeded(MAX_NESTING_DEPTH));
                    }
                    let inner_type_tag = parser.read_le::<u8>()?;
                    work_stack.push(WorkItem::TaggedObject);
                    work_stack.push(WorkItem::ParseTag(inner_type_tag));
                }
                SERIALIZATION_TYPE::ENUM => {
                    let Some(type_name) = parser.read_ser_string()? else {
                        return Err(malformed_error!("Enum value without a type name"));
                    };
                    let val = parser.read_le::<i32>()?;
                    result_stack.push(AttributeArgument::Enum(
                        type_name,
                        Box::new(AttributeArgument::I4(val)),
                    ));
                }
                SERIALIZATION_TYPE::SZARRAY => {
                    let element_type_tag = parser.read_le::<u8>()?;
                    let array_length = parser.read_le::<i32>()?;

                    if array_length == -1 {
                        // null array
                        result_stack.push(AttributeArgument::Array(vec![]));
                        continue;
                    }

                    let Ok(count) = usize::try_from(array_length) else {
                        return Err(malformed_error!("Invalid array length: {}", array_length));
                    };
                    // Every element occupies at least one byte
                    if count > parser.remaining() {
                        return Err(malformed_error!(
                            "Array length {} exceeds remaining data {}",
                            count,
                            parser.remaining()
                        ));
                    }

                    depth += 1;
                    if depth > MAX_NESTING_DEPTH {
                        return Err(DepthLimitExceeded(MAX_NESTING_DEPTH));
                    }
                    work_stack.push(WorkItem::BuildArray(count));
                    for _ in 0..count {
                        work_stack.push(WorkItem::ParseTag(element_type_tag));
                    }
                }
                _ => {
                    return Err(malformed_error!(
                        "Unsupported serialization type tag: 0x{:02X}",
                        tag
                    ));
                }
            },
            WorkItem::BuildArray(count) => {
                depth -= 1;
                if result_stack.len() < count {
                    return Err(malformed_error!(
                        "Insufficient elements on stack for array of length {}",
                        count
                    ));
                }

                let start_idx = result_stack.len() - count;
                let elements = result_stack.drain(start_idx..).collect();
                result_stack.push(AttributeArgument::Array(elements));
            }
            WorkItem::TaggedObject => {
                depth -= 1;
            }
        }
    }

    match (result_stack.pop(), result_stack.is_empty()) {
        (Some(result), true) => Ok(result),
        _ => Err(malformed_error!("Attribute value did not produce a single result")),
    }
}
