//! Custom attribute blob encoding.
//!
//! Produces the self-describing blob layout read by
//! [`crate::metadata::attributes::parse_attribute_data`]. Homogeneous arrays are
//! written with their common element tag, mixed or empty arrays as
//! `TAGGED_OBJECT` arrays.

use crate::{
    file::io::{push_compressed_string_utf8, push_le},
    metadata::attributes::{
        parser::{ATTRIBUTE_PROLOG, MAX_NESTING_DEPTH},
        types::{AttributeArgument, AttributeValue, SERIALIZATION_TYPE},
    },
    Error::DepthLimitExceeded,
    Result,
};

/// Encode a complete attribute value into a blob.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the value has more than `u16::MAX`
/// fixed or named arguments, an array longer than `i32::MAX`, or an enum whose
/// underlying value does not fit an `i32`; [`crate::Error::DepthLimitExceeded`]
/// for excessive nesting.
///
/// # Examples
///
/// ```rust
/// use netoffice_compat::metadata::attributes::{
///     encode_attribute_data, parse_attribute_data, AttributeArgument, AttributeValue,
/// };
///
/// let value = AttributeValue {
///     fixed_args: vec![
///         AttributeArgument::String("Excel".into()),
///         AttributeArgument::Array(vec![AttributeArgument::I4(12), AttributeArgument::I4(14)]),
///     ],
///     named_args: vec![],
/// };
///
/// let blob = encode_attribute_data(&value)?;
/// assert_eq!(parse_attribute_data(&blob)?, value);
/// # Ok::<(), netoffice_compat::Error>(())
/// ```
pub fn encode_attribute_data(value: &AttributeValue) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    push_le(&mut buffer, ATTRIBUTE_PROLOG);

    push_le(&mut buffer, count_u16(value.fixed_args.len())?);
    for argument in &value.fixed_args {
        write_tagged_argument(&mut buffer, argument)?;
    }

    push_le(&mut buffer, count_u16(value.named_args.len())?);
    for named in &value.named_args {
        push_le(
            &mut buffer,
            if named.is_field {
                SERIALIZATION_TYPE::FIELD
            } else {
                SERIALIZATION_TYPE::PROPERTY
            },
        );
        push_le(&mut buffer, named.value.type_tag());
        push_compressed_string_utf8(&mut buffer, &named.name)?;
        write_argument(&mut buffer, &named.value, 0)?;
    }

    Ok(buffer)
}

/// Write a serialization tag followed by the value.
///
/// # Errors
/// See [`encode_attribute_data`].
pub fn write_tagged_argument(buffer: &mut Vec<u8>, argument: &AttributeArgument) -> Result<()> {
    push_le(buffer, argument.type_tag());
    write_argument(buffer, argument, 0)
}

fn count_u16(count: usize) -> Result<u16> {
    u16::try_from(count).map_err(|_| malformed_error!("Too many attribute arguments - {}", count))
}

fn element_tag(items: &[AttributeArgument]) -> u8 {
    let mut tags = items.iter().map(AttributeArgument::type_tag);
    match tags.next() {
        Some(first) if tags.all(|tag| tag == first) => first,
        _ => SERIALIZATION_TYPE::TAGGED_OBJECT,
    }
}

fn write_argument(buffer: &mut Vec<u8>, argument: &AttributeArgument, depth: usize) -> Result<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DepthLimitExceeded(MAX_NESTING_DEPTH));
    }

    match argument {
        AttributeArgument::Bool(v) => push_le(buffer, u8::from(*v)),
        AttributeArgument::Char(c) => {
            let code = u16::try_from(u32::from(*c))
                .map_err(|_| malformed_error!("Character outside the BMP: {:?}", c))?;
            push_le(buffer, code);
        }
        AttributeArgument::I1(v) => push_le(buffer, *v),
        AttributeArgument::U1(v) => push_le(buffer, *v),
        AttributeArgument::I2(v) => push_le(buffer, *v),
        AttributeArgument::U2(v) => push_le(buffer, *v),
        AttributeArgument::I4(v) => push_le(buffer, *v),
        AttributeArgument::U4(v) => push_le(buffer, *v),
        AttributeArgument::I8(v) => push_le(buffer, *v),
        AttributeArgument::U8(v) => push_le(buffer, *v),
        AttributeArgument::R4(v) => push_le(buffer, *v),
        AttributeArgument::R8(v) => push_le(buffer, *v),
        AttributeArgument::String(s) | AttributeArgument::Type(s) => {
            push_compressed_string_utf8(buffer, s)?;
        }
        AttributeArgument::Enum(type_name, value) => {
            let underlying = value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| malformed_error!("Enum value of {} is not an i32", type_name))?;
            push_compressed_string_utf8(buffer, type_name)?;
            push_le(buffer, underlying);
        }
        AttributeArgument::Array(items) => {
            let tag = element_tag(items);
            let length = i32::try_from(items.len())
                .map_err(|_| malformed_error!("Array too long - {} elements", items.len()))?;

            push_le(buffer, tag);
            push_le(buffer, length);
            for item in items {
                if tag == SERIALIZATION_TYPE::TAGGED_OBJECT {
                    push_le(buffer, item.type_tag());
                }
                write_argument(buffer, item, depth + 1)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::attributes::{parse_attribute_data, AttributeNamedArgument};

    #[test]
    fn encode_version_attribute_layout() {
        let value = AttributeValue {
            fixed_args: vec![
                AttributeArgument::String("Word".into()),
                AttributeArgument::Array(vec![AttributeArgument::I4(9)]),
            ],
            named_args: vec![],
        };

        let blob = encode_attribute_data(&value).unwrap();
        assert_eq!(
            blob,
            vec![
                0x01, 0x00, 0x02, 0x00, // Prolog, two fixed arguments
                0x0E, 0x04, b'W', b'o', b'r', b'd', // "Word"
                0x1D, 0x08, 0x01, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, // int[] { 9 }
                0x00, 0x00, // No named arguments
            ]
        );
    }

    #[test]
    fn mixed_arrays_use_tagged_objects() {
        let value = AttributeValue {
            fixed_args: vec![AttributeArgument::Array(vec![
                AttributeArgument::I4(12),
                AttributeArgument::String("14".into()),
                AttributeArgument::Enum("Ns.Version".into(), Box::new(AttributeArgument::I4(16))),
            ])],
            named_args: vec![AttributeNamedArgument {
                is_field: true,
                name: "Primary".into(),
                value: AttributeArgument::Bool(false),
            }],
        };

        let blob = encode_attribute_data(&value).unwrap();
        assert_eq!(blob[4], SERIALIZATION_TYPE::SZARRAY);
        assert_eq!(blob[5], SERIALIZATION_TYPE::TAGGED_OBJECT);
        assert_eq!(parse_attribute_data(&blob).unwrap(), value);
    }

    #[test]
    fn enum_out_of_range_is_rejected() {
        let value = AttributeValue {
            fixed_args: vec![AttributeArgument::Enum(
                "Ns.Big".into(),
                Box::new(AttributeArgument::I8(i64::MAX)),
            )],
            named_args: vec![],
        };
        assert!(encode_attribute_data(&value).is_err());
    }

    #[test]
    fn excessive_nesting_is_rejected() {
        let mut value = AttributeArgument::I4(1);
        for _ in 0..=MAX_NESTING_DEPTH + 1 {
            value = AttributeArgument::Array(vec![value]);
        }
        let mut buffer = Vec::new();
        assert!(matches!(
            write_tagged_argument(&mut buffer, &value),
            Err(DepthLimitExceeded(_))
        ));
    }
}
