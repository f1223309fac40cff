//! Support-table reader.
//!
//! [`LibraryMetadata::from_bytes`] decodes one uncompressed support table into the
//! model of [`crate::metadata::typedef`]. The format is versioned: a reader accepts
//! any minor version of the major version it knows and rejects everything else
//! with [`crate::Error::NotSupported`].
//!
//! # Format
//!
//! ```text
//! u32  magic      "NOSP"
//! u16  major, u16 minor
//! str  library name
//! cu   type count
//!   type:   str full name, u8 kind, attrs,
//!           cu n x property { str name, cu parameter count, attrs },
//!           cu n x method   { str name, cu parameter count, attrs },
//!           cu n x event    { str name, attrs },
//!           cu n x field    { str name, constant, attrs }
//! constant: u8 serialization tag (0 = none) followed by the value
//! attrs:    cu n x { str attribute type name, cu blob length, blob }
//! ```
//!
//! `cu` is an ECMA-335 compressed unsigned integer, `str` a `cu` byte length
//! followed by UTF-8 data.

use std::collections::HashMap;

use crate::{
    file::parser::Parser,
    metadata::{
        attributes::{parse_attribute_data, read_argument, CustomAttribute},
        typedef::{EventDef, FieldDef, MethodDef, PropertyDef, SupportType, TypeKind},
    },
    Error, Result,
};

/// Magic number at the start of every support table (`"NOSP"`).
pub const TABLE_MAGIC: u32 = 0x5053_4F4E;

/// Major format version produced and accepted by this crate.
pub const FORMAT_MAJOR: u16 = 1;

/// Minor format version produced by this crate.
pub const FORMAT_MINOR: u16 = 0;

/// Constant tag marking a field without a constant value.
pub const NO_CONSTANT: u8 = 0;

/// The parsed support table of one library.
#[derive(Debug, Clone)]
pub struct LibraryMetadata {
    name: String,
    major: u16,
    minor: u16,
    types: Vec<SupportType>,
    index: HashMap<String, usize>,
}

impl LibraryMetadata {
    /// Parse an uncompressed support table.
    ///
    /// # Errors
    /// - [`crate::Error::Empty`]: `data` is empty
    /// - [`crate::Error::NotSupported`]: Wrong magic or unknown major version
    /// - [`crate::Error::OutOfBounds`]: Truncated table
    /// - [`crate::Error::Malformed`]: Invalid kinds, strings, attribute blobs or trailing data
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Empty);
        }

        let mut parser = Parser::new(data);
        if parser.read_le::<u32>()? != TABLE_MAGIC {
            return Err(Error::NotSupported);
        }

        let major = parser.read_le::<u16>()?;
        let minor = parser.read_le::<u16>()?;
        if major != FORMAT_MAJOR {
            return Err(Error::NotSupported);
        }

        let name = parser.read_compressed_string_utf8()?;
        let type_count = read_count(&mut parser)?;

        let mut types = Vec::with_capacity(type_count);
        for _ in 0..type_count {
            types.push(read_type(&mut parser)?);
        }

        if parser.has_more_data() {
            return Err(malformed_error!(
                "Trailing data after support table {} at offset {} - {} bytes",
                name,
                parser.pos(),
                parser.remaining()
            ));
        }

        Ok(Self::from_types(name, major, minor, types))
    }

    /// Build metadata from already constructed types, using the current format version.
    pub fn new(name: impl Into<String>, types: Vec<SupportType>) -> Self {
        Self::from_types(name.into(), FORMAT_MAJOR, FORMAT_MINOR, types)
    }

    fn from_types(name: String, major: u16, minor: u16, types: Vec<SupportType>) -> Self {
        let mut index = HashMap::with_capacity(types.len());
        for (position, ty) in types.iter().enumerate() {
            index
                .entry(ty.fullname.to_ascii_lowercase())
                .or_insert(position);
        }

        LibraryMetadata {
            name,
            major,
            minor,
            types,
            index,
        }
    }

    /// Library name as stored in the table, e.g. `ExcelApi`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format version as `(major, minor)`.
    #[must_use]
    pub fn version(&self) -> (u16, u16) {
        (self.major, self.minor)
    }

    /// All types in table order.
    #[must_use]
    pub fn types(&self) -> &[SupportType] {
        &self.types
    }

    /// Look up a type by full name, ignoring ASCII case.
    ///
    /// When a table defines the same name twice, the first definition wins.
    #[must_use]
    pub fn type_by_fullname(&self, fullname: &str) -> Option<&SupportType> {
        self.index
            .get(&fullname.to_ascii_lowercase())
            .and_then(|&position| self.types.get(position))
    }
}

/// Read an element count, rejecting counts that cannot fit the remaining data.
fn read_count(parser: &mut Parser<'_>) -> Result<usize> {
    let count = parser.read_compressed_uint()? as usize;
    if count > parser.remaining() {
        return Err(malformed_error!(
            "Element count {} exceeds remaining data {}",
            count,
            parser.remaining()
        ));
    }
    Ok(count)
}

fn read_attributes(parser: &mut Parser<'_>) -> Result<Vec<CustomAttribute>> {
    let count = read_count(parser)?;
    let mut attributes = Vec::with_capacity(count);
    for _ in 0..count {
        let type_name = parser.read_compressed_string_utf8()?;
        let blob_length = parser.read_compressed_uint()? as usize;
        let blob = parser.read_bytes(blob_length)?;
        attributes.push(CustomAttribute {
            type_name,
            value: parse_attribute_data(blob)?,
        });
    }
    Ok(attributes)
}

fn read_type(parser: &mut Parser<'_>) -> Result<SupportType> {
    let fullname = parser.read_compressed_string_utf8()?;
    let kind_byte = parser.read_le::<u8>()?;
    let Some(kind) = TypeKind::from_byte(kind_byte) else {
        return Err(malformed_error!(
            "Invalid kind 0x{:02X} for type {}",
            kind_byte,
            fullname
        ));
    };

    let mut ty = SupportType::new(fullname, kind);
    ty.attributes = read_attributes(parser)?;

    let property_count = read_count(parser)?;
    ty.properties.reserve(property_count);
    for _ in 0..property_count {
        ty.properties.push(PropertyDef {
            name: parser.read_compressed_string_utf8()?,
            parameter_count: parser.read_compressed_uint()?,
            attributes: read_attributes(parser)?,
        });
    }

    let method_count = read_count(parser)?;
    ty.methods.reserve(method_count);
    for _ in 0..method_count {
        ty.methods.push(MethodDef {
            name: parser.read_compressed_string_utf8()?,
            parameter_count: parser.read_compressed_uint()?,
            attributes: read_attributes(parser)?,
        });
    }

    let event_count = read_count(parser)?;
    ty.events.reserve(event_count);
    for _ in 0..event_count {
        ty.events.push(EventDef {
            name: parser.read_compressed_string_utf8()?,
            attributes: read_attributes(parser)?,
        });
    }

    let field_count = read_count(parser)?;
    ty.fields.reserve(field_count);
    for _ in 0..field_count {
        let name = parser.read_compressed_string_utf8()?;
        let constant = match parser.read_le::<u8>()? {
            NO_CONSTANT => None,
            tag => Some(read_argument(parser, tag)?),
        };
        ty.fields.push(FieldDef {
            name,
            constant,
            attributes: read_attributes(parser)?,
        });
    }

    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::attributes::AttributeArgument;

    fn header(major: u16) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&TABLE_MAGIC.to_le_bytes());
        data.extend_from_slice(&major.to_le_bytes());
        data.extend_from_slice(&FORMAT_MINOR.to_le_bytes());
        data
    }

    #[test]
    fn parse_minimal_table() {
        let mut data = header(FORMAT_MAJOR);
        data.extend_from_slice(&[0x07, b'W', b'o', b'r', b'd', b'A', b'p', b'i']);
        data.push(0x01); // one type
        data.extend_from_slice(&[0x05, b'N', b's', b'.', b'W', b'd']);
        data.push(0x02); // enum
        data.push(0x00); // no attributes
        data.extend_from_slice(&[0x00, 0x00, 0x00]); // no properties, methods, events
        data.push(0x01); // one field
        data.extend_from_slice(&[0x02, b'w', b'd']);
        data.extend_from_slice(&[0x08, 0x10, 0x00, 0x00, 0x00]); // I4 16
        data.push(0x00); // no attributes

        let metadata = LibraryMetadata::from_bytes(&data).unwrap();
        assert_eq!(metadata.name(), "WordApi");
        assert_eq!(metadata.version(), (1, 0));
        let ty = metadata.type_by_fullname("NS.WD").unwrap();
        assert_eq!(ty.kind, TypeKind::Enum);
        assert_eq!(ty.fields[0].constant, Some(AttributeArgument::I4(16)));
    }

    #[test]
    fn rejects_bad_magic_and_version() {
        assert!(matches!(
            LibraryMetadata::from_bytes(b"MZ\x90\x00\x03\x00\x00\x00"),
            Err(Error::NotSupported)
        ));

        let mut data = header(FORMAT_MAJOR + 1);
        data.extend_from_slice(&[0x00, 0x00]);
        assert!(matches!(
            LibraryMetadata::from_bytes(&data),
            Err(Error::NotSupported)
        ));

        assert!(matches!(LibraryMetadata::from_bytes(&[]), Err(Error::Empty)));
    }

    #[test]
    fn rejects_truncated_table() {
        let mut data = header(FORMAT_MAJOR);
        data.extend_from_slice(&[0x03, b'A', b'p', b'i', 0x01]);
        data.extend_from_slice(&[0x04, b'N', b's']);
        assert!(LibraryMetadata::from_bytes(&data).is_err());
    }

    #[test]
    fn rejects_absurd_counts() {
        let mut data = header(FORMAT_MAJOR);
        data.extend_from_slice(&[0x03, b'A', b'p', b'i']);
        data.extend_from_slice(&[0xDF, 0xFF, 0xFF, 0xFF]); // 0x1FFF_FFFF types
        assert!(matches!(
            LibraryMetadata::from_bytes(&data),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn first_definition_wins() {
        let first = SupportType::new("Ns.Dup", TypeKind::Class);
        let second = SupportType::new("NS.DUP", TypeKind::Interface);
        let metadata = LibraryMetadata::new("TestApi", vec![first, second]);
        assert_eq!(
            metadata.type_by_fullname("ns.dup").map(|ty| ty.kind),
            Some(TypeKind::Class)
        );
        assert_eq!(metadata.types().len(), 2);
    }
}
