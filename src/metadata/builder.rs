//! Support-table writer.
//!
//! [`SupportTableBuilder`] assembles the types of one library and serializes them
//! into the format read by [`LibraryMetadata::from_bytes`]. [`TypeBuilder`] offers a
//! fluent API for a single type.
//!
//! # Example
//!
//! ```rust
//! use netoffice_compat::metadata::{
//!     builder::{SupportTableBuilder, TypeBuilder},
//!     loader::LibraryMetadata,
//!     support::support_by_version,
//! };
//!
//! let range = TypeBuilder::class("NetOffice.ExcelApi.Range")
//!     .attribute(support_by_version("Excel", &[9, 10, 11, 12, 14, 15, 16]))
//!     .property("Value", 1, vec![support_by_version("Excel", &[9, 10, 11, 12, 14, 15, 16])])
//!     .build();
//!
//! let table = SupportTableBuilder::new("ExcelApi").add_type(range).build()?;
//! let metadata = LibraryMetadata::from_bytes(&table)?;
//! assert!(metadata.type_by_fullname("NetOffice.ExcelApi.Range").is_some());
//! # Ok::<(), netoffice_compat::Error>(())
//! ```

use crate::{
    file::{
        compress_gzip,
        io::{push_compressed_string_utf8, push_compressed_uint, push_le},
    },
    metadata::{
        attributes::{encode_attribute_data, write_tagged_argument, AttributeArgument, CustomAttribute},
        loader::{LibraryMetadata, FORMAT_MAJOR, FORMAT_MINOR, NO_CONSTANT, TABLE_MAGIC},
        typedef::{EventDef, FieldDef, MethodDef, PropertyDef, SupportType, TypeKind},
    },
    Result,
};

/// Collects the types of one library and writes them as a support table.
#[derive(Debug, Clone, Default)]
pub struct SupportTableBuilder {
    name: String,
    types: Vec<SupportType>,
}

impl SupportTableBuilder {
    /// Start a table for the library `name`, e.g. `ExcelApi`.
    pub fn new(name: impl Into<String>) -> Self {
        SupportTableBuilder {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Append a type.
    #[must_use]
    pub fn add_type(mut self, ty: SupportType) -> Self {
        self.types.push(ty);
        self
    }

    /// Append a type in place.
    pub fn push_type(&mut self, ty: SupportType) {
        self.types.push(ty);
    }

    /// Number of types added so far.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Serialize the table without compression.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a count, string or attribute value
    /// exceeds the limits of the format.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        push_le(&mut buffer, TABLE_MAGIC);
        push_le(&mut buffer, FORMAT_MAJOR);
        push_le(&mut buffer, FORMAT_MINOR);
        push_compressed_string_utf8(&mut buffer, &self.name)?;

        push_count(&mut buffer, self.types.len())?;
        for ty in &self.types {
            write_type(&mut buffer, ty)?;
        }

        Ok(buffer)
    }

    /// Serialize the table and gzip it, producing a loadable resource file.
    ///
    /// # Errors
    /// See [`SupportTableBuilder::build`]; compression failures are reported as
    /// [`crate::Error::FileError`].
    pub fn build_compressed(&self) -> Result<Vec<u8>> {
        compress_gzip(&self.build()?)
    }

    /// Convert into in-memory metadata without serializing.
    #[must_use]
    pub fn into_metadata(self) -> LibraryMetadata {
        LibraryMetadata::new(self.name, self.types)
    }
}

fn push_count(buffer: &mut Vec<u8>, count: usize) -> Result<()> {
    let Ok(count) = u32::try_from(count) else {
        return Err(malformed_error!("Too many entries - {}", count));
    };
    push_compressed_uint(buffer, count)
}

fn write_attributes(buffer: &mut Vec<u8>, attributes: &[CustomAttribute]) -> Result<()> {
    push_count(buffer, attributes.len())?;
    for attribute in attributes {
        push_compressed_string_utf8(buffer, &attribute.type_name)?;
        let blob = encode_attribute_data(&attribute.value)?;
        push_count(buffer, blob.len())?;
        buffer.extend_from_slice(&blob);
    }
    Ok(())
}

fn write_type(buffer: &mut Vec<u8>, ty: &SupportType) -> Result<()> {
    push_compressed_string_utf8(buffer, &ty.fullname)?;
    push_le(buffer, ty.kind.to_byte());
    write_attributes(buffer, &ty.attributes)?;

    push_count(buffer, ty.properties.len())?;
    for property in &ty.properties {
        push_compressed_string_utf8(buffer, &property.name)?;
        push_compressed_uint(buffer, property.parameter_count)?;
        write_attributes(buffer, &property.attributes)?;
    }

    push_count(buffer, ty.methods.len())?;
    for method in &ty.methods {
        push_compressed_string_utf8(buffer, &method.name)?;
        push_compressed_uint(buffer, method.parameter_count)?;
        write_attributes(buffer, &method.attributes)?;
    }

    push_count(buffer, ty.events.len())?;
    for event in &ty.events {
        push_compressed_string_utf8(buffer, &event.name)?;
        write_attributes(buffer, &event.attributes)?;
    }

    push_count(buffer, ty.fields.len())?;
    for field in &ty.fields {
        push_compressed_string_utf8(buffer, &field.name)?;
        match &field.constant {
            Some(constant) => write_tagged_argument(buffer, constant)?,
            None => push_le(buffer, NO_CONSTANT),
        }
        write_attributes(buffer, &field.attributes)?;
    }

    Ok(())
}

/// Provides a fluent API for building a single [`SupportType`].
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    ty: SupportType,
}

impl TypeBuilder {
    /// Start a type of the given kind.
    pub fn new(fullname: impl Into<String>, kind: TypeKind) -> Self {
        TypeBuilder {
            ty: SupportType::new(fullname, kind),
        }
    }

    /// Start a class.
    pub fn class(fullname: impl Into<String>) -> Self {
        Self::new(fullname, TypeKind::Class)
    }

    /// Start an interface.
    pub fn interface(fullname: impl Into<String>) -> Self {
        Self::new(fullname, TypeKind::Interface)
    }

    /// Start an enumeration.
    pub fn enumeration(fullname: impl Into<String>) -> Self {
        Self::new(fullname, TypeKind::Enum)
    }

    /// Attach an attribute to the type itself.
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.ty.attributes.push(attribute);
        self
    }

    /// Add a property.
    #[must_use]
    pub fn property(
        mut self,
        name: impl Into<String>,
        parameter_count: u32,
        attributes: Vec<CustomAttribute>,
    ) -> Self {
        self.ty.properties.push(PropertyDef {
            name: name.into(),
            parameter_count,
            attributes,
        });
        self
    }

    /// Add a method.
    #[must_use]
    pub fn method(
        mut self,
        name: impl Into<String>,
        parameter_count: u32,
        attributes: Vec<CustomAttribute>,
    ) -> Self {
        self.ty.methods.push(MethodDef {
            name: name.into(),
            parameter_count,
            attributes,
        });
        self
    }

    /// Add an event.
    #[must_use]
    pub fn event(mut self, name: impl Into<String>, attributes: Vec<CustomAttribute>) -> Self {
        self.ty.events.push(EventDef {
            name: name.into(),
            attributes,
        });
        self
    }

    /// Add a field with an optional constant.
    #[must_use]
    pub fn field(
        mut self,
        name: impl Into<String>,
        constant: Option<AttributeArgument>,
        attributes: Vec<CustomAttribute>,
    ) -> Self {
        self.ty.fields.push(FieldDef {
            name: name.into(),
            constant,
            attributes,
        });
        self
    }

    /// Add an enum member with an `i32` constant.
    #[must_use]
    pub fn enum_member(
        self,
        name: impl Into<String>,
        value: i32,
        attributes: Vec<CustomAttribute>,
    ) -> Self {
        self.field(name, Some(AttributeArgument::I4(value)), attributes)
    }

    /// Finish the type.
    #[must_use]
    pub fn build(self) -> SupportType {
        self.ty
    }
}
