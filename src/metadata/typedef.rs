//! In-memory model of a support table.
//!
//! A [`SupportType`] mirrors one public type of a host-application library: its
//! kind, the custom attributes on the type itself, and the attributed properties,
//! methods, events and enum fields it exposes. All of it is read-only after
//! [`crate::metadata::loader::LibraryMetadata::from_bytes`] has produced it.

use std::fmt;

use crate::metadata::attributes::{AttributeArgument, CustomAttribute};

/// Kind of a support-table type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Reference type (coclass, wrapper class)
    Class,
    /// Dispatch or event interface
    Interface,
    /// Enumeration whose fields carry integral constants
    Enum,
}

impl TypeKind {
    /// The on-disk encoding of the kind.
    #[must_use]
    pub fn to_byte(self) -> u8 {
        match self {
            TypeKind::Class => 0,
            TypeKind::Interface => 1,
            TypeKind::Enum => 2,
        }
    }

    /// Decode a kind byte; unknown values return `None`.
    #[must_use]
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(TypeKind::Class),
            1 => Some(TypeKind::Interface),
            2 => Some(TypeKind::Enum),
            _ => None,
        }
    }

    /// Lowercase name used in listings.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can carry custom attributes.
pub trait Annotated {
    /// The attributes in declaration order.
    fn attributes(&self) -> &[CustomAttribute];
}

/// A property, identified by name and indexer parameter count.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// Property name without accessor prefix
    pub name: String,
    /// Number of index parameters of the getter
    pub parameter_count: u32,
    /// Attributes on the property
    pub attributes: Vec<CustomAttribute>,
}

/// A method, identified by name and parameter count.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Number of declared parameters
    pub parameter_count: u32,
    /// Attributes on the method
    pub attributes: Vec<CustomAttribute>,
}

/// An event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDef {
    /// Event name without `add_`/`remove_` prefix
    pub name: String,
    /// Attributes on the event
    pub attributes: Vec<CustomAttribute>,
}

/// A field, usually an enum member with its constant value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Constant value, if the field has one
    pub constant: Option<AttributeArgument>,
    /// Attributes on the field
    pub attributes: Vec<CustomAttribute>,
}

/// A type described by a support table.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportType {
    /// Fully qualified name, e.g. `NetOffice.ExcelApi.Range`
    pub fullname: String,
    /// Type kind
    pub kind: TypeKind,
    /// Attributes on the type
    pub attributes: Vec<CustomAttribute>,
    /// Properties in declaration order
    pub properties: Vec<PropertyDef>,
    /// Methods in declaration order
    pub methods: Vec<MethodDef>,
    /// Events in declaration order
    pub events: Vec<EventDef>,
    /// Fields in declaration order
    pub fields: Vec<FieldDef>,
}

impl SupportType {
    /// Create an empty type of the given kind.
    pub fn new(fullname: impl Into<String>, kind: TypeKind) -> Self {
        SupportType {
            fullname: fullname.into(),
            kind,
            attributes: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// The simple name: the part after the last `.`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.fullname
            .rsplit_once('.')
            .map_or(self.fullname.as_str(), |(_, name)| name)
    }

    /// The namespace: everything before the last `.`.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.fullname.rsplit_once('.').map_or("", |(ns, _)| ns)
    }

    /// Total number of members of all kinds, fields included.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.properties.len() + self.methods.len() + self.events.len() + self.fields.len()
    }
}

macro_rules! impl_annotated {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Annotated for $ty {
                fn attributes(&self) -> &[CustomAttribute] {
                    &self.attributes
                }
            }
        )*
    };
}

impl_annotated!(SupportType, PropertyDef, MethodDef, EventDef, FieldDef);

/// Kind of a resolved member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Property
    Property,
    /// Method
    Method,
    /// Event
    Event,
}

impl MemberKind {
    /// Lowercase name used in listings.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MemberKind::Property => "property",
            MemberKind::Method => "method",
            MemberKind::Event => "event",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A member located by the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MemberRef<'a> {
    /// A property matched through its accessor name
    Property(&'a PropertyDef),
    /// A method matched by exact name and parameter count
    Method(&'a MethodDef),
    /// An event matched through its accessor name
    Event(&'a EventDef),
}

impl MemberRef<'_> {
    /// Canonical member name (accessor prefixes removed).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MemberRef::Property(p) => &p.name,
            MemberRef::Method(m) => &m.name,
            MemberRef::Event(e) => &e.name,
        }
    }

    /// The member kind.
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberRef::Property(_) => MemberKind::Property,
            MemberRef::Method(_) => MemberKind::Method,
            MemberRef::Event(_) => MemberKind::Event,
        }
    }
}

impl Annotated for MemberRef<'_> {
    fn attributes(&self) -> &[CustomAttribute] {
        match self {
            MemberRef::Property(p) => p.attributes(),
            MemberRef::Method(m) => m.attributes(),
            MemberRef::Event(e) => e.attributes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_byte_mapping() {
        for kind in [TypeKind::Class, TypeKind::Interface, TypeKind::Enum] {
            assert_eq!(TypeKind::from_byte(kind.to_byte()), Some(kind));
        }
        assert_eq!(TypeKind::from_byte(3), None);
    }

    #[test]
    fn type_name_parts() {
        let ty = SupportType::new("NetOffice.ExcelApi.Enums.XlChartType", TypeKind::Enum);
        assert_eq!(ty.name(), "XlChartType");
        assert_eq!(ty.namespace(), "NetOffice.ExcelApi.Enums");

        let bare = SupportType::new("Range", TypeKind::Class);
        assert_eq!(bare.name(), "Range");
        assert_eq!(bare.namespace(), "");
    }

    #[test]
    fn member_ref_exposes_attributes() {
        let method = MethodDef {
            name: "Quit".into(),
            parameter_count: 0,
            attributes: vec![],
        };
        let member = MemberRef::Method(&method);
        assert_eq!(member.name(), "Quit");
        assert_eq!(member.kind(), MemberKind::Method);
        assert_eq!(member.kind().to_string(), "method");
        assert!(member.attributes().is_empty());
    }
}
