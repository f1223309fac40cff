//! Attribute-specific types and data structures.
//!
//! These types represent parsed custom attribute data: argument values, named
//! arguments, and the overall attribute value. Field constants of enum types
//! reuse [`AttributeArgument`] for their primitive value.

use std::fmt;

/// A custom attribute attached to a type, member or field.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttribute {
    /// Fully qualified name of the attribute type
    pub type_name: String,
    /// Decoded constructor and named arguments
    pub value: AttributeValue,
}

impl CustomAttribute {
    /// Returns `true` if the attribute type name equals `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.type_name.eq_ignore_ascii_case(name)
    }
}

/// Represents a parsed custom attribute value with arguments and named arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeValue {
    /// Fixed arguments from the constructor call
    pub fixed_args: Vec<AttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<AttributeNamedArgument>,
}

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// UTF-8 string
    String(String),
    /// Type reference (as string)
    Type(String),
    /// Array of arguments
    Array(Vec<AttributeArgument>),
    /// Enum value (enum type name + underlying value)
    Enum(String, Box<AttributeArgument>),
}

impl AttributeArgument {
    /// The value as a signed 64-bit integer, if it is integral.
    ///
    /// Enum values report their underlying value. Unsigned 64-bit values above
    /// `i64::MAX` and all non-integral kinds return `None`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeArgument::I1(v) => Some(i64::from(*v)),
            AttributeArgument::U1(v) => Some(i64::from(*v)),
            AttributeArgument::I2(v) => Some(i64::from(*v)),
            AttributeArgument::U2(v) => Some(i64::from(*v)),
            AttributeArgument::I4(v) => Some(i64::from(*v)),
            AttributeArgument::U4(v) => Some(i64::from(*v)),
            AttributeArgument::I8(v) => Some(*v),
            AttributeArgument::U8(v) => i64::try_from(*v).ok(),
            AttributeArgument::Enum(_, inner) => inner.as_i64(),
            _ => None,
        }
    }

    /// The serialization type tag used to encode this value.
    #[must_use]
    pub fn type_tag(&self) -> u8 {
        match self {
            AttributeArgument::Bool(_) => SERIALIZATION_TYPE::BOOLEAN,
            AttributeArgument::Char(_) => SERIALIZATION_TYPE::CHAR,
            AttributeArgument::I1(_) => SERIALIZATION_TYPE::I1,
            AttributeArgument::U1(_) => SERIALIZATION_TYPE::U1,
            AttributeArgument::I2(_) => SERIALIZATION_TYPE::I2,
            AttributeArgument::U2(_) => SERIALIZATION_TYPE::U2,
            AttributeArgument::I4(_) => SERIALIZATION_TYPE::I4,
            AttributeArgument::U4(_) => SERIALIZATION_TYPE::U4,
            AttributeArgument::I8(_) => SERIALIZATION_TYPE::I8,
            AttributeArgument::U8(_) => SERIALIZATION_TYPE::U8,
            AttributeArgument::R4(_) => SERIALIZATION_TYPE::R4,
            AttributeArgument::R8(_) => SERIALIZATION_TYPE::R8,
            AttributeArgument::String(_) => SERIALIZATION_TYPE::STRING,
            AttributeArgument::Type(_) => SERIALIZATION_TYPE::TYPE,
            AttributeArgument::Array(_) => SERIALIZATION_TYPE::SZARRAY,
            AttributeArgument::Enum(..) => SERIALIZATION_TYPE::ENUM,
        }
    }
}

/// Formats the value the way the host tooling prints version numbers:
/// integers in decimal, strings verbatim, booleans as `True`/`False`,
/// enums by their underlying value and arrays comma separated.
impl fmt::Display for AttributeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeArgument::Bool(true) => f.write_str("True"),
            AttributeArgument::Bool(false) => f.write_str("False"),
            AttributeArgument::Char(c) => write!(f, "{c}"),
            AttributeArgument::I1(v) => write!(f, "{v}"),
            AttributeArgument::U1(v) => write!(f, "{v}"),
            AttributeArgument::I2(v) => write!(f, "{v}"),
            AttributeArgument::U2(v) => write!(f, "{v}"),
            AttributeArgument::I4(v) => write!(f, "{v}"),
            AttributeArgument::U4(v) => write!(f, "{v}"),
            AttributeArgument::I8(v) => write!(f, "{v}"),
            AttributeArgument::U8(v) => write!(f, "{v}"),
            AttributeArgument::R4(v) => write!(f, "{v}"),
            AttributeArgument::R8(v) => write!(f, "{v}"),
            AttributeArgument::String(s) | AttributeArgument::Type(s) => f.write_str(s),
            AttributeArgument::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            AttributeArgument::Enum(_, value) => write!(f, "{value}"),
        }
    }
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: AttributeArgument,
}

/// .NET `CorSerializationType` constants as defined in corhdr.h
#[allow(non_snake_case, missing_docs)]
pub mod SERIALIZATION_TYPE {
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0A;
    pub const U8: u8 = 0x0B;
    pub const R4: u8 = 0x0C;
    pub const R8: u8 = 0x0D;
    pub const STRING: u8 = 0x0E;
    pub const SZARRAY: u8 = 0x1D;
    pub const TYPE: u8 = 0x50;
    pub const TAGGED_OBJECT: u8 = 0x51;
    pub const FIELD: u8 = 0x53;
    pub const PROPERTY: u8 = 0x54;
    pub const ENUM: u8 = 0x55;
}
