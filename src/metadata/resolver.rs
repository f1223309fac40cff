//! Member resolution.
//!
//! Maps the parts of a qualified identifier onto support-table entries. All name
//! comparisons ignore ASCII case. There is no fuzzy matching and no fallback to
//! other libraries: an identifier either resolves exactly or not at all.
//!
//! Accessor names are mapped to their owning property or event:
//!
//! | Call name       | Candidate                                   |
//! |-----------------|---------------------------------------------|
//! | `get_Value(a)`  | property `Value` with 1 parameter           |
//! | `set_Value(a)`  | property `Value` with 0 parameters          |
//! | `Quit()`        | method `Quit` with 0 parameters             |
//! | `add_NewSheet`  | event `NewSheet`                            |
//!
//! Properties are tried first, then methods, then events; the first kind that
//! yields a match is returned.

use crate::metadata::{
    loader::LibraryMetadata,
    qualified::strip_array_marker,
    typedef::{EventDef, FieldDef, MemberRef, MethodDef, PropertyDef, SupportType},
};

const GETTER_PREFIX: &str = "get_";
const SETTER_PREFIX: &str = "set_";
const ADD_PREFIX: &str = "add_";
const REMOVE_PREFIX: &str = "remove_";

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &name[prefix.len()..])
}

/// Find a type by its fully qualified name; one trailing `[]` is ignored.
#[must_use]
pub fn find_type<'a>(
    metadata: &'a LibraryMetadata,
    qualified_name: &str,
) -> Option<&'a SupportType> {
    metadata.type_by_fullname(strip_array_marker(qualified_name.trim()))
}

/// Find the property addressed by an accessor call.
///
/// A `get_`/`set_` prefix is removed from `name`. A setter carries the assigned value
/// as an extra parameter, so its count is reduced by one; a setter without any
/// parameter matches nothing.
#[must_use]
pub fn find_property<'a>(
    ty: &'a SupportType,
    name: &str,
    parameter_count: usize,
) -> Option<&'a PropertyDef> {
    let (property_name, expected) =
        if let Some(rest) = strip_prefix_ignore_case(name, SETTER_PREFIX) {
            (rest, parameter_count.checked_sub(1)?)
        } else if let Some(rest) = strip_prefix_ignore_case(name, GETTER_PREFIX) {
            (rest, parameter_count)
        } else {
            (name, parameter_count)
        };

    ty.properties.iter().find(|property| {
        property.name.eq_ignore_ascii_case(property_name)
            && usize::try_from(property.parameter_count).is_ok_and(|count| count == expected)
    })
}

/// Find a method by exact name and parameter count.
#[must_use]
pub fn find_method<'a>(
    ty: &'a SupportType,
    name: &str,
    parameter_count: usize,
) -> Option<&'a MethodDef> {
    ty.methods.iter().find(|method| {
        method.name.eq_ignore_ascii_case(name)
            && usize::try_from(method.parameter_count).is_ok_and(|count| count == parameter_count)
    })
}

/// Find an event, removing an `add_`/`remove_` prefix from `name`.
#[must_use]
pub fn find_event<'a>(ty: &'a SupportType, name: &str) -> Option<&'a EventDef> {
    let event_name = strip_prefix_ignore_case(name, ADD_PREFIX)
        .or_else(|| strip_prefix_ignore_case(name, REMOVE_PREFIX))
        .unwrap_or(name);

    ty.events
        .iter()
        .find(|event| event.name.eq_ignore_ascii_case(event_name))
}

/// Resolve a member call: property, then method, then event.
///
/// # Examples
///
/// ```rust
/// use netoffice_compat::metadata::{
///     builder::TypeBuilder,
///     resolver::find_member,
///     typedef::MemberRef,
/// };
///
/// let range = TypeBuilder::class("NetOffice.ExcelApi.Range")
///     .property("Value", 1, vec![])
///     .method("Select", 0, vec![])
///     .build();
///
/// assert!(matches!(find_member(&range, "get_Value", 1), Some(MemberRef::Property(_))));
/// assert!(matches!(find_member(&range, "set_Value", 2), Some(MemberRef::Property(_))));
/// assert!(matches!(find_member(&range, "Select", 0), Some(MemberRef::Method(_))));
/// assert!(find_member(&range, "Select", 1).is_none());
/// ```
#[must_use]
pub fn find_member<'a>(
    ty: &'a SupportType,
    name: &str,
    parameter_count: usize,
) -> Option<MemberRef<'a>> {
    if let Some(property) = find_property(ty, name, parameter_count) {
        return Some(MemberRef::Property(property));
    }
    if let Some(method) = find_method(ty, name, parameter_count) {
        return Some(MemberRef::Method(method));
    }
    find_event(ty, name).map(MemberRef::Event)
}

/// Find the first field whose integral constant equals `value`.
#[must_use]
pub fn find_enum_field(ty: &SupportType, value: i64) -> Option<&FieldDef> {
    ty.fields.iter().find(|field| {
        field
            .constant
            .as_ref()
            .and_then(|constant| constant.as_i64())
            == Some(value)
    })
}
