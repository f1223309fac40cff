//! Qualified identifier grammar.
//!
//! Identifiers name a library, a type and optionally a member call:
//!
//! ```text
//! <Namespace>.<Library>Api.<Type>[::<Member>(<Param1>,<Param2>,...)]
//! ```
//!
//! e.g. `NetOffice.ExcelApi.Range::get_Value(System.Object)`. A trailing `[]`
//! marks an array type reference and is ignored for lookups.
//!
//! Every function here is purely syntactic. Malformed input never panics; it
//! produces `None`, which the query layer reports as "not found".

use std::fmt;

use crate::metadata::library::{LibraryKey, LIBRARY_TAG_SUFFIX};

/// Separator between a type and its member.
pub const MEMBER_SEPARATOR: &str = "::";

/// Marker appended to array type references.
pub const ARRAY_MARKER: &str = "[]";

fn dot_segments(name: &str) -> impl Iterator<Item = &str> {
    name.split('.').filter(|segment| !segment.is_empty())
}

fn member_segments(name: &str) -> impl Iterator<Item = &str> {
    name.split(MEMBER_SEPARATOR)
        .filter(|segment| !segment.is_empty())
}

/// Returns `true` if `name` uses the call form (contains a parenthesis).
#[must_use]
pub fn is_call(name: &str) -> bool {
    name.contains('(')
}

/// Removes one trailing `[]` array marker.
#[must_use]
pub fn strip_array_marker(name: &str) -> &str {
    name.strip_suffix(ARRAY_MARKER).unwrap_or(name)
}

/// The library tag: the second dot segment without its three-character suffix.
///
/// ```rust
/// use netoffice_compat::metadata::qualified::library_tag;
///
/// assert_eq!(library_tag("NetOffice.ExcelApi.Range::get_Value()"), Some("Excel"));
/// assert_eq!(library_tag("NetOffice"), None);
/// ```
#[must_use]
pub fn library_tag(name: &str) -> Option<&str> {
    let segment = dot_segments(name).nth(1)?;
    let end = segment.len().checked_sub(LIBRARY_TAG_SUFFIX.len())?;
    segment.get(..end)
}

/// The fully qualified type: everything before the first `::`.
#[must_use]
pub fn qualified_type(name: &str) -> Option<&str> {
    member_segments(name).next()
}

/// The member name.
///
/// For call-style identifiers this is the text between the last `::` and the
/// first `(`; otherwise the last dot segment without a trailing `[]`.
#[must_use]
pub fn member_name(name: &str) -> Option<&str> {
    if is_call(name) {
        let last = member_segments(name).last()?;
        let open = last.find('(')?;
        let member = last[..open].trim();
        (!member.is_empty()).then_some(member)
    } else {
        dot_segments(name).last().map(strip_array_marker)
    }
}

/// The parameter type names of a call-style identifier.
///
/// Parameters are the comma-separated contents of the parenthesis group, trimmed,
/// with empty entries discarded, so `Quit()` has zero parameters. Returns `None`
/// for identifiers that are not calls.
#[must_use]
pub fn parameters(name: &str) -> Option<Vec<String>> {
    if !is_call(name) {
        return None;
    }

    let last = member_segments(name).last()?;
    let open = last.find('(')?;

    Some(
        last[open..]
            .split(',')
            .map(|part| part.replace(['(', ')'], "").trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
    )
}

/// The simple type name: the third dot segment, truncated at the first `::`.
#[must_use]
pub fn simple_type_name(name: &str) -> Option<&str> {
    let segment = dot_segments(name).nth(2)?;
    Some(match segment.find(MEMBER_SEPARATOR) {
        Some(end) => &segment[..end],
        None => segment,
    })
}

/// A parsed qualified identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    /// Library owning the type
    pub library: LibraryKey,
    /// Fully qualified type name, without array marker
    pub type_name: String,
    /// Member name for call-style identifiers
    pub member: Option<String>,
    /// Parameter type names of the call, in order
    pub parameters: Vec<String>,
}

impl QualifiedName {
    /// Parse a member call such as `NetOffice.WordApi.Document::SaveAs2(System.Object)`.
    ///
    /// Returns `None` when the identifier is not a call on a type of a known library.
    #[must_use]
    pub fn parse_call(name: &str) -> Option<Self> {
        let name = name.trim();
        if !name.contains(MEMBER_SEPARATOR) || !is_call(name) {
            return None;
        }

        let library = LibraryKey::from_tag(library_tag(name)?)?;
        let type_name = qualified_type(name)?;
        if is_call(type_name) {
            return None;
        }

        Some(QualifiedName {
            library,
            type_name: type_name.trim().to_string(),
            member: Some(member_name(name)?.to_string()),
            parameters: parameters(name)?,
        })
    }

    /// Parse a type reference such as `NetOffice.ExcelApi.Range[]`.
    ///
    /// The type name is kept verbatim, array marker included; the type lookup
    /// removes it. Any member part is ignored.
    #[must_use]
    pub fn parse_type(name: &str) -> Option<Self> {
        let name = name.trim();
        let library = LibraryKey::from_tag(library_tag(name)?)?;
        let type_name = qualified_type(name)?.trim();
        if type_name.is_empty() || is_call(type_name) {
            return None;
        }

        Some(QualifiedName {
            library,
            type_name: type_name.to_string(),
            member: None,
            parameters: Vec::new(),
        })
    }

    /// Number of call parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)?;
        if let Some(member) = &self.member {
            write!(
                f,
                "{MEMBER_SEPARATOR}{member}({})",
                self.parameters.join(",")
            )?;
        }
        Ok(())
    }
}
