//! Version-support annotations.
//!
//! NetOffice marks every type and member with an attribute naming the library and
//! the host versions (or libraries) that support it:
//!
//! ```text
//! [SupportByVersion("Excel", 9, 10, 11, 12, 14, 15, 16)]
//! [SupportByLibrary("Office", "Excel", "Word")]
//! ```
//!
//! The second constructor argument is the array of supporting versions. This
//! module builds such attributes and reads them back as strings.

use log::warn;

use crate::metadata::{
    attributes::{AttributeArgument, AttributeValue, CustomAttribute},
    typedef::Annotated,
};

/// Attribute listing the host versions that support an entry.
pub const SUPPORT_BY_VERSION_ATTRIBUTE: &str = "LateBindingApi.Core.SupportByVersionAttribute";

/// Attribute listing the libraries that support an entry.
pub const SUPPORT_BY_LIBRARY_ATTRIBUTE: &str = "LateBindingApi.Core.SupportByLibraryAttribute";

/// The attributes recognized when no others are configured.
pub const DEFAULT_SUPPORT_ATTRIBUTES: [&str; 2] =
    [SUPPORT_BY_VERSION_ATTRIBUTE, SUPPORT_BY_LIBRARY_ATTRIBUTE];

/// Create a `SupportByVersion` attribute for `library` and the given major versions.
#[must_use]
pub fn support_by_version(library: &str, versions: &[i32]) -> CustomAttribute {
    CustomAttribute {
        type_name: SUPPORT_BY_VERSION_ATTRIBUTE.to_string(),
        value: AttributeValue {
            fixed_args: vec![
                AttributeArgument::String(library.to_string()),
                AttributeArgument::Array(
                    versions.iter().copied().map(AttributeArgument::I4).collect(),
                ),
            ],
            named_args: Vec::new(),
        },
    }
}

/// Create a `SupportByLibrary` attribute for `name` and the supporting libraries.
#[must_use]
pub fn support_by_library(name: &str, libraries: &[&str]) -> CustomAttribute {
    CustomAttribute {
        type_name: SUPPORT_BY_LIBRARY_ATTRIBUTE.to_string(),
        value: AttributeValue {
            fixed_args: vec![
                AttributeArgument::String(name.to_string()),
                AttributeArgument::Array(
                    libraries
                        .iter()
                        .map(|library| AttributeArgument::String((*library).to_string()))
                        .collect(),
                ),
            ],
            named_args: Vec::new(),
        },
    }
}

/// The first attribute of `owner` whose type is one of `recognized`, ignoring case.
pub fn support_attribute<'a, S: AsRef<str>>(
    owner: &'a impl Annotated,
    recognized: &[S],
) -> Option<&'a CustomAttribute> {
    owner
        .attributes()
        .iter()
        .find(|attribute| recognized.iter().any(|name| attribute.is(name.as_ref())))
}

/// Extract the version list of the first recognized support attribute on `owner`.
///
/// Returns `None` if `owner` carries no recognized attribute. An attribute whose
/// second argument is missing or not an array yields an empty list.
///
/// # Examples
///
/// ```rust
/// use netoffice_compat::metadata::{
///     builder::TypeBuilder,
///     support::{support_by_version, version_support, DEFAULT_SUPPORT_ATTRIBUTES},
/// };
///
/// let ty = TypeBuilder::class("NetOffice.WordApi.Document")
///     .attribute(support_by_version("Word", &[9, 10, 11]))
///     .build();
///
/// assert_eq!(
///     version_support(&ty, &DEFAULT_SUPPORT_ATTRIBUTES),
///     Some(vec!["9".to_string(), "10".to_string(), "11".to_string()])
/// );
/// ```
pub fn version_support<S: AsRef<str>>(
    owner: &impl Annotated,
    recognized: &[S],
) -> Option<Vec<String>> {
    let attribute = support_attribute(owner, recognized)?;

    match attribute.value.fixed_args.get(1) {
        Some(AttributeArgument::Array(items)) => {
            if items.is_empty() {
                warn!("{} carries an empty version list", attribute.type_name);
            }
            Some(items.iter().map(ToString::to_string).collect())
        }
        Some(other) => {
            warn!(
                "{} has a non-array version argument ({:?})",
                attribute.type_name, other
            );
            Some(Vec::new())
        }
        None => {
            warn!("{} has no version argument", attribute.type_name);
            Some(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typedef::{MethodDef, SupportType, TypeKind};

    fn method_with(attributes: Vec<CustomAttribute>) -> MethodDef {
        MethodDef {
            name: "Quit".into(),
            parameter_count: 0,
            attributes,
        }
    }

    #[test]
    fn versions_in_declaration_order() {
        let method = method_with(vec![support_by_version("Excel", &[16, 9, 12])]);
        assert_eq!(
            version_support(&method, &DEFAULT_SUPPORT_ATTRIBUTES),
            Some(vec!["16".into(), "9".into(), "12".into()])
        );
    }

    #[test]
    fn library_support_lists_names() {
        let mut ty = SupportType::new("NetOffice.OfficeApi.Enums.MsoTriState", TypeKind::Enum);
        ty.attributes
            .push(support_by_library("Office", &["Excel", "Word", "Outlook"]));
        assert_eq!(
            version_support(&ty, &DEFAULT_SUPPORT_ATTRIBUTES),
            Some(vec!["Excel".into(), "Word".into(), "Outlook".into()])
        );
    }

    #[test]
    fn unrecognized_attribute_is_not_support() {
        let method = method_with(vec![CustomAttribute {
            type_name: "System.ObsoleteAttribute".into(),
            value: AttributeValue::default(),
        }]);
        assert_eq!(version_support(&method, &DEFAULT_SUPPORT_ATTRIBUTES), None);
        assert_eq!(version_support(&method_with(vec![]), &DEFAULT_SUPPORT_ATTRIBUTES), None);
    }

    #[test]
    fn attribute_names_match_case_insensitively() {
        let mut attribute = support_by_version("Word", &[12]);
        attribute.type_name = attribute.type_name.to_ascii_uppercase();
        let method = method_with(vec![attribute]);
        assert_eq!(
            version_support(&method, &DEFAULT_SUPPORT_ATTRIBUTES),
            Some(vec!["12".into()])
        );
    }

    #[test]
    fn degenerate_annotations_yield_empty_list() {
        let empty = method_with(vec![support_by_version("Word", &[])]);
        assert_eq!(version_support(&empty, &DEFAULT_SUPPORT_ATTRIBUTES), Some(vec![]));

        let missing = method_with(vec![CustomAttribute {
            type_name: SUPPORT_BY_VERSION_ATTRIBUTE.into(),
            value: AttributeValue {
                fixed_args: vec![AttributeArgument::String("Word".into())],
                named_args: vec![],
            },
        }]);
        assert_eq!(version_support(&missing, &DEFAULT_SUPPORT_ATTRIBUTES), Some(vec![]));

        let scalar = method_with(vec![CustomAttribute {
            type_name: SUPPORT_BY_VERSION_ATTRIBUTE.into(),
            value: AttributeValue {
                fixed_args: vec![
                    AttributeArgument::String("Word".into()),
                    AttributeArgument::I4(12),
                ],
                named_args: vec![],
            },
        }]);
        assert_eq!(version_support(&scalar, &DEFAULT_SUPPORT_ATTRIBUTES), Some(vec![]));
    }

    #[test]
    fn first_recognized_attribute_wins() {
        let method = method_with(vec![
            CustomAttribute {
                type_name: "System.ObsoleteAttribute".into(),
                value: AttributeValue::default(),
            },
            support_by_library("Office", &["Excel"]),
            support_by_version("Excel", &[9]),
        ]);
        assert_eq!(
            version_support(&method, &DEFAULT_SUPPORT_ATTRIBUTES),
            Some(vec!["Excel".into()])
        );
    }

    #[test]
    fn custom_recognized_attributes() {
        let method = method_with(vec![CustomAttribute {
            type_name: "Custom.SupportAttribute".into(),
            value: support_by_version("Excel", &[14]).value,
        }]);
        assert_eq!(version_support(&method, &DEFAULT_SUPPORT_ATTRIBUTES), None);
        assert_eq!(
            version_support(&method, &["custom.supportattribute"]),
            Some(vec!["14".into()])
        );
    }
}
