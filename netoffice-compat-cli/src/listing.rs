//! JSON listings of support tables.
//!
//! A listing is the human-editable form of one library's support table. `pack`
//! turns a listing into the binary table the library embeds and `dump` turns a
//! loaded table back into a listing.

use log::warn;
use netoffice_compat::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub library: String,
    pub types: Vec<TypeListing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindListing {
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "lowercase")]
pub enum SupportListing {
    Version { name: String, versions: Vec<i32> },
    Library { name: String, libraries: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeListing {
    pub name: String,
    pub kind: KindListing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportListing>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<MemberListing>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MemberListing>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventListing>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldListing>,
}

/// A property or method overload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberListing {
    pub name: String,
    #[serde(default)]
    pub parameters: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportListing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListing {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportListing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldListing {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportListing>,
}

impl From<KindListing> for TypeKind {
    fn from(kind: KindListing) -> Self {
        match kind {
            KindListing::Class => TypeKind::Class,
            KindListing::Interface => TypeKind::Interface,
            KindListing::Enum => TypeKind::Enum,
        }
    }
}

impl From<TypeKind> for KindListing {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => KindListing::Class,
            TypeKind::Interface => KindListing::Interface,
            TypeKind::Enum => KindListing::Enum,
        }
    }
}

impl SupportListing {
    fn to_attribute(&self) -> CustomAttribute {
        match self {
            SupportListing::Version { name, versions } => support_by_version(name, versions),
            SupportListing::Library { name, libraries } => {
                let libraries: Vec<&str> = libraries.iter().map(String::as_str).collect();
                support_by_library(name, &libraries)
            }
        }
    }

    /// Recover the listing form of a support attribute. Attributes of other types,
    /// or with arguments this form cannot express, yield `None`.
    fn from_attributes(owner: &str, attributes: &[CustomAttribute]) -> Option<Self> {
        let attribute = attributes.iter().find(|attribute| {
            attribute.is(SUPPORT_BY_VERSION_ATTRIBUTE) || attribute.is(SUPPORT_BY_LIBRARY_ATTRIBUTE)
        })?;

        let (Some(AttributeArgument::String(name)), Some(AttributeArgument::Array(items))) = (
            attribute.value.fixed_args.first(),
            attribute.value.fixed_args.get(1),
        ) else {
            warn!("{owner}: {} cannot be listed", attribute.type_name);
            return None;
        };

        if attribute.is(SUPPORT_BY_VERSION_ATTRIBUTE) {
            let versions = items
                .iter()
                .map(|item| item.as_i64().and_then(|v| i32::try_from(v).ok()))
                .collect::<Option<Vec<_>>>();
            match versions {
                Some(versions) => Some(SupportListing::Version {
                    name: name.clone(),
                    versions,
                }),
                None => {
                    warn!("{owner}: non-integral version in {}", attribute.type_name);
                    None
                }
            }
        } else {
            Some(SupportListing::Library {
                name: name.clone(),
                libraries: items.iter().map(ToString::to_string).collect(),
            })
        }
    }
}

fn attributes(support: Option<&SupportListing>) -> Vec<CustomAttribute> {
    support.map(SupportListing::to_attribute).into_iter().collect()
}

fn constant(value: i64) -> AttributeArgument {
    match i32::try_from(value) {
        Ok(value) => AttributeArgument::I4(value),
        Err(_) => AttributeArgument::I8(value),
    }
}

impl Listing {
    /// Build the support table described by this listing.
    pub fn to_builder(&self) -> SupportTableBuilder {
        let mut builder = SupportTableBuilder::new(&self.library);
        for ty in &self.types {
            let mut tb = TypeBuilder::new(&ty.name, ty.kind.into());
            if let Some(support) = &ty.support {
                tb = tb.attribute(support.to_attribute());
            }
            for p in &ty.properties {
                tb = tb.property(&p.name, p.parameters, attributes(p.support.as_ref()));
            }
            for m in &ty.methods {
                tb = tb.method(&m.name, m.parameters, attributes(m.support.as_ref()));
            }
            for e in &ty.events {
                tb = tb.event(&e.name, attributes(e.support.as_ref()));
            }
            for f in &ty.fields {
                tb = tb.field(&f.name, f.value.map(constant), attributes(f.support.as_ref()));
            }
            builder.push_type(tb.build());
        }
        builder
    }

    /// Describe a loaded support table.
    pub fn from_metadata(metadata: &LibraryMetadata) -> Self {
        let types = metadata
            .types()
            .iter()
            .map(|ty| {
                let owner = |member: &str| format!("{}::{member}", ty.fullname);
                TypeListing {
                    name: ty.fullname.clone(),
                    kind: ty.kind.into(),
                    support: SupportListing::from_attributes(&ty.fullname, &ty.attributes),
                    properties: ty
                        .properties
                        .iter()
                        .map(|p| MemberListing {
                            name: p.name.clone(),
                            parameters: p.parameter_count,
                            support: SupportListing::from_attributes(&owner(&p.name), &p.attributes),
                        })
                        .collect(),
                    methods: ty
                        .methods
                        .iter()
                        .map(|m| MemberListing {
                            name: m.name.clone(),
                            parameters: m.parameter_count,
                            support: SupportListing::from_attributes(&owner(&m.name), &m.attributes),
                        })
                        .collect(),
                    events: ty
                        .events
                        .iter()
                        .map(|e| EventListing {
                            name: e.name.clone(),
                            support: SupportListing::from_attributes(&owner(&e.name), &e.attributes),
                        })
                        .collect(),
                    fields: ty
                        .fields
                        .iter()
                        .map(|f| FieldListing {
                            name: f.name.clone(),
                            value: f.constant.as_ref().and_then(AttributeArgument::as_i64),
                            support: SupportListing::from_attributes(&owner(&f.name), &f.attributes),
                        })
                        .collect(),
                }
            })
            .collect();

        Listing {
            library: metadata.name().to_string(),
            types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "library": "ExcelApi",
        "types": [
            {
                "name": "NetOffice.ExcelApi.Range",
                "kind": "class",
                "support": { "by": "version", "name": "Excel", "versions": [9, 10, 11] },
                "properties": [
                    { "name": "Value", "parameters": 1, "support": { "by": "version", "name": "Excel", "versions": [9] } }
                ],
                "methods": [
                    { "name": "Dispose" }
                ],
                "events": [
                    { "name": "ChangeEvent", "support": { "by": "version", "name": "Excel", "versions": [] } }
                ]
            },
            {
                "name": "NetOffice.ExcelApi.Enums.XlSize",
                "kind": "enum",
                "support": { "by": "library", "name": "Excel", "libraries": ["Excel", "Word"] },
                "fields": [
                    { "name": "xlSmall", "value": -1 },
                    { "name": "xlHuge", "value": 8589934592, "support": { "by": "version", "name": "Excel", "versions": [16] } }
                ]
            }
        ]
    }"#;

    #[test]
    fn pack_and_dump_preserve_listing() {
        let listing: Listing = serde_json::from_str(LISTING).unwrap();
        let bytes = listing.to_builder().build().unwrap();
        let metadata = LibraryMetadata::from_bytes(&bytes).unwrap();

        assert_eq!(Listing::from_metadata(&metadata), listing);
    }

    #[test]
    fn packed_listing_answers_queries() {
        let listing: Listing = serde_json::from_str(LISTING).unwrap();
        let metadata = listing.to_builder().into_metadata();
        let range = metadata.type_by_fullname("NetOffice.ExcelApi.Range").unwrap();

        assert_eq!(range.kind, TypeKind::Class);
        assert_eq!(range.methods[0].name, "Dispose");
        assert_eq!(range.methods[0].parameter_count, 0);
        assert!(range.methods[0].attributes.is_empty());

        let size = metadata
            .type_by_fullname("NetOffice.ExcelApi.Enums.XlSize")
            .unwrap();
        assert_eq!(size.fields[0].constant, Some(AttributeArgument::I4(-1)));
        assert_eq!(
            size.fields[1].constant,
            Some(AttributeArgument::I8(8_589_934_592))
        );
    }

    #[test]
    fn unknown_attributes_are_not_listed() {
        let ty = TypeBuilder::class("NetOffice.WordApi.Custom")
            .attribute(CustomAttribute {
                type_name: "Contoso.Marker".into(),
                value: AttributeValue::default(),
            })
            .build();
        let metadata = LibraryMetadata::new("WordApi", vec![ty]);

        let listing = Listing::from_metadata(&metadata);
        assert_eq!(listing.types[0].support, None);
    }

    #[test]
    fn rejects_unknown_kind() {
        let json = r#"{ "library": "WordApi", "types": [ { "name": "X", "kind": "struct" } ] }"#;
        assert!(serde_json::from_str::<Listing>(json).is_err());
    }
}
