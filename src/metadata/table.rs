//! The support table facade.
//!
//! [`SupportTable`] answers the four compatibility queries against a loaded
//! [`MetadataStore`]. Every query walks the same pipeline (parse the identifier,
//! select the library, resolve the type and member, extract the support
//! annotation) and stops at the first stage that comes up empty. Queries never
//! fail: malformed and unresolvable identifiers alike produce `None`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use netoffice_compat::SupportTable;
//!
//! let table = SupportTable::new()?;
//!
//! let versions = table.type_call_support("NetOffice.ExcelApi.Range::get_Value(System.Object)");
//! println!("Range.Value: {:?}", versions);
//!
//! if let Some(name) = table.enum_member_name("NetOffice.ExcelApi.Enums.XlCalculation", -4105) {
//!     println!("-4105 is {}", name);
//! }
//! # Ok::<(), netoffice_compat::Error>(())
//! ```

use log::trace;

use crate::{
    metadata::{
        config::SupportTableConfig,
        library::LibraryKey,
        loader::LibraryMetadata,
        qualified::{QualifiedName, MEMBER_SEPARATOR},
        resolver::{find_enum_field, find_member, find_type},
        store::MetadataStore,
        support::version_support,
        typedef::{Annotated, FieldDef, MemberKind, SupportType},
    },
    Result,
};

/// A member call resolved against its support table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// Library owning the member
    pub library: LibraryKey,
    /// Fully qualified name of the declaring type, as stored in the table
    pub type_name: String,
    /// Member kind that matched
    pub kind: MemberKind,
    /// Member name as stored in the table (accessor prefixes removed)
    pub name: String,
    /// Supporting versions or libraries, `None` if the member carries no annotation
    pub support: Option<Vec<String>>,
}

/// Compatibility queries over the support tables of all libraries.
///
/// A `SupportTable` is immutable after construction and can be shared between
/// threads freely.
#[derive(Debug, Clone)]
pub struct SupportTable {
    store: MetadataStore,
    config: SupportTableConfig,
}

impl SupportTable {
    /// Load the tables compiled into this crate.
    ///
    /// # Errors
    /// Returns an error if an embedded table is damaged, see [`MetadataStore::load`].
    pub fn new() -> Result<Self> {
        Self::with_config(SupportTableConfig::embedded())
    }

    /// Load the tables described by `config`.
    ///
    /// # Errors
    /// Returns an error if any library resource is missing or damaged, see
    /// [`MetadataStore::load`].
    pub fn with_config(config: SupportTableConfig) -> Result<Self> {
        let store = MetadataStore::load(&config)?;
        Ok(SupportTable { store, config })
    }

    /// Query an already populated store.
    #[must_use]
    pub fn from_store(store: MetadataStore, config: SupportTableConfig) -> Self {
        SupportTable { store, config }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// The configuration this table was created with.
    #[must_use]
    pub fn config(&self) -> &SupportTableConfig {
        &self.config
    }

    /// The table of a single library.
    #[must_use]
    pub fn metadata(&self, key: LibraryKey) -> Option<&LibraryMetadata> {
        self.store.get(key)
    }

    /// Versions supporting a member call such as
    /// `NetOffice.ExcelApi.Range::get_Value(System.Object)`.
    ///
    /// Returns `None` when the identifier is malformed, the type or member cannot be
    /// resolved, or the member carries no support annotation.
    #[must_use]
    pub fn type_call_support(&self, name: &str) -> Option<Vec<String>> {
        self.resolve_call(name)?.support
    }

    /// Resolve a member call, reporting which member matched and its support.
    ///
    /// Returns `None` only when the member cannot be resolved; a resolved member
    /// without a support annotation has `support: None`.
    #[must_use]
    pub fn resolve_call(&self, name: &str) -> Option<ResolvedMember> {
        let Some(call) = QualifiedName::parse_call(name) else {
            trace!("{name}: not a qualified member call");
            return None;
        };
        let ty = self.lookup_type(&call)?;
        let member_name = call.member.as_deref()?;

        let Some(member) = find_member(ty, member_name, call.parameter_count()) else {
            trace!(
                "{name}: no member {member_name} with {} parameters on {}",
                call.parameter_count(),
                ty.fullname
            );
            return None;
        };

        Some(ResolvedMember {
            library: call.library,
            type_name: ty.fullname.clone(),
            kind: member.kind(),
            name: member.name().to_string(),
            support: version_support(&member, &self.config.support_attributes),
        })
    }

    /// Versions supporting a type such as `NetOffice.ExcelApi.Range` or
    /// `NetOffice.ExcelApi.Range[]`.
    #[must_use]
    pub fn type_support(&self, name: &str) -> Option<Vec<String>> {
        if name.contains(MEMBER_SEPARATOR) {
            trace!("{name}: member reference passed as type name");
            return None;
        }
        let Some(reference) = QualifiedName::parse_type(name) else {
            trace!("{name}: not a qualified type name");
            return None;
        };
        let ty = self.lookup_type(&reference)?;
        self.support_of(name, ty)
    }

    /// Name of the enum member of `name` whose value is `value`.
    #[must_use]
    pub fn enum_member_name(&self, name: &str, value: i64) -> Option<String> {
        self.lookup_enum_field(name, value).map(|field| field.name.clone())
    }

    /// Versions supporting the enum member of `name` whose value is `value`.
    #[must_use]
    pub fn enum_member_support(&self, name: &str, value: i64) -> Option<Vec<String>> {
        let field = self.lookup_enum_field(name, value)?;
        self.support_of(name, field)
    }

    fn lookup_type(&self, name: &QualifiedName) -> Option<&SupportType> {
        let Some(metadata) = self.store.get(name.library) else {
            trace!("{}: library {} is not loaded", name, name.library);
            return None;
        };
        let ty = find_type(metadata, &name.type_name);
        if ty.is_none() {
            trace!("{}: type not found in {}", name, metadata.name());
        }
        ty
    }

    fn lookup_enum_field(&self, name: &str, value: i64) -> Option<&FieldDef> {
        let Some(reference) = QualifiedName::parse_type(name) else {
            trace!("{name}: not a qualified enum name");
            return None;
        };
        let ty = self.lookup_type(&reference)?;
        let field = find_enum_field(ty, value);
        if field.is_none() {
            trace!("{name}: no field with value {value}");
        }
        field
    }

    fn support_of(&self, name: &str, owner: &impl Annotated) -> Option<Vec<String>> {
        let support = version_support(owner, &self.config.support_attributes);
        if support.is_none() {
            trace!("{name}: no support annotation");
        }
        support
    }
}
