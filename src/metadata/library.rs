//! The fixed set of host-application libraries a support table covers.
//!
//! Each [`LibraryKey`] maps to exactly one slot of the
//! [`crate::metadata::store::MetadataStore`] and to one compressed resource named
//! `<Library>Api.dll.gz`. Library keys are derived from the second segment of a
//! qualified identifier (`NetOffice.ExcelApi.Range` -> `Excel`).

use std::fmt;

use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// Directory (relative to the crate root) and logical prefix of the bundled resources.
pub const RESOURCE_PREFIX: &str = "OfficeCompatibility.ReferenceAssemblies";

/// Suffix every library segment carries in a qualified identifier (`ExcelApi`).
pub const LIBRARY_TAG_SUFFIX: &str = "Api";

/// A supported host-application library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
pub enum LibraryKey {
    /// Shared Office library (command bars, ribbon, add-ins)
    Office,
    /// Microsoft Excel
    Excel,
    /// Microsoft Word
    Word,
    /// Microsoft Outlook
    Outlook,
    /// Microsoft PowerPoint
    PowerPoint,
    /// Microsoft Access
    Access,
}

impl LibraryKey {
    /// Resolve a library tag (`"Excel"`) to its key, ignoring ASCII case.
    ///
    /// Unknown tags return `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        LibraryKey::iter().find(|key| key.name().eq_ignore_ascii_case(tag))
    }

    /// The library tag as it appears in identifiers, without the `Api` suffix.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LibraryKey::Office => "Office",
            LibraryKey::Excel => "Excel",
            LibraryKey::Word => "Word",
            LibraryKey::Outlook => "Outlook",
            LibraryKey::PowerPoint => "PowerPoint",
            LibraryKey::Access => "Access",
        }
    }

    /// Slot of this key in fixed-size per-library arrays.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The library segment of qualified identifiers, e.g. `ExcelApi`.
    #[must_use]
    pub fn api_segment(self) -> String {
        format!("{}{LIBRARY_TAG_SUFFIX}", self.name())
    }

    /// File name of the compressed support table, e.g. `ExcelApi.dll.gz`.
    #[must_use]
    pub fn resource_file_name(self) -> String {
        format!("{}.dll.gz", self.api_segment())
    }

    /// Fully qualified logical resource name, e.g.
    /// `netoffice_compat.OfficeCompatibility.ReferenceAssemblies.ExcelApi.dll.gz`.
    #[must_use]
    pub fn resource_name(self) -> String {
        format!(
            "{}.{RESOURCE_PREFIX}.{}",
            env!("CARGO_CRATE_NAME"),
            self.resource_file_name()
        )
    }

    /// All supported libraries in declaration order.
    pub fn all() -> impl Iterator<Item = LibraryKey> {
        LibraryKey::iter()
    }
}

impl fmt::Display for LibraryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
