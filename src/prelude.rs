//! # netoffice-compat Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from
//! the netoffice-compat library. Import this module to get quick access to the
//! query facade, its configuration and the support-table model.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all netoffice-compat operations
pub use crate::Error;

/// The result type used throughout netoffice-compat
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Compatibility query facade and its resolved-member result
pub use crate::{ResolvedMember, SupportTable};

/// Load configuration
pub use crate::{ResourceSource, SupportTableConfig};

/// Supported host libraries
pub use crate::LibraryKey;

/// Low-level parsing utilities
pub use crate::Parser;

// ================================================================================================
// Support-Table Model
// ================================================================================================

/// Qualified identifier grammar
pub use crate::metadata::qualified::QualifiedName;

/// Types, members and fields
pub use crate::metadata::typedef::{
    Annotated, EventDef, FieldDef, MemberKind, MemberRef, MethodDef, PropertyDef, SupportType,
    TypeKind,
};

/// Custom attributes
pub use crate::metadata::attributes::{
    AttributeArgument, AttributeNamedArgument, AttributeValue, CustomAttribute,
};

/// Reading, writing and storing support tables
pub use crate::metadata::{
    builder::{SupportTableBuilder, TypeBuilder},
    loader::LibraryMetadata,
    store::MetadataStore,
};

/// Version-support annotations
pub use crate::metadata::support::{
    support_by_library, support_by_version, version_support, SUPPORT_BY_LIBRARY_ATTRIBUTE,
    SUPPORT_BY_VERSION_ATTRIBUTE,
};
