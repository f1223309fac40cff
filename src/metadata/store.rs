//! Per-library metadata store.
//!
//! The [`MetadataStore`] holds one parsed [`LibraryMetadata`] per [`LibraryKey`]. It is
//! populated once, either from the tables compiled into this crate or from a directory
//! of `<Library>Api.dll.gz` files, and never changes afterwards.
//!
//! Loading is all-or-nothing: a single missing or damaged resource fails the whole
//! load. Each resource is decompressed into a temporary buffer that is dropped as
//! soon as its table has been parsed.

use std::{fs, io, path::Path};

use log::debug;
use rayon::prelude::*;
use strum::EnumCount;

use crate::{
    file::decompress_gzip,
    metadata::{
        config::{ResourceSource, SupportTableConfig},
        library::LibraryKey,
        loader::LibraryMetadata,
    },
    Error, Result,
};

macro_rules! embedded_table {
    ($file:literal) => {
        include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/resources/OfficeCompatibility/ReferenceAssemblies/",
            $file
        ))
        .as_slice()
    };
}

/// The compressed support table compiled into the crate for `key`.
#[must_use]
pub fn embedded_resource(key: LibraryKey) -> &'static [u8] {
    match key {
        LibraryKey::Office => embedded_table!("OfficeApi.dll.gz"),
        LibraryKey::Excel => embedded_table!("ExcelApi.dll.gz"),
        LibraryKey::Word => embedded_table!("WordApi.dll.gz"),
        LibraryKey::Outlook => embedded_table!("OutlookApi.dll.gz"),
        LibraryKey::PowerPoint => embedded_table!("PowerPointApi.dll.gz"),
        LibraryKey::Access => embedded_table!("AccessApi.dll.gz"),
    }
}

/// One parsed support table per library.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    libraries: [Option<LibraryMetadata>; LibraryKey::COUNT],
}

impl MetadataStore {
    /// Load every library from the source configured in `config`.
    ///
    /// # Errors
    /// - [`crate::Error::ResourceNotFound`]: A library resource does not exist
    /// - [`crate::Error::Empty`]: A library resource is empty
    /// - [`crate::Error::NotSupported`], [`crate::Error::Malformed`], [`crate::Error::OutOfBounds`]:
    ///   A library resource is not a valid compressed support table
    /// - [`crate::Error::FileError`]: The resource could not be read or decompressed
    pub fn load(config: &SupportTableConfig) -> Result<Self> {
        let keys: Vec<LibraryKey> = LibraryKey::all().collect();
        let loaded = keys
            .par_iter()
            .map(|&key| load_library(key, &config.source).map(|metadata| (key, metadata)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_libraries(loaded))
    }

    /// Build a store from already parsed tables. Libraries not provided stay empty;
    /// when a key is given twice the last table wins.
    pub fn from_libraries(libraries: impl IntoIterator<Item = (LibraryKey, LibraryMetadata)>) -> Self {
        let mut store = MetadataStore::default();
        for (key, metadata) in libraries {
            store.libraries[key.index()] = Some(metadata);
        }
        store
    }

    /// The table of `key`, if loaded.
    #[must_use]
    pub fn get(&self, key: LibraryKey) -> Option<&LibraryMetadata> {
        self.libraries[key.index()].as_ref()
    }

    /// Number of loaded libraries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.libraries.iter().flatten().count()
    }

    /// Returns `true` if no library is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the loaded libraries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (LibraryKey, &LibraryMetadata)> {
        LibraryKey::all().filter_map(|key| self.get(key).map(|metadata| (key, metadata)))
    }
}

fn load_library(key: LibraryKey, source: &ResourceSource) -> Result<LibraryMetadata> {
    let metadata = match source {
        ResourceSource::Embedded => parse_resource(embedded_resource(key))?,
        ResourceSource::Directory(dir) => parse_resource(&read_resource(dir, key)?)?,
    };

    debug!(
        "loaded {} ({} types, format {}.{})",
        key.resource_name(),
        metadata.types().len(),
        metadata.version().0,
        metadata.version().1
    );
    Ok(metadata)
}

fn read_resource(dir: &Path, key: LibraryKey) -> Result<Vec<u8>> {
    let path = dir.join(key.resource_file_name());
    match fs::read(&path) {
        Ok(data) => Ok(data),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            Err(Error::ResourceNotFound(path.display().to_string()))
        }
        Err(error) => Err(Error::FileError(error)),
    }
}

fn parse_resource(compressed: &[u8]) -> Result<LibraryMetadata> {
    let data = decompress_gzip(compressed)?;
    LibraryMetadata::from_bytes(&data)
}
