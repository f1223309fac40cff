//! Support table configuration
//!
//! Configuration is passed explicitly to [`crate::SupportTable::with_config`]; there is
//! no process-wide state. A configuration chooses where the per-library resources
//! come from and which attribute types count as version-support annotations.

use std::path::PathBuf;

use crate::metadata::support::DEFAULT_SUPPORT_ATTRIBUTES;

/// Where the compressed support tables are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// Tables compiled into the library
    Embedded,
    /// A directory containing one `<Library>Api.dll.gz` file per library
    Directory(PathBuf),
}

/// Configuration for loading and querying a support table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportTableConfig {
    /// Source of the per-library resources
    pub source: ResourceSource,

    /// Attribute type names recognized as version-support annotations.
    /// Matched case-insensitively; the first matching attribute on an entry wins.
    pub support_attributes: Vec<String>,
}

impl Default for SupportTableConfig {
    fn default() -> Self {
        Self::embedded()
    }
}

impl SupportTableConfig {
    /// Embedded tables and the default support attributes.
    #[must_use]
    pub fn embedded() -> Self {
        SupportTableConfig {
            source: ResourceSource::Embedded,
            support_attributes: DEFAULT_SUPPORT_ATTRIBUTES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Tables read from `path` at load time, with the default support attributes.
    #[must_use]
    pub fn from_directory(path: impl Into<PathBuf>) -> Self {
        SupportTableConfig {
            source: ResourceSource::Directory(path.into()),
            ..Self::embedded()
        }
    }

    /// Recognize an additional support attribute type.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self
            .support_attributes
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&name))
        {
            self.support_attributes.push(name);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_embedded() {
        let config = SupportTableConfig::default();
        assert_eq!(config.source, ResourceSource::Embedded);
        assert_eq!(config.support_attributes.len(), 2);
    }

    #[test]
    fn directory_keeps_default_attributes() {
        let config = SupportTableConfig::from_directory("/tmp/tables");
        assert_eq!(
            config.source,
            ResourceSource::Directory(PathBuf::from("/tmp/tables"))
        );
        assert_eq!(
            config.support_attributes,
            SupportTableConfig::embedded().support_attributes
        );
    }

    #[test]
    fn with_attribute_ignores_duplicates() {
        let config = SupportTableConfig::embedded()
            .with_attribute("Custom.SupportAttribute")
            .with_attribute("custom.supportattribute")
            .with_attribute("latebindingapi.core.supportbyversionattribute");
        assert_eq!(config.support_attributes.len(), 3);
        assert_eq!(config.support_attributes[2], "Custom.SupportAttribute");
    }
}
