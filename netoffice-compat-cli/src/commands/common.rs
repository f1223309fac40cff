use anyhow::Context;
use netoffice_compat::{LibraryKey, SupportTable, SupportTableConfig};

use crate::app::GlobalOptions;

/// Build the load configuration selected by the global options.
pub fn table_config(opts: &GlobalOptions) -> SupportTableConfig {
    let config = match &opts.resources {
        Some(dir) => SupportTableConfig::from_directory(dir),
        None => SupportTableConfig::embedded(),
    };
    opts.attribute
        .iter()
        .fold(config, |config, name| config.with_attribute(name.as_str()))
}

/// Load the support tables selected by the global options.
pub fn load_table(opts: &GlobalOptions) -> anyhow::Result<SupportTable> {
    let config = table_config(opts);
    let source = match &opts.resources {
        Some(dir) => dir.display().to_string(),
        None => "embedded resources".to_string(),
    };
    SupportTable::with_config(config)
        .with_context(|| format!("failed to load support tables from {source}"))
}

/// Resolve a library given as `Excel` or `ExcelApi`, ignoring case.
pub fn parse_library(name: &str) -> anyhow::Result<LibraryKey> {
    let tag = name
        .get(name.len().saturating_sub(3)..)
        .filter(|suffix| suffix.eq_ignore_ascii_case("Api"))
        .map_or(name, |_| &name[..name.len() - 3]);

    LibraryKey::from_tag(tag).with_context(|| {
        let known: Vec<&str> = LibraryKey::all().map(LibraryKey::name).collect();
        format!("unknown library '{name}' (expected one of {})", known.join(", "))
    })
}
