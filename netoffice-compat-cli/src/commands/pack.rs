use std::{fs, path::Path};

use anyhow::Context;
use log::info;
use serde::Serialize;

use crate::{app::GlobalOptions, listing::Listing, output::print_output};

#[derive(Debug, Serialize)]
struct PackOutput {
    library: String,
    output: String,
    types: usize,
    bytes: usize,
}

/// Read a JSON listing and write it as a gzip-compressed support table.
pub fn pack_file(listing: &Path, output: &Path) -> anyhow::Result<(Listing, usize)> {
    let text = fs::read_to_string(listing)
        .with_context(|| format!("failed to read listing: {}", listing.display()))?;
    let parsed: Listing = serde_json::from_str(&text)
        .with_context(|| format!("invalid listing: {}", listing.display()))?;

    let packed = parsed
        .to_builder()
        .build_compressed()
        .with_context(|| format!("failed to encode {}", parsed.library))?;
    fs::write(output, &packed)
        .with_context(|| format!("failed to write: {}", output.display()))?;

    Ok((parsed, packed.len()))
}

pub fn run(listing: &Path, output: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let (parsed, bytes) = pack_file(listing, output)?;
    info!("packed {} into {}", parsed.library, output.display());

    let result = PackOutput {
        library: parsed.library,
        output: output.display().to_string(),
        types: parsed.types.len(),
        bytes,
    };

    print_output(&result, opts, |out| {
        println!(
            "{}: {} type(s), {} bytes -> {}",
            out.library, out.types, out.bytes, out.output
        );
    })
}
