use anyhow::Context;

use crate::{
    app::GlobalOptions,
    commands::common::{load_table, parse_library},
    listing::Listing,
};

/// Print the listing of one library. The output is always JSON, so `--json` has no effect.
pub fn run(library: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let key = parse_library(library)?;
    let table = load_table(opts)?;
    let metadata = table
        .metadata(key)
        .with_context(|| format!("library {key} is not loaded"))?;

    let listing = Listing::from_metadata(metadata);
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
