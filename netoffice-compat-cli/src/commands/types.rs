use netoffice_compat::metadata::support::version_support;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{load_table, parse_library},
    output::{format_support, print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct TypeEntry {
    kind: String,
    name: String,
    members: usize,
    supported: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct TypesOutput {
    library: String,
    types: Vec<TypeEntry>,
    count: usize,
}

pub fn run(library: &str, filter: Option<&str>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let key = parse_library(library)?;
    let table = load_table(opts)?;
    let filter = filter.map(str::to_ascii_lowercase);

    let mut entries = Vec::new();
    if let Some(metadata) = table.metadata(key) {
        for ty in metadata.types() {
            if let Some(text) = &filter {
                if !ty.fullname.to_ascii_lowercase().contains(text.as_str()) {
                    continue;
                }
            }

            entries.push(TypeEntry {
                kind: ty.kind.to_string(),
                name: ty.fullname.clone(),
                members: ty.member_count(),
                supported: version_support(ty, table.config().support_attributes.as_slice()),
            });
        }
    }

    let count = entries.len();
    let output = TypesOutput {
        library: key.name().to_string(),
        types: entries,
        count,
    };

    print_output(&output, opts, |out| {
        let mut tw = TabWriter::new(vec![
            ("Kind", Align::Left),
            ("Name", Align::Left),
            ("Members", Align::Right),
            ("Supported", Align::Left),
        ]);
        for e in &out.types {
            tw.row(vec![
                e.kind.clone(),
                e.name.clone(),
                e.members.to_string(),
                format_support(e.supported.as_deref()),
            ]);
        }
        tw.print();
        println!("\n{} type(s) listed.", out.count);
    })
}
