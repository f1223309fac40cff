use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_table,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct LibraryEntry {
    tag: String,
    name: String,
    format: String,
    types: usize,
    members: usize,
}

#[derive(Debug, Serialize)]
struct LibrariesOutput {
    libraries: Vec<LibraryEntry>,
    count: usize,
}

pub fn run(opts: &GlobalOptions) -> anyhow::Result<()> {
    let table = load_table(opts)?;

    let libraries: Vec<LibraryEntry> = table
        .store()
        .iter()
        .map(|(key, metadata)| {
            let (major, minor) = metadata.version();
            LibraryEntry {
                tag: key.name().to_string(),
                name: metadata.name().to_string(),
                format: format!("{major}.{minor}"),
                types: metadata.types().len(),
                members: metadata.types().iter().map(|ty| ty.member_count()).sum(),
            }
        })
        .collect();

    let count = libraries.len();
    let output = LibrariesOutput { libraries, count };

    print_output(&output, opts, |out| {
        let mut tw = TabWriter::new(vec![
            ("Library", Align::Left),
            ("Table", Align::Left),
            ("Format", Align::Left),
            ("Types", Align::Right),
            ("Members", Align::Right),
        ]);
        for e in &out.libraries {
            tw.row(vec![
                e.tag.clone(),
                e.name.clone(),
                e.format.clone(),
                e.types.to_string(),
                e.members.to_string(),
            ]);
        }
        tw.print();
        println!("\n{} librar{} loaded.", out.count, if out.count == 1 { "y" } else { "ies" });
    })
}
