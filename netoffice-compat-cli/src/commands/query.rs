use netoffice_compat::{metadata::qualified::QualifiedName, SupportTable};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_table,
    output::{format_support, print_output},
};

#[derive(Debug, Serialize)]
struct MemberOutput {
    name: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    library: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    declaring_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    member: Option<String>,
    supported: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct TypeOutput {
    name: String,
    supported: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct EnumOutput {
    name: String,
    value: i64,
    member: Option<String>,
    supported: Option<Vec<String>>,
}

fn member_output(table: &SupportTable, name: &str) -> MemberOutput {
    match table.resolve_call(name) {
        Some(resolved) => MemberOutput {
            name: name.to_string(),
            found: true,
            library: Some(resolved.library.name().to_string()),
            declaring_type: Some(resolved.type_name),
            kind: Some(resolved.kind.name().to_string()),
            member: Some(resolved.name),
            supported: resolved.support,
        },
        None => MemberOutput {
            name: name.to_string(),
            found: false,
            library: None,
            declaring_type: None,
            kind: None,
            member: None,
            supported: None,
        },
    }
}

pub fn member(name: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let table = load_table(opts)?;
    let output = member_output(&table, name);

    print_output(&output, opts, |out| {
        if !out.found {
            // Distinguish a grammar problem from a lookup miss.
            if QualifiedName::parse_call(&out.name).is_none() {
                println!("{}: not a recognized member call", out.name);
            } else {
                println!("{}: not found", out.name);
            }
            return;
        }
        println!(
            "{} {}::{}",
            out.kind.as_deref().unwrap_or_default(),
            out.declaring_type.as_deref().unwrap_or_default(),
            out.member.as_deref().unwrap_or_default()
        );
        println!("  library:   {}", out.library.as_deref().unwrap_or_default());
        println!("  supported: {}", format_support(out.supported.as_deref()));
    })
}

pub fn type_ref(name: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let table = load_table(opts)?;
    let output = TypeOutput {
        name: name.to_string(),
        supported: table.type_support(name),
    };

    print_output(&output, opts, |out| {
        println!("{}: {}", out.name, format_support(out.supported.as_deref()));
    })
}

pub fn enum_value(name: &str, value: i64, opts: &GlobalOptions) -> anyhow::Result<()> {
    let table = load_table(opts)?;
    let output = EnumOutput {
        name: name.to_string(),
        value,
        member: table.enum_member_name(name, value),
        supported: table.enum_member_support(name, value),
    };

    print_output(&output, opts, |out| match &out.member {
        Some(member) => println!(
            "{}.{member} = {}: {}",
            out.name,
            out.value,
            format_support(out.supported.as_deref())
        ),
        None => println!("{} has no member with value {}", out.name, out.value),
    })
}
