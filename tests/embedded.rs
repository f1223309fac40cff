//! Integration tests against the support tables compiled into the crate.
//!
//! These exercise the four public queries end to end: identifier parsing, library
//! selection, type and member resolution, and version extraction.

use netoffice_compat::{prelude::*, Result};

fn versions(list: &[&str]) -> Option<Vec<String>> {
    Some(list.iter().map(|v| (*v).to_string()).collect())
}

const ALL: [&str; 7] = ["9", "10", "11", "12", "14", "15", "16"];

#[test]
fn every_library_is_loaded() -> Result<()> {
    let table = SupportTable::new()?;
    assert_eq!(table.store().len(), 6);

    for key in LibraryKey::all() {
        let metadata = table.metadata(key).expect("library loaded");
        assert_eq!(metadata.name(), key.api_segment());
        assert_eq!(metadata.version(), (1, 0));
        assert!(metadata
            .types()
            .iter()
            .all(|ty| ty.fullname.starts_with(&format!("NetOffice.{}.", key.api_segment()))));
    }
    Ok(())
}

#[test]
fn property_accessors() -> Result<()> {
    let table = SupportTable::new()?;

    assert_eq!(
        table.type_call_support("NetOffice.ExcelApi.Range::get_Value()"),
        versions(&ALL)
    );
    // Indexed getter and setter with its value parameter hit the same property.
    assert_eq!(
        table.type_call_support("NetOffice.ExcelApi.Range::get_Value(System.Object)"),
        table.type_call_support("NetOffice.ExcelApi.Range::set_Value(System.Object,System.Object)")
    );
    assert_eq!(
        table.type_call_support("NetOffice.ExcelApi.Range::get_CountLarge()"),
        versions(&["12", "14", "15", "16"])
    );
    assert_eq!(
        table.type_call_support("NetOffice.ExcelApi.Application::get_QuickAnalysis()"),
        versions(&["15", "16"])
    );

    let getter = table
        .resolve_call("NetOffice.WordApi.Document::get_CompatibilityMode()")
        .expect("getter resolves");
    let setter = table
        .resolve_call("NetOffice.WordApi.Document::set_CompatibilityMode(System.Int32)")
        .expect("setter resolves");
    assert_eq!(getter, setter);
    assert_eq!(getter.kind, MemberKind::Property);
    assert_eq!(getter.name, "CompatibilityMode");
    assert_eq!(getter.library, LibraryKey::Word);
    Ok(())
}

#[test]
fn method_overloads() -> Result<()> {
    let table = SupportTable::new()?;

    assert_eq!(
        table.type_call_support("NetOffice.WordApi.Document::SaveAs2(System.Object)"),
        versions(&["14", "15", "16"])
    );
    assert_eq!(
        table.type_call_support("NetOffice.WordApi.Document::SaveAs(System.Object)"),
        versions(&ALL)
    );
    // No SaveAs2 overload takes five parameters.
    assert_eq!(
        table.type_call_support(
            "NetOffice.WordApi.Document::SaveAs2(System.Object,System.Object,System.Object,System.Object,System.Object)"
        ),
        None
    );
    assert_eq!(
        table.type_call_support("NetOffice.AccessApi.DoCmd::BrowseTo(System.Object, System.Object)"),
        versions(&["14", "15", "16"])
    );
    Ok(())
}

#[test]
fn event_accessors() -> Result<()> {
    let table = SupportTable::new()?;

    let add = table.type_call_support(
        "NetOffice.ExcelApi.Workbook::add_AfterSaveEvent(NetOffice.ExcelApi.Workbook_AfterSaveEventHandler)",
    );
    let remove = table.type_call_support(
        "NetOffice.ExcelApi.Workbook::remove_AfterSaveEvent(NetOffice.ExcelApi.Workbook_AfterSaveEventHandler)",
    );
    assert_eq!(add, versions(&["14", "15", "16"]));
    assert_eq!(add, remove);

    let resolved = table
        .resolve_call("NetOffice.OutlookApi.Application::add_NewMailExEvent(NetOffice.OutlookApi.Application_NewMailExEventHandler)")
        .expect("event resolves");
    assert_eq!(resolved.kind, MemberKind::Event);
    assert_eq!(resolved.name, "NewMailExEvent");
    Ok(())
}

#[test]
fn type_support() -> Result<()> {
    let table = SupportTable::new()?;

    assert_eq!(
        table.type_support("NetOffice.OfficeApi.IRibbonUI"),
        versions(&["12", "14", "15", "16"])
    );
    assert_eq!(
        table.type_support("NetOffice.ExcelApi.Range[]"),
        table.type_support("NetOffice.ExcelApi.Range")
    );
    assert_eq!(
        table.type_support("NetOffice.OfficeApi.Enums.MsoTriState"),
        versions(&["Excel", "Word", "Outlook", "PowerPoint", "Access"])
    );
    assert_eq!(table.type_support("NetOffice.VisioApi.Shape"), None);
    // A jagged array reference is not the element type.
    assert_eq!(table.type_support("NetOffice.ExcelApi.Range[][]"), None);
    assert_eq!(table.type_support("NetOffice.ExcelApi.Range[][][]"), None);
    Ok(())
}

#[test]
fn enum_values() -> Result<()> {
    let table = SupportTable::new()?;
    let file_format = "NetOffice.ExcelApi.Enums.XlFileFormat";

    assert_eq!(
        table.enum_member_name(file_format, 51).as_deref(),
        Some("xlOpenXMLWorkbook")
    );
    assert_eq!(
        table.enum_member_support(file_format, 51),
        versions(&["12", "14", "15", "16"])
    );
    assert_eq!(
        table.enum_member_support(file_format, 62),
        versions(&["16"])
    );
    assert_eq!(
        table.enum_member_name("NetOffice.ExcelApi.Enums.XlCalculation", -4105).as_deref(),
        Some("xlCalculationAutomatic")
    );
    assert_eq!(
        table.enum_member_name("NetOffice.OutlookApi.Enums.OlItemType", 0).as_deref(),
        Some("olMailItem")
    );
    assert_eq!(table.enum_member_name(file_format, 4242), None);
    assert_eq!(table.enum_member_support(file_format, 4242), None);
    Ok(())
}

#[test]
fn members_without_or_with_empty_annotation() -> Result<()> {
    let table = SupportTable::new()?;

    let dispose = table
        .resolve_call("NetOffice.ExcelApi.Range::Dispose()")
        .expect("member exists");
    assert_eq!(dispose.support, None);
    assert_eq!(table.type_call_support("NetOffice.ExcelApi.Range::Dispose()"), None);

    assert_eq!(
        table.type_call_support("NetOffice.ExcelApi.Application::get_HinstancePtr()"),
        Some(Vec::new())
    );
    Ok(())
}

#[test]
fn malformed_input_is_not_found() -> Result<()> {
    let table = SupportTable::new()?;

    for name in [
        "",
        "Range",
        "NetOffice.ExcelApi",
        "NetOffice.ExcelApi.Range::get_Value",
        "NetOffice.ExcelApi.Range::()",
        "NetOffice.FooApi.Bar::Baz()",
        "NetOffice.ExcelApi.Nope::Quit()",
        "NetOffice.ExcelApi.Range::set_Value()",
        "NetOffice.Aé.Range::get_Value()",
    ] {
        assert_eq!(table.type_call_support(name), None, "{name}");
        assert_eq!(table.type_support(name), None, "{name}");
        assert_eq!(table.enum_member_name(name, 0), None, "{name}");
        assert_eq!(table.enum_member_support(name, 0), None, "{name}");
    }
    Ok(())
}

#[test]
fn queries_are_deterministic_across_threads() -> Result<()> {
    let table = SupportTable::new()?;
    let expected = table.enum_member_support("NetOffice.WordApi.Enums.WdSaveFormat", 17);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(
                        table.enum_member_support("NetOffice.WordApi.Enums.WdSaveFormat", 17),
                        expected
                    );
                    assert_eq!(
                        table.enum_member_name("NetOffice.WordApi.Enums.WdSaveFormat", 17).as_deref(),
                        Some("wdFormatPDF")
                    );
                }
            });
        }
    });
    Ok(())
}
