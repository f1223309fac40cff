//! Shared test factories.
//!
//! Builds small in-memory support tables so unit tests do not depend on the embedded
//! resources.

use crate::{
    metadata::{
        builder::{SupportTableBuilder, TypeBuilder},
        loader::LibraryMetadata,
        store::MetadataStore,
        support::{support_by_library, support_by_version},
        table::SupportTable,
    },
    LibraryKey, SupportTableConfig,
};

/// Excel versions 2000 through 2010
pub const EXCEL_CLASSIC: [i32; 5] = [9, 10, 11, 12, 14];

/// Excel 2007 and 2010
pub const EXCEL_RIBBON: [i32; 2] = [12, 14];

/// A reduced Excel table covering every member kind and an enum.
pub fn sample_excel_library() -> LibraryMetadata {
    let classic = || vec![support_by_version("Excel", &EXCEL_CLASSIC)];

    SupportTableBuilder::new("ExcelApi")
        .add_type(
            TypeBuilder::class("NetOffice.ExcelApi.Application")
                .attribute(support_by_version("Excel", &EXCEL_CLASSIC))
                .property("Visible", 0, classic())
                .property("Caption", 0, classic())
                .method("Quit", 0, classic())
                .method("Run", 31, classic())
                .event("WorkbookOpenEvent", classic())
                .build(),
        )
        .add_type(
            TypeBuilder::class("NetOffice.ExcelApi.Range")
                .attribute(support_by_version("Excel", &EXCEL_CLASSIC))
                .property("Value", 1, classic())
                .property("Value", 0, classic())
                .property("Value2", 0, classic())
                .method("AutoFilter", 0, classic())
                .method("AutoFilter", 5, classic())
                .method("Dispose", 0, vec![])
                .build(),
        )
        .add_type(
            TypeBuilder::class("NetOffice.ExcelApi.Workbook")
                .attribute(support_by_version("Excel", &EXCEL_CLASSIC))
                .method("Close", 3, classic())
                .event("BeforeCloseEvent", vec![support_by_version("Excel", &EXCEL_RIBBON)])
                .build(),
        )
        .add_type(
            TypeBuilder::enumeration("NetOffice.ExcelApi.Enums.XlCalculation")
                .attribute(support_by_library("Excel", &["Excel"]))
                .enum_member("xlCalculationAutomatic", -4105, classic())
                .enum_member("xlCalculationManual", -4135, classic())
                .enum_member("xlCalculationSemiautomatic", 2, classic())
                .build(),
        )
        .into_metadata()
}

/// A [`SupportTable`] with only the sample Excel library loaded.
pub fn sample_table() -> SupportTable {
    SupportTable::from_store(
        MetadataStore::from_libraries([(LibraryKey::Excel, sample_excel_library())]),
        SupportTableConfig::embedded(),
    )
}
