//! Sales-ledger workbook in the Glasof import layout.
//!
//! One fixed 44-column row per invoice on the `ventas` sheet, plus an empty
//! `compras` sheet that is completed by hand downstream. Most columns are
//! constants or placeholders the import expects to find.
//!
//! # Example
//!
//! ```ignore
//! use glasof::ledger::*;
//!
//! let file = export_ledger(&request, &records, &config)?;
//! // file.filename == "facturas_glasof_2024-06-30_18:00:00.xlsx"
//! ```

mod report;

pub use report::{
    COLUMN_COUNT, CUSTOMER_ACCOUNT, FILENAME_PREFIX, PURCHASES_SHEET, REGISTER_KIND, SALES_ACCOUNT,
    SALES_SHEET, SKIPPED_COLUMN, build_ledger_report, col, export_ledger, ledger_row,
    ledger_rows,
};
