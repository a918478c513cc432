//! Invoice/payment settlement report.
//!
//! One row per invoice followed by one continuation row per payment
//! reconciled against it, on a single sheet named `Simples-1`.
//!
//! # Example
//!
//! ```ignore
//! use glasof::payments::*;
//!
//! let file = export_payments(&request, &records, &config)?;
//! // file.filename == "invoices_glasof_2024-06-30_18:00:00.xlsx"
//! ```

mod report;

pub use report::{
    COLUMN_WIDTHS, FILENAME_PREFIX, HEADERS, PAYMENTS_MARKER, SHEET_NAME, build_payments_report,
    col, export_payments, invoice_block, payment_rows,
};
