//! # glasof
//!
//! Bookkeeping exports of PMS invoices for the Glasof accounting software.
//!
//! Two workbooks are produced from the invoices of a company (optionally a
//! single property and a set of journals) over a date range:
//!
//! - a payments report: one row per invoice, followed by one row per payment
//!   reconciled against it;
//! - a sales ledger: one fixed 44-column row per invoice, in the layout the
//!   Glasof import expects.
//!
//! All monetary values use [`rust_decimal::Decimal`]. Records come from any
//! [`core::InvoiceSource`]; slices of [`core::InvoiceRecord`] work out of the box.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use glasof::core::*;
//! use glasof::ledger::{col, ledger_row};
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceRecordBuilder::new("F/2024/0001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .partner(PartnerBuilder::new("Viajes Sol S.L.").vat("ESB12345678").country("ES").company().build())
//!     .amounts(dec!(100), dec!(10))
//!     .build();
//!
//! let row = ledger_row(&invoice);
//! assert_eq!(row.text(col::VAT), Some("B12345678"));
//! assert_eq!(row.text(col::LASTNAME), Some("Viajes Sol S.L."));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Record types, request handling, filters, spreadsheet plumbing |
//! | `payments` | Invoice/payment report |
//! | `ledger` | Sales-ledger workbook |
//! | `export` | Orchestrator running both reports |
//! | `all` (default) | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "payments")]
pub mod payments;

#[cfg(feature = "ledger")]
pub mod ledger;

#[cfg(feature = "export")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
