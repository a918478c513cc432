//! Core record types, request handling and spreadsheet plumbing.
//!
//! Both reports share the same record selection ([`InvoiceFilter`]), the same
//! partner derivations ([`PartnerProjection`]) and the same row model
//! ([`SheetRow`]).

mod builder;
mod error;
mod partner;
mod query;
mod request;
pub mod sheet;
mod types;
mod widget;

pub use builder::*;
pub use error::*;
pub use partner::*;
pub use query::*;
pub use request::*;
pub use sheet::{
    CellValue, ReportFile, SheetRow, WorkbookConfig, WorkbookConfigBuilder, timestamped_filename,
};
pub use types::*;
pub use widget::*;
