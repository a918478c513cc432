//! Export orchestration: run the enabled reports and store them on the request.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use glasof::core::*;
//! use glasof::export::export;
//!
//! let company = Company { id: 1, name: "Hoteles Norte S.A.".into() };
//! let mut request = ExportRequestBuilder::new(
//!     7,
//!     company,
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
//! )
//! .build()
//! .unwrap();
//! let records: Vec<InvoiceRecord> = Vec::new();
//!
//! let action = export(&mut request, &records, &WorkbookConfig::default()).unwrap();
//! assert_eq!(action.res_id, 7);
//! assert!(request.journals_report.is_some());
//! assert!(request.invoices_report.is_some());
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{ExportRequest, GlasofError, InvoiceSource, ReportFile, WorkbookConfig};
use crate::{ledger, payments};

pub const ACTION_NAME: &str = "Glasof export";
pub const REQUEST_MODEL: &str = "glasof.exporter.wizard";
pub const FORM_VIEW: &str = "glasof_exporter.view_glasof_exporter_wizard";

/// Tells the caller to reopen the request form so the reports can be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAction {
    pub name: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub res_model: String,
    pub res_id: u64,
    pub view: String,
    pub view_mode: String,
}

impl DisplayAction {
    pub fn for_request(request: &ExportRequest) -> Self {
        Self {
            name: ACTION_NAME.into(),
            action_type: "ir.actions.act_window".into(),
            res_model: REQUEST_MODEL.into(),
            res_id: request.id,
            view: FORM_VIEW.into(),
            view_mode: "form".into(),
        }
    }
}

/// Reports produced by one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOutputs {
    /// Payments report, when `export_journals` was set.
    pub journals_report: Option<ReportFile>,
    /// Sales ledger, when `export_invoices` was set.
    pub invoices_report: Option<ReportFile>,
}

impl ExportOutputs {
    pub fn is_empty(&self) -> bool {
        self.journals_report.is_none() && self.invoices_report.is_none()
    }

    /// Store the produced reports. Reports not produced this run keep their
    /// previous value.
    fn apply_to(self, request: &mut ExportRequest) {
        if let Some(file) = self.journals_report {
            request.journals_report = Some(file);
        }
        if let Some(file) = self.invoices_report {
            request.invoices_report = Some(file);
        }
    }
}

/// Run the reports enabled on `request` without touching it.
pub fn run_reports<S: InvoiceSource + ?Sized>(
    request: &ExportRequest,
    source: &S,
    config: &WorkbookConfig,
) -> Result<ExportOutputs, GlasofError> {
    let journals_report = if request.export_journals {
        Some(payments::export_payments(request, source, config)?)
    } else {
        None
    };
    let invoices_report = if request.export_invoices {
        Some(ledger::export_ledger(request, source, config)?)
    } else {
        None
    };
    Ok(ExportOutputs {
        journals_report,
        invoices_report,
    })
}

/// Produce the enabled reports and store them on `request`.
///
/// Nothing is stored when any report fails or when both are disabled.
pub fn export<S: InvoiceSource + ?Sized>(
    request: &mut ExportRequest,
    source: &S,
    config: &WorkbookConfig,
) -> Result<DisplayAction, GlasofError> {
    let outputs = run_reports(request, source, config)?;
    if !outputs.is_empty() {
        info!(
            "glasof export {}: payments={} ledger={}",
            request.id,
            outputs.journals_report.is_some(),
            outputs.invoices_report.is_some()
        );
        outputs.apply_to(request);
    }
    Ok(DisplayAction::for_request(request))
}
