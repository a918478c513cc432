//! Record selection shared by both reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::GlasofError;
use super::request::ExportRequest;
use super::types::InvoiceRecord;

/// Conjunction of conditions a record must meet to be exported.
///
/// Plain journal entries never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFilter {
    /// First accounting date, inclusive.
    pub date_start: NaiveDate,
    /// Last accounting date, inclusive.
    pub date_end: NaiveDate,
    pub company_id: u32,
    /// `None` leaves the property unconstrained.
    pub property_id: Option<u32>,
    /// Allowed journals. Empty means all.
    pub journal_ids: Vec<u32>,
}

impl InvoiceFilter {
    /// Filter for the records an export request covers.
    pub fn for_request(request: &ExportRequest) -> Self {
        Self {
            date_start: request.date_start,
            date_end: request.date_end,
            company_id: request.company.id,
            property_id: request.property.as_ref().map(|p| p.id),
            journal_ids: request.journal_ids(),
        }
    }

    pub fn matches(&self, record: &InvoiceRecord) -> bool {
        if record.date < self.date_start || record.date > self.date_end {
            return false;
        }
        if record.company_id != self.company_id {
            return false;
        }
        if let Some(property_id) = self.property_id {
            if record.property_id != Some(property_id) {
                return false;
            }
        }
        if !record.is_reportable() {
            return false;
        }
        self.journal_ids.is_empty() || self.journal_ids.contains(&record.journal.id)
    }
}

/// Read-only access to the ERP's invoice records.
pub trait InvoiceSource {
    /// All records matching `filter`, in the source's natural order.
    fn search(&self, filter: &InvoiceFilter) -> Result<Vec<InvoiceRecord>, GlasofError>;
}

impl InvoiceSource for [InvoiceRecord] {
    fn search(&self, filter: &InvoiceFilter) -> Result<Vec<InvoiceRecord>, GlasofError> {
        Ok(self.iter().filter(|r| filter.matches(r)).cloned().collect())
    }
}

impl InvoiceSource for Vec<InvoiceRecord> {
    fn search(&self, filter: &InvoiceFilter) -> Result<Vec<InvoiceRecord>, GlasofError> {
        self.as_slice().search(filter)
    }
}
