use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::GlasofError;
use super::sheet::ReportFile;
use super::types::{Company, Journal, Property};

const PROPERTY_COMPANY_MISMATCH: &str = "El hotel seleccionado no es de esta compañía, \
     eliminar o modifica el hotel para seleccionar esta compañía";

/// One Glasof export: the user's selections plus the produced reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Identifier of the request record, echoed back in the display action.
    pub id: u64,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub company: Company,
    pub property: Option<Property>,
    /// Journals to restrict the export to. Empty means all journals.
    pub journals: Vec<Journal>,
    /// First seat number for manual numbering downstream.
    pub seat_number: u32,
    /// Produce the payments report.
    pub export_journals: bool,
    /// Produce the sales-ledger workbook.
    pub export_invoices: bool,
    /// Last payments report produced for this request.
    pub journals_report: Option<ReportFile>,
    /// Last sales-ledger workbook produced for this request.
    pub invoices_report: Option<ReportFile>,
}

impl ExportRequest {
    /// Select a property. The company follows the property.
    pub fn select_property(&mut self, property: Option<Property>) {
        if let Some(p) = &property {
            self.company = p.company.clone();
        }
        self.property = property;
    }

    /// Select a company.
    ///
    /// Fails, leaving the request untouched, when the selected property
    /// belongs to another company.
    pub fn select_company(&mut self, company: Company) -> Result<(), GlasofError> {
        check_property_company(self.property.as_ref(), &company)?;
        self.company = company;
        Ok(())
    }

    pub fn journal_ids(&self) -> Vec<u32> {
        self.journals.iter().map(|j| j.id).collect()
    }
}

fn check_property_company(property: Option<&Property>, company: &Company) -> Result<(), GlasofError> {
    match property {
        Some(p) if p.company.id != company.id => {
            Err(GlasofError::Validation(PROPERTY_COMPANY_MISMATCH.into()))
        }
        _ => Ok(()),
    }
}

/// Builder for [`ExportRequest`].
///
/// ```
/// use chrono::NaiveDate;
/// use glasof::core::{Company, ExportRequestBuilder};
///
/// let company = Company { id: 1, name: "Hoteles Norte S.A.".into() };
/// let request = ExportRequestBuilder::new(
///     7,
///     company,
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
/// )
/// .export_journals(false)
/// .build()
/// .unwrap();
/// assert!(request.export_invoices);
/// ```
pub struct ExportRequestBuilder {
    request: ExportRequest,
}

impl ExportRequestBuilder {
    pub fn new(id: u64, company: Company, date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            request: ExportRequest {
                id,
                date_start,
                date_end,
                company,
                property: None,
                journals: Vec::new(),
                seat_number: 1,
                export_journals: true,
                export_invoices: true,
                journals_report: None,
                invoices_report: None,
            },
        }
    }

    pub fn company(mut self, company: Company) -> Self {
        self.request.company = company;
        self
    }

    /// Select a property; also switches the company to the property's owner.
    pub fn property(mut self, property: Property) -> Self {
        self.request.select_property(Some(property));
        self
    }

    pub fn journal(mut self, journal: Journal) -> Self {
        self.request.journals.push(journal);
        self
    }

    pub fn seat_number(mut self, seat: u32) -> Self {
        self.request.seat_number = seat;
        self
    }

    pub fn export_journals(mut self, enabled: bool) -> Self {
        self.request.export_journals = enabled;
        self
    }

    pub fn export_invoices(mut self, enabled: bool) -> Self {
        self.request.export_invoices = enabled;
        self
    }

    pub fn build(self) -> Result<ExportRequest, GlasofError> {
        check_property_company(self.request.property.as_ref(), &self.request.company)?;
        Ok(self.request)
    }
}
