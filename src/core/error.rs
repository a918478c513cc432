use thiserror::Error;

/// Errors that can occur while preparing or producing a Glasof export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GlasofError {
    /// The export request holds conflicting selections.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An invoice declares payments but its payment summary is not readable.
    #[error("invoice {invoice}: malformed payment summary: {reason}")]
    PaymentSummary {
        /// Number of the offending invoice.
        invoice: String,
        /// What was wrong with the summary.
        reason: String,
    },

    /// The record source failed to answer a query.
    #[error("record query failed: {0}")]
    Query(String),

    /// Workbook generation failed.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// A report file's content is not valid base64.
    #[error("decode error: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl GlasofError {
    pub(crate) fn payment_summary(invoice: &str, reason: impl Into<String>) -> Self {
        Self::PaymentSummary {
            invoice: invoice.to_string(),
            reason: reason.into(),
        }
    }
}
