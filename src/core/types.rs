use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::GlasofError;
use super::widget::PaymentWidget;

/// A company owning journals, properties and invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: u32,
    pub name: String,
}

/// A PMS property (hotel). Always owned by exactly one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: u32,
    pub name: String,
    /// Owning company.
    pub company: Company,
}

/// A ledger channel (sales, purchase, bank, ...) moves are posted through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: u32,
    pub name: String,
}

/// Posting state of an accounting move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceState {
    Draft,
    Posted,
    Cancel,
}

impl InvoiceState {
    /// ERP selection code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Cancel => "cancel",
        }
    }

    /// Parse from the ERP selection code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "draft" => Some(Self::Draft),
            "posted" => Some(Self::Posted),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }

    /// Label printed in the "Estado" column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Borrador",
            Self::Posted => "Publicado",
            Self::Cancel => "Cancelado",
        }
    }
}

/// Kind of accounting move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    /// Plain journal entry. Never exported.
    Entry,
    OutInvoice,
    OutRefund,
    InInvoice,
    InRefund,
    OutReceipt,
    InReceipt,
}

impl MoveType {
    /// ERP selection code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::OutInvoice => "out_invoice",
            Self::OutRefund => "out_refund",
            Self::InInvoice => "in_invoice",
            Self::InRefund => "in_refund",
            Self::OutReceipt => "out_receipt",
            Self::InReceipt => "in_receipt",
        }
    }

    /// Parse from the ERP selection code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "entry" => Some(Self::Entry),
            "out_invoice" => Some(Self::OutInvoice),
            "out_refund" => Some(Self::OutRefund),
            "in_invoice" => Some(Self::InInvoice),
            "in_refund" => Some(Self::InRefund),
            "out_receipt" => Some(Self::OutReceipt),
            "in_receipt" => Some(Self::InReceipt),
            _ => None,
        }
    }

    /// Label printed in the "Tipo" column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Entry => "Asiento contable",
            Self::OutInvoice => "Factura de cliente",
            Self::OutRefund => "Factura rectificativa de cliente",
            Self::InInvoice => "Factura de proveedor",
            Self::InRefund => "Factura rectificativa de proveedor",
            Self::OutReceipt => "Recibo de ventas",
            Self::InReceipt => "Recibo de compra",
        }
    }

    /// Customer credit note. Its origin points at the refunded invoice.
    pub fn is_customer_refund(&self) -> bool {
        matches!(self, Self::OutRefund)
    }
}

/// Reference to a partner's commercial entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRef {
    pub name: Option<String>,
}

/// Invoiced partner, as stored by the ERP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    /// Display name.
    pub name: String,
    /// Tax identifier, possibly prefixed with the country code ("ESB12345678").
    pub vat: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// Partner is an organization rather than a person.
    #[serde(default)]
    pub is_company: bool,
    /// Parent company of a contact person.
    pub parent: Option<PartnerRef>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// A tax applied through the invoice's tax lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    pub name: String,
    pub amount: Decimal,
}

/// An invoice, refund or receipt as returned by the record source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number (e.g. "F/2024/00012").
    pub number: String,
    pub journal: Journal,
    pub state: InvoiceState,
    pub move_type: MoveType,
    pub partner: Partner,
    /// Source document reference (the refunded invoice, for refunds).
    pub invoice_origin: Option<String>,
    /// Names of the folios (stays) this invoice was issued from.
    #[serde(default)]
    pub folios: Vec<String>,
    /// Accounting date. Date-range filters apply to this one.
    pub date: NaiveDate,
    /// Invoice date. Drafts may not have one yet.
    pub invoice_date: Option<NaiveDate>,
    pub company_id: u32,
    pub property_id: Option<u32>,
    pub amount_untaxed: Decimal,
    pub amount_tax: Decimal,
    pub amount_total: Decimal,
    pub amount_residual: Decimal,
    #[serde(default)]
    pub tax_lines: Vec<TaxLine>,
    /// JSON payment summary rendered by the ERP's payments widget.
    #[serde(default)]
    pub payments_widget: String,
}

impl InvoiceRecord {
    /// Origin shown in the payments report.
    ///
    /// Customer refunds point at the refunded invoice; other moves list the
    /// folios they were issued from.
    pub fn origin(&self) -> String {
        if self.move_type.is_customer_refund() {
            self.invoice_origin.clone().unwrap_or_default()
        } else {
            self.folios.join(",")
        }
    }

    /// Origin shown in the sales ledger: only refunds carry one.
    pub fn refund_origin(&self) -> Option<&str> {
        if self.move_type.is_customer_refund() {
            self.invoice_origin.as_deref()
        } else {
            None
        }
    }

    /// Sum of all tax line amounts, or `None` when the invoice has no tax lines.
    pub fn tax_line_sum(&self) -> Option<Decimal> {
        if self.tax_lines.is_empty() {
            None
        } else {
            Some(self.tax_lines.iter().map(|t| t.amount).sum())
        }
    }

    /// False for plain journal entries, which never appear in a report.
    pub fn is_reportable(&self) -> bool {
        self.move_type != MoveType::Entry
    }

    /// Decode the payment summary.
    pub fn payments(&self) -> Result<Option<PaymentWidget>, GlasofError> {
        PaymentWidget::parse(&self.payments_widget)
            .map_err(|e| GlasofError::payment_summary(&self.number, e.to_string()))
    }
}
