use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use super::types::*;
use super::widget::PaymentEntry;

/// Builder for invoice records, mostly useful for fixtures and in-memory sources.
///
/// ```
/// use glasof::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceRecordBuilder::new("F/2024/0001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .partner(PartnerBuilder::new("Viajes Sol S.L.").vat("ESB12345678").country("ES").company().build())
///     .amounts(dec!(100), dec!(10))
///     .tax_line("IVA 10%", dec!(10))
///     .payment("Banco", dec!(110), "2024-06-20", Some("BNK1/2024/0003"))
///     .build();
///
/// assert_eq!(invoice.amount_total, dec!(110));
/// assert_eq!(invoice.payments().unwrap().unwrap().len(), 1);
/// ```
pub struct InvoiceRecordBuilder {
    record: InvoiceRecord,
    payments: Vec<PaymentEntry>,
    raw_widget: Option<String>,
}

impl InvoiceRecordBuilder {
    pub fn new(number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            record: InvoiceRecord {
                number: number.into(),
                journal: Journal {
                    id: 1,
                    name: "Facturas de cliente".into(),
                },
                state: InvoiceState::Posted,
                move_type: MoveType::OutInvoice,
                partner: PartnerBuilder::new("Cliente contado").build(),
                invoice_origin: None,
                folios: Vec::new(),
                date,
                invoice_date: Some(date),
                company_id: 1,
                property_id: None,
                amount_untaxed: Decimal::ZERO,
                amount_tax: Decimal::ZERO,
                amount_total: Decimal::ZERO,
                amount_residual: Decimal::ZERO,
                tax_lines: Vec::new(),
                payments_widget: String::new(),
            },
            payments: Vec::new(),
            raw_widget: None,
        }
    }

    pub fn journal(mut self, journal: Journal) -> Self {
        self.record.journal = journal;
        self
    }

    pub fn state(mut self, state: InvoiceState) -> Self {
        self.record.state = state;
        self
    }

    pub fn move_type(mut self, move_type: MoveType) -> Self {
        self.record.move_type = move_type;
        self
    }

    pub fn partner(mut self, partner: Partner) -> Self {
        self.record.partner = partner;
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.record.invoice_origin = Some(origin.into());
        self
    }

    pub fn folio(mut self, name: impl Into<String>) -> Self {
        self.record.folios.push(name.into());
        self
    }

    pub fn invoice_date(mut self, date: Option<NaiveDate>) -> Self {
        self.record.invoice_date = date;
        self
    }

    pub fn company(mut self, company_id: u32) -> Self {
        self.record.company_id = company_id;
        self
    }

    pub fn property(mut self, property_id: u32) -> Self {
        self.record.property_id = Some(property_id);
        self
    }

    /// Set untaxed and tax amounts. Total and residual follow.
    pub fn amounts(mut self, untaxed: Decimal, tax: Decimal) -> Self {
        self.record.amount_untaxed = untaxed;
        self.record.amount_tax = tax;
        self.record.amount_total = untaxed + tax;
        self.record.amount_residual = untaxed + tax;
        self
    }

    pub fn residual(mut self, residual: Decimal) -> Self {
        self.record.amount_residual = residual;
        self
    }

    pub fn tax_line(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        self.record.tax_lines.push(TaxLine {
            name: name.into(),
            amount,
        });
        self
    }

    /// Append a payment to the widget summary.
    pub fn payment(
        mut self,
        journal_name: impl Into<String>,
        amount: Decimal,
        date: impl Into<String>,
        reference: Option<&str>,
    ) -> Self {
        self.payments.push(PaymentEntry {
            journal_name: journal_name.into(),
            amount,
            date: date.into(),
            reference: reference.map(str::to_string),
        });
        self
    }

    /// Use a raw widget summary verbatim, overriding [`Self::payment`].
    pub fn payments_widget(mut self, raw: impl Into<String>) -> Self {
        self.raw_widget = Some(raw.into());
        self
    }

    pub fn build(self) -> InvoiceRecord {
        let mut record = self.record;
        record.payments_widget = match self.raw_widget {
            Some(raw) => raw,
            None if self.payments.is_empty() => "false".into(),
            None => json!({
                "title": "Less Payment",
                "outstanding": false,
                "content": self.payments,
            })
            .to_string(),
        };
        record
    }
}

/// Builder for [`Partner`].
pub struct PartnerBuilder {
    partner: Partner,
}

impl PartnerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            partner: Partner {
                name: name.into(),
                vat: None,
                country_code: None,
                is_company: false,
                parent: None,
                firstname: None,
                lastname: None,
            },
        }
    }

    pub fn vat(mut self, vat: impl Into<String>) -> Self {
        self.partner.vat = Some(vat.into());
        self
    }

    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.partner.country_code = Some(code.into());
        self
    }

    /// Mark the partner as an organization.
    pub fn company(mut self) -> Self {
        self.partner.is_company = true;
        self
    }

    pub fn parent(mut self, name: impl Into<String>) -> Self {
        self.partner.parent = Some(PartnerRef {
            name: Some(name.into()),
        });
        self
    }

    pub fn firstname(mut self, name: impl Into<String>) -> Self {
        self.partner.firstname = Some(name.into());
        self
    }

    pub fn lastname(mut self, name: impl Into<String>) -> Self {
        self.partner.lastname = Some(name.into());
        self
    }

    pub fn build(self) -> Partner {
        self.partner
    }
}
