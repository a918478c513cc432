use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::sheet::{self, Formats};
use crate::core::{
    CellValue, ExportRequest, GlasofError, InvoiceFilter, InvoiceRecord, InvoiceSource,
    PartnerProjection, ReportFile, SheetRow, WorkbookConfig,
};

pub const SALES_SHEET: &str = "ventas";
/// Left empty for manual completion.
pub const PURCHASES_SHEET: &str = "compras";
pub const FILENAME_PREFIX: &str = "facturas_glasof";

/// Columns 0..=43.
pub const COLUMN_COUNT: u16 = 44;
/// Never written; the import layout has a hole here.
pub const SKIPPED_COLUMN: u16 = 26;

/// Sales account written in column 8.
pub const SALES_ACCOUNT: Decimal = dec!(705.0);
/// Register kind written in column 21.
pub const REGISTER_KIND: &str = "S";
/// Customer account written in column 43.
pub const CUSTOMER_ACCOUNT: &str = "430";

/// Columns that carry data. Everything else up to 43 is a placeholder.
pub mod col {
    pub const NUMBER: u16 = 0;
    pub const INVOICE_DATE: u16 = 1;
    pub const COUNTRY: u16 = 3;
    pub const VAT: u16 = 4;
    pub const LASTNAME: u16 = 5;
    pub const FIRSTNAME: u16 = 7;
    pub const ACCOUNT: u16 = 8;
    pub const UNTAXED: u16 = 9;
    pub const TAX_LINES: u16 = 10;
    pub const TAX: u16 = 11;
    pub const REGISTER: u16 = 21;
    pub const REFUND_ORIGIN: u16 = 23;
    pub const CUSTOMER_ACCOUNT: u16 = 43;
}

// Row 0 stays empty; the import starts reading at row 1.
const FIRST_DATA_ROW: u32 = 1;

/// The ledger row for one invoice.
pub fn ledger_row(inv: &InvoiceRecord) -> SheetRow {
    let partner = PartnerProjection::from_partner(&inv.partner);

    let mut row = SheetRow::new();
    for c in (0..COLUMN_COUNT).filter(|c| *c != SKIPPED_COLUMN) {
        row.set(c, CellValue::Blank);
    }

    row.set(col::NUMBER, CellValue::text(&inv.number));
    if let Some(d) = inv.invoice_date {
        row.set(col::INVOICE_DATE, CellValue::Date(d));
    }
    row.set(col::COUNTRY, CellValue::text_or_blank(partner.country_code));
    row.set(col::VAT, CellValue::text_or_blank(partner.vat));
    row.set(col::LASTNAME, CellValue::text_or_blank(partner.lastname));
    row.set(col::FIRSTNAME, CellValue::text_or_blank(partner.firstname));
    row.set(col::ACCOUNT, CellValue::OneDecimal(SALES_ACCOUNT));
    row.set(col::UNTAXED, CellValue::Money(inv.amount_untaxed));
    if let Some(sum) = inv.tax_line_sum() {
        row.set(col::TAX_LINES, CellValue::Money(sum));
    }
    if !inv.amount_tax.is_zero() {
        row.set(col::TAX, CellValue::Money(inv.amount_tax));
    }
    row.set(col::REGISTER, CellValue::text(REGISTER_KIND));
    if let Some(origin) = inv.refund_origin() {
        row.set(col::REFUND_ORIGIN, CellValue::text_or_blank(origin));
    }
    row.set(col::CUSTOMER_ACCOUNT, CellValue::text(CUSTOMER_ACCOUNT));
    row
}

/// One row per invoice. Journal entries are skipped.
pub fn ledger_rows(invoices: &[InvoiceRecord]) -> Vec<SheetRow> {
    invoices
        .iter()
        .filter(|inv| inv.is_reportable())
        .map(ledger_row)
        .collect()
}

/// Render the sales-ledger workbook for already-selected invoices.
pub fn build_ledger_report(
    invoices: &[InvoiceRecord],
    config: &WorkbookConfig,
) -> Result<ReportFile, GlasofError> {
    render(invoices, config).map(|(file, _)| file)
}

fn render(
    invoices: &[InvoiceRecord],
    config: &WorkbookConfig,
) -> Result<(ReportFile, u32), GlasofError> {
    let rows = ledger_rows(invoices);

    let formats = Formats::new();
    let mut workbook = sheet::new_workbook(config);
    let sales = workbook.add_worksheet();
    sales.set_name(SALES_SHEET)?;
    let next_row = sheet::write_rows(sales, FIRST_DATA_ROW, &rows, &formats, config)?;
    workbook.add_worksheet().set_name(PURCHASES_SHEET)?;
    let data_rows = next_row - FIRST_DATA_ROW;
    debug!("sales ledger: {} invoices, {} rows", rows.len(), data_rows);

    let filename = sheet::timestamped_filename(FILENAME_PREFIX, config.timestamp());
    Ok((sheet::finish(workbook, filename)?, data_rows))
}

/// Query the invoices covered by `request` and render the sales ledger.
pub fn export_ledger<S: InvoiceSource + ?Sized>(
    request: &ExportRequest,
    source: &S,
    config: &WorkbookConfig,
) -> Result<ReportFile, GlasofError> {
    let invoices = source.search(&InvoiceFilter::for_request(request))?;
    build_ledger_report(&invoices, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceRecordBuilder, MoveType, PartnerBuilder};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn invoice() -> InvoiceRecord {
        InvoiceRecordBuilder::new("F/2024/0042", date())
            .partner(
                PartnerBuilder::new("Lucía Pérez")
                    .vat("ES12345678Z")
                    .country("ES")
                    .firstname("Lucía")
                    .lastname("Pérez")
                    .build(),
            )
            .amounts(dec!(100), dec!(10))
            .tax_line("IVA 10%", dec!(10))
            .build()
    }

    #[test]
    fn layout_has_a_hole_at_26() {
        let row = ledger_row(&invoice());
        assert!(row.get(SKIPPED_COLUMN).is_none());
        assert_eq!(row.last_column(), Some(43));
        assert_eq!(row.cells().count(), 43);
    }

    #[test]
    fn data_columns() {
        let row = ledger_row(&invoice());
        assert_eq!(row.text(col::NUMBER), Some("F/2024/0042"));
        assert_eq!(row.get(col::INVOICE_DATE), Some(&CellValue::Date(date())));
        assert_eq!(row.text(col::COUNTRY), Some("ES"));
        assert_eq!(row.text(col::VAT), Some("12345678Z"));
        assert_eq!(row.text(col::LASTNAME), Some("Pérez"));
        assert_eq!(row.text(col::FIRSTNAME), Some("Lucía"));
        assert_eq!(row.get(col::ACCOUNT), Some(&CellValue::OneDecimal(dec!(705.0))));
        assert_eq!(row.get(col::UNTAXED), Some(&CellValue::Money(dec!(100))));
        assert_eq!(row.get(col::TAX_LINES), Some(&CellValue::Money(dec!(10))));
        assert_eq!(row.get(col::TAX), Some(&CellValue::Money(dec!(10))));
        assert_eq!(row.text(col::REGISTER), Some("S"));
        assert_eq!(row.text(col::CUSTOMER_ACCOUNT), Some("430"));
        assert!(row.is_blank(col::REFUND_ORIGIN));
    }

    #[test]
    fn placeholders_are_blank() {
        let row = ledger_row(&invoice());
        for c in [2, 6, 12, 20, 22, 24, 25, 27, 42] {
            assert_eq!(row.get(c), Some(&CellValue::Blank), "column {c}");
        }
    }

    #[test]
    fn no_tax_lines_leaves_blank() {
        let inv = InvoiceRecordBuilder::new("F/2024/0043", date()).build();
        let row = ledger_row(&inv);
        assert_eq!(row.get(col::TAX_LINES), Some(&CellValue::Blank));
        assert_eq!(row.get(col::TAX), Some(&CellValue::Blank));
    }

    #[test]
    fn tax_lines_are_summed() {
        let inv = InvoiceRecordBuilder::new("F/2024/0044", date())
            .tax_line("IVA 10%", dec!(10))
            .tax_line("IVA 21%", dec!(21))
            .build();
        let row = ledger_row(&inv);
        assert_eq!(row.get(col::TAX_LINES), Some(&CellValue::Money(dec!(31))));
    }

    #[test]
    fn refund_origin() {
        let inv = InvoiceRecordBuilder::new("RINV/2024/0001", date())
            .move_type(MoveType::OutRefund)
            .origin("F/2024/0042")
            .build();
        assert_eq!(ledger_row(&inv).text(col::REFUND_ORIGIN), Some("F/2024/0042"));

        let inv = InvoiceRecordBuilder::new("F/2024/0045", date())
            .origin("SO042")
            .build();
        assert!(ledger_row(&inv).is_blank(col::REFUND_ORIGIN));
    }

    #[test]
    fn entries_are_skipped() {
        let entry = InvoiceRecordBuilder::new("MISC/2024/0001", date())
            .move_type(MoveType::Entry)
            .build();
        let rows = ledger_rows(&[entry.clone(), invoice()]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(col::NUMBER), Some("F/2024/0042"));

        let (_, data_rows) = render(&[entry, invoice(), invoice()], &WorkbookConfig::default()).unwrap();
        assert_eq!(data_rows, 2);
    }

    #[test]
    fn company_contact_is_booked_under_parent() {
        let inv = InvoiceRecordBuilder::new("F/2024/0046", date())
            .partner(
                PartnerBuilder::new("Ana Ruiz")
                    .firstname("Ana")
                    .lastname("Ruiz")
                    .parent("Viajes Sol S.L.")
                    .build(),
            )
            .build();
        let row = ledger_row(&inv);
        assert_eq!(row.text(col::LASTNAME), Some("Viajes Sol S.L."));
        assert!(row.is_blank(col::FIRSTNAME));
    }
}
