//! Row construction and workbook generation for the payments report.

use log::debug;

use crate::core::sheet::{self, Formats};
use crate::core::{
    CellValue, ExportRequest, GlasofError, InvoiceFilter, InvoiceRecord, InvoiceSource,
    PartnerProjection, PaymentEntry, ReportFile, SheetRow, WorkbookConfig,
};

pub const SHEET_NAME: &str = "Simples-1";
pub const FILENAME_PREFIX: &str = "invoices_glasof";
/// Written in the payments column of an invoice that has payments.
pub const PAYMENTS_MARKER: &str = "Pagos:";

pub const HEADERS: [&str; 14] = [
    "Diario",
    "Estado",
    "Num Factura",
    "Cliente/Prov.",
    "Origen",
    "Fecha de Factura",
    "NIF",
    "Total",
    "Pendiente",
    "Tipo",
    "Pagos",
    "Importe",
    "Fecha",
    "Referencia",
];

pub const COLUMN_WIDTHS: [f64; 14] = [
    25.0, 10.0, 18.0, 50.0, 15.0, 15.0, 15.0, 9.0, 9.0, 18.0, 25.0, 9.0, 15.0, 20.0,
];

/// Column indexes.
pub mod col {
    pub const JOURNAL: u16 = 0;
    pub const STATE: u16 = 1;
    pub const NUMBER: u16 = 2;
    pub const PARTNER: u16 = 3;
    pub const ORIGIN: u16 = 4;
    pub const INVOICE_DATE: u16 = 5;
    pub const VAT: u16 = 6;
    pub const TOTAL: u16 = 7;
    pub const RESIDUAL: u16 = 8;
    pub const MOVE_TYPE: u16 = 9;
    /// Marker on the invoice row, payment journal on continuation rows.
    pub const PAYMENTS: u16 = 10;
    pub const PAYMENT_AMOUNT: u16 = 11;
    pub const PAYMENT_DATE: u16 = 12;
    pub const PAYMENT_REF: u16 = 13;
}

const FIRST_DATA_ROW: u32 = 1;

/// Rows for one invoice: its own row, then one row per payment.
///
/// Fails when the invoice's payment summary is malformed.
pub fn invoice_block(inv: &InvoiceRecord) -> Result<Vec<SheetRow>, GlasofError> {
    let payments = inv.payments()?;
    let partner = PartnerProjection::from_partner(&inv.partner);

    let mut head = SheetRow::new()
        .with(col::JOURNAL, CellValue::text(&inv.journal.name))
        .with(col::STATE, CellValue::text(inv.state.label()))
        .with(col::NUMBER, CellValue::text(&inv.number))
        .with(col::PARTNER, CellValue::text(&inv.partner.name))
        .with(col::ORIGIN, CellValue::text_or_blank(inv.origin()))
        .with(
            col::INVOICE_DATE,
            inv.invoice_date.map_or(CellValue::Blank, CellValue::Date),
        )
        .with(col::VAT, CellValue::text_or_blank(partner.vat))
        .with(col::TOTAL, CellValue::Money(inv.amount_total))
        .with(col::RESIDUAL, CellValue::Money(inv.amount_residual))
        .with(col::MOVE_TYPE, CellValue::text(inv.move_type.label()));

    let Some(widget) = payments else {
        return Ok(vec![head]);
    };

    head.set(col::PAYMENTS, CellValue::text(PAYMENTS_MARKER));
    let mut block = Vec::with_capacity(widget.len() + 1);
    block.push(head);
    block.extend(widget.content.iter().map(payment_row));
    Ok(block)
}

fn payment_row(payment: &PaymentEntry) -> SheetRow {
    SheetRow::new()
        .with(col::PAYMENTS, CellValue::text(&payment.journal_name))
        .with(col::PAYMENT_AMOUNT, CellValue::Number(payment.amount))
        .with(col::PAYMENT_DATE, CellValue::text_or_blank(&payment.date))
        .with(
            col::PAYMENT_REF,
            CellValue::text_or_blank(payment.reference.clone().unwrap_or_default()),
        )
}

/// All data rows of the report, in sheet order. Journal entries are skipped.
pub fn payment_rows(invoices: &[InvoiceRecord]) -> Result<Vec<SheetRow>, GlasofError> {
    let mut rows = Vec::new();
    for inv in invoices.iter().filter(|inv| inv.is_reportable()) {
        rows.extend(invoice_block(inv)?);
    }
    Ok(rows)
}

/// Render the payments report for already-selected invoices.
///
/// Journal entries are skipped even when the selection contains them.
pub fn build_payments_report(
    invoices: &[InvoiceRecord],
    config: &WorkbookConfig,
) -> Result<ReportFile, GlasofError> {
    render(invoices, config).map(|(file, _)| file)
}

/// Render the workbook. Also returns the number of data rows written.
fn render(
    invoices: &[InvoiceRecord],
    config: &WorkbookConfig,
) -> Result<(ReportFile, u32), GlasofError> {
    let blocks = invoices
        .iter()
        .filter(|inv| inv.is_reportable())
        .map(invoice_block)
        .collect::<Result<Vec<_>, _>>()?;

    let formats = Formats::new();
    let mut workbook = sheet::new_workbook(config);
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    sheet::write_header(worksheet, &HEADERS, &formats)?;
    sheet::set_column_widths(worksheet, &COLUMN_WIDTHS)?;

    let next_row = blocks.iter().try_fold(FIRST_DATA_ROW, |row, block| {
        sheet::write_rows(worksheet, row, block, &formats, config)
    })?;
    let data_rows = next_row - FIRST_DATA_ROW;
    debug!(
        "payments report: {} invoices, {} data rows",
        blocks.len(),
        data_rows
    );

    let filename = sheet::timestamped_filename(FILENAME_PREFIX, config.timestamp());
    Ok((sheet::finish(workbook, filename)?, data_rows))
}

/// Query the invoices covered by `request` and render the payments report.
pub fn export_payments<S: InvoiceSource + ?Sized>(
    request: &ExportRequest,
    source: &S,
    config: &WorkbookConfig,
) -> Result<ReportFile, GlasofError> {
    let invoices = source.search(&InvoiceFilter::for_request(request))?;
    build_payments_report(&invoices, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceRecordBuilder, MoveType, PartnerBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn invoice_without_payments_is_one_row() {
        let inv = InvoiceRecordBuilder::new("F/2024/0001", date(3))
            .amounts(dec!(100), dec!(10))
            .build();
        let block = invoice_block(&inv).unwrap();
        assert_eq!(block.len(), 1);
        for c in col::PAYMENTS..=col::PAYMENT_REF {
            assert!(block[0].is_blank(c));
        }
        assert_eq!(block[0].get(col::TOTAL), Some(&CellValue::Money(dec!(110))));
        assert_eq!(block[0].text(col::STATE), Some("Publicado"));
        assert_eq!(block[0].text(col::MOVE_TYPE), Some("Factura de cliente"));
    }

    #[test]
    fn folios_become_origin() {
        let inv = InvoiceRecordBuilder::new("F/2024/0002", date(3))
            .folio("F0001")
            .folio("F0002")
            .build();
        let block = invoice_block(&inv).unwrap();
        assert_eq!(block[0].text(col::ORIGIN), Some("F0001,F0002"));
    }

    #[test]
    fn vat_is_normalized() {
        let inv = InvoiceRecordBuilder::new("F/2024/0003", date(3))
            .partner(PartnerBuilder::new("Viajes Sol S.L.").vat("ESB12345678").country("ES").build())
            .build();
        let block = invoice_block(&inv).unwrap();
        assert_eq!(block[0].text(col::VAT), Some("B12345678"));
    }

    #[test]
    fn empty_payment_content_writes_marker_only() {
        let inv = InvoiceRecordBuilder::new("F/2024/0004", date(3))
            .payments_widget(r#"{"content": []}"#)
            .build();
        let block = invoice_block(&inv).unwrap();
        assert_eq!(block.len(), 1);
        assert_eq!(block[0].text(col::PAYMENTS), Some(PAYMENTS_MARKER));
    }

    #[test]
    fn malformed_widget_fails() {
        let inv = InvoiceRecordBuilder::new("F/2024/0005", date(3))
            .payments_widget("[\"oops\"]")
            .build();
        let err = invoice_block(&inv).unwrap_err();
        assert!(matches!(err, GlasofError::PaymentSummary { ref invoice, .. } if invoice == "F/2024/0005"));
    }

    #[test]
    fn refund_with_two_payments() {
        let inv = InvoiceRecordBuilder::new("RINV/2024/0001", date(3))
            .move_type(MoveType::OutRefund)
            .origin("INV/001")
            .folio("F0009")
            .payment("Banco", dec!(60), "2024-06-04", Some("BNK/1"))
            .payment("Caja", dec!(40), "2024-06-05", None)
            .build();
        let block = invoice_block(&inv).unwrap();
        assert_eq!(block.len(), 3);
        assert_eq!(block[0].text(col::ORIGIN), Some("INV/001"));
        assert_eq!(block[0].text(col::PAYMENTS), Some("Pagos:"));
        for row in &block[1..] {
            for c in col::JOURNAL..=col::MOVE_TYPE {
                assert!(row.is_blank(c));
            }
        }
        assert_eq!(block[1].text(col::PAYMENTS), Some("Banco"));
        assert_eq!(block[1].get(col::PAYMENT_AMOUNT), Some(&CellValue::Number(dec!(60))));
        assert_eq!(block[1].text(col::PAYMENT_DATE), Some("2024-06-04"));
        assert_eq!(block[1].text(col::PAYMENT_REF), Some("BNK/1"));
        assert!(block[2].is_blank(col::PAYMENT_REF));
    }

    #[test]
    fn entries_are_skipped() {
        let entry = InvoiceRecordBuilder::new("MISC/2024/0001", date(3))
            .move_type(MoveType::Entry)
            .payment("Banco", dec!(10), "2024-06-04", None)
            .build();
        let invoice = InvoiceRecordBuilder::new("F/2024/0006", date(3)).build();
        let rows = payment_rows(&[entry.clone(), invoice.clone()]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(col::NUMBER), Some("F/2024/0006"));

        let (_, data_rows) = render(&[entry], &WorkbookConfig::default()).unwrap();
        assert_eq!(data_rows, 0);
    }

    #[test]
    fn workbook_ends_after_invoices_and_payments() {
        let invoices = vec![
            InvoiceRecordBuilder::new("F/2024/0007", date(3))
                .payment("Banco", dec!(60), "2024-06-04", Some("BNK/1"))
                .payment("Caja", dec!(40), "2024-06-05", None)
                .build(),
            InvoiceRecordBuilder::new("F/2024/0008", date(4)).build(),
            InvoiceRecordBuilder::new("F/2024/0009", date(5))
                .payment("Banco", dec!(5), "2024-06-06", None)
                .build(),
        ];
        let (file, data_rows) = render(&invoices, &WorkbookConfig::default()).unwrap();
        // 3 invoices + 3 payments below the header row.
        assert_eq!(data_rows, 6);
        assert_eq!(&file.decode().unwrap()[..2], b"PK");
    }

    #[test]
    fn header_matches_widths() {
        assert_eq!(HEADERS.len(), COLUMN_WIDTHS.len());
        assert_eq!(HEADERS[col::PAYMENTS as usize], "Pagos");
    }
}
