use chrono::NaiveDate;
use glasof::core::*;
use glasof::export::export;
use glasof::payments;
use rust_decimal_macros::dec;

fn main() {
    let company = Company {
        id: 1,
        name: "Hoteles Norte S.A.".into(),
    };
    let date = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();

    // A corporate booking paid by transfer and a guest refund settled in cash
    let records = vec![
        InvoiceRecordBuilder::new("F/2024/0001", date(3))
            .partner(
                PartnerBuilder::new("Viajes Sol S.L.")
                    .vat("ESB12345678")
                    .country("ES")
                    .company()
                    .build(),
            )
            .folio("F0001")
            .amounts(dec!(1000), dec!(100))
            .tax_line("IVA 10%", dec!(100))
            .residual(dec!(0))
            .payment("Banco", dec!(1100), "2024-06-04", Some("BNK1/2024/0012"))
            .build(),
        InvoiceRecordBuilder::new("RF/2024/0001", date(12))
            .move_type(MoveType::OutRefund)
            .origin("F/2024/0001")
            .partner(
                PartnerBuilder::new("Jean Dupont")
                    .vat("FR12345678901")
                    .country("FR")
                    .firstname("Jean")
                    .lastname("Dupont")
                    .build(),
            )
            .amounts(dec!(-50), dec!(-5))
            .residual(dec!(0))
            .payment("Caja", dec!(-55), "2024-06-12", None)
            .build(),
        InvoiceRecordBuilder::new("MISC/2024/0001", date(15))
            .move_type(MoveType::Entry)
            .build(),
    ];

    let mut request = ExportRequestBuilder::new(7, company.clone(), date(1), date(30))
        .seat_number(120)
        .build()
        .expect("request should be valid");

    let rows = payments::payment_rows(&records).expect("payment summaries should parse");
    println!("Payments report rows (before filtering): {}", rows.len());

    let config = WorkbookConfigBuilder::new(&company.name)
        .manager("Administración")
        .build();

    match export(&mut request, &records, &config) {
        Ok(action) => {
            println!("Reopen {} #{} ({})", action.res_model, action.res_id, action.view_mode);
            for file in [&request.journals_report, &request.invoices_report]
                .into_iter()
                .flatten()
            {
                println!("  {} ({} base64 chars)", file.filename, file.content.len());
            }
        }
        Err(e) => eprintln!("Export failed: {e}"),
    }
}
