#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (Ok(s), Some(date)) = (std::str::from_utf8(data), NaiveDate::from_ymd_opt(2024, 6, 1)) else {
        return;
    };
    let invoice = glasof::core::InvoiceRecordBuilder::new("F/FUZZ", date)
        .payments_widget(s)
        .build();
    let _ = glasof::payments::invoice_block(&invoice);
});
