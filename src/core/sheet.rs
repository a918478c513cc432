//! Spreadsheet plumbing shared by both reports.
//!
//! Reports are built as plain [`SheetRow`] values first and only then written
//! into an xlsx workbook, so row construction can be tested without parsing
//! spreadsheets.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, DocProperties, ExcelDateTime, Format, Workbook, Worksheet};
use serde::{Deserialize, Serialize};

use super::error::GlasofError;

/// Date cells, `15/06/2024`.
pub const DATE_FORMAT: &str = "dd/mm/yyyy";
/// Money cells, `1,234.50`.
pub const MONEY_FORMAT: &str = "#,##0.00";
/// Account-code style cells, `705.0`.
pub const ONE_DECIMAL_FORMAT: &str = "#,#0.0";
/// Header row fill.
pub const HEADER_COLOR: u32 = 0xCCCCCC;

/// Value of a single cell, with the number format it is written with.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Deliberately empty placeholder column.
    Blank,
    Text(String),
    Number(Decimal),
    Money(Decimal),
    OneDecimal(Decimal),
    Date(NaiveDate),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Text cell, or a placeholder when `s` is empty.
    pub fn text_or_blank(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Self::Blank } else { Self::Text(s) }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// One worksheet row, keyed by zero-based column.
///
/// Columns that were never set are absent, which is distinct from a
/// [`CellValue::Blank`] placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: BTreeMap<u16, CellValue>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, col: u16, value: CellValue) -> Self {
        self.cells.insert(col, value);
        self
    }

    pub fn set(&mut self, col: u16, value: CellValue) {
        self.cells.insert(col, value);
    }

    pub fn get(&self, col: u16) -> Option<&CellValue> {
        self.cells.get(&col)
    }

    /// Text of a cell, if it holds text.
    pub fn text(&self, col: u16) -> Option<&str> {
        match self.cells.get(&col) {
            Some(CellValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// True when the column is unset or a placeholder.
    pub fn is_blank(&self, col: u16) -> bool {
        self.cells.get(&col).is_none_or(CellValue::is_blank)
    }

    /// Highest column written, if any.
    pub fn last_column(&self) -> Option<u16> {
        self.cells.keys().next_back().copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = (u16, &CellValue)> {
        self.cells.iter().map(|(c, v)| (*c, v))
    }
}

/// Workbook-level settings shared by both reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookConfig {
    /// Company the data is exported for (document properties).
    pub company_name: String,
    pub author: String,
    pub manager: String,
    pub category: String,
    pub comments: String,
    /// Write numeric-looking text (`"430"`) as number cells.
    pub strings_to_numbers: bool,
    /// Fixed generation time for filenames. Local time when unset.
    pub generated_at: Option<NaiveDateTime>,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            author: "Odoo ALDA PMS".into(),
            manager: String::new(),
            category: "Hoja de Calculo".into(),
            comments: "Created with glasof".into(),
            strings_to_numbers: true,
            generated_at: None,
        }
    }
}

impl WorkbookConfig {
    /// Timestamp used in report filenames.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.generated_at
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    fn properties(&self) -> DocProperties {
        let company = &self.company_name;
        DocProperties::new()
            .set_title(&format!("Exported data from {company}"))
            .set_subject(&format!("PMS Data of {company}"))
            .set_author(&self.author)
            .set_manager(&self.manager)
            .set_company(company)
            .set_category(&self.category)
            .set_keywords(&format!("pms, glasof, data, {company}"))
            .set_comment(&self.comments)
    }
}

/// Builder for [`WorkbookConfig`].
///
/// ```
/// use glasof::core::WorkbookConfigBuilder;
///
/// let config = WorkbookConfigBuilder::new("Hoteles Norte S.A.")
///     .manager("Administración")
///     .strings_to_numbers(false)
///     .build();
/// assert_eq!(config.author, "Odoo ALDA PMS");
/// ```
pub struct WorkbookConfigBuilder {
    config: WorkbookConfig,
}

impl WorkbookConfigBuilder {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            config: WorkbookConfig {
                company_name: company_name.into(),
                ..Default::default()
            },
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.config.author = author.into();
        self
    }

    pub fn manager(mut self, manager: impl Into<String>) -> Self {
        self.config.manager = manager.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.config.category = category.into();
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.config.comments = comments.into();
        self
    }

    pub fn strings_to_numbers(mut self, enabled: bool) -> Self {
        self.config.strings_to_numbers = enabled;
        self
    }

    /// Pin the filename timestamp.
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.config.generated_at = Some(at);
        self
    }

    pub fn build(self) -> WorkbookConfig {
        self.config
    }
}

/// A finished report: filename plus base64-encoded xlsx bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFile {
    pub filename: String,
    pub content: String,
}

impl ReportFile {
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            filename: filename.into(),
            content: STANDARD.encode(bytes),
        }
    }

    /// Raw xlsx bytes.
    pub fn decode(&self) -> Result<Vec<u8>, GlasofError> {
        Ok(STANDARD.decode(&self.content)?)
    }
}

/// `<prefix>_YYYY-MM-DD_HH:MM:SS.xlsx`
pub fn timestamped_filename(prefix: &str, at: NaiveDateTime) -> String {
    format!("{prefix}_{}.xlsx", at.format("%Y-%m-%d_%H:%M:%S"))
}

/// Cell formats of one workbook.
pub(crate) struct Formats {
    pub header: Format,
    pub date: Format,
    pub money: Format,
    pub one_decimal: Format,
}

impl Formats {
    pub fn new() -> Self {
        Self {
            header: Format::new().set_background_color(Color::RGB(HEADER_COLOR)),
            date: Format::new().set_num_format(DATE_FORMAT),
            money: Format::new().set_num_format(MONEY_FORMAT),
            one_decimal: Format::new().set_num_format(ONE_DECIMAL_FORMAT),
        }
    }
}

/// Empty workbook carrying the document properties, with zip64 enabled.
pub(crate) fn new_workbook(config: &WorkbookConfig) -> Workbook {
    let mut workbook = Workbook::new();
    workbook.set_properties(&config.properties());
    workbook.use_zip_large_file(true);
    workbook
}

/// Serialize the workbook into a [`ReportFile`].
pub(crate) fn finish(mut workbook: Workbook, filename: String) -> Result<ReportFile, GlasofError> {
    let bytes = workbook.save_to_buffer()?;
    Ok(ReportFile::from_bytes(filename, &bytes))
}

pub(crate) fn write_header(
    worksheet: &mut Worksheet,
    headers: &[&str],
    formats: &Formats,
) -> Result<(), GlasofError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
    }
    Ok(())
}

pub(crate) fn set_column_widths(worksheet: &mut Worksheet, widths: &[f64]) -> Result<(), GlasofError> {
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// Write `rows` starting at `first_row`. Returns the next free row.
pub(crate) fn write_rows(
    worksheet: &mut Worksheet,
    first_row: u32,
    rows: &[SheetRow],
    formats: &Formats,
    config: &WorkbookConfig,
) -> Result<u32, GlasofError> {
    rows.iter().try_fold(first_row, |row, sheet_row| {
        for (col, value) in sheet_row.cells() {
            write_cell(worksheet, row, col, value, formats, config)?;
        }
        Ok(row + 1)
    })
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    formats: &Formats,
    config: &WorkbookConfig,
) -> Result<(), GlasofError> {
    match value {
        CellValue::Blank => {}
        CellValue::Text(s) => match numeric_text(s, config) {
            Some(n) => {
                worksheet.write_number(row, col, n)?;
            }
            None => {
                worksheet.write_string(row, col, s)?;
            }
        },
        CellValue::Number(d) => {
            worksheet.write_number(row, col, to_f64(*d))?;
        }
        CellValue::Money(d) => {
            worksheet.write_number_with_format(row, col, to_f64(*d), &formats.money)?;
        }
        CellValue::OneDecimal(d) => {
            worksheet.write_number_with_format(row, col, to_f64(*d), &formats.one_decimal)?;
        }
        CellValue::Date(d) => {
            let dt = ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)?;
            worksheet.write_datetime_with_format(row, col, &dt, &formats.date)?;
        }
    }
    Ok(())
}

fn numeric_text(s: &str, config: &WorkbookConfig) -> Option<f64> {
    if !config.strings_to_numbers {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap()
    }

    #[test]
    fn filename_format() {
        assert_eq!(
            timestamped_filename("facturas_glasof", at()),
            "facturas_glasof_2024-06-15_09:05:03.xlsx"
        );
    }

    #[test]
    fn report_file_round_trips_bytes() {
        let file = ReportFile::from_bytes("a.xlsx", b"PK\x03\x04data");
        assert_eq!(file.decode().unwrap(), b"PK\x03\x04data");
    }

    #[test]
    fn bad_base64_is_a_decode_error() {
        let file = ReportFile {
            filename: "a.xlsx".into(),
            content: "not base64!".into(),
        };
        assert!(matches!(file.decode(), Err(GlasofError::Decode(_))));
    }

    #[test]
    fn numeric_text_detection() {
        let config = WorkbookConfig::default();
        assert_eq!(numeric_text("430", &config), Some(430.0));
        assert_eq!(numeric_text("B12345678", &config), None);
        assert_eq!(numeric_text("inf", &config), None);
        assert_eq!(numeric_text("2024-06-20", &config), None);

        let off = WorkbookConfigBuilder::new("X").strings_to_numbers(false).build();
        assert_eq!(numeric_text("430", &off), None);
    }

    #[test]
    fn unset_and_placeholder_columns() {
        let row = SheetRow::new()
            .with(0, CellValue::text("A"))
            .with(2, CellValue::Blank);
        assert!(!row.is_blank(0));
        assert!(row.is_blank(1));
        assert!(row.is_blank(2));
        assert!(row.get(1).is_none());
        assert_eq!(row.get(2), Some(&CellValue::Blank));
        assert_eq!(row.last_column(), Some(2));
    }

    #[test]
    fn text_or_blank() {
        assert_eq!(CellValue::text_or_blank(""), CellValue::Blank);
        assert_eq!(CellValue::text_or_blank("x"), CellValue::text("x"));
    }

    #[test]
    fn workbook_with_rows_serializes() {
        let config = WorkbookConfigBuilder::new("Hoteles Norte S.A.")
            .generated_at(at())
            .build();
        let formats = Formats::new();
        let mut workbook = new_workbook(&config);
        let worksheet = workbook.add_worksheet();
        write_header(worksheet, &["A", "B"], &formats).unwrap();
        let rows = vec![
            SheetRow::new()
                .with(0, CellValue::Date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()))
                .with(1, CellValue::Money(dec!(12.5))),
            SheetRow::new().with(1, CellValue::OneDecimal(dec!(705.0))),
        ];
        let next = write_rows(worksheet, 1, &rows, &formats, &config).unwrap();
        assert_eq!(next, 3);

        let file = finish(workbook, "t.xlsx".into()).unwrap();
        let bytes = file.decode().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
