use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Formula, Workbook, XlsxError};

use crate::error::TallyError;
use crate::extraction::read_first_sheet;
use crate::model::{Cell, ProjectTotal};
use crate::parsing::amount::f64_to_decimal;
use crate::parsing::coerce_amount;

pub const SHEET_NAME: &str = "Project Totals";
pub const NAME_HEADER: &str = "Project Name";
pub const AMOUNT_HEADER: &str = "Total Amount";

fn xlsx_err(e: XlsxError) -> TallyError {
    TallyError::Export(e.to_string())
}

/// Serialize totals into a two-column workbook.
///
/// Row 0 holds the headers. Every record writes its amount cell, so each one
/// occupies a row even when the name is empty:
/// - amounts that survive an f64 round trip are number cells
/// - wider amounts are written as exact text
/// - absent amounts are `=NA()`, which reads back as absent
pub fn write_totals_xlsx(totals: &[ProjectTotal]) -> Result<Vec<u8>, TallyError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(xlsx_err)?;
    sheet
        .write_string_with_format(0, 0, NAME_HEADER, &header)
        .map_err(xlsx_err)?;
    sheet
        .write_string_with_format(0, 1, AMOUNT_HEADER, &header)
        .map_err(xlsx_err)?;

    for (i, total) in totals.iter().enumerate() {
        let row = u32::try_from(i + 1)
            .map_err(|_| TallyError::Export(format!("too many rows: {}", totals.len())))?;
        sheet
            .write_string(row, 0, &total.project_name)
            .map_err(xlsx_err)?;
        match total.total_amount {
            Some(amount) => match lossless_f64(amount) {
                Some(value) => sheet.write_number(row, 1, value).map_err(xlsx_err)?,
                None => sheet
                    .write_string(row, 1, amount.to_string())
                    .map_err(xlsx_err)?,
            },
            None => sheet
                .write_formula(row, 1, Formula::new("=NA()").set_result("#N/A"))
                .map_err(xlsx_err)?,
        };
    }

    sheet.set_column_width(0, 40).map_err(xlsx_err)?;
    sheet.set_column_width(1, 16).map_err(xlsx_err)?;

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// The amount as f64, if converting back gives the same decimal value.
fn lossless_f64(amount: Decimal) -> Option<f64> {
    let value = amount.to_f64()?;
    (f64_to_decimal(value) == Some(amount)).then_some(value)
}

/// Read totals back from a workbook written by `write_totals_xlsx`.
///
/// The first row is taken as the header and skipped.
pub fn read_totals_xlsx(bytes: &[u8]) -> Result<Vec<ProjectTotal>, TallyError> {
    let rows = read_first_sheet(bytes)?;

    Ok(rows
        .iter()
        .skip(1)
        .map(|row| ProjectTotal {
            project_name: row.first().map(Cell::to_string).unwrap_or_default(),
            total_amount: coerce_amount(row.get(1)),
        })
        .collect())
}
