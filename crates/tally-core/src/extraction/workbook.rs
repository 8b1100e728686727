use std::io::Cursor;

use calamine::{Data, Range, Reader};
use tracing::debug;

use crate::error::TallyError;
use crate::model::{Cell, Row, SheetOverview};

/// Read the first sheet of a workbook into rows, with no header handling.
///
/// Accepts every format calamine can auto-detect (xlsx, xlsm, xlsb, xls, ods).
/// Each row is left-padded with blanks so index 0 is always column A, even
/// when the sheet's used range starts further right.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Row>, TallyError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| TallyError::UnreadableInput(format!("failed to open workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TallyError::UnreadableInput("workbook contains no sheets".into()))?
        .map_err(|e| TallyError::UnreadableInput(format!("failed to read first sheet: {e}")))?;

    let rows = range_to_rows(&range);
    debug!(rows = rows.len(), "read first sheet");
    Ok(rows)
}

/// List every sheet in the workbook with its used-range size.
pub fn sheet_overview(bytes: &[u8]) -> Result<Vec<SheetOverview>, TallyError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| TallyError::UnreadableInput(format!("failed to open workbook: {e}")))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name).map_err(|e| {
            TallyError::UnreadableInput(format!("failed to read sheet '{name}': {e}"))
        })?;
        let (rows, columns) = range.get_size();
        sheets.push(SheetOverview {
            name,
            rows,
            columns,
        });
    }

    Ok(sheets)
}

fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let start_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    range
        .rows()
        .map(|cells| {
            let mut row = Vec::with_capacity(start_col + cells.len());
            row.resize(start_col, Cell::Blank);
            row.extend(cells.iter().map(to_cell));
            row
        })
        .collect()
}

/// Map a calamine value onto the closed set of cell kinds.
pub fn to_cell(data: &Data) -> Cell {
    match data {
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Empty => Cell::Blank,
        other => Cell::Other(other.to_string()),
    }
}
