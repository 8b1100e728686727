pub mod totals;
pub mod workbook;

pub use totals::{extract, AMOUNT_COLUMN, LABEL_COLUMN};
pub use workbook::{read_first_sheet, sheet_overview};
