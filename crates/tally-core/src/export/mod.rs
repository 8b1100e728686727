pub mod xlsx;

pub use xlsx::{read_totals_xlsx, write_totals_xlsx, AMOUNT_HEADER, NAME_HEADER, SHEET_NAME};
