use tracing::debug;

use crate::model::{ProjectTotal, Row};
use crate::parsing::{coerce_amount, match_total_label};

/// Column holding the "Total for <project>" marker (column A).
pub const LABEL_COLUMN: usize = 0;

/// Column holding the project amount (column G).
pub const AMOUNT_COLUMN: usize = 6;

/// Collect one `ProjectTotal` per "Total for" row, in sheet order.
///
/// Every row is data; there is no header handling. Rows whose label does not
/// match are skipped. A matching row always produces a record, with the
/// amount `None` when column G is missing, blank or not numeric.
pub fn extract(rows: &[Row]) -> Vec<ProjectTotal> {
    let totals: Vec<ProjectTotal> = rows
        .iter()
        .filter_map(|row| {
            let project_name = match_total_label(row.get(LABEL_COLUMN)?)?;
            let total_amount = coerce_amount(row.get(AMOUNT_COLUMN));
            Some(ProjectTotal {
                project_name,
                total_amount,
            })
        })
        .collect();

    debug!(
        scanned = rows.len(),
        matched = totals.len(),
        "extracted project totals"
    );
    totals
}
