use serde_json::{json, Value};
use tally_core::error::TallyError;
use tally_core::model::SheetOverview;
use tally_core::FileOutcome;

fn print_files(files: Vec<Value>) -> Result<(), TallyError> {
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}

pub fn print_totals(outcomes: &[FileOutcome]) -> Result<(), TallyError> {
    let files = outcomes
        .iter()
        .map(|o| match &o.result {
            Ok(upload) => json!({ "file": o.source_name, "totals": upload.totals }),
            Err(e) => json!({ "file": o.source_name, "error": e.to_string() }),
        })
        .collect();
    print_files(files)
}

pub fn print_outcomes(outcomes: &[FileOutcome]) -> Result<(), TallyError> {
    let files = outcomes
        .iter()
        .map(|o| match &o.result {
            Ok(upload) => json!({
                "file": o.source_name,
                "totals": upload.totals,
                "summary": upload.summary,
                "summary_error": upload.summary_error,
            }),
            Err(e) => json!({ "file": o.source_name, "error": e.to_string() }),
        })
        .collect();
    print_files(files)
}

pub fn print_sheets(
    results: &[(String, Result<Vec<SheetOverview>, TallyError>)],
) -> Result<(), TallyError> {
    let files = results
        .iter()
        .map(|(file, result)| match result {
            Ok(sheets) => json!({ "file": file, "sheets": sheets }),
            Err(e) => json!({ "file": file, "error": e.to_string() }),
        })
        .collect();
    print_files(files)
}
