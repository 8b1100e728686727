use std::path::PathBuf;

use tally_core::error::TallyError;
use tally_core::extraction::sheet_overview;

use super::read_inputs;
use crate::output;

pub fn run(input_files: &[PathBuf], output_format: &str) -> Result<(), TallyError> {
    let results: Vec<_> = read_inputs(input_files)
        .map(|(name, bytes)| {
            let sheets = bytes.and_then(|b| sheet_overview(&b));
            (name, sheets)
        })
        .collect();

    match output_format {
        "json" => output::json::print_sheets(&results)?,
        _ => output::table::print_sheets(&results),
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        return Err(TallyError::BatchFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}
