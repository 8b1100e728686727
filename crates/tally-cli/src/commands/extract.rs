use std::path::{Path, PathBuf};

use tally_core::error::TallyError;
use tally_core::export::write_totals_xlsx;
use tally_core::handle_uploads;
use tally_core::model::ProjectTotal;
use tracing::info;

use super::{batch_status, file_stem, read_inputs};
use crate::output;

pub fn run(
    input_files: &[PathBuf],
    output_format: &str,
    out_dir: Option<&Path>,
) -> Result<(), TallyError> {
    let outcomes = handle_uploads(read_inputs(input_files), None, 0);

    let mut write_failures = 0;
    for outcome in &outcomes {
        let Ok(upload) = &outcome.result else {
            continue;
        };
        info!(file = %outcome.source_name, totals = upload.totals.len(), "extracted");

        if let Some(dir) = out_dir {
            if let Err(e) = write_totals(dir, &outcome.source_name, &upload.totals) {
                eprintln!("  warning: could not write totals for {}: {e}", outcome.source_name);
                write_failures += 1;
            }
        }
    }

    match output_format {
        "json" => output::json::print_totals(&outcomes)?,
        _ => output::table::print_totals(&outcomes),
    }

    batch_status(&outcomes, write_failures)
}

fn write_totals(dir: &Path, source_name: &str, totals: &[ProjectTotal]) -> Result<(), TallyError> {
    std::fs::create_dir_all(dir)?;
    let out_path = dir.join(format!("{}_totals.xlsx", file_stem(source_name)));
    std::fs::write(&out_path, write_totals_xlsx(totals)?)?;
    eprintln!(
        "{} project total(s) from {} written to {}",
        totals.len(),
        source_name,
        out_path.display()
    );
    Ok(())
}
