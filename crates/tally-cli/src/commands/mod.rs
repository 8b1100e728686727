pub mod extract;
pub mod inspect;
pub mod summarize;

use std::path::{Path, PathBuf};

use tally_core::error::TallyError;
use tally_core::FileOutcome;

/// File name used for display and for naming outputs.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lazily read each input, pairing its display name with the bytes or the
/// read error.
pub fn read_inputs(
    input_files: &[PathBuf],
) -> impl Iterator<Item = (String, Result<Vec<u8>, TallyError>)> + '_ {
    input_files
        .iter()
        .map(|path| (display_name(path), std::fs::read(path).map_err(TallyError::from)))
}

/// Output stem for a source file name ("q3.xlsx" -> "q3").
pub fn file_stem(source_name: &str) -> String {
    Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "totals".into())
}

/// Fail the command if any file failed, after everything has been printed.
pub fn batch_status(outcomes: &[FileOutcome], write_failures: usize) -> Result<(), TallyError> {
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count() + write_failures;
    if failed == 0 {
        Ok(())
    } else {
        Err(TallyError::BatchFailed {
            failed,
            total: outcomes.len(),
        })
    }
}
