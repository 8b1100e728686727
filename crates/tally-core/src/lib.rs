pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod report;
pub mod summary;

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::warn;

use error::TallyError;
use model::ProjectTotal;
use summary::{SummaryReport, SummaryRequest, Summarizer};

/// Options for `handle_upload()`.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Name shown to the summarizer and in reports (usually the file name).
    pub source_name: String,
    /// How many of the largest projects to pass to the summarizer.
    pub top_n: usize,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            source_name: "upload".into(),
            top_n: 10,
        }
    }
}

/// Result of handling one uploaded spreadsheet.
///
/// `totals` is always present. A failed summary leaves `summary` empty and
/// records the failure in `summary_error` without touching `totals`.
#[derive(Debug, Clone, Default)]
pub struct UploadOutcome {
    pub totals: Vec<ProjectTotal>,
    pub summary: Option<SummaryReport>,
    pub summary_error: Option<String>,
}

/// Extract project totals from the first sheet of a workbook.
///
/// The only failure is an unreadable workbook; an empty list means no row
/// carried a "Total for" label.
pub fn extract_totals(bytes: &[u8]) -> Result<Vec<ProjectTotal>, TallyError> {
    let rows = extraction::read_first_sheet(bytes)?;
    Ok(extraction::extract(&rows))
}

/// Main API entry point: extract totals and optionally summarize them.
pub fn handle_upload(
    bytes: &[u8],
    summarizer: Option<&dyn Summarizer>,
    options: &UploadOptions,
) -> Result<UploadOutcome, TallyError> {
    let totals = extract_totals(bytes)?;

    let Some(summarizer) = summarizer else {
        return Ok(UploadOutcome {
            totals,
            ..Default::default()
        });
    };

    let request = SummaryRequest::from_totals(&options.source_name, &totals, options.top_n);
    let (summary, summary_error) = match summarizer.summarize(&request) {
        Ok(report) => (Some(report), None),
        Err(e) => {
            warn!(
                backend = summarizer.backend_name(),
                source = %options.source_name,
                error = %e,
                "summary failed"
            );
            (None, Some(e.to_string()))
        }
    };

    Ok(UploadOutcome {
        totals,
        summary,
        summary_error,
    })
}

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub source_name: String,
    pub result: Result<UploadOutcome, TallyError>,
}

/// Handle several uploads independently.
///
/// Each item is a source name plus that file's bytes, or the error hit while
/// reading it. A failure is recorded against its own file and the rest of the
/// batch still runs. Outcomes come back in input order.
pub fn handle_uploads<I>(
    uploads: I,
    summarizer: Option<&dyn Summarizer>,
    top_n: usize,
) -> Vec<FileOutcome>
where
    I: IntoIterator<Item = (String, Result<Vec<u8>, TallyError>)>,
{
    uploads
        .into_iter()
        .map(|(source_name, bytes)| {
            let options = UploadOptions {
                source_name: source_name.clone(),
                top_n,
            };
            let result = bytes.and_then(|b| handle_upload(&b, summarizer, &options));
            if let Err(e) = &result {
                warn!(source = %source_name, error = %e, "upload failed");
            }
            FileOutcome {
                source_name,
                result,
            }
        })
        .collect()
}

/// Download name for a summary document: `<stem>_summary_<YYYYmmdd_HHMMSS>.docx`.
pub fn summary_file_name(source: &str, generated_at: NaiveDateTime) -> String {
    let stem = Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "spreadsheet".into());
    format!(
        "{stem}_summary_{}.docx",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}
