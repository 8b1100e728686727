use std::path::{Path, PathBuf};

use chrono::Local;
use tally_core::error::TallyError;
use tally_core::report::build_summary_docx;
use tally_core::summary::config::SummaryConfig;
use tally_core::summary::openai::OpenAiSummarizer;
use tally_core::summary::SummaryReport;
use tally_core::{handle_uploads, summary_file_name};

use super::{batch_status, read_inputs};
use crate::output;

/// Command-line values layered over the config file.
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub top: Option<usize>,
}

impl Overrides {
    fn resolve(self) -> Result<SummaryConfig, TallyError> {
        let mut config = match &self.config {
            Some(path) => SummaryConfig::load(path)?,
            None => SummaryConfig::default(),
        };
        if self.api_key.is_some() {
            config.api_key = self.api_key;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        Ok(config)
    }
}

pub fn run(
    input_files: &[PathBuf],
    overrides: Overrides,
    docx_dir: Option<&Path>,
    output_format: &str,
) -> Result<(), TallyError> {
    let config = overrides.resolve()?;
    let top_n = config.top_n;
    let summarizer = OpenAiSummarizer::new(config)?;

    let outcomes = handle_uploads(read_inputs(input_files), Some(&summarizer), top_n);

    let mut write_failures = 0;
    for outcome in &outcomes {
        let Ok(upload) = &outcome.result else {
            continue;
        };
        if let Some(err) = &upload.summary_error {
            eprintln!("  warning: summary for {} failed: {err}", outcome.source_name);
        }
        if let (Some(dir), Some(report)) = (docx_dir, &upload.summary) {
            if let Err(e) = write_docx(dir, &outcome.source_name, report) {
                eprintln!("  warning: could not write report for {}: {e}", outcome.source_name);
                write_failures += 1;
            }
        }
    }

    match output_format {
        "json" => output::json::print_outcomes(&outcomes)?,
        _ => output::table::print_outcomes(&outcomes),
    }

    batch_status(&outcomes, write_failures)
}

fn write_docx(dir: &Path, source_name: &str, report: &SummaryReport) -> Result<(), TallyError> {
    let now = Local::now().naive_local();
    std::fs::create_dir_all(dir)?;
    let out_path = dir.join(summary_file_name(source_name, now));
    std::fs::write(&out_path, build_summary_docx(report, source_name, now)?)?;
    eprintln!("Summary for {} written to {}", source_name, out_path.display());
    Ok(())
}
