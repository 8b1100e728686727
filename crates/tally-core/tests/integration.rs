//! Integration tests for the extract → export → summarize pipeline.
//!
//! Workbooks are built in memory with rust_xlsxwriter, and summaries come
//! from a MockSummarizer, so these tests need no files or network.

use rust_decimal_macros::dec;
use rust_xlsxwriter::Workbook;
use std::sync::atomic::{AtomicUsize, Ordering};

use tally_core::error::TallyError;
use tally_core::export::{read_totals_xlsx, write_totals_xlsx};
use tally_core::model::ProjectTotal;
use tally_core::summary::{RankedProject, SummaryReport, SummaryRequest, Summarizer};
use tally_core::{extract_totals, handle_upload, handle_uploads, UploadOptions};

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

fn workbook_bytes(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(r as u32, c as u16, *s).unwrap();
                }
                Cell::Number(n) => {
                    sheet.write_number(r as u32, c as u16, *n).unwrap();
                }
                Cell::Empty => {}
            }
        }
    }
    // Later sheets are ignored.
    let other = workbook.add_worksheet();
    other.write_string(0, 0, "Total for Hidden").unwrap();
    other.write_number(0, 6, 1.0).unwrap();
    workbook.save_to_buffer().unwrap()
}

fn total_row<'a>(label: &'a str, amount: Cell<'a>) -> Vec<Cell<'a>> {
    let mut row = vec![Cell::Text(label)];
    row.extend((0..5).map(|_| Cell::Text("x")));
    row.push(amount);
    row
}

fn scenario() -> Vec<u8> {
    workbook_bytes(&[
        vec![Cell::Text("Header"), Cell::Text("...")],
        total_row("Total for Apollo", Cell::Number(500.0)),
        vec![Cell::Text("data"), Cell::Text("...")],
        total_row("Total for Zeus", Cell::Text("n/a")),
    ])
}

struct MockSummarizer {
    result: Result<SummaryReport, String>,
    calls: AtomicUsize,
}

impl MockSummarizer {
    fn ok(report: SummaryReport) -> Self {
        Self {
            result: Ok(report),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Summarizer for MockSummarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<SummaryReport, TallyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(report) => {
                let mut report = report.clone();
                report.top_projects = request.top_projects.clone();
                Ok(report)
            }
            Err(message) => Err(TallyError::Summary(message.clone())),
        }
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------
#[test]
fn end_to_end_scenario() {
    let totals = extract_totals(&scenario()).unwrap();
    assert_eq!(
        totals,
        vec![
            ProjectTotal::new("Apollo", Some(dec!(500))),
            ProjectTotal::new("Zeus", None),
        ]
    );
}

#[test]
fn header_row_is_data() {
    let bytes = workbook_bytes(&[
        total_row("Total for First", Cell::Number(1.0)),
        total_row("total for   Second  ", Cell::Number(-300.0)),
    ]);
    let totals = extract_totals(&bytes).unwrap();
    assert_eq!(totals[0], ProjectTotal::new("First", Some(dec!(1))));
    assert_eq!(totals[1], ProjectTotal::new("Second", Some(dec!(-300))));
}

#[test]
fn short_rows_and_blank_amounts_are_absent() {
    let bytes = workbook_bytes(&[
        vec![Cell::Text("Total for Short"), Cell::Number(5.0)],
        total_row("Total for Blank", Cell::Empty),
        total_row("Total for Text", Cell::Text("1,250.50")),
    ]);
    let totals = extract_totals(&bytes).unwrap();
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[0].total_amount, None);
    assert_eq!(totals[1].total_amount, None);
    assert_eq!(totals[2].total_amount, Some(dec!(1250.50)));
}

#[test]
fn no_labels_is_empty_not_error() {
    let bytes = workbook_bytes(&[vec![Cell::Text("Name"), Cell::Number(3.0)]]);
    assert!(extract_totals(&bytes).unwrap().is_empty());
}

#[test]
fn unreadable_input_is_single_error() {
    let result = extract_totals(b"name,amount\nTotal for Apollo,500\n");
    assert!(matches!(result, Err(TallyError::UnreadableInput(_))));
}

#[test]
fn extraction_is_repeatable() {
    let bytes = scenario();
    assert_eq!(extract_totals(&bytes).unwrap(), extract_totals(&bytes).unwrap());
}

// ---------------------------------------------------------------------------
// Export round trip
// ---------------------------------------------------------------------------
#[test]
fn exported_workbook_round_trips() {
    let totals = extract_totals(&scenario()).unwrap();
    let exported = write_totals_xlsx(&totals).unwrap();
    assert_eq!(read_totals_xlsx(&exported).unwrap(), totals);
}

#[test]
fn empty_name_and_absent_amount_round_trip() {
    let bytes = workbook_bytes(&[
        total_row("Total for Apollo", Cell::Number(500.0)),
        total_row("Total for", Cell::Empty),
        vec![Cell::Text("Total for   ")],
    ]);
    let totals = extract_totals(&bytes).unwrap();
    assert_eq!(
        totals,
        vec![
            ProjectTotal::new("Apollo", Some(dec!(500))),
            ProjectTotal::new("", None),
            ProjectTotal::new("", None),
        ]
    );

    let exported = write_totals_xlsx(&totals).unwrap();
    assert_eq!(read_totals_xlsx(&exported).unwrap(), totals);
}

#[test]
fn text_amount_precision_survives_export() {
    let bytes = workbook_bytes(&[total_row(
        "Total for Precise",
        Cell::Text("12345678901234567.89"),
    )]);
    let totals = extract_totals(&bytes).unwrap();
    assert_eq!(totals[0].total_amount, Some(dec!(12345678901234567.89)));

    let exported = write_totals_xlsx(&totals).unwrap();
    assert_eq!(read_totals_xlsx(&exported).unwrap(), totals);
}

#[test]
fn exported_workbook_written_to_disk() {
    let totals = vec![ProjectTotal::new("Beta", Some(dec!(1250.5)))];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("totals.xlsx");
    std::fs::write(&path, write_totals_xlsx(&totals).unwrap()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(read_totals_xlsx(&bytes).unwrap(), totals);
}

// ---------------------------------------------------------------------------
// Upload handling
// ---------------------------------------------------------------------------
#[test]
fn upload_without_summarizer() {
    let outcome = handle_upload(&scenario(), None, &UploadOptions::default()).unwrap();
    assert_eq!(outcome.totals.len(), 2);
    assert!(outcome.summary.is_none());
    assert!(outcome.summary_error.is_none());
}

#[test]
fn upload_with_summary_gets_ranked_projects() {
    let mock = MockSummarizer::ok(SummaryReport {
        summary: "Apollo is the only funded project.".into(),
        ..Default::default()
    });
    let options = UploadOptions {
        source_name: "budget.xlsx".into(),
        top_n: 5,
    };

    let outcome = handle_upload(&scenario(), Some(&mock), &options).unwrap();
    let summary = outcome.summary.expect("summary should be present");

    assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        summary.top_projects,
        vec![RankedProject {
            name: "Apollo".into(),
            amount: Some(dec!(500)),
        }]
    );
    assert!(outcome.summary_error.is_none());
}

#[test]
fn summary_failure_keeps_totals() {
    let mock = MockSummarizer::failing("service unavailable");
    let outcome = handle_upload(&scenario(), Some(&mock), &UploadOptions::default()).unwrap();

    assert_eq!(outcome.totals.len(), 2);
    assert!(outcome.summary.is_none());
    assert!(outcome
        .summary_error
        .as_deref()
        .unwrap()
        .contains("service unavailable"));
}

#[test]
fn huge_amounts_do_not_break_summary() {
    let bytes = workbook_bytes(&[
        total_row("Total for Big", Cell::Number(5e28)),
        total_row("Total for Big", Cell::Number(5e28)),
    ]);
    let mock = MockSummarizer::ok(SummaryReport::default());

    let outcome = handle_upload(&bytes, Some(&mock), &UploadOptions::default()).unwrap();

    assert_eq!(outcome.totals.len(), 2);
    assert_eq!(outcome.totals[0].total_amount, Some(dec!(50000000000000000000000000000)));
    assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.summary.unwrap().top_projects.len(), 2);
}

#[test]
fn batch_continues_past_bad_files() {
    let uploads = vec![
        ("good.xlsx".to_string(), Ok(scenario())),
        ("bad.xlsx".to_string(), Ok(b"not a workbook".to_vec())),
        (
            "missing.xlsx".to_string(),
            Err(TallyError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            ))),
        ),
        ("also_good.xlsx".to_string(), Ok(scenario())),
    ];
    let mock = MockSummarizer::ok(SummaryReport::default());

    let outcomes = handle_uploads(uploads, Some(&mock), 3);

    let names: Vec<_> = outcomes.iter().map(|o| o.source_name.as_str()).collect();
    assert_eq!(names, vec!["good.xlsx", "bad.xlsx", "missing.xlsx", "also_good.xlsx"]);
    assert_eq!(outcomes[0].result.as_ref().unwrap().totals.len(), 2);
    assert!(matches!(outcomes[1].result, Err(TallyError::UnreadableInput(_))));
    assert!(matches!(outcomes[2].result, Err(TallyError::Io(_))));
    assert_eq!(outcomes[3].result.as_ref().unwrap().totals.len(), 2);
    assert_eq!(mock.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn unreadable_upload_skips_summarizer() {
    let mock = MockSummarizer::failing("should not be called");
    let result = handle_upload(b"not a workbook", Some(&mock), &UploadOptions::default());

    assert!(matches!(result, Err(TallyError::UnreadableInput(_))));
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}
