use tally_core::error::TallyError;
use tally_core::export::{AMOUNT_HEADER, NAME_HEADER};
use tally_core::model::{ProjectTotal, SheetOverview};
use tally_core::summary::SummaryReport;
use tally_core::FileOutcome;

pub fn print_totals(outcomes: &[FileOutcome]) {
    let multi_file = outcomes.len() > 1;

    for (i, outcome) in outcomes.iter().enumerate() {
        if multi_file {
            if i > 0 {
                println!();
            }
            println!("--- File: {} ---\n", outcome.source_name);
        }
        match &outcome.result {
            Ok(upload) => print!("{}", format_totals(&upload.totals)),
            Err(e) => println!("  Failed: {e}"),
        }
    }
}

pub fn print_outcomes(outcomes: &[FileOutcome]) {
    for (i, outcome) in outcomes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===\n", outcome.source_name);

        let upload = match &outcome.result {
            Ok(upload) => upload,
            Err(e) => {
                println!("  Failed: {e}");
                continue;
            }
        };
        print!("{}", format_totals(&upload.totals));
        println!();

        match (&upload.summary, &upload.summary_error) {
            (Some(report), _) => print_report(report),
            (None, Some(err)) => println!("  Summary unavailable: {err}"),
            (None, None) => {}
        }
    }
}

pub fn print_sheets(results: &[(String, Result<Vec<SheetOverview>, TallyError>)]) {
    for (i, (file, result)) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {file} ===\n");
        match result {
            Ok(sheets) => {
                println!("  Found {} sheet(s)", sheets.len());
                for sheet in sheets {
                    println!(
                        "  {}: {} rows x {} columns",
                        sheet.name, sheet.rows, sheet.columns
                    );
                }
            }
            Err(e) => println!("  Failed: {e}"),
        }
    }
}

fn print_report(report: &SummaryReport) {
    println!("  Summary:");
    for line in report.summary.lines() {
        println!("    {line}");
    }
    if !report.top_projects.is_empty() {
        println!("\n  Top projects:");
        for p in &report.top_projects {
            match p.amount {
                Some(amount) => println!("    {}: {}", p.name, amount),
                None => println!("    {}", p.name),
            }
        }
    }
    if !report.notes.is_empty() {
        println!("\n  Notes:");
        for note in &report.notes {
            println!("    - {note}");
        }
    }
}

/// Two-column text table of totals; absent amounts print as "-".
pub fn format_totals(totals: &[ProjectTotal]) -> String {
    if totals.is_empty() {
        return "  No \"Total for\" rows found.\n".to_string();
    }

    let amounts: Vec<String> = totals
        .iter()
        .map(|t| {
            t.total_amount
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".into())
        })
        .collect();

    let name_width = totals
        .iter()
        .map(|t| t.project_name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(NAME_HEADER.len());
    let amount_width = amounts
        .iter()
        .map(String::len)
        .chain(std::iter::once(AMOUNT_HEADER.len()))
        .max()
        .unwrap_or(AMOUNT_HEADER.len());

    let mut out = format!(
        "  {:<name_width$}  {:>amount_width$}\n",
        NAME_HEADER, AMOUNT_HEADER
    );
    for (total, amount) in totals.iter().zip(&amounts) {
        out.push_str(&format!(
            "  {:<name_width$}  {:>amount_width$}\n",
            total.project_name, amount
        ));
    }
    out
}
