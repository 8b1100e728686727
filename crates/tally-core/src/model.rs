use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single spreadsheet cell, reduced to the cases extraction cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
    /// Booleans, dates, durations and error cells, kept in display form.
    Other(String),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Number(f)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Blank => Ok(()),
            Cell::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One physical row of the source sheet. Index 0 is sheet column A.
pub type Row = Vec<Cell>;

/// A "Total for <project>" row and the amount found beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTotal {
    pub project_name: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
}

impl ProjectTotal {
    pub fn new(project_name: impl Into<String>, total_amount: Option<Decimal>) -> Self {
        Self {
            project_name: project_name.into(),
            total_amount,
        }
    }
}

/// Shape of one sheet in an uploaded workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetOverview {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}
