//! Raw spreadsheet cell and sheet-source contract.
//!
//! The engine has no dependency on a specific file format: a spreadsheet
//! is just ordered rows of ordered cells, each numeric, textual or empty.
//! File parsing lives in a collaborator; tests and the HTTP surface use
//! the in-memory [`Workbook`].

use serde::{Deserialize, Serialize};

use crate::config::SheetLayout;

/// One raw spreadsheet cell.
///
/// Deserializes from JSON numbers, strings and `null`, in that order —
/// real exports mix typed numbers with formatted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A typed numeric value.
    Number(f64),
    /// A textual value (possibly a formatted number or date).
    Text(String),
    /// An empty cell.
    Empty,
}

impl Cell {
    /// True for empty cells and blank text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// The trimmed textual content of the cell.
    ///
    /// Numbers render without a trailing `.0` so that integer-valued
    /// numeric cells read back the way the sheet displayed them.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

/// One row of cells.
pub type Row = Vec<Cell>;

/// A named sheet with its raw rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name.
    pub name: String,
    /// Raw rows, 0-indexed.
    pub rows: Vec<Row>,
}

/// The spreadsheet-source collaborator contract: ordered rows of ordered
/// cells per named sheet.
pub trait SheetSource {
    /// Names of the sheets in workbook order.
    fn sheet_names(&self) -> Vec<String>;
    /// The rows of one sheet, if it exists.
    fn rows(&self, sheet_name: &str) -> Option<&[Row]>;
}

/// An in-memory workbook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in workbook order.
    pub sheets: Vec<Sheet>,
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn rows(&self, sheet_name: &str) -> Option<&[Row]> {
        self.sheets
            .iter()
            .find(|s| s.name == sheet_name)
            .map(|s| s.rows.as_slice())
    }
}

/// Selects the sheet to import from.
///
/// Preference order: the configured sheet name exactly, then the first
/// sheet whose name contains a configured keyword, then the first sheet.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{ColumnMap, SheetLayout};
/// use payroll_engine::extract::{select_sheet, Sheet, Workbook};
///
/// let workbook = Workbook {
///     sheets: vec![
///         Sheet { name: "요약".to_string(), rows: vec![] },
///         Sheet { name: "1월 임금대장".to_string(), rows: vec![] },
///     ],
/// };
/// let layout = SheetLayout {
///     sheet_name: "임금대장".to_string(),
///     sheet_keywords: vec!["임금대장".to_string()],
///     header_row: 4,
///     data_start_row: 6,
///     columns: ColumnMap::default(),
/// };
/// assert_eq!(select_sheet(&workbook, &layout).as_deref(), Some("1월 임금대장"));
/// ```
pub fn select_sheet(source: &impl SheetSource, layout: &SheetLayout) -> Option<String> {
    let names = source.sheet_names();

    if names.iter().any(|n| *n == layout.sheet_name) {
        return Some(layout.sheet_name.clone());
    }

    for keyword in &layout.sheet_keywords {
        if let Some(name) = names.iter().find(|n| n.contains(keyword)) {
            return Some(name.clone());
        }
    }

    names.first().cloned()
}
