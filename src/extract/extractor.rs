//! Applies a resolved column mapping to raw rows.
//!
//! Extraction is deliberately forgiving at the cell level (parsers
//! default malformed numbers to zero) and strict at the row level: a row
//! enters the batch only when its identity cells pass the acceptance
//! rules. Every rejected row is reported with a typed reason; a bad row
//! never aborts the batch.

use serde::{Deserialize, Serialize};

use crate::config::{ColumnMap, SheetLayout};
use crate::models::{WageComponents, WageField};

use super::cell::{Cell, Row};
use super::parser::{parse_amount, parse_count, parse_date, parse_resident_no};

/// Minimum characters in an accepted worker name.
const MIN_NAME_CHARS: usize = 2;

/// Minimum characters in an accepted resident-number cell.
const MIN_RESIDENT_CHARS: usize = 6;

/// Tokens that mark subtotal/total aggregate rows, not workers.
const AGGREGATE_MARKERS: [&str; 5] = ["합계", "소계", "총계", "total", "subtotal"];

/// Why a row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The name cell was empty.
    MissingName,
    /// The resident-number cell was empty.
    MissingResidentNo,
    /// The trimmed name was shorter than two characters.
    NameTooShort,
    /// The resident-number cell was shorter than six characters.
    ResidentNoTooShort,
    /// The name carried a subtotal/total marker token.
    AggregateRow,
    /// The total-gross cell held a negative number.
    NegativeTotal,
}

/// One rejected row with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    /// 0-indexed row in the raw sheet.
    pub row_index: usize,
    /// Why the row was rejected.
    pub reason: RejectReason,
}

/// A typed, validated wage record extracted from one row.
///
/// Carries everything the reconciler and the calculators need; date
/// strings are passed through normalized but unvalidated (a collaborator
/// concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// 0-indexed source row.
    pub row_index: usize,
    /// Worker name, trimmed.
    pub name: String,
    /// Normalized 13-digit resident registration number.
    pub resident_no: String,
    /// Join date, where mapped and present.
    #[serde(default)]
    pub join_date: Option<String>,
    /// Leave date, where mapped and present.
    #[serde(default)]
    pub leave_date: Option<String>,
    /// Total gross wage.
    pub total_wage: i64,
    /// Gross-pay component breakdown, where mapped.
    #[serde(default)]
    pub components: WageComponents,
    /// National pension deduction, where mapped.
    #[serde(default)]
    pub pension: Option<i64>,
    /// Health insurance deduction, where mapped.
    #[serde(default)]
    pub health: Option<i64>,
    /// Long-term care deduction, where mapped.
    #[serde(default)]
    pub long_term_care: Option<i64>,
    /// Employment insurance deduction, where mapped.
    #[serde(default)]
    pub employment: Option<i64>,
    /// Income tax, where mapped.
    #[serde(default)]
    pub income_tax: Option<i64>,
    /// Local income tax, where mapped.
    #[serde(default)]
    pub local_tax: Option<i64>,
    /// Net wage, where mapped.
    #[serde(default)]
    pub net_wage: Option<i64>,
    /// Work-day counter, where mapped and present.
    #[serde(default)]
    pub work_days: Option<u32>,
    /// Absence-day counter, where mapped and present.
    #[serde(default)]
    pub deduction_days: Option<u32>,
    /// Absence-hour counter, where mapped and present.
    #[serde(default)]
    pub deduction_hours: Option<u32>,
}

/// The result of extracting one sheet: accepted records in input row
/// order plus per-row rejections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Accepted records, in input row order. No deduplication happens
    /// here; that is the reconciler's job.
    pub records: Vec<CandidateRecord>,
    /// Rejected rows with reasons.
    pub rejections: Vec<RowRejection>,
}

/// The result of dry-running a suggested column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingValidation {
    /// Rows the suggestion would accept.
    pub accepted_rows: usize,
    /// Rows the suggestion would reject.
    pub rejected_rows: usize,
    /// Whether the suggestion accepts at least one row.
    pub usable: bool,
}

fn cell_at<'a>(row: &'a [Cell], column_1indexed: Option<u32>) -> Option<&'a Cell> {
    let col = column_1indexed? as usize;
    row.get(col.checked_sub(1)?)
}

fn amount_at(row: &[Cell], column: Option<u32>) -> Option<i64> {
    cell_at(row, column).map(parse_amount)
}

/// Extracts candidate records from raw rows using a resolved layout.
///
/// Rows before `data_start_row` are skipped, entirely blank rows are
/// skipped silently, and rows with content that fails the acceptance
/// rules are reported as rejections. Output order matches input order.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{ColumnMap, SheetLayout};
/// use payroll_engine::extract::{extract_records, Cell};
///
/// let layout = SheetLayout {
///     sheet_name: "임금대장".to_string(),
///     sheet_keywords: vec![],
///     header_row: 1,
///     data_start_row: 2,
///     columns: ColumnMap {
///         name: Some(1),
///         resident_no: Some(3),
///         join_date: Some(5),
///         total_wage: Some(7),
///         ..ColumnMap::default()
///     },
/// };
/// let rows = vec![
///     vec![Cell::Text("성명".into()), Cell::Empty, Cell::Text("주민번호".into())],
///     vec![
///         Cell::Text("김철수".into()),
///         Cell::Empty,
///         Cell::Text("901010".into()),
///         Cell::Text("1234567".into()),
///         Cell::Text("2025-01-01".into()),
///         Cell::Empty,
///         Cell::Text("2500000".into()),
///     ],
/// ];
///
/// let outcome = extract_records(&layout, &rows);
/// assert_eq!(outcome.records.len(), 1);
/// let record = &outcome.records[0];
/// assert_eq!(record.name, "김철수");
/// assert_eq!(record.resident_no, "9010101234567");
/// assert_eq!(record.join_date.as_deref(), Some("2025-01-01"));
/// assert_eq!(record.total_wage, 2_500_000);
/// ```
pub fn extract_records(layout: &SheetLayout, rows: &[Row]) -> ExtractionOutcome {
    let mut outcome = ExtractionOutcome::default();
    let data_start = (layout.data_start_row.max(1) - 1) as usize;

    for (row_index, row) in rows.iter().enumerate().skip(data_start) {
        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let reject = |reason| RowRejection { row_index, reason };

        let name_cell = cell_at(row, layout.columns.name);
        let resident_cell = cell_at(row, layout.columns.resident_no);

        let name = name_cell.map(|c| c.text()).unwrap_or_default();
        let resident_raw = resident_cell.map(|c| c.text()).unwrap_or_default();

        if name.is_empty() {
            outcome.rejections.push(reject(RejectReason::MissingName));
            continue;
        }
        if resident_raw.is_empty() {
            outcome
                .rejections
                .push(reject(RejectReason::MissingResidentNo));
            continue;
        }
        if name.chars().count() < MIN_NAME_CHARS {
            outcome.rejections.push(reject(RejectReason::NameTooShort));
            continue;
        }
        if resident_raw.chars().count() < MIN_RESIDENT_CHARS {
            outcome
                .rejections
                .push(reject(RejectReason::ResidentNoTooShort));
            continue;
        }
        let name_lower = name.to_lowercase();
        if AGGREGATE_MARKERS.iter().any(|m| name_lower.contains(m)) {
            outcome.rejections.push(reject(RejectReason::AggregateRow));
            continue;
        }

        let total_cell = cell_at(row, layout.columns.total_wage);
        if let Some(Cell::Number(n)) = total_cell {
            if *n < 0.0 {
                outcome.rejections.push(reject(RejectReason::NegativeTotal));
                continue;
            }
        }
        let total_wage = total_cell.map(parse_amount).unwrap_or(0);

        let resident_next = layout
            .columns
            .resident_no
            .and_then(|col| cell_at(row, Some(col + 1)));
        let resident_no =
            parse_resident_no(resident_cell.expect("checked non-empty above"), resident_next);

        let mut components = WageComponents::default();
        for field in WageField::ALL {
            if let Some(value) = amount_at(row, layout.columns.component(field)) {
                components.set(field, value);
            }
        }

        outcome.records.push(CandidateRecord {
            row_index,
            name,
            resident_no,
            join_date: cell_at(row, layout.columns.join_date).and_then(parse_date),
            leave_date: cell_at(row, layout.columns.leave_date).and_then(parse_date),
            total_wage,
            components,
            pension: amount_at(row, layout.columns.pension),
            health: amount_at(row, layout.columns.health),
            long_term_care: amount_at(row, layout.columns.long_term_care),
            employment: amount_at(row, layout.columns.employment),
            income_tax: amount_at(row, layout.columns.income_tax),
            local_tax: amount_at(row, layout.columns.local_tax),
            net_wage: amount_at(row, layout.columns.net_wage),
            work_days: cell_at(row, layout.columns.work_days).and_then(parse_count),
            deduction_days: cell_at(row, layout.columns.deduction_days).and_then(parse_count),
            deduction_hours: cell_at(row, layout.columns.deduction_hours).and_then(parse_count),
        });
    }

    outcome
}

/// Dry-runs an advisor-suggested column mapping through the same
/// acceptance rules as a configured one.
///
/// A suggestion is never trusted on faith: it is only usable when it
/// accepts at least one row, and even then it remains a suggestion for a
/// human to confirm.
pub fn validate_suggestion(
    suggestion: &ColumnMap,
    layout: &SheetLayout,
    rows: &[Row],
) -> MappingValidation {
    let trial = SheetLayout {
        columns: suggestion.clone(),
        ..layout.clone()
    };
    let outcome = extract_records(&trial, rows);
    MappingValidation {
        accepted_rows: outcome.records.len(),
        rejected_rows: outcome.rejections.len(),
        usable: !outcome.records.is_empty(),
    }
}
