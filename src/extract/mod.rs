//! Record extraction from raw spreadsheet rows.
//!
//! This module owns everything between "ordered rows of ordered cells"
//! and typed [`CandidateRecord`]s: the cell model and sheet-source
//! contract, the forgiving field parsers, and the row acceptance rules.

mod cell;
mod extractor;
mod parser;

pub use cell::{Cell, Row, Sheet, SheetSource, Workbook, select_sheet};
pub use extractor::{
    CandidateRecord, ExtractionOutcome, MappingValidation, RejectReason, RowRejection,
    extract_records, validate_suggestion,
};
pub use parser::{parse_amount, parse_count, parse_date, parse_resident_no};
