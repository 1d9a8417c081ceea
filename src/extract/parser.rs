//! Field parsers for raw spreadsheet cells.
//!
//! Real-world exports mix typed numbers with formatted strings, split
//! resident numbers across column pairs, and store dates as spreadsheet
//! serials, `YYYYMMDD` runs or dotted two-digit years. The parsers here
//! normalize all of that; semantic validation of the result is the
//! caller's concern.

use chrono::{Days, NaiveDate};

use super::cell::Cell;

/// Length of a complete resident registration number.
const RESIDENT_NO_DIGITS: usize = 13;

/// Parses a monetary amount from a cell.
///
/// Typed numbers round half-away-from-zero to the whole currency unit;
/// text is stripped to its digits and parsed, defaulting to zero on
/// failure or emptiness.
///
/// # Example
///
/// ```
/// use payroll_engine::extract::{parse_amount, Cell};
///
/// assert_eq!(parse_amount(&Cell::Number(2_500_000.4)), 2_500_000);
/// assert_eq!(parse_amount(&Cell::Text("2,500,000원".to_string())), 2_500_000);
/// assert_eq!(parse_amount(&Cell::Empty), 0);
/// ```
pub fn parse_amount(cell: &Cell) -> i64 {
    match cell {
        Cell::Number(n) => n.round() as i64,
        Cell::Text(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        }
        Cell::Empty => 0,
    }
}

/// Parses an attendance counter (work days, deduction hours) from a cell.
///
/// Empty cells stay unreported rather than becoming zero.
pub fn parse_count(cell: &Cell) -> Option<u32> {
    if cell.is_blank() {
        return None;
    }
    match cell {
        Cell::Number(n) if *n >= 0.0 => Some(n.round() as u32),
        Cell::Number(_) => None,
        Cell::Text(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        Cell::Empty => None,
    }
}

/// Converts a spreadsheet date serial to a calendar date.
///
/// Serial 1 is 1899-12-31 under the 1900 date system as exporters
/// actually emit it (epoch 1899-12-30).
fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    if serial <= 0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial as u64))
}

/// Parses a date cell to a `YYYY-MM-DD` string.
///
/// Numeric serials go through the spreadsheet epoch. Text in `YYYYMMDD`
/// or `YY.MM.DD` form is normalized; anything else textual is passed
/// through as-is for the caller to validate. Empty cells yield `None`.
///
/// # Example
///
/// ```
/// use payroll_engine::extract::{parse_date, Cell};
///
/// assert_eq!(
///     parse_date(&Cell::Number(45658.0)).as_deref(),
///     Some("2025-01-01")
/// );
/// assert_eq!(
///     parse_date(&Cell::Text("20250101".to_string())).as_deref(),
///     Some("2025-01-01")
/// );
/// assert_eq!(
///     parse_date(&Cell::Text("23.1.15".to_string())).as_deref(),
///     Some("2023-01-15")
/// );
/// assert_eq!(parse_date(&Cell::Empty), None);
/// ```
pub fn parse_date(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => {
            serial_to_date(n.round() as i64).map(|d| d.format("%Y-%m-%d").to_string())
        }
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }

            // Already normalized.
            if s.len() == 10
                && s.as_bytes()[4] == b'-'
                && s.as_bytes()[7] == b'-'
                && s.chars().enumerate().all(|(i, c)| {
                    if i == 4 || i == 7 {
                        c == '-'
                    } else {
                        c.is_ascii_digit()
                    }
                })
            {
                return Some(s.to_string());
            }

            // Bare digit run: YYYYMMDD.
            if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
                return Some(format!("{}-{}-{}", &s[..4], &s[4..6], &s[6..8]));
            }

            // Dotted two-digit year: YY.M.D / YY.MM.DD.
            let parts: Vec<&str> = s.split('.').collect();
            if parts.len() == 3
                && parts[0].len() == 2
                && parts
                    .iter()
                    .all(|p| !p.is_empty() && p.len() <= 2 && p.chars().all(|c| c.is_ascii_digit()))
            {
                let yy: u32 = parts[0].parse().ok()?;
                let century = if yy < 50 { 2000 } else { 1900 };
                return Some(format!(
                    "{}-{:0>2}-{:0>2}",
                    century + yy,
                    parts[1],
                    parts[2]
                ));
            }

            // Pass anything else through as-is.
            Some(s.to_string())
        }
    }
}

/// Normalizes a resident registration number cell.
///
/// Non-digits are stripped. A front half shorter than 13 digits is joined
/// with the digits of the following column when the pair completes a full
/// number (exports often split the number into front/back columns), and a
/// still-short digit run is left-padded with the zeros the export
/// dropped.
///
/// # Example
///
/// ```
/// use payroll_engine::extract::{parse_resident_no, Cell};
///
/// let front = Cell::Text("901010".to_string());
/// let back = Cell::Text("1234567".to_string());
/// assert_eq!(parse_resident_no(&front, Some(&back)), "9010101234567");
///
/// let whole = Cell::Text("901010-1234567".to_string());
/// assert_eq!(parse_resident_no(&whole, None), "9010101234567");
/// ```
pub fn parse_resident_no(cell: &Cell, next: Option<&Cell>) -> String {
    let mut digits: String = cell.text().chars().filter(|c| c.is_ascii_digit()).collect();

    if !digits.is_empty() && digits.len() < RESIDENT_NO_DIGITS {
        if let Some(next) = next {
            let tail: String = next.text().chars().filter(|c| c.is_ascii_digit()).collect();
            if !tail.is_empty() && digits.len() + tail.len() == RESIDENT_NO_DIGITS {
                digits.push_str(&tail);
            }
        }
    }

    if !digits.is_empty() {
        while digits.len() < RESIDENT_NO_DIGITS {
            digits.insert(0, '0');
        }
    }

    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rounds_typed_numbers() {
        assert_eq!(parse_amount(&Cell::Number(2_500_000.5)), 2_500_001);
        assert_eq!(parse_amount(&Cell::Number(2_500_000.4)), 2_500_000);
        assert_eq!(parse_amount(&Cell::Number(-0.6)), -1);
    }

    #[test]
    fn test_amount_strips_formatting_from_text() {
        assert_eq!(parse_amount(&Cell::Text("2,500,000".to_string())), 2_500_000);
        assert_eq!(parse_amount(&Cell::Text("₩ 1 234 567".to_string())), 1_234_567);
        assert_eq!(parse_amount(&Cell::Text("해당없음".to_string())), 0);
        assert_eq!(parse_amount(&Cell::Empty), 0);
    }

    #[test]
    fn test_count_distinguishes_empty_from_zero() {
        assert_eq!(parse_count(&Cell::Empty), None);
        assert_eq!(parse_count(&Cell::Text("".to_string())), None);
        assert_eq!(parse_count(&Cell::Number(0.0)), Some(0));
        assert_eq!(parse_count(&Cell::Text("22일".to_string())), Some(22));
    }

    #[test]
    fn test_date_serial_epoch() {
        // 2025-01-01 is serial 45658 under the 1900 date system.
        assert_eq!(parse_date(&Cell::Number(45658.0)).as_deref(), Some("2025-01-01"));
        // Serial 1 is 1899-12-31.
        assert_eq!(parse_date(&Cell::Number(1.0)).as_deref(), Some("1899-12-31"));
        assert_eq!(parse_date(&Cell::Number(0.0)), None);
    }

    #[test]
    fn test_date_text_normalization() {
        assert_eq!(
            parse_date(&Cell::Text("2025-01-01".to_string())).as_deref(),
            Some("2025-01-01")
        );
        assert_eq!(
            parse_date(&Cell::Text("20230115".to_string())).as_deref(),
            Some("2023-01-15")
        );
        assert_eq!(
            parse_date(&Cell::Text("99.12.31".to_string())).as_deref(),
            Some("1999-12-31")
        );
        // Unrecognized forms pass through untouched.
        assert_eq!(
            parse_date(&Cell::Text("입사예정".to_string())).as_deref(),
            Some("입사예정")
        );
    }

    #[test]
    fn test_resident_no_joins_split_columns() {
        let front = Cell::Text("901010".to_string());
        let back = Cell::Number(1_234_567.0);
        assert_eq!(parse_resident_no(&front, Some(&back)), "9010101234567");
    }

    #[test]
    fn test_resident_no_ignores_next_when_already_complete() {
        let whole = Cell::Text("9010101234567".to_string());
        let noise = Cell::Text("2025-01-01".to_string());
        assert_eq!(parse_resident_no(&whole, Some(&noise)), "9010101234567");
    }

    #[test]
    fn test_resident_no_skips_join_that_would_not_complete() {
        // 6 + 8 digits cannot form a 13-digit number; pad instead.
        let front = Cell::Text("901010".to_string());
        let date = Cell::Text("20250101".to_string());
        assert_eq!(parse_resident_no(&front, Some(&date)), "0000000901010");
    }

    #[test]
    fn test_resident_no_restores_dropped_leading_zero() {
        // A numeric cell drops the leading zero of an 010101-... number.
        let cell = Cell::Number(101011234567.0);
        assert_eq!(parse_resident_no(&cell, None), "0101011234567");
    }

    #[test]
    fn test_resident_no_empty_stays_empty() {
        assert_eq!(parse_resident_no(&Cell::Empty, None), "");
        assert_eq!(parse_resident_no(&Cell::Text("-".to_string()), None), "");
    }
}
