//! Progressive severance income tax.
//!
//! The multi-step chain: service-year deduction, conversion to an
//! annualized-equivalent income, converted-income deduction, progressive
//! national tax, then local tax as a fixed fraction. National and local
//! tax amounts truncate to 10-KRW units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::SeveranceTaxTable;

use super::rounding::{round_half_away, truncate_to_10};

/// Months in the annualization factor of the converted income.
const CONVERSION_MONTHS: i64 = 12;

/// The full severance-tax chain for one payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceTaxResult {
    /// Service-year deduction applied to the gross pay.
    pub service_year_deduction: i64,
    /// Annualized-equivalent income after the service-year deduction.
    pub converted_income: i64,
    /// Deduction applied to the converted income.
    pub converted_deduction: i64,
    /// Taxable base after both deductions.
    pub taxable_income: i64,
    /// National severance income tax.
    pub severance_tax: i64,
    /// Local severance income tax.
    pub local_severance_tax: i64,
}

impl SeveranceTaxResult {
    /// Combined national and local tax.
    pub fn total_tax(&self) -> i64 {
        self.severance_tax + self.local_severance_tax
    }
}

/// Computes the severance-tax chain for a gross payout.
///
/// `whole_years` is tenure rounded up to whole years (minimum one); it
/// keys the service-year deduction and both directions of the
/// annualization.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_severance_tax;
/// use payroll_engine::rates::RateTable;
///
/// let table = RateTable::year_2026();
/// let result = calculate_severance_tax(7_249_874, 3, &table.severance);
/// assert_eq!(result.service_year_deduction, 3_000_000);
/// assert_eq!(result.severance_tax, 53_990);
/// assert_eq!(result.local_severance_tax, 5_390);
/// ```
pub fn calculate_severance_tax(
    severance_pay: i64,
    whole_years: u32,
    table: &SeveranceTaxTable,
) -> SeveranceTaxResult {
    let years = i64::from(whole_years.max(1));

    let service_year_deduction = table.service_year_deduction(whole_years.max(1));
    let after_deduction = (severance_pay - service_year_deduction).max(0);

    let converted_income = round_half_away(
        Decimal::from(after_deduction) * Decimal::from(CONVERSION_MONTHS) / Decimal::from(years),
    );
    let converted_deduction = table.converted_deduction(converted_income);
    let taxable_income = (converted_income - converted_deduction).max(0);

    let converted_tax = table.progressive_tax(taxable_income);
    let severance_tax = truncate_to_10(
        converted_tax * Decimal::from(years) / Decimal::from(CONVERSION_MONTHS),
    );
    let local_severance_tax =
        truncate_to_10(Decimal::from(severance_tax) * table.local_tax_rate);

    SeveranceTaxResult {
        service_year_deduction,
        converted_income,
        converted_deduction,
        taxable_income,
        severance_tax,
        local_severance_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;

    fn table() -> crate::rates::SeveranceTaxTable {
        RateTable::year_2026().severance
    }

    #[test]
    fn test_reference_chain() {
        let result = calculate_severance_tax(7_249_874, 3, &table());
        assert_eq!(result.service_year_deduction, 3_000_000);
        // (7,249,874 − 3,000,000) × 12 ÷ 3
        assert_eq!(result.converted_income, 16_999_496);
        // 8,000,000 + 60% of the excess, truncated
        assert_eq!(result.converted_deduction, 13_399_697);
        assert_eq!(result.taxable_income, 3_599_799);
        // 6% bracket × 3 ÷ 12, truncated to 10 KRW
        assert_eq!(result.severance_tax, 53_990);
        assert_eq!(result.local_severance_tax, 5_390);
        assert_eq!(result.total_tax(), 59_380);
    }

    #[test]
    fn test_pay_fully_absorbed_by_service_deduction() {
        // Ten years of service deduct 15,000,000; a smaller payout owes
        // nothing.
        let result = calculate_severance_tax(12_000_000, 10, &table());
        assert_eq!(result.converted_income, 0);
        assert_eq!(result.taxable_income, 0);
        assert_eq!(result.severance_tax, 0);
        assert_eq!(result.local_severance_tax, 0);
    }

    #[test]
    fn test_converted_deduction_consumes_small_incomes() {
        // Below 8,000,000 the converted deduction equals the income.
        let result = calculate_severance_tax(4_000_000, 2, &table());
        assert_eq!(result.converted_income, 12_000_000);
        assert_eq!(result.converted_deduction, 10_400_000);
        assert_eq!(result.taxable_income, 1_600_000);
        // 1,600,000 × 6% × 2 ÷ 12 = 16,000
        assert_eq!(result.severance_tax, 16_000);
        assert_eq!(result.local_severance_tax, 1_600);
    }

    #[test]
    fn test_tenure_under_a_year_uses_lowest_bracket() {
        let result = calculate_severance_tax(2_000_000, 1, &table());
        assert_eq!(result.service_year_deduction, 1_000_000);
    }

    #[test]
    fn test_high_payout_long_tenure() {
        // 200,000,000 over 20 years.
        let result = calculate_severance_tax(200_000_000, 20, &table());
        assert_eq!(result.service_year_deduction, 40_000_000);
        // 160,000,000 × 12 ÷ 20 = 96,000,000
        assert_eq!(result.converted_income, 96_000_000);
        // 45,200,000 + 55% of 26,000,000 = 59,500,000
        assert_eq!(result.converted_deduction, 59_500_000);
        assert_eq!(result.taxable_income, 36_500_000);
        // 36.5M × 15% − 1.26M = 4,215,000 → × 20 ÷ 12 = 7,025,000
        assert_eq!(result.severance_tax, 7_025_000);
        assert_eq!(result.local_severance_tax, 702_500);
    }
}
