//! Year-versioned statutory rate tables.
//!
//! A [`RateTable`] bundles every statutory constant the calculators need
//! for one calendar year: the four-scheme insurance rates, the
//! minimum-wage-derived default monthly baseline, and the severance tax
//! tables. Tables for 2025 and 2026 are bundled; further years load from
//! YAML files next to the business configs. Lookup by year never falls
//! back to a stale table — an unsupported year is a hard
//! [`RateTableMissing`](crate::error::EngineError::RateTableMissing) error.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Employee-side contribution rates for the four mandatory schemes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRates {
    /// National pension employee rate, applied to the clamped base.
    pub pension: Decimal,
    /// Lower clamp on the monthly pension base.
    pub pension_base_floor: i64,
    /// Upper clamp on the monthly pension base.
    pub pension_base_ceiling: i64,
    /// Health insurance employee rate.
    pub health: Decimal,
    /// Long-term care rate, as a fraction of the health premium.
    pub long_term_care_of_health: Decimal,
    /// Employment insurance employee rate.
    pub employment: Decimal,
}

/// One step of the service-year deduction table.
///
/// For a tenure of `y` whole years falling in this bracket, the deduction
/// is `base + (y - base_years) * per_year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceYearBracket {
    /// Upper bound on whole years of tenure, inclusive; `None` for the
    /// open-ended last bracket.
    pub max_years: Option<u32>,
    /// Deduction accumulated by the brackets below this one.
    pub base: i64,
    /// Years accounted for by the brackets below this one.
    pub base_years: u32,
    /// Deduction per year within this bracket.
    pub per_year: i64,
}

/// One bracket of the converted-income deduction table.
///
/// For a converted income `ci` falling in this bracket, the deduction is
/// `base + (ci - floor) * rate`, truncated to whole KRW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedDeductionBracket {
    /// Upper bound on converted income, inclusive; `None` for the last.
    pub ceiling: Option<i64>,
    /// Deduction accumulated below this bracket.
    pub base: i64,
    /// Lower edge of this bracket.
    pub floor: i64,
    /// Marginal deduction rate within this bracket.
    pub rate: Decimal,
}

/// One bracket of the progressive income tax table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound on the taxable base, inclusive; `None` for the last.
    pub ceiling: Option<i64>,
    /// Marginal rate for this bracket.
    pub rate: Decimal,
    /// Progressive deduction subtracted from `base * rate`.
    pub progressive_deduction: i64,
}

/// The severance-tax tables for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveranceTaxTable {
    /// Service-year deduction steps, keyed by whole years of tenure.
    pub service_year_brackets: Vec<ServiceYearBracket>,
    /// Converted-income deduction brackets.
    pub converted_deduction_brackets: Vec<ConvertedDeductionBracket>,
    /// Progressive national tax brackets (also used for monthly
    /// withholding).
    pub tax_brackets: Vec<TaxBracket>,
    /// Local tax as a fraction of the national tax.
    pub local_tax_rate: Decimal,
}

impl SeveranceTaxTable {
    /// Deduction for a tenure of `years` whole years (already rounded up
    /// from fractional tenure; tenure under one year uses one year).
    pub fn service_year_deduction(&self, years: u32) -> i64 {
        let bracket = self
            .service_year_brackets
            .iter()
            .find(|b| b.max_years.is_none_or(|max| years <= max))
            .or_else(|| self.service_year_brackets.last());
        match bracket {
            Some(b) => b.base + i64::from(years.saturating_sub(b.base_years)) * b.per_year,
            None => 0,
        }
    }

    /// Deduction applied to a converted income, truncated to whole KRW.
    pub fn converted_deduction(&self, converted_income: i64) -> i64 {
        let bracket = self
            .converted_deduction_brackets
            .iter()
            .find(|b| b.ceiling.is_none_or(|c| converted_income <= c))
            .or_else(|| self.converted_deduction_brackets.last());
        match bracket {
            Some(b) => {
                let marginal = Decimal::from(converted_income - b.floor) * b.rate;
                b.base + marginal.trunc().to_i64().unwrap_or(0)
            }
            None => 0,
        }
    }

    /// Progressive tax on a taxable base, clamped at zero.
    ///
    /// Returned as a `Decimal` so callers can keep the fraction through
    /// further scaling before their own rounding step.
    pub fn progressive_tax(&self, taxable: i64) -> Decimal {
        let bracket = self
            .tax_brackets
            .iter()
            .find(|b| b.ceiling.is_none_or(|c| taxable <= c))
            .or_else(|| self.tax_brackets.last());
        match bracket {
            Some(b) => {
                let tax = Decimal::from(taxable) * b.rate - Decimal::from(b.progressive_deduction);
                tax.max(Decimal::ZERO)
            }
            None => Decimal::ZERO,
        }
    }
}

/// Statutory constants for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// The calendar year these constants apply to.
    pub year: i32,
    /// Four-scheme employee contribution rates.
    pub insurance: InsuranceRates,
    /// Minimum-wage-derived default monthly baseline wage.
    pub default_monthly_wage: i64,
    /// Severance tax tables.
    pub severance: SeveranceTaxTable,
}

/// The common severance tax tables (statutory brackets current as of the
/// bundled years).
fn bundled_severance_table() -> SeveranceTaxTable {
    SeveranceTaxTable {
        service_year_brackets: vec![
            ServiceYearBracket {
                max_years: Some(5),
                base: 0,
                base_years: 0,
                per_year: 1_000_000,
            },
            ServiceYearBracket {
                max_years: Some(10),
                base: 5_000_000,
                base_years: 5,
                per_year: 2_000_000,
            },
            ServiceYearBracket {
                max_years: Some(20),
                base: 15_000_000,
                base_years: 10,
                per_year: 2_500_000,
            },
            ServiceYearBracket {
                max_years: None,
                base: 40_000_000,
                base_years: 20,
                per_year: 3_000_000,
            },
        ],
        converted_deduction_brackets: vec![
            ConvertedDeductionBracket {
                ceiling: Some(8_000_000),
                base: 0,
                floor: 0,
                rate: Decimal::ONE,
            },
            ConvertedDeductionBracket {
                ceiling: Some(70_000_000),
                base: 8_000_000,
                floor: 8_000_000,
                rate: Decimal::new(60, 2),
            },
            ConvertedDeductionBracket {
                ceiling: Some(100_000_000),
                base: 45_200_000,
                floor: 70_000_000,
                rate: Decimal::new(55, 2),
            },
            ConvertedDeductionBracket {
                ceiling: Some(300_000_000),
                base: 61_700_000,
                floor: 100_000_000,
                rate: Decimal::new(45, 2),
            },
            ConvertedDeductionBracket {
                ceiling: None,
                base: 151_700_000,
                floor: 300_000_000,
                rate: Decimal::new(35, 2),
            },
        ],
        tax_brackets: vec![
            TaxBracket {
                ceiling: Some(14_000_000),
                rate: Decimal::new(6, 2),
                progressive_deduction: 0,
            },
            TaxBracket {
                ceiling: Some(50_000_000),
                rate: Decimal::new(15, 2),
                progressive_deduction: 1_260_000,
            },
            TaxBracket {
                ceiling: Some(88_000_000),
                rate: Decimal::new(24, 2),
                progressive_deduction: 5_760_000,
            },
            TaxBracket {
                ceiling: Some(150_000_000),
                rate: Decimal::new(35, 2),
                progressive_deduction: 15_440_000,
            },
            TaxBracket {
                ceiling: Some(300_000_000),
                rate: Decimal::new(38, 2),
                progressive_deduction: 19_940_000,
            },
            TaxBracket {
                ceiling: Some(500_000_000),
                rate: Decimal::new(40, 2),
                progressive_deduction: 25_940_000,
            },
            TaxBracket {
                ceiling: Some(1_000_000_000),
                rate: Decimal::new(42, 2),
                progressive_deduction: 35_940_000,
            },
            TaxBracket {
                ceiling: None,
                rate: Decimal::new(45, 2),
                progressive_deduction: 65_940_000,
            },
        ],
        local_tax_rate: Decimal::new(10, 2),
    }
}

impl RateTable {
    /// The bundled 2025 table.
    pub fn year_2025() -> Self {
        Self {
            year: 2025,
            insurance: InsuranceRates {
                pension: Decimal::new(45, 3),
                pension_base_floor: 390_000,
                pension_base_ceiling: 6_170_000,
                health: Decimal::new(3545, 5),
                long_term_care_of_health: Decimal::new(1295, 4),
                employment: Decimal::new(9, 3),
            },
            default_monthly_wage: 2_060_740,
            severance: bundled_severance_table(),
        }
    }

    /// The bundled 2026 table.
    pub fn year_2026() -> Self {
        Self {
            year: 2026,
            insurance: InsuranceRates {
                pension: Decimal::new(475, 4),
                pension_base_floor: 390_000,
                pension_base_ceiling: 6_170_000,
                health: Decimal::new(3595, 5),
                long_term_care_of_health: Decimal::new(1314, 4),
                employment: Decimal::new(9, 3),
            },
            default_monthly_wage: 2_096_270,
            severance: bundled_severance_table(),
        }
    }
}

/// A set of rate tables keyed by calendar year.
#[derive(Debug, Clone, Default)]
pub struct RateTableSet {
    tables: BTreeMap<i32, RateTable>,
}

impl RateTableSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The set of bundled tables (2025 and 2026).
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::rates::RateTableSet;
    ///
    /// let rates = RateTableSet::bundled();
    /// assert!(rates.get(2026).is_ok());
    /// assert!(rates.get(1999).is_err());
    /// ```
    pub fn bundled() -> Self {
        let mut set = Self::new();
        set.insert(RateTable::year_2025());
        set.insert(RateTable::year_2026());
        set
    }

    /// Adds or replaces the table for its year.
    pub fn insert(&mut self, table: RateTable) {
        self.tables.insert(table.year, table);
    }

    /// Looks up the table for a calendar year.
    ///
    /// Fails with [`EngineError::RateTableMissing`] for unsupported years
    /// rather than silently using a stale table.
    pub fn get(&self, year: i32) -> EngineResult<&RateTable> {
        self.tables
            .get(&year)
            .ok_or(EngineError::RateTableMissing { year })
    }

    /// Years with a table, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.tables.keys().copied()
    }
}
