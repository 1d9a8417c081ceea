//! Property tests for the reconciliation and calculation invariants.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;

use payroll_engine::calculation::{calculate_deductions, calculate_severance_pay};
use payroll_engine::config::WageClassification;
use payroll_engine::extract::CandidateRecord;
use payroll_engine::models::{
    Employment, EmploymentStatus, MonthlyWage, Period, SchemeEnrollment, WageComponents, Worker,
};
use payroll_engine::rates::RateTableSet;
use payroll_engine::reconcile::{
    LedgerSnapshot, LedgerStore, MAX_BATCH_SIZE, MemoryLedger, chunk_writes, reconcile,
};

fn worker(i: usize) -> Worker {
    Worker {
        id: format!("w{i}"),
        name: format!("근로자{i}"),
        resident_no: format!("90010112345{i:02}"),
        nationality: None,
        phone: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn employment(i: usize) -> Employment {
    Employment {
        id: format!("e{i}"),
        worker_id: format!("w{i}"),
        business_id: "biz-a".to_string(),
        status: EmploymentStatus::Active,
        join_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        leave_date: None,
        leave_reason: None,
        monthly_wage: 2_000_000,
        job_code: "532".to_string(),
        weekly_hours: 40,
        enrollment: SchemeEnrollment::all(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn record(i: usize, total: i64) -> CandidateRecord {
    CandidateRecord {
        row_index: i,
        name: format!("근로자{i}"),
        resident_no: format!("90010112345{i:02}"),
        join_date: None,
        leave_date: None,
        total_wage: total,
        components: WageComponents::default(),
        pension: None,
        health: None,
        long_term_care: None,
        employment: None,
        income_tax: None,
        local_tax: None,
        net_wage: None,
        work_days: None,
        deduction_days: None,
        deduction_hours: None,
    }
}

fn entry_for(period: Period, total: i64) -> MonthlyWage {
    MonthlyWage {
        id: MonthlyWage::entry_id("preview", period),
        employment_id: "preview".to_string(),
        period,
        components: WageComponents::default(),
        total_wage: total,
        pension: None,
        health: None,
        long_term_care: None,
        employment: None,
        income_tax: None,
        local_tax: None,
        net_wage: None,
        work_days: None,
        deduction_days: None,
        deduction_hours: None,
        created_at: Utc::now(),
    }
}

proptest! {
    /// Merging a reconciliation outcome and re-reconciling the same batch
    /// yields zero added/updated entries.
    #[test]
    fn reconcile_then_merge_is_idempotent(
        totals in proptest::collection::vec(0i64..10_000_000, 1..30),
        seeded in proptest::collection::vec(any::<bool>(), 30),
    ) {
        let period: Period = "2025-01".parse().unwrap();
        let workers: Vec<Worker> = (0..totals.len()).map(worker).collect();
        let employments: Vec<Employment> = (0..totals.len()).map(employment).collect();
        let records: Vec<CandidateRecord> = totals
            .iter()
            .enumerate()
            .map(|(i, total)| record(i, *total))
            .collect();

        // Some employments already carry an entry with a different total.
        let mut store = MemoryLedger::new();
        for (i, _) in totals.iter().enumerate() {
            if seeded[i] {
                let mut seeded_entry = entry_for(period, 1);
                seeded_entry.employment_id = format!("e{i}");
                seeded_entry.id = MonthlyWage::entry_id(&seeded_entry.employment_id, period);
                store.upsert(seeded_entry);
            }
        }

        let snapshot = LedgerSnapshot::build("biz-a", &workers, &employments, &store.entries());
        let outcome = reconcile(&records, period, &snapshot);
        for chunk in chunk_writes(outcome.writes(period), MAX_BATCH_SIZE) {
            store.commit_chunk(&chunk).unwrap();
        }

        let merged = LedgerSnapshot::build("biz-a", &workers, &employments, &store.entries());
        let second = reconcile(&records, period, &merged);

        prop_assert!(second.is_noop());
        prop_assert_eq!(second.unchanged.len(), records.len());
        prop_assert!(second.unmatched.is_empty());
    }

    /// Chunking never reorders writes and never exceeds the bound.
    #[test]
    fn chunking_preserves_order_within_bound(
        count in 0usize..2000,
        max in 1usize..600,
    ) {
        let period: Period = "2025-01".parse().unwrap();
        let workers: Vec<Worker> = (0..50).map(worker).collect();
        let employments: Vec<Employment> = (0..50).map(employment).collect();
        let records: Vec<CandidateRecord> =
            (0..count.min(50)).map(|i| record(i, i as i64 + 1)).collect();

        let snapshot = LedgerSnapshot::build("biz-a", &workers, &employments, &[]);
        let outcome = reconcile(&records, period, &snapshot);
        let writes = outcome.writes(period);
        let flattened: usize = chunk_writes(writes.clone(), max)
            .iter()
            .inspect(|chunk| assert!(chunk.len() <= max))
            .map(|chunk| chunk.len())
            .sum();

        prop_assert_eq!(flattened, writes.len());
    }

    /// With all enrollment flags set, every contribution grows strictly
    /// with the base (within the pension clamp window).
    #[test]
    fn contributions_increase_with_base(
        base in 400_000i64..5_000_000,
        step in 1_000i64..1_000_000,
    ) {
        let rates = RateTableSet::bundled();
        let classification = WageClassification::standard();
        let period: Period = "2026-01".parse().unwrap();

        let low = calculate_deductions(
            &entry_for(period, base),
            SchemeEnrollment::all(),
            &classification,
            &rates,
        ).unwrap();
        let high = calculate_deductions(
            &entry_for(period, base + step),
            SchemeEnrollment::all(),
            &classification,
            &rates,
        ).unwrap();

        prop_assert!(high.pension > low.pension);
        prop_assert!(high.health > low.health);
        prop_assert!(high.long_term_care > low.long_term_care);
        prop_assert!(high.employment > low.employment);
    }

    /// All four contributions are zero whenever all flags are false.
    #[test]
    fn no_enrollment_means_no_contributions(total in 0i64..50_000_000) {
        let result = calculate_deductions(
            &entry_for("2026-01".parse().unwrap(), total),
            SchemeEnrollment::none(),
            &WageClassification::standard(),
            &RateTableSet::bundled(),
        ).unwrap();

        prop_assert_eq!(result.pension, 0);
        prop_assert_eq!(result.health, 0);
        prop_assert_eq!(result.long_term_care, 0);
        prop_assert_eq!(result.employment, 0);
    }

    /// A reconstructed entry from a deduction result is net-consistent
    /// within the rounding tolerance.
    #[test]
    fn deduction_results_are_net_consistent(total in 0i64..20_000_000) {
        let result = calculate_deductions(
            &entry_for("2026-01".parse().unwrap(), total),
            SchemeEnrollment::all(),
            &WageClassification::standard(),
            &RateTableSet::bundled(),
        ).unwrap();

        let mut entry = entry_for("2026-01".parse().unwrap(), total);
        entry.pension = Some(result.pension);
        entry.health = Some(result.health);
        entry.long_term_care = Some(result.long_term_care);
        entry.employment = Some(result.employment);
        entry.income_tax = Some(result.income_tax);
        entry.local_tax = Some(result.local_tax);
        entry.net_wage = Some(result.net_of(total));

        let discrepancy = entry.net_discrepancy().unwrap();
        prop_assert!(discrepancy.abs() <= 1);
    }

    /// Severance pay scales linearly with tenure at a fixed average wage.
    #[test]
    fn severance_pay_scales_with_tenure(
        average in 10_000i64..500_000,
        years in 1i64..30,
    ) {
        let one = calculate_severance_pay(average, 365);
        let many = calculate_severance_pay(average, 365 * years);
        prop_assert_eq!(many, one * years);
    }
}
