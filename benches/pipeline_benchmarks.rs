//! Performance benchmarks for the payroll engine.
//!
//! The import pipeline is the hot path: one sheet per business per month,
//! a few hundred rows each. Targets:
//! - Extraction + reconciliation of 100 rows: < 1ms mean
//! - Extraction + reconciliation of 1000 rows: < 10ms mean
//! - Single severance settlement: < 100μs mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, Utc};

use payroll_engine::calculation::calculate_severance;
use payroll_engine::config::{
    BusinessDefaults, CONFIG_VERSION, ColumnMap, PayrollConfig, SheetLayout, WageClassification,
};
use payroll_engine::extract::{Cell, Row, extract_records};
use payroll_engine::models::{
    Employment, EmploymentStatus, MonthlyWage, Period, SchemeEnrollment, WageComponents, Worker,
};
use payroll_engine::rates::RateTableSet;
use payroll_engine::reconcile::{LedgerSnapshot, MAX_BATCH_SIZE, chunk_writes, reconcile};

fn bench_config() -> PayrollConfig {
    PayrollConfig {
        business_id: "biz-bench".to_string(),
        business_name: "bench".to_string(),
        version: CONFIG_VERSION,
        updated_at: None,
        sheet: SheetLayout {
            sheet_name: "임금대장".to_string(),
            sheet_keywords: vec![],
            header_row: 1,
            data_start_row: 2,
            columns: ColumnMap {
                name: Some(1),
                resident_no: Some(3),
                join_date: Some(5),
                total_wage: Some(7),
                ..ColumnMap::default()
            },
        },
        wage_classification: WageClassification::standard(),
        defaults: BusinessDefaults::default(),
    }
}

fn resident_no(i: usize) -> String {
    format!("90010{i:08}")
}

fn sheet_rows(count: usize) -> Vec<Row> {
    let mut rows = vec![vec![
        Cell::Text("성명".to_string()),
        Cell::Empty,
        Cell::Text("주민번호".to_string()),
    ]];
    for i in 0..count {
        rows.push(vec![
            Cell::Text(format!("근로자{i}")),
            Cell::Empty,
            Cell::Text(resident_no(i)),
            Cell::Empty,
            Cell::Text("2024-01-01".to_string()),
            Cell::Empty,
            Cell::Number(2_000_000.0 + i as f64),
        ]);
    }
    rows
}

fn chain(count: usize) -> (Vec<Worker>, Vec<Employment>, Vec<MonthlyWage>) {
    let now = Utc::now();
    let period: Period = "2025-01".parse().unwrap();
    let mut workers = Vec::with_capacity(count);
    let mut employments = Vec::with_capacity(count);
    let mut entries = Vec::with_capacity(count);

    for i in 0..count {
        workers.push(Worker {
            id: format!("w{i}"),
            name: format!("근로자{i}"),
            resident_no: resident_no(i),
            nationality: None,
            phone: None,
            created_at: now,
            updated_at: now,
        });
        employments.push(Employment {
            id: format!("e{i}"),
            worker_id: format!("w{i}"),
            business_id: "biz-bench".to_string(),
            status: EmploymentStatus::Active,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            leave_date: None,
            leave_reason: None,
            monthly_wage: 2_000_000,
            job_code: "532".to_string(),
            weekly_hours: 40,
            enrollment: SchemeEnrollment::all(),
            created_at: now,
            updated_at: now,
        });
        // Half the ledger already matches, half changed.
        let total = if i % 2 == 0 {
            2_000_000 + i as i64
        } else {
            1_900_000
        };
        entries.push(MonthlyWage {
            id: MonthlyWage::entry_id(&format!("e{i}"), period),
            employment_id: format!("e{i}"),
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
            created_at: now,
        });
    }
    (workers, employments, entries)
}

fn bench_import_pipeline(c: &mut Criterion) {
    let config = bench_config();
    let period: Period = "2025-01".parse().unwrap();

    let mut group = c.benchmark_group("import_pipeline");
    for count in [100usize, 1000] {
        let rows = sheet_rows(count);
        let (workers, employments, entries) = chain(count);
        let snapshot = LedgerSnapshot::build("biz-bench", &workers, &employments, &entries);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("extract_reconcile_chunk", count),
            &rows,
            |b, rows| {
                b.iter(|| {
                    let extraction = extract_records(&config.sheet, black_box(rows));
                    let outcome = reconcile(&extraction.records, period, &snapshot);
                    chunk_writes(outcome.writes(period), MAX_BATCH_SIZE)
                });
            },
        );
    }
    group.finish();
}

fn bench_severance(c: &mut Criterion) {
    let now = Utc::now();
    let rates = RateTableSet::bundled();
    let employment = Employment {
        id: "e1".to_string(),
        worker_id: "w1".to_string(),
        business_id: "biz-bench".to_string(),
        status: EmploymentStatus::Inactive,
        join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        leave_date: NaiveDate::from_ymd_opt(2025, 12, 31),
        leave_reason: None,
        monthly_wage: 2_500_000,
        job_code: "532".to_string(),
        weekly_hours: 40,
        enrollment: SchemeEnrollment::all(),
        created_at: now,
        updated_at: now,
    };
    let worker = Worker {
        id: "w1".to_string(),
        name: "김철수".to_string(),
        resident_no: "9010101234567".to_string(),
        nationality: None,
        phone: None,
        created_at: now,
        updated_at: now,
    };
    // Three years of history.
    let mut wages = Vec::new();
    for year in 2023..=2025 {
        for month in 1..=12 {
            let period = Period::new(year, month).unwrap();
            wages.push(MonthlyWage {
                id: MonthlyWage::entry_id("e1", period),
                employment_id: "e1".to_string(),
                period,
                components: WageComponents::default(),
                total_wage: 2_500_000,
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
                created_at: now,
            });
        }
    }

    c.bench_function("severance_settlement", |b| {
        b.iter(|| calculate_severance(black_box(&employment), &worker, &wages, &rates).unwrap());
    });
}

criterion_group!(benches, bench_import_pipeline, bench_severance);
criterion_main!(benches);
