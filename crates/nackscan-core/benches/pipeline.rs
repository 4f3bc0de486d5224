//! Full pipeline benchmarks
//!
//! Benchmarks the complete analysis flow: bundle -> cluster -> regional.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nackscan_core::clusters::{SignatureMode, SignatureOrdering};
use nackscan_core::engine::AnalysisEngine;
use nackscan_core::records::{month_label, RejectionRecord};
use chrono::NaiveDate;

/// Deterministic synthetic dataset. A third of the messages carry two
/// errors, signatures repeat across a fixed pool, jurisdictions rotate.
fn synthetic_records(count: usize) -> Vec<RejectionRecord> {
    let errors = [
        "Missing LEI for counterparty",
        "Notional currency not recognised",
        "UTI format invalid",
        "Execution timestamp in the future",
        "Product taxonomy mismatch",
        "Reporting counterparty not authorised",
        "Valuation amount out of bounds",
        "Collateral portfolio code unknown",
    ];
    let jurisdictions = ["EMIR", "CFTC", "ASIC", "MAS"];
    let systems = ["Murex", "Calypso", "Summit"];

    let mut records = Vec::with_capacity(count + count / 3);
    for i in 0..count {
        let day = (i % 28) as u32 + 1;
        let month = (i % 12) as u32 + 1;
        let snapshot_date = NaiveDate::from_ymd_opt(2024, month, day).unwrap();
        let record = RejectionRecord {
            uti_id: format!("UTI-{:08}", i / 2),
            fo_message_id: format!("MSG-{i:08}"),
            error_description: errors[i % errors.len()].to_string(),
            nack_type: format!("NACK{}", i % 3 + 1),
            jurisdiction: jurisdictions[i % jurisdictions.len()].to_string(),
            month: month_label(snapshot_date),
            snapshot_date,
            fo_system: systems[i % systems.len()].to_string(),
            asset_class: "Rates".to_string(),
            product_type: "Swap".to_string(),
        };
        if i % 3 == 0 {
            let mut second = record.clone();
            second.error_description = errors[(i + 1) % errors.len()].to_string();
            records.push(record);
            records.push(second);
        } else {
            records.push(record);
        }
    }
    records
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for size in [1_000usize, 10_000] {
        let records = synthetic_records(size);
        group.bench_with_input(BenchmarkId::new("unordered", size), &records, |b, records| {
            let engine = AnalysisEngine::new(SignatureMode::default());
            b.iter(|| engine.run(records));
        });
        group.bench_with_input(
            BenchmarkId::new("ordered_nack", size),
            &records,
            |b, records| {
                let engine = AnalysisEngine::new(SignatureMode {
                    ordering: SignatureOrdering::Ordered,
                    include_nack_types: true,
                    split_by_jurisdiction: false,
                });
                b.iter(|| engine.run(records));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
