use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use transfer_scout::matcher::{MatcherConfig, sequence_ratio};
use transfer_scout::normalize::normalize_name;
use transfer_scout::pipeline::reconcile;
use transfer_scout::roster::{SeasonRecord, TransferLevel, TransferRecord};

fn synthetic_transfers(n: usize) -> Vec<TransferRecord> {
    (0..n)
        .map(|idx| TransferRecord {
            player_name: format!("Player{} Surname{}", idx, idx % 97),
            team: format!("Team {}", idx % 11),
            years: "2023".to_string(),
            level: if idx % 2 == 0 {
                TransferLevel::DivisionTwo
            } else {
                TransferLevel::DivisionThree
            },
        })
        .collect()
}

fn synthetic_seasons(players: usize) -> Vec<SeasonRecord> {
    let mut rows = Vec::with_capacity(players * 2);
    for idx in 0..players {
        for year in [2021, 2022] {
            rows.push(SeasonRecord {
                player_name: format!("Player{} Surname{}", idx, idx % 97),
                year,
                plate_appearances: 150.0 + (idx % 120) as f64,
                batting_average: 0.250 + (idx % 90) as f64 / 1000.0,
                on_base_pct: 0.320 + (idx % 80) as f64 / 1000.0,
                slugging_pct: 0.390 + (idx % 150) as f64 / 1000.0,
                ops: 0.710 + (idx % 200) as f64 / 1000.0,
                home_runs: (idx % 12) as f64,
                stolen_bases: (idx % 20) as f64,
                walks: (idx % 40) as f64,
                strikeouts: (idx % 60) as f64,
                wins_above_repl: (idx % 30) as f64 / 10.0,
                sos_adj_war: (idx % 25) as f64 / 10.0,
            });
        }
    }
    rows
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_name", |b| {
        b.iter(|| {
            let norm = normalize_name(black_box("José A. García-Hernández Jr."));
            black_box(norm.canonical.len());
        })
    });
}

fn bench_sequence_ratio(c: &mut Criterion) {
    c.bench_function("sequence_ratio", |b| {
        b.iter(|| {
            let score = sequence_ratio(
                black_box("jonathan smitherson"),
                black_box("jonathon smithersen"),
            );
            black_box(score);
        })
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let transfers = synthetic_transfers(500);
    let seasons = synthetic_seasons(2_000);

    c.bench_function("reconcile_500x4000", |b| {
        b.iter(|| {
            let result = reconcile(
                black_box(&transfers),
                black_box(&seasons),
                MatcherConfig::default(),
            );
            black_box(result.records.len());
        })
    });
}

criterion_group!(perf, bench_normalize, bench_sequence_ratio, bench_reconcile);
criterion_main!(perf);
