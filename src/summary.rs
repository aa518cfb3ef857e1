use std::collections::HashMap;

use serde::Serialize;

use crate::pipeline::MergedRecord;
use crate::roster::{METRIC_NAMES, TransferLevel};

#[derive(Debug, Clone, Serialize)]
pub struct LevelCount {
    pub level: TransferLevel,
    pub n: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamLevelCount {
    pub team: String,
    pub level: TransferLevel,
    pub n: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamCount {
    pub team: String,
    pub n: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchRateRow {
    pub level: TransferLevel,
    pub matched: bool,
    pub n: usize,
}

/// Descriptive statistics for one metric over matched records' joined
/// seasons.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSummary {
    pub metric: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Transfer counts per tier, most frequent first.
pub fn level_counts(records: &[MergedRecord]) -> Vec<LevelCount> {
    let mut counts: HashMap<&TransferLevel, usize> = HashMap::new();
    for record in records {
        *counts.entry(&record.transfer.level).or_default() += 1;
    }
    let mut rows: Vec<LevelCount> = counts
        .into_iter()
        .map(|(level, n)| LevelCount {
            level: level.clone(),
            n,
        })
        .collect();
    rows.sort_by(|a, b| b.n.cmp(&a.n).then_with(|| a.level.cmp(&b.level)));
    rows
}

/// Counts per (destination team, tier), busiest first, then by team name.
pub fn team_level_counts(records: &[MergedRecord]) -> Vec<TeamLevelCount> {
    let mut counts: HashMap<(&str, &TransferLevel), usize> = HashMap::new();
    for record in records {
        *counts
            .entry((record.transfer.team.as_str(), &record.transfer.level))
            .or_default() += 1;
    }
    let mut rows: Vec<TeamLevelCount> = counts
        .into_iter()
        .map(|((team, level), n)| TeamLevelCount {
            team: team.to_string(),
            level: level.clone(),
            n,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.n.cmp(&a.n)
            .then_with(|| a.team.cmp(&b.team))
            .then_with(|| a.level.cmp(&b.level))
    });
    rows
}

/// Total incoming transfers per destination team, busiest first. Feeds the
/// team bar chart.
pub fn team_totals(records: &[MergedRecord]) -> Vec<TeamCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.transfer.team.as_str()).or_default() += 1;
    }
    let mut rows: Vec<TeamCount> = counts
        .into_iter()
        .map(|(team, n)| TeamCount {
            team: team.to_string(),
            n,
        })
        .collect();
    rows.sort_by(|a, b| b.n.cmp(&a.n).then_with(|| a.team.cmp(&b.team)));
    rows
}

/// Matched/unmatched cardinalities per tier, ordered by tier then flag.
pub fn match_summary(records: &[MergedRecord]) -> Vec<MatchRateRow> {
    let mut counts: HashMap<(&TransferLevel, bool), usize> = HashMap::new();
    for record in records {
        *counts
            .entry((&record.transfer.level, record.matched()))
            .or_default() += 1;
    }
    let mut rows: Vec<MatchRateRow> = counts
        .into_iter()
        .map(|((level, matched), n)| MatchRateRow {
            level: level.clone(),
            matched,
            n,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.matched.cmp(&b.matched))
    });
    rows
}

/// Describe-style table over the metrics of matched records' seasons. Empty
/// input yields an empty table, not an error.
pub fn metric_summaries(records: &[MergedRecord]) -> Vec<MetricSummary> {
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); METRIC_NAMES.len()];
    for record in records {
        let Some(season) = record.season.as_ref() else {
            continue;
        };
        for (column, value) in columns.iter_mut().zip(season.metric_values()) {
            column.push(value);
        }
    }
    if columns[0].is_empty() {
        return Vec::new();
    }

    METRIC_NAMES
        .into_iter()
        .zip(columns)
        .map(|(metric, mut values)| {
            values.sort_by(f64::total_cmp);
            summarize(metric, &values)
        })
        .collect()
}

fn summarize(metric: &'static str, sorted: &[f64]) -> MetricSummary {
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        0.0
    } else {
        let var = sorted
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / ((count - 1) as f64);
        var.sqrt()
    };
    MetricSummary {
        metric,
        count,
        mean,
        std,
        min: sorted[0],
        p25: quantile(sorted, 0.25),
        median: quantile(sorted, 0.50),
        p75: quantile(sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear-interpolated quantile over already-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
