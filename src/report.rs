use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::pipeline::Reconciliation;
use crate::summary::{LevelCount, MatchRateRow, level_counts, match_summary};

/// Machine-readable summary of one run, written next to the extract. This is
/// a run summary, not a store of match decisions.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub min_score: f64,
    pub transfer_rows: usize,
    pub season_rows: usize,
    pub retained: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub level_counts: Vec<LevelCount>,
    pub match_summary: Vec<MatchRateRow>,
}

impl RunReport {
    pub fn from_reconciliation(result: &Reconciliation) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            min_score: result.min_score,
            transfer_rows: result.transfer_rows,
            season_rows: result.season_rows,
            retained: result.records.len(),
            matched: result.matched_count(),
            unmatched: result.unmatched_count(),
            level_counts: level_counts(&result.records),
            match_summary: match_summary(&result.records),
        }
    }
}

pub fn save_report(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = fs::create_dir_all(parent);
        }
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    fs::write(&tmp, json).context("write run report")?;
    fs::rename(&tmp, path).context("swap run report")?;
    Ok(())
}
