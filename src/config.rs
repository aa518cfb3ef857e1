use std::env;
use std::path::PathBuf;

use crate::matcher::DEFAULT_MIN_SCORE;

/// Fixed input/output locations and the similarity threshold, resolved from
/// the environment once at startup. No CLI flags, no network.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub transfers_csv: PathBuf,
    pub seasons_csv: PathBuf,
    pub extract_csv: PathBuf,
    pub report_json: PathBuf,
    pub workbook_xlsx: PathBuf,
    pub min_score: f64,
}

impl RunConfig {
    pub fn from_env() -> Self {
        let min_score = env::var("MATCH_MIN_SCORE")
            .ok()
            .and_then(|val| val.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_MIN_SCORE)
            .clamp(0.0, 1.0);

        Self {
            transfers_csv: path_var("TRANSFERS_CSV", "data/big_west_transfers.csv"),
            seasons_csv: path_var("SEASON_STATS_CSV", "data/clean_baseball_d2.csv"),
            extract_csv: path_var("EXTRACT_CSV", "out/transfers_filtered.csv"),
            report_json: path_var("RUN_REPORT_JSON", "out/run_report.json"),
            workbook_xlsx: path_var("WORKBOOK_XLSX", "out/reconciliation.xlsx"),
            min_score,
        }
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
