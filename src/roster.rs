use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Sub-tier a player is transferring in from. The feed uses short codes;
/// anything outside the known set is preserved verbatim rather than
/// failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferLevel {
    DivisionOne,
    DivisionTwo,
    DivisionThree,
    Naia,
    Juco,
    Other(String),
}

impl TransferLevel {
    pub fn code(&self) -> &str {
        match self {
            TransferLevel::DivisionOne => "DI",
            TransferLevel::DivisionTwo => "DII",
            TransferLevel::DivisionThree => "DIII",
            TransferLevel::Naia => "NAIA",
            TransferLevel::Juco => "JUCO",
            TransferLevel::Other(code) => code,
        }
    }

    pub fn is_lower_division(&self) -> bool {
        matches!(
            self,
            TransferLevel::DivisionTwo | TransferLevel::DivisionThree
        )
    }
}

impl From<String> for TransferLevel {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DI" => TransferLevel::DivisionOne,
            "DII" => TransferLevel::DivisionTwo,
            "DIII" => TransferLevel::DivisionThree,
            "NAIA" => TransferLevel::Naia,
            "JUCO" => TransferLevel::Juco,
            _ => TransferLevel::Other(raw.trim().to_string()),
        }
    }
}

impl From<TransferLevel> for String {
    fn from(level: TransferLevel) -> Self {
        level.code().to_string()
    }
}

/// One incoming transfer event. Columns named as in the source feed.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRecord {
    #[serde(rename = "Player.Name", default)]
    pub player_name: String,
    #[serde(rename = "Team", default)]
    pub team: String,
    #[serde(rename = "Year.s.", default)]
    pub years: String,
    #[serde(rename = "Transfer.Level")]
    pub level: TransferLevel,
}

pub const METRIC_NAMES: [&str; 11] = [
    "plate_appearances",
    "batting_average",
    "on_base_pct",
    "slugging_pct",
    "ops",
    "home_runs",
    "stolen_bases",
    "walks",
    "strikeouts",
    "wins_above_repl",
    "sos_adj_war",
];

/// One tracked lower-division season for one player. A player appears once
/// per season year.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeasonRecord {
    #[serde(default)]
    pub player_name: String,
    pub year: i32,
    pub plate_appearances: f64,
    pub batting_average: f64,
    pub on_base_pct: f64,
    pub slugging_pct: f64,
    pub ops: f64,
    pub home_runs: f64,
    pub stolen_bases: f64,
    pub walks: f64,
    pub strikeouts: f64,
    pub wins_above_repl: f64,
    pub sos_adj_war: f64,
}

impl SeasonRecord {
    /// Metric values in `METRIC_NAMES` order.
    pub fn metric_values(&self) -> [f64; METRIC_NAMES.len()] {
        [
            self.plate_appearances,
            self.batting_average,
            self.on_base_pct,
            self.slugging_pct,
            self.ops,
            self.home_runs,
            self.stolen_bases,
            self.walks,
            self.strikeouts,
            self.wins_above_repl,
            self.sos_adj_war,
        ]
    }
}

pub fn load_transfers(path: &Path) -> Result<Vec<TransferRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open transfer roster {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: TransferRecord =
            record.with_context(|| format!("parse transfer roster {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn load_seasons(path: &Path) -> Result<Vec<SeasonRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open season statistics {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: SeasonRecord =
            record.with_context(|| format!("parse season statistics {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}
