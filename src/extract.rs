use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::MergedRecord;

pub const EXTRACT_HEADER: [&str; 6] = [
    "Player.Name",
    "Team",
    "Year.s.",
    "Transfer.Level",
    "has_stats",
    "matched_name",
];

/// Write the filtered extract: one row per retained transfer record, matched
/// or not, with an empty `matched_name` for unmatched rows. Overwrites any
/// prior file at `path`. Returns the number of data rows written.
pub fn write_extract(path: &Path, records: &[MergedRecord]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create extract directory {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("open extract {}", path.display()))?;
    writer
        .write_record(EXTRACT_HEADER)
        .context("write extract header")?;
    for record in records {
        writer
            .write_record([
                record.transfer.player_name.as_str(),
                record.transfer.team.as_str(),
                record.transfer.years.as_str(),
                record.transfer.level.code(),
                if record.matched() { "true" } else { "false" },
                record.best_match.as_deref().unwrap_or(""),
            ])
            .with_context(|| format!("write extract row for {}", record.transfer.player_name))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush extract {}", path.display()))?;
    Ok(records.len())
}
