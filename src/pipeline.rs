use std::collections::HashSet;

use crate::blocking::BlockIndex;
use crate::matcher::{MatcherConfig, NameMatcher};
use crate::normalize::{NormalizedName, normalize_name};
use crate::roster::{SeasonRecord, TransferRecord};
use crate::season::latest_season_rows;

/// One lower-division transfer joined (when matched) with the player's most
/// recent tracked season.
#[derive(Debug, Clone)]
pub struct MergedRecord {
    pub transfer: TransferRecord,
    pub name: NormalizedName,
    pub best_match: Option<String>,
    pub season: Option<SeasonRecord>,
}

impl MergedRecord {
    pub fn matched(&self) -> bool {
        self.best_match.is_some()
    }
}

/// Full result of one reconciliation run. Unmatched transfers are kept; only
/// out-of-scope tiers and exact duplicate rows are removed.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub records: Vec<MergedRecord>,
    pub transfer_rows: usize,
    pub season_rows: usize,
    pub min_score: f64,
}

impl Reconciliation {
    pub fn matched_count(&self) -> usize {
        self.records.iter().filter(|r| r.matched()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.records.len() - self.matched_count()
    }
}

/// Reconcile the transfer roster against the season-statistics dataset.
///
/// Keeps only the two lower tiers, drops exact duplicate transfer rows
/// (first occurrence wins), then normalizes, blocks, matches, and joins.
/// Every retained transfer produces exactly one output record, matched or
/// not.
pub fn reconcile(
    transfers: &[TransferRecord],
    seasons: &[SeasonRecord],
    config: MatcherConfig,
) -> Reconciliation {
    let mut seen: HashSet<(&str, &str, &str, &str)> = HashSet::new();
    let filtered: Vec<&TransferRecord> = transfers
        .iter()
        .filter(|t| t.level.is_lower_division())
        .filter(|t| {
            seen.insert((
                t.player_name.as_str(),
                t.team.as_str(),
                t.years.as_str(),
                t.level.code(),
            ))
        })
        .collect();

    let season_names: Vec<NormalizedName> = seasons
        .iter()
        .map(|s| normalize_name(&s.player_name))
        .collect();
    let index = BlockIndex::build(&season_names);
    let matcher = NameMatcher::new(&season_names, &index, config);
    let latest = latest_season_rows(&season_names, seasons);

    let records = filtered
        .into_iter()
        .map(|transfer| {
            let name = normalize_name(&transfer.player_name);
            let best_match = matcher.best_match(&name);
            let season = best_match
                .as_deref()
                .and_then(|canonical| latest.get(canonical))
                .map(|&row| seasons[row].clone());
            MergedRecord {
                transfer: transfer.clone(),
                name,
                best_match,
                season,
            }
        })
        .collect();

    Reconciliation {
        records,
        transfer_rows: transfers.len(),
        season_rows: seasons.len(),
        min_score: config.min_score,
    }
}
