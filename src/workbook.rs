use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::extract::EXTRACT_HEADER;
use crate::pipeline::MergedRecord;
use crate::summary::{MatchRateRow, MetricSummary, TeamCount};

/// Export the reconciliation as a workbook: the filtered extract plus the
/// aggregated views, one sheet each.
pub fn export_workbook(
    path: &Path,
    records: &[MergedRecord],
    teams: &[TeamCount],
    match_rows: &[MatchRateRow],
    metrics: &[MetricSummary],
) -> Result<()> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Extract")?;
        write_rows(sheet, &extract_rows(records))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TeamCounts")?;
        write_rows(sheet, &team_rows(teams))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("MatchSummary")?;
        write_rows(sheet, &match_rate_rows(match_rows))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("SeasonStats")?;
        write_rows(sheet, &metric_rows(metrics))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn extract_rows(records: &[MergedRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![EXTRACT_HEADER.iter().map(|s| s.to_string()).collect()];
    for record in records {
        rows.push(vec![
            record.transfer.player_name.clone(),
            record.transfer.team.clone(),
            record.transfer.years.clone(),
            record.transfer.level.code().to_string(),
            (if record.matched() { "true" } else { "false" }).to_string(),
            record.best_match.clone().unwrap_or_default(),
        ]);
    }
    rows
}

fn team_rows(teams: &[TeamCount]) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["Team".to_string(), "Transfers".to_string()]];
    for team in teams {
        rows.push(vec![team.team.clone(), team.n.to_string()]);
    }
    rows
}

fn match_rate_rows(match_rows: &[MatchRateRow]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Transfer Level".to_string(),
        "Has Stats".to_string(),
        "N".to_string(),
    ]];
    for row in match_rows {
        rows.push(vec![
            row.level.code().to_string(),
            (if row.matched { "yes" } else { "no" }).to_string(),
            row.n.to_string(),
        ]);
    }
    rows
}

fn metric_rows(metrics: &[MetricSummary]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Metric".to_string(),
        "Count".to_string(),
        "Mean".to_string(),
        "Std".to_string(),
        "Min".to_string(),
        "P25".to_string(),
        "Median".to_string(),
        "P75".to_string(),
        "Max".to_string(),
    ]];
    for m in metrics {
        rows.push(vec![
            m.metric.to_string(),
            m.count.to_string(),
            format!("{:.3}", m.mean),
            format!("{:.3}", m.std),
            format!("{:.3}", m.min),
            format!("{:.3}", m.p25),
            format!("{:.3}", m.median),
            format!("{:.3}", m.p75),
            format!("{:.3}", m.max),
        ]);
    }
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
