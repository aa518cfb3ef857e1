use transfer_scout::config::RunConfig;
use transfer_scout::extract::write_extract;
use transfer_scout::matcher::MatcherConfig;
use transfer_scout::pipeline::reconcile;
use transfer_scout::report::{RunReport, save_report};
use transfer_scout::roster::{load_seasons, load_transfers};
use transfer_scout::summary::{
    level_counts, match_summary, metric_summaries, team_level_counts, team_totals,
};
use transfer_scout::workbook::export_workbook;

// Headless run: same pipeline as the dashboard, printed to stdout. Meant for
// scripted runs and quick threshold tuning without a terminal UI.
fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = RunConfig::from_env();
    let transfers = load_transfers(&config.transfers_csv)?;
    let seasons = load_seasons(&config.seasons_csv)?;
    let result = reconcile(
        &transfers,
        &seasons,
        MatcherConfig {
            min_score: config.min_score,
        },
    );

    println!(
        "Loaded {} transfer rows, {} season rows; retained {} lower-division transfers",
        result.transfer_rows,
        result.season_rows,
        result.records.len()
    );

    println!("\n--- Transfer counts by level ---");
    for row in level_counts(&result.records) {
        println!("{:<6} {:>5}", row.level.code(), row.n);
    }

    println!("\n--- Destination team counts ---");
    for row in team_level_counts(&result.records) {
        println!("{:<28} {:<6} {:>5}", row.team, row.level.code(), row.n);
    }

    println!("\n--- Match rate against season statistics ---");
    for row in match_summary(&result.records) {
        println!(
            "{:<6} {:<9} {:>5}",
            row.level.code(),
            if row.matched { "matched" } else { "unmatched" },
            row.n
        );
    }

    let metrics = metric_summaries(&result.records);
    if !metrics.is_empty() {
        println!("\n--- Last tracked season stats for matched players ---");
        println!(
            "{:<18} {:>5} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "metric", "count", "mean", "std", "min", "p25", "median", "p75", "max"
        );
        for m in &metrics {
            println!(
                "{:<18} {:>5} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
                m.metric, m.count, m.mean, m.std, m.min, m.p25, m.median, m.p75, m.max
            );
        }
    }

    let rows = write_extract(&config.extract_csv, &result.records)?;
    println!(
        "\nSaved filtered extract ({} rows) to: {}",
        rows,
        config.extract_csv.display()
    );

    let report = RunReport::from_reconciliation(&result);
    save_report(&config.report_json, &report)?;
    println!("Saved run report to: {}", config.report_json.display());

    export_workbook(
        &config.workbook_xlsx,
        &result.records,
        &team_totals(&result.records),
        &match_summary(&result.records),
        &metrics,
    )?;
    println!("Saved workbook to: {}", config.workbook_xlsx.display());

    Ok(())
}
