use crate::pipeline::Reconciliation;
use crate::summary::{
    LevelCount, MatchRateRow, MetricSummary, TeamCount, TeamLevelCount, level_counts,
    match_summary, metric_summaries, team_level_counts, team_totals,
};

const MAX_LOGS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Teams,
    Scatter,
}

/// One matched player's point on the appearances-vs-OPS chart, labelled with
/// the display name from the transfer feed.
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub plate_appearances: f64,
    pub ops: f64,
    pub player: String,
}

/// Everything the dashboard renders, computed once from the reconciliation.
pub struct AppState {
    pub screen: Screen,
    pub result: Reconciliation,
    pub levels: Vec<LevelCount>,
    pub teams: Vec<TeamCount>,
    pub team_levels: Vec<TeamLevelCount>,
    pub match_rows: Vec<MatchRateRow>,
    pub metrics: Vec<MetricSummary>,
    pub points: Vec<ScatterPoint>,
    pub team_scroll: usize,
    pub help_overlay: bool,
    pub logs: Vec<String>,
}

impl AppState {
    pub fn new(result: Reconciliation) -> Self {
        let levels = level_counts(&result.records);
        let teams = team_totals(&result.records);
        let team_levels = team_level_counts(&result.records);
        let match_rows = match_summary(&result.records);
        let metrics = metric_summaries(&result.records);
        let points = result
            .records
            .iter()
            .filter_map(|record| {
                let season = record.season.as_ref()?;
                Some(ScatterPoint {
                    plate_appearances: season.plate_appearances,
                    ops: season.ops,
                    player: record.transfer.player_name.clone(),
                })
            })
            .collect();

        Self {
            screen: Screen::Overview,
            result,
            levels,
            teams,
            team_levels,
            match_rows,
            metrics,
            points,
            team_scroll: 0,
            help_overlay: false,
            logs: Vec::new(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
        if self.logs.len() > MAX_LOGS {
            let excess = self.logs.len() - MAX_LOGS;
            self.logs.drain(..excess);
        }
    }

    pub fn scroll_down(&mut self) {
        if self.screen == Screen::Teams && self.team_scroll + 1 < self.teams.len() {
            self.team_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        if self.screen == Screen::Teams {
            self.team_scroll = self.team_scroll.saturating_sub(1);
        }
    }
}
