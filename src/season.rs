use std::collections::HashMap;

use crate::normalize::NormalizedName;
use crate::roster::SeasonRecord;

/// For every distinct canonical name, the row position of that player's most
/// recent tracked season. Year ties resolve to the later original row, so
/// the result is the last row after a stable sort by (name, year).
pub fn latest_season_rows(
    names: &[NormalizedName],
    seasons: &[SeasonRecord],
) -> HashMap<String, usize> {
    debug_assert_eq!(names.len(), seasons.len());

    let mut latest: HashMap<String, usize> = HashMap::new();
    for (row, name) in names.iter().enumerate() {
        match latest.entry(name.canonical.clone()) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                if seasons[row].year >= seasons[*entry.get()].year {
                    entry.insert(row);
                }
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(row);
            }
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_name;

    fn season(name: &str, year: i32, plate_appearances: f64) -> SeasonRecord {
        SeasonRecord {
            player_name: name.to_string(),
            year,
            plate_appearances,
            batting_average: 0.300,
            on_base_pct: 0.380,
            slugging_pct: 0.450,
            ops: 0.830,
            home_runs: 4.0,
            stolen_bases: 7.0,
            walks: 21.0,
            strikeouts: 30.0,
            wins_above_repl: 1.2,
            sos_adj_war: 1.0,
        }
    }

    #[test]
    fn most_recent_year_wins() {
        let seasons = vec![
            season("Jon Smith", 2022, 210.0),
            season("Jon Smith", 2021, 180.0),
        ];
        let names: Vec<_> = seasons
            .iter()
            .map(|s| normalize_name(&s.player_name))
            .collect();

        let latest = latest_season_rows(&names, &seasons);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest["jon smith"], 0);
    }

    #[test]
    fn year_ties_resolve_to_the_later_row() {
        let seasons = vec![
            season("Jon Smith", 2022, 210.0),
            season("Jon Smith", 2022, 195.0),
        ];
        let names: Vec<_> = seasons
            .iter()
            .map(|s| normalize_name(&s.player_name))
            .collect();

        let latest = latest_season_rows(&names, &seasons);
        assert_eq!(latest["jon smith"], 1);
    }

    #[test]
    fn each_player_gets_exactly_one_row() {
        let seasons = vec![
            season("Jon Smith", 2021, 180.0),
            season("Ana Diaz", 2020, 140.0),
            season("Jon Smith", 2022, 210.0),
            season("Ana Diaz", 2019, 120.0),
        ];
        let names: Vec<_> = seasons
            .iter()
            .map(|s| normalize_name(&s.player_name))
            .collect();

        let latest = latest_season_rows(&names, &seasons);
        assert_eq!(latest.len(), 2);
        assert_eq!(seasons[latest["jon smith"]].year, 2022);
        assert_eq!(seasons[latest["ana diaz"]].year, 2020);
    }
}
