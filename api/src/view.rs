use crate::bracket::Bracket;
use crate::catalog::{SportCatalog, SportFormat};
use crate::normalize::{self, sport_key};
use crate::rank::{self, MedalSort};
use crate::wire::RawPayload;
use crate::{KnockoutMatch, MedalRow, ResultRow, StandingRow};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeMap;

/// Everything one fetch produced, keyed by sport key. Rebuilt from scratch on
/// every successful fetch; `FestData::default()` is the empty state shown
/// before the first load and after a failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FestData {
    pub standings: BTreeMap<String, Vec<StandingRow>>,
    pub knockout: BTreeMap<String, Vec<KnockoutMatch>>,
    pub results: BTreeMap<String, Vec<ResultRow>>,
    /// One row per team, in sheet order. Rank with [`FestData::medal_table`].
    pub medals: Vec<MedalRow>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl FestData {
    pub fn from_payload(payload: &RawPayload) -> Self {
        let mut data = FestData::default();

        for record in payload.standing_records() {
            let key = normalize::record_sport(record);
            if key.is_empty() {
                debug!("standings: skipping row without sport");
                continue;
            }
            data.standings.entry(key).or_default().push(normalize::standing_row(record));
        }

        for record in payload.knockout_records() {
            let key = normalize::record_sport(record);
            if key.is_empty() {
                debug!("knockout: skipping row without sport");
                continue;
            }
            data.knockout.entry(key).or_default().push(normalize::knockout_match(record));
        }

        for record in payload.result_records() {
            let row = normalize::result_row(record);
            data.results.entry(row.sport.clone()).or_default().push(row);
        }

        for (team, record) in payload.medal_entries() {
            let row = normalize::medal_row(team, record);
            if row.team.is_empty() {
                debug!("medals: skipping row without team");
                continue;
            }
            match data.medals.iter_mut().find(|m| m.team == row.team) {
                Some(existing) => existing.absorb(&row),
                None => data.medals.push(row),
            }
        }

        data
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
            && self.knockout.is_empty()
            && self.results.is_empty()
            && self.medals.is_empty()
    }

    pub fn medal_table(&self, sort: MedalSort) -> Vec<MedalRow> {
        let mut rows = self.medals.clone();
        rank::rank_medals(&mut rows, sort);
        rows
    }

    pub fn results_for(&self, sport: &str) -> &[ResultRow] {
        self.results
            .get(&sport_key(sport))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Build what the standings page shows for one sport.
    pub fn sport_view(&self, sport: &str, catalog: &SportCatalog) -> SportView {
        let key = sport_key(sport);
        let Some(format) = catalog.classify(&key) else {
            return SportView { key, ..Default::default() };
        };

        let league = (format == SportFormat::League).then(|| {
            let mut rows = self.standings.get(&key).cloned().unwrap_or_default();
            rank::rank_league(&mut rows);
            if catalog.is_grouped(&key) {
                rank::split_groups(&rows)
                    .into_iter()
                    .map(|(label, rows)| LeagueGroup {
                        title: (!label.is_empty()).then(|| format!("Group {label}")),
                        rows,
                    })
                    .collect()
            } else {
                vec![LeagueGroup { title: None, rows }]
            }
        });

        let matches = self.knockout.get(&key).map(Vec::as_slice).unwrap_or_default();
        let knockout = if catalog.shows_match_list(&key) {
            KnockoutView::MatchList(matches.to_vec())
        } else if format == SportFormat::Knockout {
            KnockoutView::Bracket(Bracket::build(
                matches,
                &catalog.round_order,
                &catalog.bronze_round,
            ))
        } else {
            KnockoutView::None
        };

        SportView { key, format: Some(format), league, knockout }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueGroup {
    pub title: Option<String>,
    pub rows: Vec<StandingRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum KnockoutView {
    #[default]
    None,
    /// Flat list of fixtures, used by league sports with a knockout stage.
    MatchList(Vec<KnockoutMatch>),
    Bracket(Bracket),
}

/// Presentation-ready data for one sport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SportView {
    pub key: String,
    pub format: Option<SportFormat>,
    /// League tables (one per group), present only for league sports.
    pub league: Option<Vec<LeagueGroup>>,
    pub knockout: KnockoutView,
}

impl SportView {
    /// True when nothing is rendered at all, as for sports outside the catalog.
    pub fn is_empty(&self) -> bool {
        self.league.is_none() && self.knockout == KnockoutView::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: serde_json::Value) -> RawPayload {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn single_league_row_scenario() {
        let data = FestData::from_payload(&payload(json!({
            "standings": [{"Sport": "Football", "Team": "X", "P": "4", "W": "3", "L": "1", "Pts": "9"}]
        })));
        let view = data.sport_view("Football", &SportCatalog::default());
        assert_eq!(view.format, Some(SportFormat::League));
        let league = view.league.expect("league table");
        assert_eq!(league.len(), 1);
        assert_eq!(
            league[0].rows,
            vec![StandingRow {
                team: "X".into(),
                group: String::new(),
                played: 4,
                won: 3,
                lost: 1,
                points: 9
            }]
        );
    }

    #[test]
    fn unknown_sport_renders_nothing() {
        let data = FestData::from_payload(&payload(json!({
            "standings": [{"Sport": "Kabaddi", "Team": "X", "Pts": 3}],
            "knockout": [{"Sport": "Kabaddi", "Team1": "X", "Team2": "Y"}]
        })));
        let view = data.sport_view("Kabaddi", &SportCatalog::default());
        assert!(view.is_empty());
        assert_eq!(view.format, None);
    }

    #[test]
    fn knockout_sport_gets_bracket() {
        let data = FestData::from_payload(&payload(json!({
            "knockout": [
                {"Sport": "Chess", "round": "Final", "teamA": "A", "teamB": "B", "winner": "A"},
                {"Sport": "chess", "round": "Semifinal", "match": 2, "teamA": "B", "teamB": "D"},
                {"Sport": "Chess", "round": "Semifinal", "match": 1, "teamA": "A", "teamB": "C"}
            ]
        })));
        let view = data.sport_view("Chess", &SportCatalog::default());
        assert!(view.league.is_none());
        let KnockoutView::Bracket(bracket) = view.knockout else {
            panic!("expected bracket");
        };
        assert_eq!(bracket.rounds.len(), 2);
        assert_eq!(bracket.rounds[0].label, "Semifinal");
        assert_eq!(bracket.rounds[0].matches[0].team2, "C");
    }

    #[test]
    fn match_list_sport_gets_table_and_list() {
        let data = FestData::from_payload(&payload(json!({
            "standings": [{"Sport": "Football", "Team": "X", "Pts": 3}],
            "knockout": [{"Sport": "Football", "Round": "Final", "Team 1": "X", "Team 2": "Y"}]
        })));
        let view = data.sport_view("football", &SportCatalog::default());
        assert!(view.league.is_some());
        assert!(matches!(view.knockout, KnockoutView::MatchList(ref m) if m.len() == 1));
    }

    #[test]
    fn grouped_sport_splits_tables() {
        let data = FestData::from_payload(&payload(json!({
            "standings": [
                {"Sport": "Cricket", "Team": "a1", "Group": "A", "Pts": 2},
                {"Sport": "Cricket", "Team": "b1", "Group": "B", "Pts": 4},
                {"Sport": "Cricket", "Team": "a2", "Group": "A", "Pts": 6}
            ]
        })));
        let groups = data.sport_view("Cricket", &SportCatalog::default()).league.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title.as_deref(), Some("Group A"));
        assert_eq!(groups[0].rows[0].team, "a2");
        assert_eq!(groups[1].title.as_deref(), Some("Group B"));
    }

    #[test]
    fn league_sport_without_rows_still_shows_empty_table() {
        let view = FestData::default().sport_view("Basketball", &SportCatalog::default());
        let league = view.league.unwrap();
        assert!(league[0].rows.is_empty());
    }

    #[test]
    fn medal_map_scenario_sorted_by_total() {
        let data = FestData::from_payload(&payload(json!({
            "medals": {"X": {"gold": 2, "silver": 1, "bronze": 0}}
        })));
        let table = data.medal_table(MedalSort::Total);
        assert_eq!(table, vec![MedalRow::new("X", 2, 1, 0)]);
        assert_eq!(table[0].total, 3);
    }

    #[test]
    fn medal_duplicates_are_summed() {
        let data = FestData::from_payload(&payload(json!({
            "medals": [
                {"Team": "X", "Gold": 1},
                {"Team": "Y", "Gold": 0, "Silver": 2},
                {"Team": "X", "Bronze": 2}
            ]
        })));
        let table = data.medal_table(MedalSort::Gold);
        assert_eq!(table[0], MedalRow::new("X", 1, 0, 2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn oversized_medal_cells_do_not_panic() {
        let data = FestData::from_payload(&payload(json!({
            "medals": {"X": {"gold": "4294967295", "silver": 1}}
        })));
        assert_eq!(data.medals[0].total, u32::MAX);

        let data = FestData::from_payload(&payload(json!({
            "medals": [
                {"Team": "Y", "Gold": 4000000000u64},
                {"Team": "Y", "Gold": 4000000000u64}
            ]
        })));
        assert_eq!(data.medals.len(), 1);
        assert_eq!(data.medals[0].gold, u32::MAX);
        assert_eq!(data.medals[0].total, u32::MAX);
    }

    #[test]
    fn results_are_keyed_by_sport() {
        let data = FestData::from_payload(&payload(json!({
            "results": [
                {"Sport": "Football", "TeamA": "A", "TeamB": "B", "ScoreA": 1, "ScoreB": 0},
                {"Sport": "Chess", "TeamA": "C", "TeamB": "D"}
            ]
        })));
        assert_eq!(data.results_for(" FOOTBALL").len(), 1);
        assert_eq!(data.results_for("Tennis").len(), 0);
        assert!(!data.is_empty());
    }
}
