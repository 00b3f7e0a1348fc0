/// Wire types for the festival sheet endpoint.
///
/// The endpoint is a spreadsheet script: every top-level key is optional, each
/// section may arrive as an array of row objects or as an object keyed by row
/// label, and column names drift between sheet revisions. The shape enums below
/// are the closed list of spellings we accept; `crate::normalize` turns any of
/// them into one canonical record.
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawPayload {
    #[serde(default)]
    pub results: Option<Value>,
    #[serde(default)]
    pub standings: Option<Value>,
    #[serde(default)]
    pub knockout: Option<Value>,
    #[serde(default)]
    pub medals: Option<Value>,
}

impl RawPayload {
    pub fn result_records(&self) -> Vec<&Record> {
        records("results", self.results.as_ref())
    }

    pub fn standing_records(&self) -> Vec<&Record> {
        records("standings", self.standings.as_ref())
    }

    pub fn knockout_records(&self) -> Vec<&Record> {
        records("knockout", self.knockout.as_ref())
    }

    /// Medal rows paired with the map key they were found under, if any.
    /// `{"X": {"gold": 2}}` yields `(Some("X"), {...})`; array rows yield `None`.
    pub fn medal_entries(&self) -> Vec<(Option<&str>, &Record)> {
        match self.medals.as_ref() {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(team, v)| match v.as_object() {
                    Some(obj) => Some((Some(team.as_str()), obj)),
                    None => {
                        warn!("medals: ignoring non-object entry for {team:?}");
                        None
                    }
                })
                .collect(),
            other => records("medals", other).into_iter().map(|r| (None, r)).collect(),
        }
    }
}

/// Flatten a section (array or map) into its object rows. Anything else is
/// treated as an empty section.
fn records<'a>(section: &str, value: Option<&'a Value>) -> Vec<&'a Record> {
    let rows: Box<dyn Iterator<Item = &Value>> = match value {
        Some(Value::Array(items)) => Box::new(items.iter()),
        Some(Value::Object(map)) => Box::new(map.values()),
        None | Some(Value::Null) => return Vec::new(),
        Some(other) => {
            warn!("{section}: expected array or object, got {}", type_name(other));
            return Vec::new();
        }
    };
    rows.filter_map(|row| {
        let obj = row.as_object();
        if obj.is_none() {
            warn!("{section}: skipping non-object row ({})", type_name(row));
        }
        obj
    })
    .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Column spellings shared by every shape
// ---------------------------------------------------------------------------

pub const SPORT_KEYS: &[&str] = &["Sport", "sport"];
pub const TEAM_KEYS: &[&str] = &["Team", "team"];
pub const GROUP_KEYS: &[&str] = &["Group", "group"];

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingShape {
    /// `P`, `W`, `L`, `Pts`
    Abbreviated,
    /// `Played`, `Won`, `Lost`, `Points`
    Spelled,
    /// `played`, `won`, `lost`, `points`
    Lowercase,
}

#[derive(Debug, Clone, Copy)]
pub struct StandingKeys {
    pub played: &'static str,
    pub won: &'static str,
    pub lost: &'static str,
    pub points: &'static str,
}

impl StandingShape {
    pub const ALL: [StandingShape; 3] =
        [StandingShape::Abbreviated, StandingShape::Spelled, StandingShape::Lowercase];

    pub fn keys(self) -> StandingKeys {
        match self {
            StandingShape::Abbreviated => {
                StandingKeys { played: "P", won: "W", lost: "L", points: "Pts" }
            }
            StandingShape::Spelled => {
                StandingKeys { played: "Played", won: "Won", lost: "Lost", points: "Points" }
            }
            StandingShape::Lowercase => {
                StandingKeys { played: "played", won: "won", lost: "lost", points: "points" }
            }
        }
    }

    /// First shape with at least one of its numeric columns present.
    pub fn detect(record: &Record) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| {
            let k = shape.keys();
            [k.played, k.won, k.lost, k.points]
                .iter()
                .any(|key| record.contains_key(*key))
        })
    }
}

// ---------------------------------------------------------------------------
// Knockout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockoutShape {
    /// `Round`, `Team 1`, `Team 2`, `Result`
    Spaced,
    /// `Round`, `Team1`, `Team2`, `Result`
    Compact,
    /// `round`, `match`, `teamA`, `teamB`, `scoreA`, `scoreB`, `winner`
    Bracket,
}

#[derive(Debug, Clone, Copy)]
pub struct KnockoutKeys {
    pub round: &'static str,
    pub ordinal: &'static str,
    pub team1: &'static str,
    pub team2: &'static str,
    pub score1: &'static str,
    pub score2: &'static str,
    pub result: &'static [&'static str],
}

impl KnockoutShape {
    pub const ALL: [KnockoutShape; 3] =
        [KnockoutShape::Spaced, KnockoutShape::Compact, KnockoutShape::Bracket];

    pub fn keys(self) -> KnockoutKeys {
        match self {
            KnockoutShape::Spaced => KnockoutKeys {
                round: "Round",
                ordinal: "Match",
                team1: "Team 1",
                team2: "Team 2",
                score1: "Score 1",
                score2: "Score 2",
                result: &["Result", "Winner"],
            },
            KnockoutShape::Compact => KnockoutKeys {
                round: "Round",
                ordinal: "Match",
                team1: "Team1",
                team2: "Team2",
                score1: "Score1",
                score2: "Score2",
                result: &["Result", "Winner"],
            },
            KnockoutShape::Bracket => KnockoutKeys {
                round: "round",
                ordinal: "match",
                team1: "teamA",
                team2: "teamB",
                score1: "scoreA",
                score2: "scoreB",
                result: &["winner", "result"],
            },
        }
    }

    /// Team columns decide the shape. Rows without any team column fall back
    /// to whichever shape names their round, ordinal, score or result columns.
    pub fn detect(record: &Record) -> Option<Self> {
        let by_team = Self::ALL.into_iter().find(|shape| {
            let k = shape.keys();
            record.contains_key(k.team1) || record.contains_key(k.team2)
        });
        by_team.or_else(|| {
            Self::ALL.into_iter().find(|shape| {
                let k = shape.keys();
                [k.round, k.ordinal, k.score1, k.score2]
                    .iter()
                    .chain(k.result)
                    .any(|key| record.contains_key(*key))
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Medals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedalShape {
    /// `gold`, `silver`, `bronze`
    Lowercase,
    /// `Gold`, `Silver`, `Bronze`
    Capitalized,
}

impl MedalShape {
    pub fn keys(self) -> [&'static str; 3] {
        match self {
            MedalShape::Lowercase => ["gold", "silver", "bronze"],
            MedalShape::Capitalized => ["Gold", "Silver", "Bronze"],
        }
    }

    pub fn detect(record: &Record) -> Option<Self> {
        [MedalShape::Lowercase, MedalShape::Capitalized]
            .into_iter()
            .find(|shape| shape.keys().iter().any(|k| record.contains_key(*k)))
    }
}

// ---------------------------------------------------------------------------
// Schedule results (single known spelling)
// ---------------------------------------------------------------------------

pub struct ResultKeys {
    pub team_a: &'static str,
    pub team_b: &'static str,
    pub score_a: &'static str,
    pub score_b: &'static str,
    pub time: &'static str,
    pub venue: &'static str,
    pub referee: &'static str,
    pub notes: &'static str,
}

pub const RESULT_KEYS: ResultKeys = ResultKeys {
    team_a: "TeamA",
    team_b: "TeamB",
    score_a: "ScoreA",
    score_b: "ScoreB",
    time: "Time",
    venue: "Venue",
    referee: "Referee",
    notes: "Notes",
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn absent_sections_are_empty() {
        let raw: RawPayload = serde_json::from_value(json!({})).unwrap();
        assert!(raw.standing_records().is_empty());
        assert!(raw.knockout_records().is_empty());
        assert!(raw.result_records().is_empty());
        assert!(raw.medal_entries().is_empty());
    }

    #[test]
    fn sections_accept_arrays_and_maps() {
        let raw: RawPayload = serde_json::from_value(json!({
            "standings": [{"Team": "A"}, 7, {"Team": "B"}],
            "knockout": {"r1": {"Team1": "A"}, "r2": {"Team1": "B"}},
            "results": "garbage",
        }))
        .unwrap();
        assert_eq!(raw.standing_records().len(), 2);
        assert_eq!(raw.knockout_records().len(), 2);
        assert!(raw.result_records().is_empty());
    }

    #[test]
    fn medal_entries_carry_map_keys() {
        let raw: RawPayload = serde_json::from_value(json!({
            "medals": {"X": {"gold": 2}, "Y": 3}
        }))
        .unwrap();
        let entries = raw.medal_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, Some("X"));
    }

    #[test]
    fn standing_shape_detection() {
        assert_eq!(
            StandingShape::detect(&obj(json!({"Team": "X", "Pts": "9"}))),
            Some(StandingShape::Abbreviated)
        );
        assert_eq!(
            StandingShape::detect(&obj(json!({"Team": "X", "Won": 3}))),
            Some(StandingShape::Spelled)
        );
        assert_eq!(
            StandingShape::detect(&obj(json!({"team": "X", "points": 1}))),
            Some(StandingShape::Lowercase)
        );
        assert_eq!(StandingShape::detect(&obj(json!({"Team": "X", "Score": 1}))), None);
    }

    #[test]
    fn knockout_shape_detection() {
        assert_eq!(
            KnockoutShape::detect(&obj(json!({"Team 1": "A"}))),
            Some(KnockoutShape::Spaced)
        );
        assert_eq!(
            KnockoutShape::detect(&obj(json!({"Team2": "B"}))),
            Some(KnockoutShape::Compact)
        );
        assert_eq!(
            KnockoutShape::detect(&obj(json!({"teamA": "A", "teamB": "B"}))),
            Some(KnockoutShape::Bracket)
        );
        assert_eq!(KnockoutShape::detect(&obj(json!({"Home": "A"}))), None);
    }

    #[test]
    fn knockout_shape_without_teams_uses_other_columns() {
        assert_eq!(
            KnockoutShape::detect(&obj(json!({"round": "Final", "match": 2}))),
            Some(KnockoutShape::Bracket)
        );
        assert_eq!(
            KnockoutShape::detect(&obj(json!({"Round": "Final", "Winner": "A"}))),
            Some(KnockoutShape::Spaced)
        );
        assert_eq!(
            KnockoutShape::detect(&obj(json!({"round": "Final", "Team2": "B"}))),
            Some(KnockoutShape::Compact)
        );
    }
}
