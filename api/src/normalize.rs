//! Lenient coercion from sheet rows to canonical records.
//!
//! Nothing in here fails: missing or non-numeric numbers become 0, missing
//! strings become "". Rows whose column spelling is not one of the known
//! shapes in `crate::wire` are logged and normalized to defaults.

use crate::wire::{
    GROUP_KEYS, KnockoutShape, MedalShape, RESULT_KEYS, Record, SPORT_KEYS, StandingShape,
    TEAM_KEYS,
};
use crate::{KnockoutMatch, MedalRow, ResultRow, StandingRow};
use log::warn;
use serde_json::Value;

/// Trimmed, lower-cased sport name used as the lookup key everywhere.
pub fn sport_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Integer coercion: numbers and numeric-looking strings map to their
/// non-negative integer value, everything else to 0.
pub fn coerce_int(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| v.min(u64::from(u32::MAX)) as u32)
            .or_else(|| n.as_f64().map(from_float))
            .unwrap_or(0),
        Some(Value::String(s)) => parse_numeric(s),
        _ => 0,
    }
}

fn parse_numeric(s: &str) -> u32 {
    let t = s.trim();
    if t.is_empty() {
        return 0;
    }
    t.parse::<u32>()
        .ok()
        .or_else(|| t.parse::<f64>().ok().map(from_float))
        .unwrap_or(0)
}

fn from_float(f: f64) -> u32 {
    if f.is_finite() && f > 0.0 {
        f.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// String coercion: strings as-is, numbers rendered, everything else "".
pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Optional score cell: `None` when missing, null or blank.
pub fn coerce_score(value: Option<&Value>) -> Option<String> {
    let s = coerce_string(value);
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_owned()) }
}

fn first<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| record.get(*k))
}

/// Sport key of a row (`Sport` / `sport` column).
pub fn record_sport(record: &Record) -> String {
    sport_key(&coerce_string(first(record, SPORT_KEYS)))
}

pub fn standing_row(record: &Record) -> StandingRow {
    let team = coerce_string(first(record, TEAM_KEYS));
    let group = coerce_string(first(record, GROUP_KEYS)).trim().to_owned();

    let Some(shape) = StandingShape::detect(record) else {
        warn!("standings: unrecognised columns for team {team:?}, defaulting to zeros");
        return StandingRow { team, group, ..Default::default() };
    };

    let k = shape.keys();
    StandingRow {
        team,
        group,
        played: coerce_int(record.get(k.played)),
        won: coerce_int(record.get(k.won)),
        lost: coerce_int(record.get(k.lost)),
        points: coerce_int(record.get(k.points)),
    }
}

pub fn knockout_match(record: &Record) -> KnockoutMatch {
    let Some(shape) = KnockoutShape::detect(record) else {
        warn!("knockout: unrecognised columns {:?}, row kept as TBD", record.keys().collect::<Vec<_>>());
        return KnockoutMatch {
            round: coerce_string(first(record, &["Round", "round"])).trim().to_owned(),
            ..Default::default()
        };
    };

    let k = shape.keys();
    KnockoutMatch {
        round: coerce_string(record.get(k.round)).trim().to_owned(),
        ordinal: coerce_int(record.get(k.ordinal)),
        team1: coerce_string(record.get(k.team1)),
        team2: coerce_string(record.get(k.team2)),
        score1: coerce_score(record.get(k.score1)),
        score2: coerce_score(record.get(k.score2)),
        result: coerce_string(first(record, k.result)),
    }
}

/// `team_hint` is the map key the row was stored under, when the medals
/// section is an object keyed by team.
pub fn medal_row(team_hint: Option<&str>, record: &Record) -> MedalRow {
    let team = team_hint
        .map(str::to_owned)
        .unwrap_or_else(|| coerce_string(first(record, TEAM_KEYS)));

    let Some(shape) = MedalShape::detect(record) else {
        warn!("medals: no medal columns for team {team:?}, defaulting to zeros");
        return MedalRow::new(team, 0, 0, 0);
    };

    let [gold, silver, bronze] = shape.keys();
    MedalRow::new(
        team,
        coerce_int(record.get(gold)),
        coerce_int(record.get(silver)),
        coerce_int(record.get(bronze)),
    )
}

pub fn result_row(record: &Record) -> ResultRow {
    let k = &RESULT_KEYS;
    ResultRow {
        sport: record_sport(record),
        team_a: coerce_string(record.get(k.team_a)),
        team_b: coerce_string(record.get(k.team_b)),
        score_a: coerce_int(record.get(k.score_a)),
        score_b: coerce_int(record.get(k.score_b)),
        time: coerce_string(record.get(k.time)),
        venue: coerce_string(record.get(k.venue)),
        referee: coerce_string(record.get(k.referee)),
        notes: coerce_string(record.get(k.notes)),
    }
}
