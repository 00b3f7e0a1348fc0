pub mod bracket;
pub mod catalog;
pub mod client;
pub mod normalize;
pub mod rank;
pub mod view;
pub mod wire;

use serde::{Deserialize, Serialize};

pub use catalog::{SportCatalog, SportFormat};
pub use rank::MedalSort;
pub use view::{FestData, KnockoutView, LeagueGroup, SportView};

// ---------------------------------------------------------------------------
// Domain types: canonical records, independent of spreadsheet spellings
// ---------------------------------------------------------------------------

/// One team's line in a league table.
///
/// Points, wins and losses are supplied independently by the sheet; nothing
/// here derives one from the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team: String,
    pub group: String, // "" when the sheet has no group column
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
}

/// A single knockout fixture. An empty `result` means not yet decided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    pub round: String,
    pub ordinal: u32,
    pub team1: String,
    pub team2: String,
    pub score1: Option<String>,
    pub score2: Option<String>,
    pub result: String,
}

impl KnockoutMatch {
    pub fn is_decided(&self) -> bool {
        !self.result.is_empty()
    }

    /// Exact string comparison against the declared winner. A winner column
    /// spelled differently from the team column never highlights.
    pub fn is_winner(&self, team: &str) -> bool {
        self.is_decided() && self.result == team
    }

    pub fn team1_label(&self) -> &str {
        bracket::team_label(&self.team1)
    }

    pub fn team2_label(&self) -> &str {
        bracket::team_label(&self.team2)
    }
}

/// Medal counts for one team. `total` is always gold + silver + bronze,
/// saturating at `u32::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRow {
    pub team: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

impl MedalRow {
    pub fn new(team: impl Into<String>, gold: u32, silver: u32, bronze: u32) -> Self {
        Self {
            team: team.into(),
            gold,
            silver,
            bronze,
            total: gold.saturating_add(silver).saturating_add(bronze),
        }
    }

    /// Fold another entry for the same team into this one.
    pub fn absorb(&mut self, other: &MedalRow) {
        self.gold = self.gold.saturating_add(other.gold);
        self.silver = self.silver.saturating_add(other.silver);
        self.bronze = self.bronze.saturating_add(other.bronze);
        self.total = self.gold.saturating_add(self.silver).saturating_add(self.bronze);
    }
}

/// A played (or scheduled) fixture from the schedule sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub sport: String,
    pub team_a: String,
    pub team_b: String,
    pub score_a: u32,
    pub score_b: u32,
    pub time: String,
    pub venue: String,
    pub referee: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TeamA,
    TeamB,
    Tie,
}

impl ResultRow {
    pub fn outcome(&self) -> Outcome {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Outcome::TeamA,
            std::cmp::Ordering::Less => Outcome::TeamB,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn time_label(&self) -> &str {
        or_default(&self.time, "Not provided")
    }

    pub fn venue_label(&self) -> &str {
        or_default(&self.venue, "Not provided")
    }

    pub fn referee_label(&self) -> &str {
        or_default(&self.referee, "Not provided")
    }

    pub fn notes_label(&self) -> &str {
        or_default(&self.notes, "No additional details")
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
