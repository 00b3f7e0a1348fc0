use crate::KnockoutMatch;
use crate::normalize::sport_key;
use log::debug;

pub const TBD: &str = "TBD";
pub const NO_SCORE: &str = "–";

/// Display name for a bracket slot; empty slots show as "TBD".
pub fn team_label(name: &str) -> &str {
    if name.trim().is_empty() { TBD } else { name }
}

/// Display score; unrecorded scores show as a dash.
pub fn score_label(score: Option<&str>) -> &str {
    score.unwrap_or(NO_SCORE)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketRound {
    /// Label as first seen in the sheet.
    pub label: String,
    pub matches: Vec<KnockoutMatch>,
}

/// Knockout matches grouped into display rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bracket {
    /// Rounds in display order, earliest first.
    pub rounds: Vec<BracketRound>,
    /// Third-place match, drawn apart from the main tree.
    pub bronze: Option<BracketRound>,
}

impl Bracket {
    /// Group `matches` by round label and order the rounds.
    ///
    /// Round labels compare as sport keys do (trimmed, case-insensitive).
    /// Rounds listed in `round_order` come first in that order; rounds the
    /// order does not mention follow in the order they first appear. The
    /// round matching `bronze_round` is pulled out into [`Bracket::bronze`].
    /// Within a round, matches are sorted by ordinal, keeping sheet order for
    /// equal ordinals.
    pub fn build(matches: &[KnockoutMatch], round_order: &[String], bronze_round: &str) -> Self {
        let mut seen: Vec<(String, BracketRound)> = Vec::new();
        for m in matches {
            let key = sport_key(&m.round);
            match seen.iter_mut().find(|(k, _)| *k == key) {
                Some((_, round)) => round.matches.push(m.clone()),
                None => seen.push((
                    key,
                    BracketRound { label: m.round.trim().to_owned(), matches: vec![m.clone()] },
                )),
            }
        }
        for (_, round) in &mut seen {
            round.matches.sort_by_key(|m| m.ordinal);
        }

        let bronze_key = sport_key(bronze_round);
        let bronze = seen
            .iter()
            .position(|(k, _)| *k == bronze_key)
            .map(|idx| seen.remove(idx).1);

        let mut rounds = Vec::with_capacity(seen.len());
        for label in round_order {
            let key = sport_key(label);
            if let Some(idx) = seen.iter().position(|(k, _)| *k == key) {
                rounds.push(seen.remove(idx).1);
            }
        }
        for (key, round) in seen {
            debug!("bracket: round {key:?} not in configured order, appending");
            rounds.push(round);
        }

        Self { rounds, bronze }
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty() && self.bronze.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(round: &str, ordinal: u32, team1: &str, team2: &str) -> KnockoutMatch {
        KnockoutMatch {
            round: round.into(),
            ordinal,
            team1: team1.into(),
            team2: team2.into(),
            ..Default::default()
        }
    }

    fn order() -> Vec<String> {
        ["Quarterfinal", "Semifinal", "Final"].map(String::from).to_vec()
    }

    #[test]
    fn rounds_follow_configured_order() {
        let matches = vec![
            m("Final", 1, "", ""),
            m("Quarterfinal", 2, "C", "D"),
            m("Semifinal", 1, "A", ""),
            m("Quarterfinal", 1, "A", "B"),
        ];
        let b = Bracket::build(&matches, &order(), "Bronze");
        let labels: Vec<&str> = b.rounds.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Quarterfinal", "Semifinal", "Final"]);
        assert_eq!(b.rounds[0].matches[0].team1, "A");
        assert_eq!(b.rounds[0].matches[1].team1, "C");
        assert_eq!(b.rounds[0].matches.len(), 2);
    }

    #[test]
    fn bronze_round_is_separate() {
        let matches = vec![m("Final", 1, "A", "B"), m("BRONZE", 1, "C", "D")];
        let b = Bracket::build(&matches, &order(), "Bronze");
        assert_eq!(b.rounds.len(), 1);
        let bronze = b.bronze.expect("bronze round");
        assert_eq!(bronze.label, "BRONZE");
        assert_eq!(bronze.matches[0].team1, "C");
    }

    #[test]
    fn round_labels_match_case_insensitively() {
        let matches = vec![m(" semifinal ", 1, "A", "B"), m("SemiFinal", 2, "C", "D")];
        let b = Bracket::build(&matches, &order(), "Bronze");
        assert_eq!(b.rounds.len(), 1);
        assert_eq!(b.rounds[0].label, "semifinal");
        assert_eq!(b.rounds[0].matches.len(), 2);
    }

    #[test]
    fn unknown_rounds_are_appended_in_first_seen_order() {
        let matches = vec![m("Playoff", 1, "", ""), m("Final", 1, "", ""), m("Group", 1, "", "")];
        let b = Bracket::build(&matches, &order(), "Bronze");
        let labels: Vec<&str> = b.rounds.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Final", "Playoff", "Group"]);
    }

    #[test]
    fn equal_ordinals_keep_sheet_order() {
        let matches = vec![m("Final", 0, "X", ""), m("Final", 0, "Y", "")];
        let b = Bracket::build(&matches, &order(), "Bronze");
        assert_eq!(b.rounds[0].matches[0].team1, "X");
    }

    #[test]
    fn placeholders() {
        assert_eq!(team_label(""), "TBD");
        assert_eq!(team_label("  "), "TBD");
        assert_eq!(team_label("A"), "A");
        assert_eq!(score_label(None), "–");
        assert_eq!(score_label(Some("3")), "3");
    }

    #[test]
    fn empty_input_builds_empty_bracket() {
        let b = Bracket::build(&[], &order(), "Bronze");
        assert!(b.is_empty());
        assert!(b.rounds.is_empty() && b.bronze.is_none());
    }
}
