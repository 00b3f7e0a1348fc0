use crate::{MedalRow, StandingRow};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// League order: points desc, then wins desc, then losses asc.
pub fn league_order(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.won.cmp(&a.won))
        .then_with(|| a.lost.cmp(&b.lost))
}

/// Stable sort into league order; fully tied rows keep sheet order.
pub fn rank_league(rows: &mut [StandingRow]) {
    rows.sort_by(league_order);
}

/// Split ranked rows by their group label. Named groups come first, sorted by
/// label; rows without a group are returned last under the empty label.
/// Each group keeps the league order of the input.
pub fn split_groups(rows: &[StandingRow]) -> Vec<(String, Vec<StandingRow>)> {
    let mut named: BTreeMap<&str, Vec<StandingRow>> = BTreeMap::new();
    let mut ungrouped = Vec::new();
    for row in rows {
        if row.group.is_empty() {
            ungrouped.push(row.clone());
        } else {
            named.entry(row.group.as_str()).or_default().push(row.clone());
        }
    }

    let mut groups: Vec<(String, Vec<StandingRow>)> = named
        .into_iter()
        .map(|(label, mut rows)| {
            rank_league(&mut rows);
            (label.to_owned(), rows)
        })
        .collect();
    if !ungrouped.is_empty() {
        rank_league(&mut ungrouped);
        groups.push((String::new(), ungrouped));
    }
    groups
}

/// User-selectable medal table order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedalSort {
    /// Gold desc, then total desc.
    #[default]
    Gold,
    /// Total desc, then gold desc.
    Total,
}

impl MedalSort {
    pub fn toggle(self) -> Self {
        match self {
            MedalSort::Gold => MedalSort::Total,
            MedalSort::Total => MedalSort::Gold,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MedalSort::Gold => "Sort by Gold",
            MedalSort::Total => "Sort by Total",
        }
    }

    pub fn order(&self, a: &MedalRow, b: &MedalRow) -> Ordering {
        match self {
            MedalSort::Gold => b.gold.cmp(&a.gold).then_with(|| b.total.cmp(&a.total)),
            MedalSort::Total => b.total.cmp(&a.total).then_with(|| b.gold.cmp(&a.gold)),
        }
    }
}

pub fn rank_medals(rows: &mut [MedalRow], sort: MedalSort) {
    rows.sort_by(|a, b| sort.order(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team: &str, won: u32, lost: u32, points: u32) -> StandingRow {
        StandingRow {
            team: team.into(),
            played: won + lost,
            won,
            lost,
            points,
            ..Default::default()
        }
    }

    fn teams(rows: &[StandingRow]) -> Vec<&str> {
        rows.iter().map(|r| r.team.as_str()).collect()
    }

    #[test]
    fn points_dominate_wins_and_losses() {
        let mut rows = vec![row("B", 9, 0, 4), row("A", 0, 9, 5)];
        rank_league(&mut rows);
        assert_eq!(teams(&rows), vec!["A", "B"]);
    }

    #[test]
    fn equal_points_break_on_wins_before_losses() {
        // A has more losses but more wins: wins are checked first.
        let mut rows = vec![row("B", 3, 0, 6), row("A", 5, 4, 6)];
        rank_league(&mut rows);
        assert_eq!(teams(&rows), vec!["A", "B"]);
    }

    #[test]
    fn equal_points_and_wins_break_on_fewer_losses() {
        let mut rows = vec![row("B", 2, 3, 6), row("A", 2, 1, 6)];
        rank_league(&mut rows);
        assert_eq!(teams(&rows), vec!["A", "B"]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let mut rows = vec![row("C", 1, 1, 3), row("A", 1, 1, 3), row("B", 1, 1, 3)];
        rank_league(&mut rows);
        assert_eq!(teams(&rows), vec!["C", "A", "B"]);
    }

    #[test]
    fn groups_split_and_ranked() {
        let mut rows = vec![
            StandingRow { group: "B".into(), ..row("b1", 1, 0, 2) },
            StandingRow { group: "A".into(), ..row("a1", 0, 1, 0) },
            row("loose", 0, 0, 0),
            StandingRow { group: "A".into(), ..row("a2", 1, 0, 2) },
        ];
        rank_league(&mut rows);
        let groups = split_groups(&rows);
        let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", ""]);
        assert_eq!(teams(&groups[0].1), vec!["a2", "a1"]);
        assert_eq!(teams(&groups[2].1), vec!["loose"]);
    }

    #[test]
    fn medal_sort_by_gold_then_total() {
        let mut rows = vec![MedalRow::new("A", 1, 5, 5), MedalRow::new("B", 2, 0, 0)];
        rank_medals(&mut rows, MedalSort::Gold);
        assert_eq!(rows[0].team, "B");
        rank_medals(&mut rows, MedalSort::Total);
        assert_eq!(rows[0].team, "A");
    }

    #[test]
    fn medal_ties_fall_back_to_secondary_key() {
        let mut rows = vec![MedalRow::new("A", 1, 0, 0), MedalRow::new("B", 1, 1, 0)];
        rank_medals(&mut rows, MedalSort::Gold);
        assert_eq!(rows[0].team, "B");

        let mut rows = vec![MedalRow::new("A", 0, 2, 0), MedalRow::new("B", 1, 1, 0)];
        rank_medals(&mut rows, MedalSort::Total);
        assert_eq!(rows[0].team, "B");
    }

    #[test]
    fn medal_sort_defaults_to_gold_and_toggles() {
        assert_eq!(MedalSort::default(), MedalSort::Gold);
        assert_eq!(MedalSort::Gold.toggle(), MedalSort::Total);
        assert_eq!(MedalSort::Total.toggle(), MedalSort::Gold);
    }
}
