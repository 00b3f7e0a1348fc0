use crate::client::{ApiError, ApiResult};
use crate::normalize::sport_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// How a sport's standings are presented. Fixed per deployment, never
/// inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SportFormat {
    League,
    Knockout,
}

impl SportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            SportFormat::League => "League",
            SportFormat::Knockout => "Knockout",
        }
    }
}

/// The festival's sport configuration: which sports exist, how each one is
/// presented, and how knockout rounds are ordered.
///
/// All keys are sport keys (trimmed, lower-cased). Load a deployment-specific
/// table with [`SportCatalog::load`]; [`SportCatalog::default`] is the
/// festival's built-in table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SportCatalog {
    /// Display names, in selector order.
    pub sports: Vec<String>,
    pub formats: BTreeMap<String, SportFormat>,
    /// Sports whose knockout rows are listed flat instead of as a bracket.
    pub match_list: BTreeSet<String>,
    /// League sports whose table is split by the `Group` column.
    pub grouped: BTreeSet<String>,
    /// Bracket rounds, earliest first.
    pub round_order: Vec<String>,
    /// Round label of the third-place match, drawn apart from the bracket.
    pub bronze_round: String,
}

impl Default for SportCatalog {
    fn default() -> Self {
        use SportFormat::{Knockout, League};

        let formats = [
            ("cricket", League),
            ("football", League),
            ("basketball", League),
            ("volleyball", League),
            ("athletics", League),
            ("tennis", Knockout),
            ("table tennis", Knockout),
            ("badminton", Knockout),
            ("carrom", Knockout),
            ("pool", Knockout),
            ("chess", Knockout),
        ];

        Self {
            sports: [
                "Cricket",
                "Football",
                "Basketball",
                "Volleyball",
                "Tennis",
                "Table Tennis",
                "Athletics",
                "Pool",
                "Badminton",
                "Chess",
            ]
            .map(String::from)
            .to_vec(),
            formats: formats.into_iter().map(|(k, f)| (k.to_owned(), f)).collect(),
            match_list: ["cricket", "football", "volleyball", "basketball"]
                .map(String::from)
                .into(),
            grouped: ["cricket"].map(String::from).into(),
            round_order: ["Round of 16", "Quarterfinal", "Semifinal", "Final"]
                .map(String::from)
                .to_vec(),
            bronze_round: "Bronze".to_owned(),
        }
    }
}

impl SportCatalog {
    /// Read a catalog from a JSON file. Missing fields take the built-in values.
    pub fn load(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::NotFound(format!("could not read {}: {e}", path.display())))?;
        Self::from_json_str(&content)
            .map_err(|e| ApiError::Other(format!("invalid catalog json at {}: {e}", path.display())))
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let catalog: SportCatalog = serde_json::from_str(json)?;
        Ok(catalog.normalized())
    }

    /// Re-key every lookup table by sport key so hand-edited files may use any case.
    pub fn normalized(self) -> Self {
        Self {
            formats: self.formats.into_iter().map(|(k, f)| (sport_key(&k), f)).collect(),
            match_list: self.match_list.iter().map(|k| sport_key(k)).collect(),
            grouped: self.grouped.iter().map(|k| sport_key(k)).collect(),
            ..self
        }
    }

    /// Format for a sport name or key. Unknown sports have no format and
    /// render nothing.
    pub fn classify(&self, sport: &str) -> Option<SportFormat> {
        self.formats.get(&sport_key(sport)).copied()
    }

    pub fn shows_match_list(&self, sport: &str) -> bool {
        self.match_list.contains(&sport_key(sport))
    }

    pub fn is_grouped(&self, sport: &str) -> bool {
        self.grouped.contains(&sport_key(sport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_classifies_festival_sports() {
        let c = SportCatalog::default();
        assert_eq!(c.classify("Cricket"), Some(SportFormat::League));
        assert_eq!(c.classify(" TABLE TENNIS "), Some(SportFormat::Knockout));
        assert_eq!(c.classify("chess"), Some(SportFormat::Knockout));
        assert_eq!(c.classify("kabaddi"), None);
        assert!(c.shows_match_list("Football"));
        assert!(!c.shows_match_list("Tennis"));
        assert!(c.is_grouped("cricket"));
    }

    #[test]
    fn every_listed_sport_has_a_format() {
        let c = SportCatalog::default();
        for sport in &c.sports {
            assert!(c.classify(sport).is_some(), "{sport} missing from format table");
        }
    }

    #[test]
    fn json_catalog_is_normalized_and_partial() {
        let c = SportCatalog::from_json_str(
            r#"{"sports": ["Kabaddi"], "formats": {" Kabaddi": "LEAGUE", "Squash": "KNOCKOUT"}}"#,
        )
        .unwrap();
        assert_eq!(c.sports, vec!["Kabaddi".to_string()]);
        assert_eq!(c.classify("kabaddi"), Some(SportFormat::League));
        assert_eq!(c.classify("SQUASH"), Some(SportFormat::Knockout));
        assert_eq!(c.classify("cricket"), None);
        assert_eq!(c.bronze_round, "Bronze");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SportCatalog::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
