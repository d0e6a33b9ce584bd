//! Default rule set for the tracker's tables

use super::rules::{FieldRule, TableRules, Validator};
use crate::tables;

const TEAMS: [&str; 2] = ["AEK", "Real"];
const PLAYER_TEAMS: [&str; 3] = ["AEK", "Real", "Ehemalige"];
const POSITIONS: [&str; 12] = [
    "TH", "IV", "LV", "RV", "ZDM", "ZM", "ZOM", "LM", "RM", "LF", "RF", "ST",
];
const BAN_TYPES: [&str; 3] = ["Gelb-Rote Karte", "Rote Karte", "Verletzung"];

impl Validator {
    /// Validator with the rules for players, matches, bans, transactions and finances
    pub fn with_defaults() -> Self {
        Self::new()
            .with_table(tables::PLAYERS, player_rules())
            .with_table(tables::MATCHES, match_rules())
            .with_table(tables::BANS, ban_rules())
            .with_table(tables::TRANSACTIONS, transaction_rules())
            .with_table(tables::FINANCES, finance_rules())
    }
}

fn player_rules() -> TableRules {
    TableRules::new()
        .field("name", FieldRule::text().required().max_length(100))
        .field("team", FieldRule::text().required().one_of(PLAYER_TEAMS))
        .field("position", FieldRule::text().one_of(POSITIONS))
        .field("value", FieldRule::number().min(0.0))
}

fn match_rules() -> TableRules {
    TableRules::new()
        .field("date", FieldRule::text().required())
        .field("teama", FieldRule::text().required().max_length(100))
        .field("teamb", FieldRule::text().required().max_length(100))
        .field("goalsa", FieldRule::number().required().min(0.0).max(99.0))
        .field("goalsb", FieldRule::number().required().min(0.0).max(99.0))
}

fn ban_rules() -> TableRules {
    TableRules::new()
        .field("player_id", FieldRule::number().required())
        .field("team", FieldRule::text().required().one_of(TEAMS))
        .field("type", FieldRule::text().required().one_of(BAN_TYPES))
        .field("totalgames", FieldRule::number().required().min(1.0).max(10.0))
        .field("matchesserved", FieldRule::number().min(0.0))
        .field("reason", FieldRule::text().max_length(500))
}

fn transaction_rules() -> TableRules {
    TableRules::new()
        .field("date", FieldRule::text().required())
        .field("type", FieldRule::text().required().max_length(100))
        .field("team", FieldRule::text().required().one_of(TEAMS))
        .field("amount", FieldRule::number().required())
}

fn finance_rules() -> TableRules {
    TableRules::new()
        .field("team", FieldRule::text().required().one_of(TEAMS))
        .field("balance", FieldRule::number())
        .field("debt", FieldRule::number().min(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(table: &str, value: serde_json::Value) -> Vec<String> {
        let record = value.as_object().cloned().unwrap();
        Validator::with_defaults().validate(table, &record).errors
    }

    #[test]
    fn test_player_without_name() {
        assert_eq!(
            validate("players", json!({"name": "", "team": "AEK"})),
            vec!["name ist erforderlich"]
        );
    }

    #[test]
    fn test_complete_player() {
        assert!(validate(
            "players",
            json!({"name": "Kante", "team": "Ehemalige", "position": "ZDM", "value": 8})
        )
        .is_empty());
    }

    #[test]
    fn test_match_goals_must_be_numbers() {
        let errors = validate(
            "matches",
            json!({"date": "2024-05-01", "teama": "AEK", "teamb": "Real", "goalsa": "3", "goalsb": 1}),
        );
        assert_eq!(errors, vec!["goalsa muss eine Zahl sein"]);
    }

    #[test]
    fn test_ban_rules() {
        let errors = validate(
            "bans",
            json!({"player_id": 4, "team": "AEK", "type": "Blaue Karte", "totalgames": 0}),
        );
        assert_eq!(
            errors,
            vec![
                "type muss einer der folgenden Werte sein: Gelb-Rote Karte, Rote Karte, Verletzung",
                "totalgames muss mindestens 1 sein",
            ]
        );
    }

    #[test]
    fn test_tables_without_rules() {
        assert!(validate("managers", json!({"anything": 1})).is_empty());
        assert!(validate("spieler_des_spiels", json!({})).is_empty());
    }
}
