//! Table names used by the tracker

pub const MATCHES: &str = "matches";
pub const PLAYERS: &str = "players";
pub const BANS: &str = "bans";
pub const FINANCES: &str = "finances";
pub const TRANSACTIONS: &str = "transactions";
/// Player-of-the-match awards
pub const PLAYER_OF_THE_MATCH: &str = "spieler_des_spiels";
pub const MANAGERS: &str = "managers";

/// Match fields stored as JSON-encoded goal scorer lists
pub const GOAL_LIST_FIELDS: [&str; 2] = ["goalslista", "goalslistb"];
