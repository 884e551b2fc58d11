// ==========================================
// footy-stats - domain type definitions
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Team type
// ==========================================
// Stored lower-case; the import pipeline checks the same tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamType {
    Internal, // in-house / five-a-side squad
    Club,     // external club
}

impl TeamType {
    /// Database representation (lower-case token)
    pub fn as_db_str(&self) -> &'static str {
        match self {
            TeamType::Internal => "internal",
            TeamType::Club => "club",
        }
    }

    /// Parse the database token; unknown tokens yield None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "internal" => Some(TeamType::Internal),
            "club" => Some(TeamType::Club),
            _ => None,
        }
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

// ==========================================
// Player position
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    GK, // goalkeeper
    DF, // defender
    MF, // midfielder
    FW, // forward
}

impl Position {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GK" => Some(Position::GK),
            "DF" => Some(Position::DF),
            "MF" => Some(Position::MF),
            "FW" => Some(Position::FW),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_type_round_trip() {
        assert_eq!(TeamType::parse("club"), Some(TeamType::Club));
        assert_eq!(TeamType::parse("CLUB"), None);
        assert_eq!(TeamType::Internal.as_db_str(), "internal");
    }

    #[test]
    fn test_position_round_trip() {
        assert_eq!(Position::parse("GK"), Some(Position::GK));
        assert_eq!(Position::parse("gk"), None);
    }
}
