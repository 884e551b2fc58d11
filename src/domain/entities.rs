// ==========================================
// footy-stats - persisted entities
// ==========================================
// One struct per table; repositories read and write these,
// engines and APIs treat them as plain data.
// ==========================================

use crate::domain::types::{Position, TeamType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Team
// ==========================================
// Natural key: name (unique, case preserved as entered)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    // ===== identity =====
    pub id: String,   // UUID
    pub name: String, // natural key

    // ===== attributes =====
    pub team_type: TeamType,
    pub city: Option<String>,
    pub founded_year: Option<i32>,

    // ===== audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// Player
// ==========================================
// Natural key: (name, team_id) - the same name may appear in two squads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    // ===== identity =====
    pub id: String,
    pub name: String,
    pub team_id: String, // FK -> teams

    // ===== attributes =====
    pub position: Option<Position>,
    pub jersey_number: Option<i32>,

    // ===== audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// Match
// ==========================================
// Natural key: (match_date, home_team_id, away_team_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    // ===== identity =====
    pub id: String,
    pub match_date: NaiveDate,
    pub home_team_id: String, // FK -> teams
    pub away_team_id: String, // FK -> teams

    // ===== result (NULL until played) =====
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,

    // ===== audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// 'H'/'A'/'D' outcome, None while either score is missing
    pub fn outcome(&self) -> Option<char> {
        let (Some(home), Some(away)) = (self.home_score, self.away_score) else {
            return None;
        };
        Some(if home > away {
            'H'
        } else if home < away {
            'A'
        } else {
            'D'
        })
    }
}

// ==========================================
// PlayerStat
// ==========================================
// One line per player per matchday.
// Natural key: (player_id, match_date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStat {
    // ===== identity =====
    pub id: String,
    pub player_id: String, // FK -> players
    pub match_date: NaiveDate,

    // ===== counters =====
    pub goals: i32,
    pub assists: i32,
    pub minutes_played: Option<i32>,
    pub clean_sheet: bool,

    // ===== audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_with(home: Option<i32>, away: Option<i32>) -> Match {
        Match {
            id: "m1".to_string(),
            match_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            home_team_id: "t1".to_string(),
            away_team_id: "t2".to_string(),
            home_score: home,
            away_score: away,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_match_outcome() {
        assert_eq!(match_with(Some(2), Some(1)).outcome(), Some('H'));
        assert_eq!(match_with(Some(0), Some(3)).outcome(), Some('A'));
        assert_eq!(match_with(Some(1), Some(1)).outcome(), Some('D'));
        assert_eq!(match_with(Some(1), None).outcome(), None);
    }
}
