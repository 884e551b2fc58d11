// ==========================================
// footy-stats - team API
// ==========================================
// Admin screen pass-throughs for teams; validation of caller input
// happens here, data access stays in the repository.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::entities::Team;
use crate::domain::types::TeamType;
use crate::repository::TeamRepository;
use chrono::Utc;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// TeamApi
// ==========================================
pub struct TeamApi {
    repo: TeamRepository,
}

impl TeamApi {
    pub fn new(db_path: &str) -> ApiResult<Self> {
        Ok(Self {
            repo: TeamRepository::new(db_path)?,
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            repo: TeamRepository::from_connection(conn),
        }
    }

    /// Create a team
    ///
    /// # Returns
    /// - Ok(Team): the created entity, id generated here
    /// - Err(ApiError::InvalidInput): empty name or unknown team type
    pub fn create_team(
        &self,
        name: &str,
        team_type: &str,
        city: Option<String>,
        founded_year: Option<i32>,
    ) -> ApiResult<Team> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("team name must not be empty".to_string()));
        }

        let team_type = TeamType::parse(team_type).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "invalid team_type '{team_type}' (expected internal or club)"
            ))
        })?;

        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            team_type,
            city,
            founded_year,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&team)?;
        Ok(team)
    }

    pub fn list_teams(&self) -> ApiResult<Vec<Team>> {
        Ok(self.repo.list_all()?)
    }

    pub fn get_team(&self, id: &str) -> ApiResult<Team> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("team {id} not found")))
    }

    /// Update the mutable attributes of a team
    pub fn update_team(
        &self,
        id: &str,
        name: &str,
        team_type: &str,
        city: Option<String>,
        founded_year: Option<i32>,
    ) -> ApiResult<Team> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("team name must not be empty".to_string()));
        }
        let team_type = TeamType::parse(team_type).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "invalid team_type '{team_type}' (expected internal or club)"
            ))
        })?;

        let mut team = self.get_team(id)?;
        team.name = name.to_string();
        team.team_type = team_type;
        team.city = city;
        team.founded_year = founded_year;
        team.updated_at = Utc::now();

        self.repo.update(&team)?;
        Ok(team)
    }

    pub fn delete_team(&self, id: &str) -> ApiResult<()> {
        Ok(self.repo.delete(id)?)
    }
}
