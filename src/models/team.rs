use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::tournament::TournamentSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub tournament_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal team reference embedded in match and tournament responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct TeamDetailRow {
    pub id: Uuid,
    pub name: String,
    pub tournament_id: Uuid,
    pub tournament_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub tournament: Option<TournamentSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamDetailRow> for TeamResponse {
    fn from(row: TeamDetailRow) -> Self {
        let tournament = row
            .tournament_name
            .map(|name| TournamentSummary { id: row.tournament_id, name });

        TeamResponse {
            id: row.id,
            name: row.name,
            tournament,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub tournament_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub tournament_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_request_deserialization() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"name":"Lions","tournament_id":"{}"}}"#, id);
        let req: CreateTeamRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.name, "Lions");
        assert_eq!(req.tournament_id, id);
    }

    #[test]
    fn test_detail_row_with_dangling_tournament() {
        let row = TeamDetailRow {
            id: Uuid::new_v4(),
            name: "Lions".to_string(),
            tournament_id: Uuid::new_v4(),
            tournament_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response: TeamResponse = row.into();
        assert!(response.tournament.is_none());
    }
}
