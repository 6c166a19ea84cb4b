use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::team::TeamSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    pub role: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PlayerDetailRow {
    pub id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    pub team_name: Option<String>,
    pub role: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: Uuid,
    pub name: String,
    pub team: Option<TeamSummary>,
    pub role: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlayerDetailRow> for PlayerResponse {
    fn from(row: PlayerDetailRow) -> Self {
        let team = row
            .team_name
            .map(|name| TeamSummary { id: row.team_id, name });

        PlayerResponse {
            id: row.id,
            name: row.name,
            team,
            role: row.role,
            photo: row.photo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub team_id: Uuid,
    #[validate(length(max = 100))]
    pub role: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub team_id: Option<Uuid>,
    #[validate(length(max = 100))]
    pub role: Option<String>,
    pub photo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_player_request_defaults() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"name":"Rahim","team_id":"{}"}}"#, id);
        let req: CreatePlayerRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.name, "Rahim");
        assert!(req.role.is_none());
        assert!(req.photo.is_none());
    }
}
