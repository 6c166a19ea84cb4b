use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::player::PlayerSummary;
use crate::models::team::TeamSummary;

/// The sports this format supports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sport {
    Cricket,
    Football,
    Badminton,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Cricket => "Cricket",
            Sport::Football => "Football",
            Sport::Badminton => "Badminton",
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
    pub year: i32,
    pub location: String,
    pub champion_id: Option<Uuid>,
    pub runner_up_id: Option<Uuid>,
    pub player_of_tournament_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tournament row joined with the names of its referenced records.
/// Name columns are null when the referent no longer exists.
#[derive(Debug, Clone, FromRow)]
pub struct TournamentDetailRow {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
    pub year: i32,
    pub location: String,
    pub champion_id: Option<Uuid>,
    pub champion_name: Option<String>,
    pub runner_up_id: Option<Uuid>,
    pub runner_up_name: Option<String>,
    pub player_of_tournament_id: Option<Uuid>,
    pub player_of_tournament_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResponse {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
    pub year: i32,
    pub location: String,
    pub champion: Option<TeamSummary>,
    pub runner_up: Option<TeamSummary>,
    pub player_of_tournament: Option<PlayerSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TournamentDetailRow> for TournamentResponse {
    fn from(row: TournamentDetailRow) -> Self {
        let champion = match (row.champion_id, row.champion_name) {
            (Some(id), Some(name)) => Some(TeamSummary { id, name }),
            _ => None,
        };
        let runner_up = match (row.runner_up_id, row.runner_up_name) {
            (Some(id), Some(name)) => Some(TeamSummary { id, name }),
            _ => None,
        };
        let player_of_tournament = match (row.player_of_tournament_id, row.player_of_tournament_name)
        {
            (Some(id), Some(name)) => Some(PlayerSummary { id, name }),
            _ => None,
        };

        TournamentResponse {
            id: row.id,
            name: row.name,
            sport: row.sport,
            year: row.year,
            location: row.location,
            champion,
            runner_up,
            player_of_tournament,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub sport: Sport,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTournamentRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub sport: Option<Sport>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_serialization() {
        assert_eq!(serde_json::to_string(&Sport::Cricket).unwrap(), "\"Cricket\"");
        assert_eq!(serde_json::to_string(&Sport::Football).unwrap(), "\"Football\"");
        assert_eq!(serde_json::to_string(&Sport::Badminton).unwrap(), "\"Badminton\"");
    }

    #[test]
    fn test_sport_rejects_unknown_value() {
        assert!(serde_json::from_str::<Sport>("\"Chess\"").is_err());
        assert!(serde_json::from_str::<Sport>("\"cricket\"").is_err());
    }

    #[test]
    fn test_create_tournament_request_deserialization() {
        let json = r#"{"name":"Premier Cup","sport":"Cricket","year":2024,"location":"Dhaka"}"#;
        let req: CreateTournamentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Premier Cup");
        assert_eq!(req.sport, Sport::Cricket);
        assert_eq!(req.year, 2024);
        assert_eq!(req.location.as_deref(), Some("Dhaka"));
    }

    #[test]
    fn test_detail_row_with_dangling_champion() {
        let row = TournamentDetailRow {
            id: Uuid::new_v4(),
            name: "Premier Cup".to_string(),
            sport: "Cricket".to_string(),
            year: 2024,
            location: String::new(),
            champion_id: Some(Uuid::new_v4()),
            champion_name: None,
            runner_up_id: None,
            runner_up_name: None,
            player_of_tournament_id: None,
            player_of_tournament_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response: TournamentResponse = row.into();
        assert!(response.champion.is_none());
        assert!(response.runner_up.is_none());
    }
}
