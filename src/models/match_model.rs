use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::team::TeamSummary;

/// Bracket rounds, in progression order. The wire and storage tokens are the
/// literal labels `QF`, `SF`, `FINAL`, matched case-sensitively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Round {
    #[serde(rename = "QF")]
    QuarterFinal,
    #[serde(rename = "SF")]
    SemiFinal,
    #[serde(rename = "FINAL")]
    Final,
}

impl Round {
    pub fn as_str(&self) -> &'static str {
        match self {
            Round::QuarterFinal => "QF",
            Round::SemiFinal => "SF",
            Round::Final => "FINAL",
        }
    }

    /// Exact-match parse of a stored round label. Returns `None` for
    /// anything that is not one of the three recognized tokens.
    pub fn parse(label: &str) -> Option<Round> {
        match label {
            "QF" => Some(Round::QuarterFinal),
            "SF" => Some(Round::SemiFinal),
            "FINAL" => Some(Round::Final),
            _ => None,
        }
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub winner_id: Option<Uuid>,
    pub round: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Match row joined with the names of both participants and the winner.
/// Name columns are null when the referenced team no longer exists.
#[derive(Debug, Clone, FromRow)]
pub struct MatchDetailRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_a_name: Option<String>,
    pub team_b_id: Uuid,
    pub team_b_name: Option<String>,
    pub winner_id: Option<Uuid>,
    pub winner_name: Option<String>,
    pub round: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub team_a: Option<TeamSummary>,
    pub team_b: Option<TeamSummary>,
    pub winner: Option<TeamSummary>,
    pub round: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchDetailRow> for MatchResponse {
    fn from(row: MatchDetailRow) -> Self {
        let team_a = row
            .team_a_name
            .map(|name| TeamSummary { id: row.team_a_id, name });
        let team_b = row
            .team_b_name
            .map(|name| TeamSummary { id: row.team_b_id, name });
        let winner = match (row.winner_id, row.winner_name) {
            (Some(id), Some(name)) => Some(TeamSummary { id, name }),
            _ => None,
        };

        MatchResponse {
            id: row.id,
            tournament_id: row.tournament_id,
            team_a,
            team_b,
            winner,
            round: row.round,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub round: Round,
    pub winner_id: Option<Uuid>,
}

/// Winner update. `winner_id: null` (or omitted) clears the recorded winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMatchRequest {
    pub winner_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tokens() {
        assert_eq!(Round::QuarterFinal.as_str(), "QF");
        assert_eq!(Round::SemiFinal.as_str(), "SF");
        assert_eq!(Round::Final.as_str(), "FINAL");
    }

    #[test]
    fn test_round_parse_exact_match() {
        assert_eq!(Round::parse("QF"), Some(Round::QuarterFinal));
        assert_eq!(Round::parse("SF"), Some(Round::SemiFinal));
        assert_eq!(Round::parse("FINAL"), Some(Round::Final));

        assert_eq!(Round::parse("qf"), None);
        assert_eq!(Round::parse("Final"), None);
        assert_eq!(Round::parse("SEMI"), None);
        assert_eq!(Round::parse(""), None);
    }

    #[test]
    fn test_round_serde_round_trip() {
        assert_eq!(serde_json::to_string(&Round::Final).unwrap(), "\"FINAL\"");
        let parsed: Round = serde_json::from_str("\"SF\"").unwrap();
        assert_eq!(parsed, Round::SemiFinal);
    }

    #[test]
    fn test_create_match_request_rejects_unknown_round() {
        let t = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let json = format!(
            r#"{{"tournament_id":"{}","team_a_id":"{}","team_b_id":"{}","round":"SEMI"}}"#,
            t, a, b
        );
        assert!(serde_json::from_str::<CreateMatchRequest>(&json).is_err());
    }

    #[test]
    fn test_create_match_request_without_winner() {
        let t = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let json = format!(
            r#"{{"tournament_id":"{}","team_a_id":"{}","team_b_id":"{}","round":"QF"}}"#,
            t, a, b
        );
        let req: CreateMatchRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.round, Round::QuarterFinal);
        assert!(req.winner_id.is_none());
    }

    #[test]
    fn test_detail_row_with_dangling_team() {
        let row = MatchDetailRow {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            team_a_id: Uuid::new_v4(),
            team_a_name: None,
            team_b_id: Uuid::new_v4(),
            team_b_name: Some("Tigers".to_string()),
            winner_id: None,
            winner_name: None,
            round: "QF".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response: MatchResponse = row.into();
        assert!(response.team_a.is_none());
        assert_eq!(response.team_b.unwrap().name, "Tigers");
        assert!(response.winner.is_none());
    }
}
