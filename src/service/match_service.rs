use tracing::{info, warn};
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::db::DbPool;
use crate::models::match_model::{
    CreateMatchRequest, Match, MatchDetailRow, MatchResponse, Round, UpdateMatchRequest,
};

const MATCH_DETAIL_SELECT: &str = r#"
SELECT m.id, m.tournament_id,
       m.team_a_id, ta.name AS team_a_name,
       m.team_b_id, tb.name AS team_b_name,
       m.winner_id, tw.name AS winner_name,
       m.round, m.created_at, m.updated_at
FROM matches m
LEFT JOIN teams ta ON ta.id = m.team_a_id
LEFT JOIN teams tb ON tb.id = m.team_b_id
LEFT JOIN teams tw ON tw.id = m.winner_id
"#;

/// Match lifecycle service. Enforces participant and round consistency on
/// every mutation and keeps the owning tournament's champion/runner-up in
/// step with its final match.
#[derive(Clone)]
pub struct MatchService {
    pool: DbPool,
}

impl MatchService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub async fn list_matches(&self) -> Result<Vec<MatchResponse>, ApiError> {
        let rows = sqlx::query_as::<_, MatchDetailRow>(&format!(
            "{MATCH_DETAIL_SELECT} ORDER BY m.created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MatchResponse::from).collect())
    }

    /// All matches of one tournament in creation order, suitable as direct
    /// input to `bracket::organize_by_round`.
    pub async fn list_by_tournament(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<MatchResponse>, ApiError> {
        let rows = sqlx::query_as::<_, MatchDetailRow>(&format!(
            "{MATCH_DETAIL_SELECT} WHERE m.tournament_id = $1 ORDER BY m.created_at"
        ))
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MatchResponse::from).collect())
    }

    pub async fn get_match(&self, match_id: Uuid) -> Result<MatchResponse, ApiError> {
        self.fetch_detail(match_id).await
    }

    async fn fetch_detail(&self, match_id: Uuid) -> Result<MatchResponse, ApiError> {
        let row = sqlx::query_as::<_, MatchDetailRow>(&format!(
            "{MATCH_DETAIL_SELECT} WHERE m.id = $1"
        ))
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Match not found"))?;

        Ok(row.into())
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    pub async fn create_match(&self, req: CreateMatchRequest) -> Result<MatchResponse, ApiError> {
        validate_participants(req.team_a_id, req.team_b_id)?;
        if let Some(winner_id) = req.winner_id {
            validate_winner_membership(winner_id, req.team_a_id, req.team_b_id)?;
        }

        // A tournament holds at most one final match, so the derived
        // champion/runner-up state is never ambiguous.
        if req.round == Round::Final {
            let existing: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM matches WHERE tournament_id = $1 AND round = $2",
            )
            .bind(req.tournament_id)
            .bind(Round::Final.as_str())
            .fetch_one(&self.pool)
            .await?;

            if existing > 0 {
                return Err(ApiError::conflict(
                    "Tournament already has a final match",
                ));
            }
        }

        let created = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (id, tournament_id, team_a_id, team_b_id, winner_id, round)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, tournament_id, team_a_id, team_b_id, winner_id, round,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.tournament_id)
        .bind(req.team_a_id)
        .bind(req.team_b_id)
        .bind(req.winner_id)
        .bind(req.round.as_str())
        .fetch_one(&self.pool)
        .await?;

        info!(
            match_id = %created.id,
            tournament_id = %created.tournament_id,
            round = %created.round,
            "Match created"
        );

        if req.round == Round::Final && created.winner_id.is_some() {
            self.propagate_final_outcome(&created).await;
        }

        self.fetch_detail(created.id).await
    }

    // =========================================================================
    // UPDATE WINNER
    // =========================================================================

    pub async fn update_winner(
        &self,
        match_id: Uuid,
        req: UpdateMatchRequest,
    ) -> Result<MatchResponse, ApiError> {
        let existing = sqlx::query_as::<_, Match>(
            r#"
            SELECT id, tournament_id, team_a_id, team_b_id, winner_id, round,
                   created_at, updated_at
            FROM matches WHERE id = $1
            "#,
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Match not found"))?;

        if let Some(winner_id) = req.winner_id {
            validate_winner_membership(winner_id, existing.team_a_id, existing.team_b_id)?;
        }

        let updated = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches SET winner_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, tournament_id, team_a_id, team_b_id, winner_id, round,
                      created_at, updated_at
            "#,
        )
        .bind(match_id)
        .bind(req.winner_id)
        .fetch_one(&self.pool)
        .await?;

        info!(
            match_id = %updated.id,
            winner_id = ?updated.winner_id,
            "Match winner updated"
        );

        if Round::parse(&updated.round) == Some(Round::Final) {
            if updated.winner_id.is_some() {
                self.propagate_final_outcome(&updated).await;
            } else {
                // The final lost its recorded winner, so the tournament no
                // longer has a derivable champion.
                self.clear_tournament_outcome(updated.tournament_id).await;
            }
        }

        self.fetch_detail(match_id).await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    pub async fn delete_match(&self, match_id: Uuid) -> Result<Match, ApiError> {
        let deleted = sqlx::query_as::<_, Match>(
            r#"
            DELETE FROM matches WHERE id = $1
            RETURNING id, tournament_id, team_a_id, team_b_id, winner_id, round,
                      created_at, updated_at
            "#,
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Match not found"))?;

        info!(
            match_id = %deleted.id,
            tournament_id = %deleted.tournament_id,
            round = %deleted.round,
            "Match deleted"
        );

        if Round::parse(&deleted.round) == Some(Round::Final) {
            self.clear_tournament_outcome(deleted.tournament_id).await;
        }

        Ok(deleted)
    }

    // =========================================================================
    // WINNER PROPAGATION
    // =========================================================================

    /// Write champion/runner-up derived from a decided final onto the owning
    /// tournament. Best-effort: the match mutation has already committed, so
    /// a failure here is logged and swallowed rather than surfaced.
    async fn propagate_final_outcome(&self, m: &Match) {
        let Some(winner_id) = m.winner_id else { return };
        let (champion_id, runner_up_id) = final_outcome(winner_id, m.team_a_id, m.team_b_id);

        let result = sqlx::query(
            r#"
            UPDATE tournaments
            SET champion_id = $2, runner_up_id = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(m.tournament_id)
        .bind(champion_id)
        .bind(runner_up_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => info!(
                tournament_id = %m.tournament_id,
                champion_id = %champion_id,
                runner_up_id = %runner_up_id,
                "Tournament outcome propagated from final match"
            ),
            Err(e) => warn!(
                error = %e,
                tournament_id = %m.tournament_id,
                "Failed to propagate tournament outcome, derived state stale until next propagation"
            ),
        }
    }

    /// Clear the tournament's derived outcome. Same best-effort policy as
    /// `propagate_final_outcome`.
    async fn clear_tournament_outcome(&self, tournament_id: Uuid) {
        let result = sqlx::query(
            r#"
            UPDATE tournaments
            SET champion_id = NULL, runner_up_id = NULL, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(tournament_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => info!(tournament_id = %tournament_id, "Tournament outcome cleared"),
            Err(e) => warn!(
                error = %e,
                tournament_id = %tournament_id,
                "Failed to clear tournament outcome"
            ),
        }
    }
}

/// Both participants of a match must be distinct teams.
fn validate_participants(team_a_id: Uuid, team_b_id: Uuid) -> Result<(), ApiError> {
    if team_a_id == team_b_id {
        return Err(ApiError::validation(
            "teamA and teamB must be different teams",
        ));
    }
    Ok(())
}

/// A recorded winner must be one of the two participants.
fn validate_winner_membership(
    winner_id: Uuid,
    team_a_id: Uuid,
    team_b_id: Uuid,
) -> Result<(), ApiError> {
    if winner_id != team_a_id && winner_id != team_b_id {
        return Err(ApiError::validation(
            "winner must be one of the match participants",
        ));
    }
    Ok(())
}

/// Champion is the recorded winner, runner-up the other participant.
fn final_outcome(winner_id: Uuid, team_a_id: Uuid, team_b_id: Uuid) -> (Uuid, Uuid) {
    if winner_id == team_a_id {
        (team_a_id, team_b_id)
    } else {
        (team_b_id, team_a_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants_must_differ() {
        let team = Uuid::new_v4();
        assert!(matches!(
            validate_participants(team, team),
            Err(ApiError::ValidationError(_))
        ));
        assert!(validate_participants(team, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_winner_must_be_a_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(validate_winner_membership(a, a, b).is_ok());
        assert!(validate_winner_membership(b, a, b).is_ok());
        assert!(matches!(
            validate_winner_membership(Uuid::new_v4(), a, b),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn test_final_outcome_winner_team_a() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(final_outcome(a, a, b), (a, b));
    }

    #[test]
    fn test_final_outcome_winner_team_b() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(final_outcome(b, a, b), (b, a));
    }
}
