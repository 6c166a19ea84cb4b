use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api_error::ApiError;
use crate::db::DbPool;
use crate::models::tournament::{
    CreateTournamentRequest, Tournament, TournamentDetailRow, TournamentResponse,
    UpdateTournamentRequest,
};

const TOURNAMENT_DETAIL_SELECT: &str = r#"
SELECT t.id, t.name, t.sport, t.year, t.location,
       t.champion_id, tc.name AS champion_name,
       t.runner_up_id, tr.name AS runner_up_name,
       t.player_of_tournament_id, pt.name AS player_of_tournament_name,
       t.created_at, t.updated_at
FROM tournaments t
LEFT JOIN teams tc ON tc.id = t.champion_id
LEFT JOIN teams tr ON tr.id = t.runner_up_id
LEFT JOIN players pt ON pt.id = t.player_of_tournament_id
"#;

#[derive(Clone)]
pub struct TournamentService {
    pool: DbPool,
}

impl TournamentService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_tournaments(&self) -> Result<Vec<TournamentResponse>, ApiError> {
        let rows = sqlx::query_as::<_, TournamentDetailRow>(&format!(
            "{TOURNAMENT_DETAIL_SELECT} ORDER BY t.created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TournamentResponse::from).collect())
    }

    pub async fn get_tournament(&self, id: Uuid) -> Result<TournamentResponse, ApiError> {
        let row = sqlx::query_as::<_, TournamentDetailRow>(&format!(
            "{TOURNAMENT_DETAIL_SELECT} WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Tournament not found"))?;

        Ok(row.into())
    }

    pub async fn create_tournament(
        &self,
        req: CreateTournamentRequest,
    ) -> Result<TournamentResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let created = sqlx::query_as::<_, Tournament>(
            r#"
            INSERT INTO tournaments (id, name, sport, year, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, sport, year, location, champion_id, runner_up_id,
                      player_of_tournament_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(req.sport.as_str())
        .bind(req.year)
        .bind(req.location.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        info!(tournament_id = %created.id, name = %created.name, "Tournament created");

        self.get_tournament(created.id).await
    }

    pub async fn update_tournament(
        &self,
        id: Uuid,
        req: UpdateTournamentRequest,
    ) -> Result<TournamentResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE tournaments
            SET name = COALESCE($2, name),
                sport = COALESCE($3, sport),
                year = COALESCE($4, year),
                location = COALESCE($5, location),
                updated_at = now()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(req.name)
        .bind(req.sport.map(|s| s.as_str()))
        .bind(req.year)
        .bind(req.location)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Tournament not found"))?;

        info!(tournament_id = %updated, "Tournament updated");

        self.get_tournament(id).await
    }

    pub async fn delete_tournament(&self, id: Uuid) -> Result<Tournament, ApiError> {
        let deleted = sqlx::query_as::<_, Tournament>(
            r#"
            DELETE FROM tournaments WHERE id = $1
            RETURNING id, name, sport, year, location, champion_id, runner_up_id,
                      player_of_tournament_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Tournament not found"))?;

        info!(tournament_id = %deleted.id, name = %deleted.name, "Tournament deleted");

        Ok(deleted)
    }
}
