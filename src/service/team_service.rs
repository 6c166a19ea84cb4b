use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api_error::ApiError;
use crate::db::DbPool;
use crate::models::team::{
    CreateTeamRequest, Team, TeamDetailRow, TeamResponse, UpdateTeamRequest,
};

const TEAM_DETAIL_SELECT: &str = r#"
SELECT tm.id, tm.name, tm.tournament_id, t.name AS tournament_name,
       tm.created_at, tm.updated_at
FROM teams tm
LEFT JOIN tournaments t ON t.id = tm.tournament_id
"#;

#[derive(Clone)]
pub struct TeamService {
    pool: DbPool,
}

impl TeamService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamResponse>, ApiError> {
        let rows = sqlx::query_as::<_, TeamDetailRow>(&format!(
            "{TEAM_DETAIL_SELECT} ORDER BY tm.created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TeamResponse::from).collect())
    }

    pub async fn list_by_tournament(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<TeamResponse>, ApiError> {
        let rows = sqlx::query_as::<_, TeamDetailRow>(&format!(
            "{TEAM_DETAIL_SELECT} WHERE tm.tournament_id = $1 ORDER BY tm.created_at"
        ))
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TeamResponse::from).collect())
    }

    pub async fn get_team(&self, id: Uuid) -> Result<TeamResponse, ApiError> {
        let row = sqlx::query_as::<_, TeamDetailRow>(&format!(
            "{TEAM_DETAIL_SELECT} WHERE tm.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Team not found"))?;

        Ok(row.into())
    }

    pub async fn create_team(&self, req: CreateTeamRequest) -> Result<TeamResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let created = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (id, name, tournament_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, tournament_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(req.tournament_id)
        .fetch_one(&self.pool)
        .await?;

        info!(team_id = %created.id, name = %created.name, "Team created");

        self.get_team(created.id).await
    }

    pub async fn update_team(
        &self,
        id: Uuid,
        req: UpdateTeamRequest,
    ) -> Result<TeamResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                tournament_id = COALESCE($3, tournament_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(req.name)
        .bind(req.tournament_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Team not found"))?;

        info!(team_id = %id, "Team updated");

        self.get_team(id).await
    }

    /// Deletion does not cascade: players and matches referencing this team
    /// keep their id and read as absent from then on.
    pub async fn delete_team(&self, id: Uuid) -> Result<Team, ApiError> {
        let deleted = sqlx::query_as::<_, Team>(
            r#"
            DELETE FROM teams WHERE id = $1
            RETURNING id, name, tournament_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Team not found"))?;

        info!(team_id = %deleted.id, name = %deleted.name, "Team deleted");

        Ok(deleted)
    }
}
