use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api_error::ApiError;
use crate::db::DbPool;
use crate::models::player::{
    CreatePlayerRequest, Player, PlayerDetailRow, PlayerResponse, UpdatePlayerRequest,
};

const PLAYER_DETAIL_SELECT: &str = r#"
SELECT p.id, p.name, p.team_id, tm.name AS team_name, p.role, p.photo,
       p.created_at, p.updated_at
FROM players p
LEFT JOIN teams tm ON tm.id = p.team_id
"#;

#[derive(Clone)]
pub struct PlayerService {
    pool: DbPool,
}

impl PlayerService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_players(&self) -> Result<Vec<PlayerResponse>, ApiError> {
        let rows = sqlx::query_as::<_, PlayerDetailRow>(&format!(
            "{PLAYER_DETAIL_SELECT} ORDER BY p.created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlayerResponse::from).collect())
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<PlayerResponse>, ApiError> {
        let rows = sqlx::query_as::<_, PlayerDetailRow>(&format!(
            "{PLAYER_DETAIL_SELECT} WHERE p.team_id = $1 ORDER BY p.created_at"
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlayerResponse::from).collect())
    }

    pub async fn get_player(&self, id: Uuid) -> Result<PlayerResponse, ApiError> {
        let row = sqlx::query_as::<_, PlayerDetailRow>(&format!(
            "{PLAYER_DETAIL_SELECT} WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Player not found"))?;

        Ok(row.into())
    }

    pub async fn create_player(
        &self,
        req: CreatePlayerRequest,
    ) -> Result<PlayerResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let created = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (id, name, team_id, role, photo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, team_id, role, photo, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(req.team_id)
        .bind(req.role.unwrap_or_else(|| "Player".to_string()))
        .bind(req.photo)
        .fetch_one(&self.pool)
        .await?;

        info!(player_id = %created.id, name = %created.name, "Player created");

        self.get_player(created.id).await
    }

    pub async fn update_player(
        &self,
        id: Uuid,
        req: UpdatePlayerRequest,
    ) -> Result<PlayerResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE players
            SET name = COALESCE($2, name),
                team_id = COALESCE($3, team_id),
                role = COALESCE($4, role),
                photo = COALESCE($5, photo),
                updated_at = now()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(req.name)
        .bind(req.team_id)
        .bind(req.role)
        .bind(req.photo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Player not found"))?;

        info!(player_id = %id, "Player updated");

        self.get_player(id).await
    }

    pub async fn delete_player(&self, id: Uuid) -> Result<Player, ApiError> {
        let deleted = sqlx::query_as::<_, Player>(
            r#"
            DELETE FROM players WHERE id = $1
            RETURNING id, name, team_id, role, photo, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Player not found"))?;

        info!(player_id = %deleted.id, name = %deleted.name, "Player deleted");

        Ok(deleted)
    }
}
