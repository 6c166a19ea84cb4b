use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::api_error::ApiError;
use crate::auth::JwtService;
use crate::db::DbPool;
use crate::models::admin::{Admin, LoginRequest, LoginResponse};

#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DbPool, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// Verify admin credentials and issue an access token. The same error is
    /// returned for an unknown username and a wrong password.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = $1",
        )
        .bind(&req.username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(admin) = admin else {
            warn!(username = %req.username, "Login attempt for unknown admin");
            return Err(ApiError::unauthorized("Invalid username or password"));
        };

        let password_ok = bcrypt::verify(&req.password, &admin.password_hash).map_err(|e| {
            error!(error = %e, "Password verification failed");
            ApiError::InternalServerError
        })?;

        if !password_ok {
            warn!(username = %req.username, "Login attempt with wrong password");
            return Err(ApiError::unauthorized("Invalid username or password"));
        }

        let token = self.jwt_service.issue(admin.id, &admin.username).map_err(|e| {
            error!(error = %e, "Token issuance failed");
            ApiError::InternalServerError
        })?;

        info!(username = %admin.username, "Admin logged in");

        Ok(LoginResponse {
            token,
            username: admin.username,
        })
    }

    /// Create the admin account on startup, or reset its password if the
    /// account already exists.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ApiError::InternalServerError
        })?;

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match existing {
            Some(id) => {
                sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
                    .bind(id)
                    .bind(&password_hash)
                    .execute(&self.pool)
                    .await?;
                info!(username = %username, "Admin account exists, password updated");
            }
            None => {
                sqlx::query(
                    "INSERT INTO admins (id, username, password_hash) VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(username)
                .bind(&password_hash)
                .execute(&self.pool)
                .await?;
                info!(username = %username, "Admin account created");
            }
        }

        Ok(())
    }
}
