use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::info;

use crate::api_error::ApiError;
use crate::auth::middleware::ClaimsExt;
use crate::auth::{AdminAuth, JwtService};
use crate::models::admin::LoginRequest;
use crate::service::auth_service::AuthService;

/// POST /api/auth/login
/// Verify admin credentials and issue an access token.
pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<impl Responder, ApiError> {
    info!(username = %request.username, "Login request received");

    let response = auth_service.login(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/auth/me
/// Return the authenticated admin's claims. Lets clients verify a stored
/// token instead of keeping a separate logged-in flag.
pub async fn me(req: HttpRequest) -> Result<impl Responder, ApiError> {
    let admin_id = req
        .admin_id()
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;
    let claims = req
        .claims()
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": admin_id,
        "username": claims.username,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, jwt_service: &JwtService) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .service(
                web::resource("/me")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::get().to(me)),
            ),
    );
}
