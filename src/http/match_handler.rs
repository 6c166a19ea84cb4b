use actix_web::{guard, web, HttpResponse, Responder};
use tracing::info;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::auth::{AdminAuth, JwtService};
use crate::models::match_model::{CreateMatchRequest, UpdateMatchRequest};
use crate::service::match_service::MatchService;

/// GET /api/matches
pub async fn list_matches(
    match_service: web::Data<MatchService>,
) -> Result<impl Responder, ApiError> {
    let matches = match_service.list_matches().await?;
    Ok(HttpResponse::Ok().json(matches))
}

/// GET /api/matches/tournament/{tournament_id}
/// All matches of one tournament, in creation order.
pub async fn list_by_tournament(
    match_service: web::Data<MatchService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let tournament_id = path.into_inner();
    let matches = match_service.list_by_tournament(tournament_id).await?;
    Ok(HttpResponse::Ok().json(matches))
}

/// GET /api/matches/{id}
pub async fn get_match(
    match_service: web::Data<MatchService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let match_id = path.into_inner();
    let found = match_service.get_match(match_id).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// POST /api/matches (admin)
pub async fn create_match(
    match_service: web::Data<MatchService>,
    req: web::Json<CreateMatchRequest>,
) -> Result<impl Responder, ApiError> {
    info!(
        tournament_id = %req.tournament_id,
        round = %req.round,
        "Received create match request"
    );

    let created = match_service.create_match(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/matches/{id} (admin)
/// Record, change, or clear the match winner.
pub async fn update_match(
    match_service: web::Data<MatchService>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateMatchRequest>,
) -> Result<impl Responder, ApiError> {
    let match_id = path.into_inner();

    info!(
        match_id = %match_id,
        winner_id = ?req.winner_id,
        "Received update match request"
    );

    let updated = match_service
        .update_winner(match_id, req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/matches/{id} (admin)
pub async fn delete_match(
    match_service: web::Data<MatchService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let match_id = path.into_inner();

    info!(match_id = %match_id, "Received delete match request");

    let deleted = match_service.delete_match(match_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "msg": "Match deleted",
        "match": deleted,
    })))
}

/// Public reads are registered with a GET guard so the admin-guarded
/// resources on the same paths receive the remaining methods.
pub fn configure_routes(cfg: &mut web::ServiceConfig, jwt_service: &JwtService) {
    cfg.service(
        web::scope("/matches")
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .route(web::get().to(list_matches)),
            )
            .route(
                "/tournament/{tournament_id}",
                web::get().to(list_by_tournament),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .route(web::get().to(get_match)),
            )
            .service(
                web::resource("")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::post().to(create_match)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::put().to(update_match))
                    .route(web::delete().to(delete_match)),
            ),
    );
}
