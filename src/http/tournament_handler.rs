use actix_web::{guard, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::auth::{AdminAuth, JwtService};
use crate::bracket::{self, Bracket};
use crate::models::tournament::{CreateTournamentRequest, UpdateTournamentRequest};
use crate::service::match_service::MatchService;
use crate::service::tournament_service::TournamentService;

#[derive(Debug, Serialize)]
pub struct BracketResponse {
    #[serde(flatten)]
    pub rounds: Bracket,
    pub complete: bool,
}

/// GET /api/tournaments
pub async fn list_tournaments(
    tournament_service: web::Data<TournamentService>,
) -> Result<impl Responder, ApiError> {
    let tournaments = tournament_service.list_tournaments().await?;
    Ok(HttpResponse::Ok().json(tournaments))
}

/// GET /api/tournaments/{id}
pub async fn get_tournament(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let tournament = tournament_service.get_tournament(id).await?;
    Ok(HttpResponse::Ok().json(tournament))
}

/// GET /api/tournaments/{id}/bracket
/// The tournament's matches organized by round.
pub async fn get_bracket(
    tournament_service: web::Data<TournamentService>,
    match_service: web::Data<MatchService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    // 404 for an unknown tournament rather than an empty bracket.
    tournament_service.get_tournament(id).await?;

    let matches = match_service.list_by_tournament(id).await?;
    let rounds = bracket::organize_by_round(matches);
    let complete = rounds.is_complete();

    Ok(HttpResponse::Ok().json(BracketResponse { rounds, complete }))
}

/// POST /api/tournaments (admin)
pub async fn create_tournament(
    tournament_service: web::Data<TournamentService>,
    req: web::Json<CreateTournamentRequest>,
) -> Result<impl Responder, ApiError> {
    info!(name = %req.name, sport = %req.sport, "Received create tournament request");

    let created = tournament_service.create_tournament(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/tournaments/{id} (admin)
pub async fn update_tournament(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTournamentRequest>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    info!(tournament_id = %id, "Received update tournament request");

    let updated = tournament_service
        .update_tournament(id, req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/tournaments/{id} (admin)
pub async fn delete_tournament(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    info!(tournament_id = %id, "Received delete tournament request");

    let deleted = tournament_service.delete_tournament(id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "msg": "Tournament deleted",
        "tournament": deleted,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, jwt_service: &JwtService) {
    cfg.service(
        web::scope("/tournaments")
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .route(web::get().to(list_tournaments)),
            )
            .route("/{id}/bracket", web::get().to(get_bracket))
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .route(web::get().to(get_tournament)),
            )
            .service(
                web::resource("")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::post().to(create_tournament)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::put().to(update_tournament))
                    .route(web::delete().to(delete_tournament)),
            ),
    );
}
