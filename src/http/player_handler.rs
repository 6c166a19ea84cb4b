use actix_web::{guard, web, HttpResponse, Responder};
use tracing::info;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::auth::{AdminAuth, JwtService};
use crate::models::player::{CreatePlayerRequest, UpdatePlayerRequest};
use crate::service::player_service::PlayerService;

/// GET /api/players
pub async fn list_players(
    player_service: web::Data<PlayerService>,
) -> Result<impl Responder, ApiError> {
    let players = player_service.list_players().await?;
    Ok(HttpResponse::Ok().json(players))
}

/// GET /api/players/team/{team_id}
pub async fn list_by_team(
    player_service: web::Data<PlayerService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let team_id = path.into_inner();
    let players = player_service.list_by_team(team_id).await?;
    Ok(HttpResponse::Ok().json(players))
}

/// GET /api/players/{id}
pub async fn get_player(
    player_service: web::Data<PlayerService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let player = player_service.get_player(id).await?;
    Ok(HttpResponse::Ok().json(player))
}

/// POST /api/players (admin)
pub async fn create_player(
    player_service: web::Data<PlayerService>,
    req: web::Json<CreatePlayerRequest>,
) -> Result<impl Responder, ApiError> {
    info!(name = %req.name, team_id = %req.team_id, "Received create player request");

    let created = player_service.create_player(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/players/{id} (admin)
pub async fn update_player(
    player_service: web::Data<PlayerService>,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePlayerRequest>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    info!(player_id = %id, "Received update player request");

    let updated = player_service.update_player(id, req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/players/{id} (admin)
pub async fn delete_player(
    player_service: web::Data<PlayerService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    info!(player_id = %id, "Received delete player request");

    let deleted = player_service.delete_player(id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "msg": "Player deleted",
        "player": deleted,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, jwt_service: &JwtService) {
    cfg.service(
        web::scope("/players")
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .route(web::get().to(list_players)),
            )
            .route("/team/{team_id}", web::get().to(list_by_team))
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .route(web::get().to(get_player)),
            )
            .service(
                web::resource("")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::post().to(create_player)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::put().to(update_player))
                    .route(web::delete().to(delete_player)),
            ),
    );
}
