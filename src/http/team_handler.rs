use actix_web::{guard, web, HttpResponse, Responder};
use tracing::info;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::auth::{AdminAuth, JwtService};
use crate::models::team::{CreateTeamRequest, UpdateTeamRequest};
use crate::service::team_service::TeamService;

/// GET /api/teams
pub async fn list_teams(
    team_service: web::Data<TeamService>,
) -> Result<impl Responder, ApiError> {
    let teams = team_service.list_teams().await?;
    Ok(HttpResponse::Ok().json(teams))
}

/// GET /api/teams/tournament/{tournament_id}
pub async fn list_by_tournament(
    team_service: web::Data<TeamService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let tournament_id = path.into_inner();
    let teams = team_service.list_by_tournament(tournament_id).await?;
    Ok(HttpResponse::Ok().json(teams))
}

/// GET /api/teams/{id}
pub async fn get_team(
    team_service: web::Data<TeamService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let team = team_service.get_team(id).await?;
    Ok(HttpResponse::Ok().json(team))
}

/// POST /api/teams (admin)
pub async fn create_team(
    team_service: web::Data<TeamService>,
    req: web::Json<CreateTeamRequest>,
) -> Result<impl Responder, ApiError> {
    info!(name = %req.name, tournament_id = %req.tournament_id, "Received create team request");

    let created = team_service.create_team(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/teams/{id} (admin)
pub async fn update_team(
    team_service: web::Data<TeamService>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTeamRequest>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    info!(team_id = %id, "Received update team request");

    let updated = team_service.update_team(id, req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/teams/{id} (admin)
pub async fn delete_team(
    team_service: web::Data<TeamService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    info!(team_id = %id, "Received delete team request");

    let deleted = team_service.delete_team(id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "msg": "Team deleted",
        "team": deleted,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, jwt_service: &JwtService) {
    cfg.service(
        web::scope("/teams")
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .route(web::get().to(list_teams)),
            )
            .route(
                "/tournament/{tournament_id}",
                web::get().to(list_by_tournament),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Get())
                    .route(web::get().to(get_team)),
            )
            .service(
                web::resource("")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::post().to(create_team)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(AdminAuth::new(jwt_service.clone()))
                    .route(web::put().to(update_team))
                    .route(web::delete().to(delete_team)),
            ),
    );
}
