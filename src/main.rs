use actix_web::{web, App, HttpServer};
use std::io;
use tokio::signal;

mod api_error;
mod auth;
mod bracket;
mod config;
mod db;
mod http;
mod middleware;
mod models;
mod service;
mod telemetry;

use crate::auth::JwtService;
use crate::config::Config;
use crate::db::create_pool;
use crate::middleware::cors_middleware;
use crate::service::{AuthService, MatchService, PlayerService, TeamService, TournamentService};
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env().expect("Failed to load configuration");

    init_telemetry();

    let db_pool = create_pool(&config)
        .await
        .expect("Failed to create database pool");

    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(&config.auth);
    let auth_service = AuthService::new(db_pool.clone(), jwt_service.clone());
    let tournament_service = TournamentService::new(db_pool.clone());
    let team_service = TeamService::new(db_pool.clone());
    let player_service = PlayerService::new(db_pool.clone());
    let match_service = MatchService::new(db_pool.clone());

    match (&config.auth.admin_username, &config.auth.admin_password) {
        (Some(username), Some(password)) => {
            auth_service
                .ensure_admin(username, password)
                .await
                .expect("Failed to bootstrap admin account");
        }
        _ => tracing::warn!(
            "ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin bootstrap"
        ),
    }

    tracing::info!(
        "Starting knockout backend server on {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        let jwt = jwt_service.clone();
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(tournament_service.clone()))
            .app_data(web::Data::new(team_service.clone()))
            .app_data(web::Data::new(player_service.clone()))
            .app_data(web::Data::new(match_service.clone()))
            .wrap(cors_middleware())
            .wrap(actix_web::middleware::Logger::default())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(http::health::health_check))
                    .configure(|cfg| http::auth_handler::configure_routes(cfg, &jwt))
                    .configure(|cfg| http::tournament_handler::configure_routes(cfg, &jwt))
                    .configure(|cfg| http::team_handler::configure_routes(cfg, &jwt))
                    .configure(|cfg| http::player_handler::configure_routes(cfg, &jwt))
                    .configure(|cfg| http::match_handler::configure_routes(cfg, &jwt)),
            )
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run();

    // Graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for shutdown signal");
        tracing::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}
