mod auth;
mod database;
mod error;
mod hospital;
mod models;
mod pharmacy;
mod protocol;
mod schema;
mod settings;
mod user;
mod utils;

#[cfg(test)]
mod tests;

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    middleware, web, App, HttpRequest, HttpResponse, HttpServer,
};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, PgConnection};
use tracing_subscriber::EnvFilter;

use crate::{auth::TokenService, error::ApiError, protocol::ApiResponse, settings::Settings};

type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("Failed to load settings")?;
    let tokens = web::Data::new(TokenService::from_settings(&settings.auth)?);

    let manager = ConnectionManager::<PgConnection>::new(settings.database.url());
    let pool = r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create pool")?;
    let pool = web::Data::new(pool);

    let bind = (settings.server.host.clone(), settings.server.port);
    tracing::info!(
        host = %bind.0,
        port = bind.1,
        environment = %settings.environment,
        "starting server"
    );
    let settings = web::Data::new(settings);

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(tokens.clone())
            .app_data(settings.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
            .default_service(web::route().to(not_found))
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health))
                // user
                .service(web::scope("/users").configure(user::config))
                // hospital
                .service(web::scope("/hospitals").configure(hospital::config))
                // pharmacy
                .service(web::scope("/pharmacies").configure(pharmacy::config)),
        );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message("Server is running"))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::failure("Route not found"))
}

fn json_error(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("Invalid request body: {}", err)).into()
}

fn query_error(err: QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("Invalid query string: {}", err)).into()
}

fn path_error(err: PathError, _: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("Invalid path parameter: {}", err)).into()
}
