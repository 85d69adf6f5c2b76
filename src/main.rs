mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod query;
mod repositories;
mod routes;
mod services;
mod utils;
mod validators;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use mongodb::bson::doc;
use mongodb::Client;

use crate::config::Config;
use crate::middleware::create_api_rate_limiter_config;
use crate::repositories::BootcampRepository;
use crate::services::{BootcampService, FileService, Geocoder};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env before the logger so RUST_LOG can come from it
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&config.mongodb_uri)
        .await
        .map_err(|e| startup_error("Failed to connect to MongoDB", e))?;

    let db = client.database(&config.database_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| startup_error("Failed to ping MongoDB", e))?;
    info!("Connected to MongoDB successfully!");

    let repository = Arc::new(BootcampRepository::new(&db));
    repository
        .create_indexes()
        .await
        .map_err(|e| startup_error("Failed to create indexes", e))?;

    // Initialize services
    let geocoder = Arc::new(
        Geocoder::new(config.geocoder.clone())
            .map_err(|e| startup_error("Failed to build geocoder client", e))?,
    );
    let file_service = FileService::new(config.upload.clone());
    let bootcamp_service = web::Data::new(BootcampService::new(
        repository,
        geocoder,
        file_service,
    ));

    let rate_limit = create_api_rate_limiter_config()
        .ok_or_else(|| startup_error("Invalid rate limiter configuration", "zero limit"))?;

    // Start HTTP server
    let server_addr = format!("{}:{}", config.server_host, config.server_port);
    let config = web::Data::new(config);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        let rate_limit = rate_limit.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
            .app_data(config.clone())
            .app_data(bootcamp_service.clone())
            .configure(move |cfg| routes::configure_routes(cfg, &rate_limit))
    })
    .bind(&server_addr)?
    .run()
    .await
}
