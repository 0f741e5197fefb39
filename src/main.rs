use std::io::{Error, ErrorKind};
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::web::{get, Data};
use actix_web::{App, HttpServer};

use tokio::signal::unix::{signal, SignalKind};

use chrono::Utc;
use log::info;

mod api;

use crate::api::catalog::{categories, games};
use crate::api::sitemap::sitemap;
use crate::api::{health, AppState};

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().json().init();

    // @NOTE: server configuration
    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("SERVER_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid SERVER_PORT"))?;

    // @NOTE: store appstate
    let appstate = Arc::new(AppState::new()?);

    // @NOTE: spawn new http server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(appstate.prometheus().clone())
            .wrap(Logger::default())
            .route("/health", get().to(health))
            .route("/api/games", get().to(games))
            .route("/api/categories", get().to(categories))
            .route("/sitemap.xml", get().to(sitemap))
            .app_data(Data::new(appstate.clone()))
    })
    .bind((host.as_str(), port))
    .map_err(|e| {
        Error::new(
            ErrorKind::AddrInUse,
            format!("Failed to bind to {}:{}: {}", host, port, e),
        )
    })?
    .shutdown_timeout(30)
    .run();

    let handler = server.handle();

    info!(
        "Server started at {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    );

    // @NOTE: graceful shutdown
    actix_rt::spawn(async move {
        let mut sigint = signal(SignalKind::interrupt()).unwrap();
        let mut sigterm = signal(SignalKind::terminate()).unwrap();

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }

        info!("Shutting down...");
        handler.stop(true).await;
        info!("Server is downed gracefully...");
    });

    server.await
}
