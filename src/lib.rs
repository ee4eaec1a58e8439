use actix_web::{App, HttpServer, middleware::Logger, web};

pub mod domain;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::models::config::AppConfig;

/// Errors that abort process startup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to start server on {address}")]
    Server {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Start the HTTP server and block until it shuts down.
pub async fn run(server_config: AppConfig) -> Result<(), AppError> {
    let address = server_config.bind_address();
    let server_config = web::Data::new(server_config);

    log::info!("Starting server on {}", address);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors_from_config(&server_config))
            .wrap(Logger::default())
            .app_data(server_config.clone())
            .configure(routes::configure)
    })
    .bind(&address)
    .map_err(|source| AppError::Server {
        address: address.clone(),
        source,
    })?;

    server.run().await.map_err(|source| AppError::Server { address, source })
}
