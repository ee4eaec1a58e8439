//! Application entry point building the Actix-Web server.
use std::env;

use muchtodo_api::{logging, run, services::config::load_config};

#[actix_web::main]
async fn main() {
    // Env file read by the loader; the process environment still wins.
    let env_file = env::var("ENV_FILE").unwrap_or_else(|_| ".".into());

    let server_config = match load_config(&env_file) {
        Ok(server_config) => server_config,
        Err(err) => {
            env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
            log::error!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    logging::init(&server_config);
    log::debug!("Loaded config: {:?}", server_config);

    match run(server_config).await {
        Ok(_) => log::info!("Server stopped"),
        Err(err) => {
            log::error!("Error starting server: {}", err);
            std::process::exit(1);
        }
    }
}
