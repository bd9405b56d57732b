use actix_web::{App, HttpServer, web};
use common::env_config::Config;
use finance_server::cors;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup(&config.log_file).expect("Failed to set up logger");
    }

    // init db connection and catalog tables
    let pool = db::setup(&config.database_url, config.is_production())
        .await
        .expect("Failed to set up database");

    log::info!(
        "Starting server on {}:{} ({} workers, {})",
        config.server_host,
        config.server_port,
        config.num_workers,
        config.environment
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .configure(finance_server::configure)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
