mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod scheduling;
mod state;

use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use tracing::{info, warn};

use crate::config::Config;
use crate::scheduling::date_parser::ConversationalDateParser;
use crate::scheduling::fetcher::CalComClient;
use crate::state::SchedulerState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    if dotenv().is_err() {
        info!("No .env file, using process environment");
    }

    let config = Config::from_env()?;
    let client = CalComClient::new(&config)?;

    // Load slots before accepting requests. A failure is not fatal: the
    // service still converts dates and reports readiness as failed.
    let state = web::Data::new(SchedulerState::new(config.slot_zone, config.display_zone));
    if state.initialize(&client).await.is_err() {
        warn!("Starting with empty slot buckets");
    }

    let parser = web::Data::new(ConversationalDateParser::new(config.source_zone));
    let client = web::Data::new(client);

    info!("Server running at http://{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(parser.clone())
            .app_data(client.clone())
            .configure(routes::init)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
