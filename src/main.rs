use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travelbuddy_api::config::AppConfig;
use travelbuddy_api::models::trip::Language;
use travelbuddy_api::services::gemini_service::GeminiGateway;
use travelbuddy_api::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        log::warn!("GOOGLE_API_KEY is not set; plan generation will fail until it is configured");
    }
    if !config.font_path.is_file() {
        log::warn!(
            "Itinerary font {} not found; PDF export will fail",
            config.font_path.display()
        );
    }
    for language in [Language::Hindi, Language::Bengali, Language::Telugu] {
        if let Some(path) = config.script_fonts.for_language(language) {
            if !path.is_file() {
                log::warn!(
                    "Font {} not found; {} itineraries cannot be exported",
                    path.display(),
                    language.display_name()
                );
            }
        }
    }

    let host = config.host.clone();
    let port = config.port;
    let gateway = Arc::new(GeminiGateway::from_config(&config));
    let state = web::Data::new(AppState::new(config, gateway));

    log::info!("Starting TravelBuddy API on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(travelbuddy_api::configure)
    })
    // Generation is a single blocking request/response cycle per session.
    .workers(1)
    .bind((host, port))?
    .run()
    .await
}
