use actix_web::web;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

/// Mounts every route. Shared by the server binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .route("/cities", web::get().to(routes::city::get_cities))
                .route("/options", web::get().to(routes::options::get_options))
                .route("/session", web::get().to(routes::plan::session_status))
                .service(
                    web::scope("/plan")
                        .route("", web::post().to(routes::plan::generate))
                        .route("", web::get().to(routes::plan::get_current))
                        .route("/day", web::put().to(routes::plan::select_day))
                        .route("/pdf", web::get().to(routes::export::download_pdf)),
                ),
        );
}
