use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;

use crate::models::trip::Language;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let gemini_result = check_gemini(&state);
    health
        .services
        .insert("gemini".to_string(), gemini_result);

    let font_result = check_font(&state.config.font_path);
    health
        .services
        .insert("pdf_font".to_string(), font_result);

    let script_fonts = [
        ("pdf_font_hindi", Language::Hindi),
        ("pdf_font_bengali", Language::Bengali),
        ("pdf_font_telugu", Language::Telugu),
    ];
    for (key, language) in script_fonts {
        if let Some(path) = state.config.script_fonts.for_language(language) {
            health.services.insert(key.to_string(), check_font(path));
        }
    }

    if health.services.values().any(|service| service.status != "ok") {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_gemini(state: &AppState) -> ServiceStatus {
    match state.config.masked_api_key() {
        Some(masked_key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Gemini API key configured ({}), model {}",
                masked_key, state.config.gemini_model
            )),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("GOOGLE_API_KEY not configured".to_string()),
        },
    }
}

fn check_font(path: &Path) -> ServiceStatus {
    if path.is_file() {
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Itinerary font found at {}", path.display())),
        }
    } else {
        ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("Itinerary font missing at {}", path.display())),
        }
    }
}
