use actix_web::{http::header, web, HttpResponse};

use crate::error::PlanError;
use crate::services::pdf_service::{file_name, ItineraryPdf};
use crate::services::planner_service::lock_session;
use crate::state::AppState;

/*
    GET /api/plan/pdf
*/
pub async fn download_pdf(state: web::Data<AppState>) -> Result<HttpResponse, PlanError> {
    let (plan, destination, language) = {
        let session = lock_session(&state.session);
        let generated = session.plan.as_ref().ok_or(PlanError::NoPlan)?;
        (
            generated.plan.clone(),
            generated.request.destination.clone(),
            generated.request.language,
        )
    };

    let paths = state.config.font_paths(language);
    let exporter = ItineraryPdf::from_files(&paths).map_err(|e| {
        log::error!("Itinerary font unavailable: {}", e);
        PlanError::Export(e.to_string())
    })?;
    let bytes = exporter.render(&plan, &destination).map_err(|e| {
        log::error!("Failed to render itinerary PDF: {}", e);
        PlanError::Export(e.to_string())
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name(&destination)),
        ))
        .body(bytes))
}
