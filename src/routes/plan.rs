use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::PlanError;
use crate::models::plan::DayFilter;
use crate::models::trip::TripRequest;
use crate::services::planner_service::lock_session;
use crate::services::presenter_service::present;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DaySelection {
    pub day: DayFilter,
}

fn current_view(state: &AppState) -> Result<HttpResponse, PlanError> {
    let session = lock_session(&state.session);
    let generated = session.plan.as_ref().ok_or(PlanError::NoPlan)?;
    Ok(HttpResponse::Ok().json(present(generated, session.selected_day)))
}

/*
    POST /api/plan
*/
pub async fn generate(
    state: web::Data<AppState>,
    input: web::Json<TripRequest>,
) -> Result<HttpResponse, PlanError> {
    state
        .planner
        .generate_into(&state.session, input.into_inner())
        .await?;
    current_view(&state)
}

/*
    GET /api/plan
*/
pub async fn get_current(state: web::Data<AppState>) -> Result<HttpResponse, PlanError> {
    current_view(&state)
}

/*
    PUT /api/plan/day
*/
pub async fn select_day(
    state: web::Data<AppState>,
    input: web::Json<DaySelection>,
) -> Result<HttpResponse, PlanError> {
    {
        let mut session = lock_session(&state.session);
        if session.plan.is_none() {
            return Err(PlanError::NoPlan);
        }
        if session.select_day(input.day) {
            log::debug!("Day filter set to {:?}", input.day);
        }
    }
    current_view(&state)
}

/*
    GET /api/session
*/
pub async fn session_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(lock_session(&state.session).status())
}
