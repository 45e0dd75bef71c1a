use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::PlanError;
use crate::models::city;
use crate::models::plan::{GeneratedPlan, LocationRecord, SectionLayout};
use crate::models::session::PlannerSession;
use crate::models::trip::TripRequest;
use crate::services::gemini_service::PlanGateway;
use crate::services::plan_parser::{extract_locations, parse_plan};
use crate::services::prompt_service::build_prompt;

pub fn lock_session(session: &Mutex<PlannerSession>) -> MutexGuard<'_, PlannerSession> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the session's in-flight flag however the generation ends,
/// including when the request future is dropped.
struct GenerationGuard<'a> {
    session: &'a Mutex<PlannerSession>,
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        lock_session(self.session).end_generation();
    }
}

pub struct TravelPlanner {
    gateway: Arc<dyn PlanGateway>,
}

impl TravelPlanner {
    pub fn new(gateway: Arc<dyn PlanGateway>) -> Self {
        Self { gateway }
    }

    /// Request -> prompt -> gateway -> parsed plan. Nothing is stored.
    pub async fn generate(&self, request: TripRequest) -> Result<GeneratedPlan, PlanError> {
        request.validate().map_err(PlanError::InvalidRequest)?;

        let prompt = build_prompt(&request);
        log::info!(
            "Generating {}-day plan from {} to {}",
            request.duration_days,
            request.origin,
            request.destination
        );

        let raw = self.gateway.generate(&prompt).await.map_err(|e| {
            log::error!("Plan generation failed: {}", e);
            PlanError::from(e)
        })?;

        assemble_plan(request, &raw)
    }

    /// Generates a plan and makes it the session's current plan. Refuses to
    /// start while another generation for the same session is outstanding.
    /// On any failure the session keeps its previous plan and day filter.
    pub async fn generate_into(
        &self,
        session: &Mutex<PlannerSession>,
        request: TripRequest,
    ) -> Result<(), PlanError> {
        if !lock_session(session).begin_generation() {
            log::warn!("Rejected plan request while another generation is in flight");
            return Err(PlanError::Busy);
        }
        let guard = GenerationGuard { session };

        let generated = self.generate(request).await;
        drop(guard);

        let generated = generated?;
        lock_session(session).store(generated);
        Ok(())
    }
}

/// Parses a raw reply for `request` into a storable plan.
pub fn assemble_plan(request: TripRequest, raw: &str) -> Result<GeneratedPlan, PlanError> {
    let (plan, layout) = parse_plan(raw).map_err(|e| {
        log::error!("Malformed plan response: {}", e);
        PlanError::MalformedResponse(e.to_string())
    })?;

    if layout == SectionLayout::Reordered {
        log::warn!("Plan sections arrived out of order; using nearest-marker boundaries");
    }

    let destination_center = city::lookup(&request.destination)
        .map(|city| city.coordinates())
        .ok_or_else(|| {
            PlanError::InvalidRequest(format!("Unknown destination city: {}", request.destination))
        })?;

    // Hotels keep their booking links whatever day they are tagged with; only
    // the map and day records are limited to the trip.
    let accommodations = extract_locations(&plan.accommodation);
    let pooled = extract_locations(&plan.itinerary)
        .into_iter()
        .chain(accommodations.iter().cloned())
        .collect();
    let locations = within_trip(pooled, request.duration_days);

    Ok(GeneratedPlan {
        id: Uuid::new_v4(),
        request,
        plan,
        layout,
        locations,
        accommodations,
        destination_center,
        generated_at: Utc::now(),
    })
}

/// Drops locations annotated with a day outside `1..=duration_days`.
fn within_trip(locations: Vec<LocationRecord>, duration_days: u32) -> Vec<LocationRecord> {
    locations
        .into_iter()
        .filter(|location| {
            let in_range = (1..=duration_days).contains(&location.day);
            if !in_range {
                log::warn!(
                    "Dropping location '{}' on day {} outside a {}-day trip",
                    location.name,
                    location.day,
                    duration_days
                );
            }
            in_range
        })
        .collect()
}
