use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::models::session::PlannerSession;
use crate::services::gemini_service::PlanGateway;
use crate::services::planner_service::TravelPlanner;

/// Shared application data handed to every handler through `web::Data`.
pub struct AppState {
    pub config: AppConfig,
    pub planner: TravelPlanner,
    pub session: Mutex<PlannerSession>,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn PlanGateway>) -> Self {
        Self {
            config,
            planner: TravelPlanner::new(gateway),
            session: Mutex::new(PlannerSession::new()),
        }
    }
}
