#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use travelbuddy_api::config::{AppConfig, ScriptFonts};
use travelbuddy_api::services::gemini_service::{GatewayError, PlanGateway};
use travelbuddy_api::state::AppState;

pub const GOA_PLAN: &str = r#"Here is your plan!

[TRIP_SUMMARY]
Three relaxed days of beaches, forts and Goan food.

[BUDGET_ALLOCATION]
| Category | Cost (INR) |
|---|---|
| Stay | 18000 |
| Food | 9000 |

[DAY_BY_DAY_ITINERARY]
**Day 1: Arrival and North Goa**
Check in and walk to **Baga Beach** (day: 1, lat: 15.5560, lon: 73.7517), then dinner at **Britto's** (day: 1, lat: 15.5553, lon: 73.7519).

**Day 2: Forts and Feni**
Morning at **Fort Aguada** (day: 2, lat: 15.4920, lon: 73.7737).

**Day 3: Old Goa**
Visit **Basilica of Bom Jesus** (day: 3, lat: 15.5009, lon: 73.9116) before heading home.

[ACCOMMODATION_SUGGESTIONS]
- Stay at **Taj Holiday Village** (day: 1, lat: 15.5010, lon: 73.7630).
- Or try **Casa Baga** (day: 1, lat: 15.5585, lon: 73.7540).

[TRANSPORTATION_TIPS]
Rent a scooter; taxis are expensive.
"#;

/// Gateway double returning a fixed reply and recording prompts.
pub struct ScriptedGateway {
    reply: Result<String, GatewayError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: GatewayError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PlanGateway for ScriptedGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_key: Some("test-key-1234567890".to_string()),
        gemini_model: "gemini-test".to_string(),
        gemini_base_url: "http://localhost:1".to_string(),
        font_path: bundled_font(),
        script_fonts: ScriptFonts {
            devanagari: bundled_font(),
            bengali: bundled_font(),
            telugu: bundled_font(),
        },
    }
}

pub fn bundled_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fonts/DejaVuSans.ttf")
}

pub fn test_state(gateway: Arc<ScriptedGateway>) -> web::Data<AppState> {
    web::Data::new(AppState::new(test_config(), gateway))
}

pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(travelbuddy_api::configure)
}

pub fn goa_request() -> Value {
    json!({
        "origin": "Delhi",
        "destination": "Goa",
        "duration_days": 3,
        "travelers": 2,
        "budget_tier": "mid_range",
        "interests": ["food"],
        "language": "english"
    })
}
