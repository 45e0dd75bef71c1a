use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::error::Error;
use std::fmt;

use crate::services::gemini_service::GatewayError;

/// Everything that can end a planner request early.
#[derive(Debug)]
pub enum PlanError {
    InvalidRequest(String),
    MissingCredential,
    Gateway(String),
    MalformedResponse(String),
    Busy,
    NoPlan,
    Export(String),
}

impl PlanError {
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::InvalidRequest(_) => "invalid_request",
            PlanError::MissingCredential => "missing_credential",
            PlanError::Gateway(_) => "gateway_error",
            PlanError::MalformedResponse(_) => "malformed_response",
            PlanError::Busy => "busy",
            PlanError::NoPlan => "no_plan",
            PlanError::Export(_) => "export_error",
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidRequest(msg) => write!(f, "Invalid trip request: {}", msg),
            PlanError::MissingCredential => {
                write!(f, "Google API key not found. Please set GOOGLE_API_KEY in your .env file.")
            }
            PlanError::Gateway(msg) => write!(
                f,
                "An error occurred: {}. Please check your API key and network connection.",
                msg
            ),
            PlanError::MalformedResponse(msg) => write!(
                f,
                "Failed to parse the AI's response ({}). Please try generating again.",
                msg
            ),
            PlanError::Busy => write!(f, "A travel plan is already being generated"),
            PlanError::NoPlan => write!(f, "No travel plan has been generated yet"),
            PlanError::Export(msg) => write!(f, "Failed to export itinerary: {}", msg),
        }
    }
}

impl Error for PlanError {}

impl From<GatewayError> for PlanError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingCredential => PlanError::MissingCredential,
            GatewayError::Request(msg) => PlanError::Gateway(msg),
        }
    }
}

impl ResponseError for PlanError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlanError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PlanError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
            PlanError::Gateway(_) | PlanError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            PlanError::Busy => StatusCode::CONFLICT,
            PlanError::NoPlan => StatusCode::NOT_FOUND,
            PlanError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}
