use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use crate::models::trip::{
    BudgetTier, Interest, Language, MAX_DURATION_DAYS, MAX_TRAVELERS, MIN_DURATION_DAYS,
    MIN_TRAVELERS,
};

#[derive(Serialize)]
struct Choice<T: Serialize> {
    value: T,
    label: &'static str,
}

#[derive(Serialize)]
struct Range {
    min: u32,
    max: u32,
}

#[derive(Serialize)]
struct FormOptions {
    budget_tiers: Vec<Choice<BudgetTier>>,
    interests: Vec<Choice<Interest>>,
    languages: Vec<Choice<Language>>,
    duration_days: Range,
    travelers: Range,
}

/*
    GET /api/options
*/
pub async fn get_options() -> impl Responder {
    let options = FormOptions {
        budget_tiers: BudgetTier::ALL
            .iter()
            .map(|tier| Choice { value: *tier, label: tier.phrase() })
            .collect(),
        interests: Interest::ALL
            .iter()
            .map(|interest| Choice { value: *interest, label: interest.phrase() })
            .collect(),
        languages: Language::ALL
            .iter()
            .map(|language| Choice { value: *language, label: language.display_name() })
            .collect(),
        duration_days: Range { min: MIN_DURATION_DAYS, max: MAX_DURATION_DAYS },
        travelers: Range { min: MIN_TRAVELERS, max: MAX_TRAVELERS },
    };
    HttpResponse::Ok().json(options)
}
