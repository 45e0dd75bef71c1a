use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::city;

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 20;
pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    MidRange,
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::MidRange, BudgetTier::Luxury];

    /// Phrase inlined into the prompt ("... with a Mid-Range budget").
    pub fn phrase(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Budget",
            BudgetTier::MidRange => "Mid-Range",
            BudgetTier::Luxury => "Luxury",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    Adventure,
    HistoryCulture,
    Food,
    Wellness,
    Nightlife,
    Shopping,
}

impl Interest {
    pub const ALL: [Interest; 6] = [
        Interest::Adventure,
        Interest::HistoryCulture,
        Interest::Food,
        Interest::Wellness,
        Interest::Nightlife,
        Interest::Shopping,
    ];

    pub fn phrase(&self) -> &'static str {
        match self {
            Interest::Adventure => "Adventure",
            Interest::HistoryCulture => "History & Culture",
            Interest::Food => "Food",
            Interest::Wellness => "Wellness",
            Interest::Nightlife => "Nightlife",
            Interest::Shopping => "Shopping",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Bengali,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Hindi,
        Language::Bengali,
        Language::Telugu,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi (हिन्दी)",
            Language::Bengali => "Bengali (বাংলা)",
            Language::Telugu => "Telugu (తెలుగు)",
        }
    }
}

/// A single generation request. Interests are a set, so duplicates in the
/// submitted JSON collapse and the prompt lists them in a stable order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub duration_days: u32,
    pub travelers: u32,
    pub budget_tier: BudgetTier,
    #[serde(default)]
    pub interests: BTreeSet<Interest>,
    pub language: Language,
}

impl TripRequest {
    pub fn validate(&self) -> Result<(), String> {
        if city::lookup(&self.origin).is_none() {
            return Err(format!("Unknown origin city: {}", self.origin));
        }
        if city::lookup(&self.destination).is_none() {
            return Err(format!("Unknown destination city: {}", self.destination));
        }
        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(format!(
                "duration_days must be between {} and {}",
                MIN_DURATION_DAYS, MAX_DURATION_DAYS
            ));
        }
        if !(MIN_TRAVELERS..=MAX_TRAVELERS).contains(&self.travelers) {
            return Err(format!(
                "travelers must be between {} and {}",
                MIN_TRAVELERS, MAX_TRAVELERS
            ));
        }
        Ok(())
    }

    pub fn interest_phrases(&self) -> Vec<&'static str> {
        self.interests.iter().map(Interest::phrase).collect()
    }
}
