use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::trip::TripRequest;

/// The five sections the model is instructed to emit, in canonical order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanSection {
    Summary,
    Budget,
    Itinerary,
    Accommodation,
    Transport,
}

impl PlanSection {
    pub const ORDER: [PlanSection; 5] = [
        PlanSection::Summary,
        PlanSection::Budget,
        PlanSection::Itinerary,
        PlanSection::Accommodation,
        PlanSection::Transport,
    ];

    pub fn marker(&self) -> &'static str {
        match self {
            PlanSection::Summary => "[TRIP_SUMMARY]",
            PlanSection::Budget => "[BUDGET_ALLOCATION]",
            PlanSection::Itinerary => "[DAY_BY_DAY_ITINERARY]",
            PlanSection::Accommodation => "[ACCOMMODATION_SUGGESTIONS]",
            PlanSection::Transport => "[TRANSPORTATION_TIPS]",
        }
    }

    /// Human readable heading used in exported documents.
    pub fn title(&self, destination: &str) -> String {
        match self {
            PlanSection::Summary => format!("Trip to {}", destination),
            PlanSection::Budget => "Budget Allocation".to_string(),
            PlanSection::Itinerary => "Day-by-Day Itinerary".to_string(),
            PlanSection::Accommodation => "Accommodation Suggestions".to_string(),
            PlanSection::Transport => "Transportation Tips".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ParsedPlan {
    pub summary: String,
    pub budget: String,
    pub itinerary: String,
    pub accommodation: String,
    pub transport: String,
}

impl ParsedPlan {
    pub fn section(&self, section: PlanSection) -> &str {
        match section {
            PlanSection::Summary => &self.summary,
            PlanSection::Budget => &self.budget,
            PlanSection::Itinerary => &self.itinerary,
            PlanSection::Accommodation => &self.accommodation,
            PlanSection::Transport => &self.transport,
        }
    }

    pub(crate) fn section_mut(&mut self, section: PlanSection) -> &mut String {
        match section {
            PlanSection::Summary => &mut self.summary,
            PlanSection::Budget => &mut self.budget,
            PlanSection::Itinerary => &mut self.itinerary,
            PlanSection::Accommodation => &mut self.accommodation,
            PlanSection::Transport => &mut self.transport,
        }
    }
}

/// How the section markers were laid out in the raw response.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SectionLayout {
    Ordered,
    /// All markers present but not in canonical order; sections were cut at
    /// the nearest following marker instead.
    Reordered,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationRecord {
    pub name: String,
    pub day: u32,
    pub lat: f64,
    pub lon: f64,
}

/// A slice of the itinerary belonging to one "**Day N:**" heading.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayChunk {
    /// `None` for introductory text or headings without a readable day number.
    pub day: Option<u32>,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DayFilterRepr", into = "DayFilterRepr")]
pub enum DayFilter {
    #[default]
    All,
    Day(u32),
}

impl DayFilter {
    pub fn matches(&self, day: u32) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(selected) => *selected == day,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DayFilterRepr {
    Day(u32),
    Keyword(String),
}

impl TryFrom<DayFilterRepr> for DayFilter {
    type Error = String;

    fn try_from(repr: DayFilterRepr) -> Result<Self, Self::Error> {
        match repr {
            DayFilterRepr::Day(0) => Err("day numbers start at 1".to_string()),
            DayFilterRepr::Day(day) => Ok(DayFilter::Day(day)),
            DayFilterRepr::Keyword(word) if word.eq_ignore_ascii_case("all") => Ok(DayFilter::All),
            DayFilterRepr::Keyword(word) => Err(format!("invalid day filter: {}", word)),
        }
    }
}

impl From<DayFilter> for DayFilterRepr {
    fn from(filter: DayFilter) -> Self {
        match filter {
            DayFilter::All => DayFilterRepr::Keyword("all".to_string()),
            DayFilter::Day(day) => DayFilterRepr::Day(day),
        }
    }
}

/// A successfully parsed generation, kept as the session's current plan.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub id: Uuid,
    pub request: TripRequest,
    pub plan: ParsedPlan,
    pub layout: SectionLayout,
    /// Pooled itinerary and accommodation locations within the trip's days.
    pub locations: Vec<LocationRecord>,
    pub accommodations: Vec<LocationRecord>,
    pub destination_center: (f64, f64),
    pub generated_at: DateTime<Utc>,
}
