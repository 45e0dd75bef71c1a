use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::plan::{DayChunk, DayFilter, GeneratedPlan, LocationRecord, SectionLayout};
use crate::services::plan_parser::split_days;

pub const WIDE_ZOOM: u8 = 11;
pub const TIGHT_ZOOM: u8 = 13;
pub const MAP_PITCH: u8 = 50;

const RIDE_HAILING_BASE: &str = "https://m.uber.com/ul/?action=setPickup&pickup=my_location";
const HOTEL_SEARCH_BASE: &str = "https://www.easemytrip.com/hotels/search-hotels/?search=";
const MARKER_ICON_URL: &str = "https://img.icons8.com/plasticine/100/000000/marker.png";
const DISCLAIMER: &str =
    "Disclaimer: TravelBuddy is a prototype. All recommendations should be independently verified.";

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MarkerIcon {
    pub url: &'static str,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "anchorY")]
    pub anchor_y: u32,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            url: MARKER_ICON_URL,
            width: 128,
            height: 128,
            anchor_y: 128,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapMarker {
    pub name: String,
    pub day: u32,
    pub lat: f64,
    pub lon: f64,
    pub icon: MarkerIcon,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub pitch: u8,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub ride_url: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayView {
    pub day: Option<u32>,
    /// Whether this chunk belongs to the selected day.
    pub focused: bool,
    pub title: String,
    pub content: String,
    pub locations: Vec<DayLocation>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HotelLink {
    pub name: String,
    pub booking_url: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AccommodationView {
    pub hotels: Vec<HotelLink>,
    /// Raw section text, only when no hotel carried an annotation.
    pub markdown: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ItineraryView {
    pub plan_id: Uuid,
    pub header: String,
    pub summary: String,
    pub budget: String,
    pub layout: SectionLayout,
    pub selected_day: DayFilter,
    pub day_numbers: Vec<u32>,
    pub map: MapView,
    pub days: Vec<DayView>,
    pub accommodation: AccommodationView,
    pub transport: String,
    pub disclaimer: &'static str,
    pub generated_at: DateTime<Utc>,
}

/// Deep link asking the ride app to pick up at the current location and
/// drop off at the annotated coordinates.
pub fn ride_hailing_link(location: &LocationRecord) -> String {
    format!(
        "{}&dropoff[latitude]={}&dropoff[longitude]={}&dropoff[nickname]={}",
        RIDE_HAILING_BASE,
        location.lat,
        location.lon,
        urlencoding::encode(&location.name)
    )
}

pub fn hotel_search_link(name: &str, destination: &str) -> String {
    let search_term = format!("{}, {}", name, destination);
    format!("{}{}", HOTEL_SEARCH_BASE, urlencoding::encode(&search_term))
}

/// Sorted, de-duplicated day numbers that carry at least one location.
pub fn day_numbers(locations: &[LocationRecord]) -> Vec<u32> {
    let mut days: Vec<u32> = locations.iter().map(|location| location.day).collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// All days center on the destination at a wide zoom. A single day centers
/// on the mean of its locations at a tight zoom, or falls back to the wide
/// destination view when it has none.
pub fn map_view(
    locations: &[LocationRecord],
    filter: DayFilter,
    destination_center: (f64, f64),
) -> MapView {
    let shown: Vec<&LocationRecord> = locations
        .iter()
        .filter(|location| filter.matches(location.day))
        .collect();

    let (latitude, longitude, zoom) = match filter {
        DayFilter::Day(_) if !shown.is_empty() => {
            let count = shown.len() as f64;
            let lat = shown.iter().map(|l| l.lat).sum::<f64>() / count;
            let lon = shown.iter().map(|l| l.lon).sum::<f64>() / count;
            (lat, lon, TIGHT_ZOOM)
        }
        _ => (destination_center.0, destination_center.1, WIDE_ZOOM),
    };

    MapView {
        latitude,
        longitude,
        zoom,
        pitch: MAP_PITCH,
        markers: shown
            .into_iter()
            .map(|location| MapMarker {
                name: location.name.clone(),
                day: location.day,
                lat: location.lat,
                lon: location.lon,
                icon: MarkerIcon::default(),
            })
            .collect(),
    }
}

fn day_view(chunk: DayChunk, locations: &[LocationRecord], filter: DayFilter) -> DayView {
    let day_locations = match chunk.day {
        Some(day) => locations
            .iter()
            .filter(|location| location.day == day)
            .map(|location| DayLocation {
                name: location.name.clone(),
                lat: location.lat,
                lon: location.lon,
                ride_url: ride_hailing_link(location),
            })
            .collect(),
        None => Vec::new(),
    };

    let focused = match filter {
        DayFilter::All => false,
        DayFilter::Day(selected) => chunk.day == Some(selected),
    };

    DayView {
        day: chunk.day,
        focused,
        title: chunk.title,
        content: chunk.content,
        locations: day_locations,
    }
}

/// Every day chunk in order. The filter only marks the selected day's
/// chunks as focused; it narrows the map, not the itinerary.
pub fn day_views(itinerary: &str, locations: &[LocationRecord], filter: DayFilter) -> Vec<DayView> {
    split_days(itinerary)
        .into_iter()
        .map(|chunk| day_view(chunk, locations, filter))
        .collect()
}

pub fn accommodation_view(
    accommodation: &str,
    hotels: &[LocationRecord],
    destination: &str,
) -> AccommodationView {
    if hotels.is_empty() {
        return AccommodationView {
            hotels: Vec::new(),
            markdown: Some(accommodation.trim().to_string()),
        };
    }

    AccommodationView {
        hotels: hotels
            .iter()
            .map(|hotel| HotelLink {
                name: hotel.name.clone(),
                booking_url: hotel_search_link(&hotel.name, destination),
            })
            .collect(),
        markdown: None,
    }
}

pub fn present(generated: &GeneratedPlan, filter: DayFilter) -> ItineraryView {
    let request = &generated.request;
    let plan = &generated.plan;

    ItineraryView {
        plan_id: generated.id,
        header: format!(
            "Your Custom Itinerary: {} to {}",
            request.origin, request.destination
        ),
        summary: plan.summary.trim().to_string(),
        budget: plan.budget.trim().to_string(),
        layout: generated.layout,
        selected_day: filter,
        day_numbers: day_numbers(&generated.locations),
        map: map_view(&generated.locations, filter, generated.destination_center),
        days: day_views(&plan.itinerary, &generated.locations, filter),
        accommodation: accommodation_view(
            &plan.accommodation,
            &generated.accommodations,
            &request.destination,
        ),
        transport: plan.transport.trim().to_string(),
        disclaimer: DISCLAIMER,
        generated_at: generated.generated_at,
    }
}
