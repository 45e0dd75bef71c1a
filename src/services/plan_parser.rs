//! Recovers structure from the model's free-text reply.
//!
//! Three grammars live here:
//! - section markers (`[TRIP_SUMMARY]` ... `[TRANSPORTATION_TIPS]`), scanned once
//!   for their first occurrences;
//! - location annotations, `**Name** (day: N, lat: X, lon: Y)`;
//! - day headings, a bolded `Day N` followed by a colon or dash.

use regex::Regex;
use std::error::Error;
use std::fmt;
use std::sync::OnceLock;

use crate::models::plan::{DayChunk, LocationRecord, ParsedPlan, PlanSection, SectionLayout};

#[derive(Debug, Clone, PartialEq)]
pub struct MalformedResponse {
    pub missing: Vec<PlanSection>,
}

impl fmt::Display for MalformedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markers: Vec<&str> = self.missing.iter().map(PlanSection::marker).collect();
        write!(f, "missing section markers: {}", markers.join(", "))
    }
}

impl Error for MalformedResponse {}

fn location_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\*\*([\w\s,'-]+\w)\*\*\s*\(day:\s*(\d+),\s*lat:\s*(-?\d+(?:\.\d+)?),\s*lon:\s*(-?\d+(?:\.\d+)?)\)",
        )
        .expect("location pattern is valid")
    })
}

fn day_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*\s*Day\s*\d+\s*[:-]").expect("day heading pattern is valid"))
}

fn day_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Day (\d+)").expect("day number pattern is valid"))
}

/// Splits a raw reply into its five sections.
///
/// Every marker must be present; only its first occurrence counts. When the
/// first occurrences are in canonical order each section is exactly the text
/// between its marker and the next one. Otherwise each section is cut at the
/// nearest marker that follows it and the layout is `Reordered`.
pub fn parse_plan(raw: &str) -> Result<(ParsedPlan, SectionLayout), MalformedResponse> {
    let mut starts = Vec::with_capacity(PlanSection::ORDER.len());
    let mut missing = Vec::new();
    for section in PlanSection::ORDER {
        match raw.find(section.marker()) {
            Some(pos) => starts.push(pos),
            None => missing.push(section),
        }
    }
    if !missing.is_empty() {
        return Err(MalformedResponse { missing });
    }

    let ordered = starts.windows(2).all(|pair| pair[0] < pair[1]);
    let layout = if ordered {
        SectionLayout::Ordered
    } else {
        SectionLayout::Reordered
    };

    let mut plan = ParsedPlan::default();
    for (index, section) in PlanSection::ORDER.iter().enumerate() {
        let start = starts[index];
        let body_start = start + section.marker().len();
        let body_end = if ordered {
            starts.get(index + 1).copied().unwrap_or(raw.len())
        } else {
            starts
                .iter()
                .copied()
                .filter(|&other| other > start)
                .min()
                .unwrap_or(raw.len())
        };
        *plan.section_mut(*section) = raw[body_start..body_end].to_string();
    }

    Ok((plan, layout))
}

/// Every `**Name** (day: N, lat: X, lon: Y)` annotation in `text`, in order.
/// No annotations is a valid, empty result.
pub fn extract_locations(text: &str) -> Vec<LocationRecord> {
    location_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps[1].to_string();
            let parsed = (
                caps[2].parse::<u32>(),
                caps[3].parse::<f64>(),
                caps[4].parse::<f64>(),
            );
            match parsed {
                (Ok(day), Ok(lat), Ok(lon)) => Some(LocationRecord { name, day, lat, lon }),
                _ => {
                    log::warn!("Skipping location '{}' with unrepresentable day or coordinates", name);
                    None
                }
            }
        })
        .collect()
}

/// Splits itinerary text at each day heading. Text before the first heading
/// becomes an unattributed chunk when it holds anything besides whitespace.
pub fn split_days(itinerary: &str) -> Vec<DayChunk> {
    let mut cuts: Vec<usize> = day_heading_regex()
        .find_iter(itinerary)
        .map(|m| m.start())
        .collect();
    if cuts.first() != Some(&0) {
        cuts.insert(0, 0);
    }
    cuts.push(itinerary.len());

    cuts.windows(2)
        .filter_map(|bounds| {
            let content = itinerary[bounds[0]..bounds[1]].trim();
            if content.is_empty() {
                return None;
            }
            let title = content.lines().next().unwrap_or_default().trim().to_string();
            let day = day_number_regex()
                .captures(&title)
                .and_then(|caps| caps[1].parse::<u32>().ok());
            Some(DayChunk {
                day,
                title,
                content: content.to_string(),
            })
        })
        .collect()
}
