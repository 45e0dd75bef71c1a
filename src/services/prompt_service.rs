use crate::models::plan::PlanSection;
use crate::models::trip::TripRequest;

/// Builds the generation prompt for a trip.
///
/// The response contract (the five section markers and the location
/// annotation syntax) is embedded verbatim; `plan_parser` depends on it.
pub fn build_prompt(request: &TripRequest) -> String {
    let interests = if request.interests.is_empty() {
        "a well-rounded mix of sights".to_string()
    } else {
        request.interest_phrases().join(", ")
    };

    format!(
        r#"You are an expert travel planner named TravelBuddy. Your response must be in {language}.
Create a complete travel plan for a trip from {origin} to {destination} for {days} days for {travelers} people with a {budget} budget, focusing on {interests}.

Your response MUST use the following specific tags and format:

{summary}
A brief, engaging summary.

{budget_marker}
A Markdown table for the budget.

{itinerary}
A detailed day-by-day plan. Start each day with a bold heading such as **Day 1:**. For each specific point of interest (like a monument, restaurant, or park), YOU MUST format it as: **Name of Place** (day: X, lat: XX.XXXX, lon: YY.YYYY).
Example: The plan is to visit **Baga Beach** (day: 1, lat: 15.5560, lon: 73.7517).

{accommodation}
List 2-3 accommodation options. For each, use the same format as above, using the arrival day (day: 1).
Example: Stay at **Taj Fort Aguada Resort and Spa** (day: 1, lat: 15.4957, lon: 73.7667).

{transport}
Provide brief advice.
"#,
        language = request.language.display_name(),
        origin = request.origin,
        destination = request.destination,
        days = request.duration_days,
        travelers = request.travelers,
        budget = request.budget_tier.phrase(),
        interests = interests,
        summary = PlanSection::Summary.marker(),
        budget_marker = PlanSection::Budget.marker(),
        itinerary = PlanSection::Itinerary.marker(),
        accommodation = PlanSection::Accommodation.marker(),
        transport = PlanSection::Transport.marker(),
    )
}
