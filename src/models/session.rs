use serde::Serialize;

use crate::models::plan::{DayFilter, GeneratedPlan};

/// Per-session planner state: the last good plan and the selected day.
///
/// Handlers receive this explicitly through `web::Data`; nothing here is a
/// process global.
#[derive(Debug, Default)]
pub struct PlannerSession {
    pub plan: Option<GeneratedPlan>,
    pub selected_day: DayFilter,
    generating: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub has_plan: bool,
    pub selected_day: DayFilter,
    pub generating: bool,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a generation as outstanding. Returns false when one already is.
    pub fn begin_generation(&mut self) -> bool {
        if self.generating {
            return false;
        }
        self.generating = true;
        true
    }

    pub fn end_generation(&mut self) {
        self.generating = false;
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Stores a fresh plan and resets the day filter.
    pub fn store(&mut self, plan: GeneratedPlan) {
        self.plan = Some(plan);
        self.selected_day = DayFilter::All;
    }

    /// Re-selecting the current filter is a no-op.
    pub fn select_day(&mut self, filter: DayFilter) -> bool {
        if self.selected_day == filter {
            return false;
        }
        self.selected_day = filter;
        true
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            has_plan: self.plan.is_some(),
            selected_day: self.selected_day,
            generating: self.generating,
        }
    }
}
