pub mod gemini_service;
pub mod pdf_service;
pub mod plan_parser;
pub mod planner_service;
pub mod presenter_service;
pub mod prompt_service;
