use actix_web::{web, HttpResponse, Responder};

use crate::models::city;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    limit: Option<u16>,
    search: Option<String>,
}

/*
    GET /api/cities
*/
pub async fn get_cities(params: web::Query<QueryParams>) -> impl Responder {
    let mut cities = match &params.search {
        Some(search_text) if !search_text.is_empty() => city::search(search_text),
        _ => city::all().iter().collect(),
    };
    if let Some(limit) = params.limit {
        cities.truncate(limit.into());
    }
    HttpResponse::Ok().json(cities)
}
