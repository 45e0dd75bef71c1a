mod common;

use actix_web::{http::header, test};
use serde_json::json;

use common::{create_app, goa_request, test_state, ScriptedGateway, GOA_PLAN};
use travelbuddy_api::services::gemini_service::GatewayError;

#[actix_rt::test]
async fn test_get_plan_before_generation_is_not_found() {
    let state = test_state(ScriptedGateway::replying(GOA_PLAN));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/plan").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "no_plan");
}

#[actix_rt::test]
async fn test_generate_plan_returns_full_view() {
    let gateway = ScriptedGateway::replying(GOA_PLAN);
    let state = test_state(gateway.clone());
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&goa_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["header"], "Your Custom Itinerary: Delhi to Goa");
    assert_eq!(body["summary"], "Three relaxed days of beaches, forts and Goan food.");
    assert_eq!(body["layout"], "ordered");
    assert_eq!(body["selected_day"], "all");
    assert_eq!(body["day_numbers"], json!([1, 2, 3]));
    assert_eq!(body["days"].as_array().unwrap().len(), 3);
    assert_eq!(body["days"][0]["locations"].as_array().unwrap().len(), 4);
    assert_eq!(body["map"]["zoom"], 11);
    assert_eq!(body["map"]["latitude"], 15.2993);
    assert_eq!(body["map"]["markers"].as_array().unwrap().len(), 6);
    assert_eq!(body["accommodation"]["hotels"].as_array().unwrap().len(), 2);
    assert!(body["accommodation"]["markdown"].is_null());
    assert_eq!(body["transport"], "Rent a scooter; taxis are expensive.");

    assert_eq!(gateway.calls(), 1);
    let prompt = gateway.last_prompt().unwrap();
    assert!(prompt.contains("from Delhi to Goa for 3 days for 2 people"));
}

#[actix_rt::test]
async fn test_select_day_focuses_view() {
    let state = test_state(ScriptedGateway::replying(GOA_PLAN));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&goa_request())
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::put()
        .uri("/api/plan/day")
        .set_json(&json!({"day": 2}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["selected_day"], 2);
    assert_eq!(body["days"].as_array().unwrap().len(), 3);
    assert_eq!(body["days"][0]["focused"], false);
    assert_eq!(body["days"][1]["focused"], true);
    assert_eq!(body["days"][1]["title"], "**Day 2: Forts and Feni**");
    assert_eq!(body["map"]["zoom"], 13);
    assert_eq!(body["map"]["latitude"], 15.492);
    assert_eq!(body["map"]["markers"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["days"][1]["locations"][0]["ride_url"],
        "https://m.uber.com/ul/?action=setPickup&pickup=my_location&dropoff[latitude]=15.492&dropoff[longitude]=73.7737&dropoff[nickname]=Fort%20Aguada"
    );

    // Stored selection survives a plain read
    let req = test::TestRequest::get().uri("/api/plan").to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["selected_day"], 2);

    // A day with no locations falls back to the wide destination view
    let req = test::TestRequest::put()
        .uri("/api/plan/day")
        .set_json(&json!({"day": 7}))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["map"]["zoom"], 11);
    assert_eq!(body["map"]["latitude"], 15.2993);
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert!(days.iter().all(|day| day["focused"] == false));

    let req = test::TestRequest::put()
        .uri("/api/plan/day")
        .set_json(&json!({"day": "all"}))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["selected_day"], "all");
    assert_eq!(body["days"].as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn test_select_day_without_plan() {
    let state = test_state(ScriptedGateway::replying(GOA_PLAN));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::put()
        .uri("/api/plan/day")
        .set_json(&json!({"day": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_malformed_response_stores_nothing() {
    let truncated = GOA_PLAN.replace("[TRANSPORTATION_TIPS]", "");
    let state = test_state(ScriptedGateway::replying(&truncated));
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&goa_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "malformed_response");
    assert!(body["message"].as_str().unwrap().contains("[TRANSPORTATION_TIPS]"));

    let req = test::TestRequest::get().uri("/api/session").to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["has_plan"], false);
    assert_eq!(body["generating"], false);
}

#[actix_rt::test]
async fn test_gateway_failures_map_to_error_kinds() {
    let state = test_state(ScriptedGateway::failing(GatewayError::MissingCredential));
    let app = test::init_service(create_app(state)).await;
    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&goa_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "missing_credential");

    let state = test_state(ScriptedGateway::failing(GatewayError::Request(
        "quota exhausted".to_string(),
    )));
    let app = test::init_service(create_app(state)).await;
    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&goa_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "gateway_error");
    assert!(body["message"].as_str().unwrap().contains("quota exhausted"));
}

#[actix_rt::test]
async fn test_invalid_request_is_rejected_before_gateway() {
    let gateway = ScriptedGateway::replying(GOA_PLAN);
    let state = test_state(gateway.clone());
    let app = test::init_service(create_app(state)).await;

    let mut request = goa_request();
    request["destination"] = json!("Paris");
    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(gateway.calls(), 0);
}

#[actix_rt::test]
async fn test_pdf_download() {
    let state = test_state(ScriptedGateway::replying(GOA_PLAN));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/plan/pdf").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&goa_request())
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get().uri("/api/plan/pdf").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"TravelBuddy_Itinerary_Goa.pdf\""
    );
    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"%PDF"));
}

#[actix_rt::test]
async fn test_pdf_download_reports_uncovered_script() {
    let hindi_plan = GOA_PLAN.replace(
        "Three relaxed days of beaches, forts and Goan food.",
        "समुद्र तट और किलों के तीन दिन।",
    );
    let state = test_state(ScriptedGateway::replying(&hindi_plan));
    let app = test::init_service(create_app(state)).await;

    let mut request = goa_request();
    request["language"] = json!("hindi");
    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(&request)
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get().uri("/api/plan/pdf").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "export_error");
    assert!(body["message"].as_str().unwrap().contains('स'));
}
