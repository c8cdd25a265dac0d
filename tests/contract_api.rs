//! End-to-end tests for the contract generation endpoint.
//!
//! These drive the real actix service and assert on the rendered PDF via
//! text extraction, not just on status codes.

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::json;

use contract_farming_server::{contract, AppState};

fn sample_request() -> serde_json::Value {
    json!({
        "farmer": { "name": "Ram Lal", "phone": "9000000000" },
        "buyer": { "name": "Suresh", "phone": "8000000000" },
        "crop": { "name": "Wheat" },
        "deal": {
            "contractId": "CNT-1001",
            "quantity": 10,
            "pricePerQuintal": 2000,
            "totalAmount": 20000
        }
    })
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new()))
                .service(web::scope("/api").configure(contract::handlers::config)),
        )
        .await
    };
}

async fn generate_pdf_text(payload: serde_json::Value) -> String {
    let app = init_app!();
    let req = test::TestRequest::post()
        .uri("/api/contract/generate")
        .set_json(&payload)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    pdf_extract::extract_text_from_mem(&body).expect("generated PDF should be extractable")
}

#[actix_web::test]
async fn test_generate_contract_returns_pdf_download() {
    let app = init_app!();
    let req = test::TestRequest::post()
        .uri("/api/contract/generate")
        .set_json(sample_request())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Contract_CNT-1001.pdf\""
    );

    let content_length: usize = resp
        .headers()
        .get(header::CONTENT_LENGTH)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();

    let body = test::read_body(resp).await;
    assert_eq!(content_length, body.len());
    assert!(body.starts_with(b"%PDF-"));
}

#[actix_web::test]
async fn test_all_sections_present_in_order_exactly_once() {
    let text = generate_pdf_text(sample_request()).await;

    let markers = [
        "Digital Contract Farming Agreement",
        "Generated via Digital Contract Farming Platform",
        "1. Contract Overview",
        "2. Farmer Details",
        "3. Buyer Details",
        "4. Crop & Deal Details",
        "5. Advance Payment",
        "6. Delivery Terms",
        "This is a system-generated digital contract. Physical signature not required.",
    ];

    let mut last_index = 0;
    for marker in markers {
        let index = text
            .find(marker)
            .unwrap_or_else(|| panic!("missing section marker {marker:?} in: {text}"));
        assert!(index >= last_index, "section {marker:?} out of order");
        assert_eq!(
            text.matches(marker).count(),
            1,
            "section {marker:?} should appear exactly once"
        );
        last_index = index;
    }

    // Both parties carry the fixed visual signature mark.
    assert_eq!(text.matches("DIGITALLY SIGNED").count(), 2);
    assert!(text.contains("FARMER"));
    assert!(text.contains("BUYER"));
}

#[actix_web::test]
async fn test_deal_values_rendered() {
    let text = generate_pdf_text(sample_request()).await;

    assert!(text.contains("CNT-1001"));
    assert!(text.contains("Wheat"));
    assert!(text.contains("10 Quintal"));
    assert!(text.contains("₹2000/Qtl"));
    assert!(text.contains("Total Contract Value: ₹20000"));
    assert!(text.contains("₹4000"), "advance should be 20% of 20000");
    assert!(text.contains("Online / UPI"));
}

#[actix_web::test]
async fn test_delivery_defaults_rendered_when_absent() {
    let text = generate_pdf_text(sample_request()).await;

    assert!(text.contains("Within 7 days"));
    assert!(text.contains("Nearest Mandi"));
}

#[actix_web::test]
async fn test_partial_location_keeps_empty_segments() {
    let mut payload = sample_request();
    payload["farmer"]["village"] = json!("X");
    payload["farmer"]["district"] = json!("");
    payload["farmer"]["state"] = json!("Y");

    let text = generate_pdf_text(payload).await;
    assert!(
        text.contains("X, , Y"),
        "empty district must stay an empty segment, got: {text}"
    );
}

#[actix_web::test]
async fn test_missing_top_level_objects_rejected() {
    let app = init_app!();

    for field in ["farmer", "buyer", "crop", "deal"] {
        let mut payload = sample_request();
        payload.as_object_mut().unwrap().remove(field);

        let req = test::TestRequest::post()
            .uri("/api/contract/generate")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "request without {field} must be rejected"
        );

        let body = test::read_body(resp).await;
        assert!(!body.starts_with(b"%PDF-"), "no binary on validation failure");

        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = error["message"].as_str().unwrap();
        assert!(message.contains("Missing required contract details"));
        assert!(message.contains(field));
    }
}

#[actix_web::test]
async fn test_synthesized_filename_is_timestamp_like() {
    let app = init_app!();
    let mut payload = sample_request();
    payload["deal"].as_object_mut().unwrap().remove("contractId");

    let req = test::TestRequest::post()
        .uri("/api/contract/generate")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let token = disposition
        .strip_prefix("attachment; filename=\"Contract_CNT-")
        .and_then(|rest| rest.strip_suffix(".pdf\""))
        .unwrap_or_else(|| panic!("unexpected disposition: {disposition}"));
    assert!(!token.is_empty());
    assert!(token.chars().all(|c| c.is_ascii_digit()));
}

#[actix_web::test]
async fn test_advance_scales_with_total() {
    let mut payload = sample_request();
    payload["deal"]["totalAmount"] = json!(50000);

    let text = generate_pdf_text(payload).await;
    assert!(text.contains("₹10000"));
}
