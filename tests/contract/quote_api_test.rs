// Contract tests for the quote endpoints
//
// Validates the JSON request/response shape of POST /quotes and
// POST /quotes/evaluate:
// - field names are camelCase
// - error bodies carry a stable code and a message
// - "no price configured" (404) is distinct from malformed input (400/422)

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, web, App};
use helpers::TestDataFactory;
use pricetax::middleware::{json_error_handler, ErrorHandler, RequestId};
use pricetax::modules;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .wrap(ErrorHandler)
                .wrap(RequestId)
                .app_data(web::Data::new(TestDataFactory::quote_service()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(modules::configure),
        )
        .await
    };
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("expected a decimal, got {}", other),
    }
}

#[actix_web::test]
async fn test_quote_response_schema() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(json!({
            "variantId": "v1",
            "context": { "currency": "EUR", "quantity": 2, "catalogId": "5" },
            "location": { "countryCode": "IT" },
            "lineTotal": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    for field in [
        "variantId",
        "unitAmount",
        "currency",
        "taxLines",
        "totalTax",
        "taxInclusiveTotal",
        "netAmount",
        "sourceCandidateId",
        "specificityScore",
        "lineAmount",
    ] {
        assert!(body.get(field).is_some(), "{} is required", field);
    }

    assert_eq!(body["currency"], "EUR");
    assert_eq!(body["sourceCandidateId"], "catalog-5");
    assert_eq!(decimal(&body["unitAmount"]), Decimal::from_str("15.00").unwrap());
    assert_eq!(decimal(&body["lineAmount"]), Decimal::from_str("30.00").unwrap());
    assert_eq!(decimal(&body["totalTax"]), Decimal::from_str("3.30").unwrap());

    let line = &body["taxLines"][0];
    assert_eq!(line["ruleId"], "vat-it");
    assert_eq!(line["type"], "percentage");
    assert_eq!(line["isCompound"], true);
    assert_eq!(line["isInclusive"], false);
}

#[actix_web::test]
async fn test_line_amount_is_omitted_for_unit_quotes() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(json!({
            "variantId": "v1",
            "context": { "currency": "EUR" },
            "location": { "countryCode": "IT" }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body.get("lineAmount").is_none());
    assert_eq!(body["quantity"], 1);
}

#[actix_web::test]
async fn test_unknown_variant_is_not_found() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(json!({
            "variantId": "missing",
            "context": { "currency": "EUR", "quantity": 1 },
            "location": { "countryCode": "IT" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "PRICE_NOT_FOUND");
    assert!(body["error"]["message"].is_string());
}

#[actix_web::test]
async fn test_invalid_context_is_unprocessable() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(json!({
            "variantId": "v1",
            "context": { "quantity": 0 },
            "location": { "countryCode": "IT" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_CONTEXT");
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(json!({ "context": { "currency": "EUR" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_evaluate_with_supplied_records() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes/evaluate")
        .set_json(json!({
            "variantId": "sku-42",
            "context": {
                "currency": "EUR",
                "quantity": 1,
                "asOf": "2025-06-01T12:00:00Z"
            },
            "location": { "countryCode": "IT" },
            "candidates": [
                {
                    "id": "generic",
                    "variantId": "sku-42",
                    "currency": "EUR",
                    "amount": "100.00",
                    "createdAt": "2025-01-01T00:00:00Z"
                }
            ],
            "rules": [
                { "id": "a", "rate": "0.10", "type": "percentage", "priority": 1 },
                { "id": "b", "rate": "0.10", "type": "percentage", "priority": 2, "isCompound": true }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["taxLines"][0]["amount"]), Decimal::from_str("10.00").unwrap());
    assert_eq!(decimal(&body["taxLines"][1]["amount"]), Decimal::from_str("11.00").unwrap());
    assert_eq!(decimal(&body["totalTax"]), Decimal::from_str("21.00").unwrap());
}

#[actix_web::test]
async fn test_evaluate_amount_past_decimal_range_is_unprocessable() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes/evaluate")
        .set_json(json!({
            "variantId": "sku-42",
            "context": { "currency": "EUR", "quantity": 2, "asOf": "2025-06-01T12:00:00Z" },
            "location": { "countryCode": "IT" },
            "lineTotal": true,
            "candidates": [
                {
                    "id": "huge",
                    "variantId": "sku-42",
                    "currency": "EUR",
                    "amount": Decimal::MAX.to_string(),
                    "createdAt": "2025-01-01T00:00:00Z"
                }
            ],
            "rules": [{ "id": "levy", "rate": "1", "type": "fixed" }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_CONTEXT");
}

#[actix_web::test]
async fn test_evaluate_rejects_empty_postcode_pattern() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/quotes/evaluate")
        .set_json(json!({
            "variantId": "sku-42",
            "context": { "currency": "EUR" },
            "location": { "countryCode": "US", "postcode": "90012" },
            "candidates": [],
            "rules": [{ "id": "city", "rate": "0.02", "type": "percentage", "postcodePatterns": [""] }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_readiness_reports_seeded_stores() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/ready").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["price_candidates"], 5);
    assert_eq!(body["checks"]["tax_rules"], 4);
}
