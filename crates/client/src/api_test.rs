//! Tests for wire shapes and response classification

use serde_json::json;

use outreach_segment::SegmentRules;

use crate::error::{ApiError, FieldError};
use crate::{CampaignResponse, CreateCampaignRequest};

#[test]
fn test_create_campaign_request_shape() {
    let request = CreateCampaignRequest {
        name: "Spring sale".to_string(),
        description: "Returning customers".to_string(),
        message: "Hi {name}!".to_string(),
        rules: SegmentRules::default_rule_set(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["name"], "Spring sale");
    assert_eq!(value["rules"]["logic"], "AND");
    assert_eq!(value["rules"]["conditions"][0]["field"], "totalSpending");
    assert_eq!(value["rules"]["conditions"][0]["operator"], ">");
}

#[test]
fn test_campaign_response_parse() {
    let body = json!({
        "id": "cmp_42",
        "name": "Spring sale",
        "createdAt": "2026-08-29T10:00:00Z",
    });
    let response: CampaignResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.id, "cmp_42");
    assert_eq!(response.name, "Spring sale");
}

#[test]
fn test_401_maps_to_auth_required() {
    let err = ApiError::from_response_parts(401, "");
    assert!(matches!(err, ApiError::AuthRequired));
}

#[test]
fn test_429_maps_to_rate_limited() {
    let err = ApiError::from_response_parts(429, "slow down");
    assert!(matches!(err, ApiError::RateLimited));
}

#[test]
fn test_422_with_error_list_maps_to_validation() {
    let body = r#"{"errors":[
        {"field":"name","message":"is required"},
        {"message":"campaign limit reached"}
    ]}"#;
    let err = ApiError::from_response_parts(422, body);
    let ApiError::Validation(errors) = err else {
        panic!("expected Validation, got {err:?}");
    };
    assert_eq!(
        errors,
        vec![
            FieldError {
                field: Some("name".to_string()),
                message: "is required".to_string(),
            },
            FieldError {
                field: None,
                message: "campaign limit reached".to_string(),
            },
        ]
    );
}

#[test]
fn test_400_with_opaque_body_maps_to_server() {
    let err = ApiError::from_response_parts(400, "Bad Request");
    assert!(matches!(err, ApiError::Server(400)));
}

#[test]
fn test_5xx_maps_to_server() {
    let err = ApiError::from_response_parts(503, "");
    assert!(matches!(err, ApiError::Server(503)));
}

#[test]
fn test_validation_display_lists_fields() {
    let err = ApiError::Validation(vec![FieldError {
        field: Some("message".to_string()),
        message: "must not be empty".to_string(),
    }]);
    assert_eq!(
        err.to_string(),
        "validation failed: message: must not be empty"
    );
}
