//! Tests for retry classification and backoff

use std::time::Duration;

use crate::error::ApiError;
use crate::retry::{is_retryable_error, RetryConfig};

#[test]
fn test_retryable_classification() {
    assert!(is_retryable_error(&ApiError::RateLimited));
    assert!(is_retryable_error(&ApiError::Server(500)));
    assert!(is_retryable_error(&ApiError::Server(503)));
    assert!(is_retryable_error(&ApiError::Network(
        "connection refused".to_string()
    )));

    assert!(!is_retryable_error(&ApiError::AuthRequired));
    assert!(!is_retryable_error(&ApiError::Server(404)));
    assert!(!is_retryable_error(&ApiError::Validation(Vec::new())));
    assert!(!is_retryable_error(&ApiError::InvalidResponse(
        "bad json".to_string()
    )));
}

#[test]
fn test_backoff_doubles_then_caps() {
    let config = RetryConfig {
        max_attempts: 10,
        base_delay_ms: 400,
        max_delay_ms: 5_000,
    };
    assert_eq!(config.max_delay_for(0), Duration::from_millis(400));
    assert_eq!(config.max_delay_for(1), Duration::from_millis(800));
    assert_eq!(config.max_delay_for(2), Duration::from_millis(1_600));
    assert_eq!(config.max_delay_for(3), Duration::from_millis(3_200));
    // From here the ceiling applies
    assert_eq!(config.max_delay_for(4), Duration::from_millis(5_000));
    assert_eq!(config.max_delay_for(20), Duration::from_millis(5_000));
}

#[test]
fn test_jittered_delay_stays_within_bound() {
    let config = RetryConfig::default();
    for attempt in 0..8 {
        let bound = config.max_delay_for(attempt);
        for _ in 0..50 {
            assert!(config.delay_for(attempt) <= bound);
        }
    }
}
