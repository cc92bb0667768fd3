//! Tests for rule-set normalization

use serde_json::{json, Value};

use crate::normalize::normalize_rules;
use crate::rules::{ConditionValue, Field, Logic, Operator};

fn renormalize(v: &Value) -> Value {
    let once = serde_json::to_value(normalize_rules(v)).unwrap();
    serde_json::to_value(normalize_rules(&once)).unwrap()
}

#[test]
fn test_non_object_candidates() {
    for candidate in [
        json!(null),
        json!(42),
        json!("rules"),
        json!(true),
        json!([1, 2, 3]),
    ] {
        let rules = normalize_rules(&candidate);
        assert_eq!(rules.logic, Logic::And);
        assert!(rules.conditions.is_empty());
        assert!(rules.connectors.is_empty());
    }
}

#[test]
fn test_logic_resolution() {
    assert_eq!(normalize_rules(&json!({ "logic": "OR" })).logic, Logic::Or);
    // Anything that is not exactly "OR" coerces to AND
    for bad in [json!("or"), json!("add"), json!("AND"), json!(1), json!(null)] {
        assert_eq!(
            normalize_rules(&json!({ "logic": bad })).logic,
            Logic::And,
            "logic {bad} should coerce to AND"
        );
    }
    assert_eq!(normalize_rules(&json!({})).logic, Logic::And);
}

#[test]
fn test_conditions_non_array_treated_as_empty() {
    for bad in [json!("x"), json!(7), json!({ "field": "email" }), json!(null)] {
        let rules = normalize_rules(&json!({ "conditions": bad }));
        assert!(rules.conditions.is_empty());
    }
}

#[test]
fn test_condition_defaults() {
    let rules = normalize_rules(&json!({ "conditions": [{}] }));
    let cond = &rules.conditions[0];
    assert_eq!(cond.field, Field::TotalSpending);
    assert_eq!(cond.operator, Operator::Gte);
    assert_eq!(cond.value, ConditionValue::Number(0.into()));
}

#[test]
fn test_last_visit_defaults() {
    let rules = normalize_rules(&json!({ "conditions": [{ "field": "lastVisit" }] }));
    let cond = &rules.conditions[0];
    assert_eq!(cond.field, Field::LastVisit);
    assert_eq!(cond.operator, Operator::Before);
    assert_eq!(cond.value, ConditionValue::Text(String::new()));
}

#[test]
fn test_unknown_field_and_operator_fall_back() {
    let rules = normalize_rules(&json!({
        "conditions": [{ "field": "loyaltyTier", "operator": "between", "value": 5 }],
    }));
    let cond = &rules.conditions[0];
    assert_eq!(cond.field, Field::TotalSpending);
    assert_eq!(cond.operator, Operator::Gte);
    assert_eq!(cond.value, ConditionValue::Number(5.into()));
}

#[test]
fn test_stale_operator_kept_verbatim() {
    // Known gap: an existing operator is not re-validated against the field
    let rules = normalize_rules(&json!({
        "conditions": [{ "field": "totalSpending", "operator": "contains", "value": 10 }],
    }));
    assert_eq!(rules.conditions[0].operator, Operator::Contains);
}

#[test]
fn test_null_and_non_scalar_values_take_default() {
    let rules = normalize_rules(&json!({
        "conditions": [
            { "field": "visitCount", "value": null },
            { "field": "email", "value": { "nested": true } },
            { "field": "emailCount", "value": [1, 2] },
        ],
    }));
    assert_eq!(rules.conditions[0].value, ConditionValue::Number(0.into()));
    assert_eq!(rules.conditions[1].value, ConditionValue::Number(0.into()));
    assert_eq!(rules.conditions[2].value, ConditionValue::Number(0.into()));
}

#[test]
fn test_connectors_absent_filled_with_logic() {
    let rules = normalize_rules(&json!({
        "logic": "OR",
        "conditions": [{}, {}, {}],
    }));
    assert_eq!(rules.connectors, vec![Logic::Or, Logic::Or]);
}

#[test]
fn test_connectors_non_array_treated_as_absent() {
    let rules = normalize_rules(&json!({
        "conditions": [{}, {}],
        "connectors": "AND",
    }));
    assert_eq!(rules.connectors, vec![Logic::And]);
}

#[test]
fn test_connector_truncation() {
    // 3 conditions, 3 connectors -> keep the first 2
    let rules = normalize_rules(&json!({
        "logic": "OR",
        "conditions": [{}, {}, {}],
        "connectors": ["AND", "OR", "AND"],
    }));
    assert_eq!(rules.connectors, vec![Logic::And, Logic::Or]);
}

#[test]
fn test_connector_padding_with_global_logic() {
    // 3 conditions, 1 connector -> pad with the resolved logic (OR)
    let rules = normalize_rules(&json!({
        "logic": "OR",
        "conditions": [{}, {}, {}],
        "connectors": ["AND"],
    }));
    assert_eq!(rules.connectors, vec![Logic::And, Logic::Or]);
}

#[test]
fn test_connector_entry_coercion() {
    let rules = normalize_rules(&json!({
        "conditions": [{}, {}, {}, {}, {}, {}],
        "connectors": [" or ", "OR", "xor", 7, true],
    }));
    // " or " uppercase-trims to OR; unrecognized truthy entries become AND
    assert_eq!(
        rules.connectors,
        vec![Logic::Or, Logic::Or, Logic::And, Logic::And, Logic::And]
    );
}

#[test]
fn test_falsy_connector_entries_dropped_before_mapping() {
    // null / false / 0 / "" are removed, shortening the list; the tail is
    // then padded with the global logic
    let rules = normalize_rules(&json!({
        "logic": "OR",
        "conditions": [{}, {}, {}, {}],
        "connectors": ["AND", null, false, 0, "", "OR"],
    }));
    assert_eq!(rules.connectors, vec![Logic::And, Logic::Or, Logic::Or]);
}

#[test]
fn test_single_condition_has_no_connectors() {
    let rules = normalize_rules(&json!({
        "conditions": [{ "field": "email", "operator": "contains", "value": "@gmail" }],
        "connectors": ["AND", "OR"],
    }));
    assert!(rules.connectors.is_empty());
    // connectors key must not be fabricated in the serialized shape
    let out = serde_json::to_value(&rules).unwrap();
    assert!(out.get("connectors").is_none());
}

#[test]
fn test_malformed_ai_output_scenario() {
    // non-enum logic and a condition missing operator/value
    let rules = normalize_rules(&json!({
        "logic": "add",
        "conditions": [{ "field": "totalSpending" }],
    }));
    let out = serde_json::to_value(&rules).unwrap();
    assert_eq!(
        out,
        json!({
            "logic": "AND",
            "conditions": [{ "field": "totalSpending", "operator": ">=", "value": 0 }],
        })
    );
}

#[test]
fn test_idempotence() {
    let candidates = [
        json!(null),
        json!({}),
        json!([1, 2]),
        json!({ "logic": "OR", "conditions": [{}, { "field": "lastVisit" }] }),
        json!({
            "logic": "add",
            "conditions": [
                { "field": "visitCount", "operator": ">", "value": 3 },
                { "field": "email", "operator": "contains", "value": "@" },
                { "field": "nope" },
            ],
            "connectors": ["or", null, "OR", "AND"],
        }),
        json!({
            "logic": "OR",
            "conditions": [{ "field": "totalSpending", "operator": "<=", "value": 99.5 }],
            "connectors": ["AND", "OR", "AND"],
        }),
    ];

    for candidate in &candidates {
        let once = serde_json::to_value(normalize_rules(candidate)).unwrap();
        assert_eq!(
            renormalize(candidate),
            once,
            "normalization not idempotent for {candidate}"
        );
    }
}

#[test]
fn test_connector_length_invariant() {
    let candidates = [
        json!({}),
        json!({ "conditions": [{}] }),
        json!({ "conditions": [{}, {}], "connectors": [] }),
        json!({ "conditions": [{}, {}, {}, {}], "connectors": ["OR"] }),
        json!({ "conditions": [{}, {}], "connectors": ["OR", "OR", "OR", "OR"] }),
    ];
    for candidate in &candidates {
        let rules = normalize_rules(candidate);
        assert_eq!(
            rules.connectors.len(),
            rules.conditions.len().saturating_sub(1),
            "invariant violated for {candidate}"
        );
    }
}

#[test]
fn test_well_formed_input_preserved() {
    let candidate = json!({
        "logic": "OR",
        "conditions": [
            { "field": "totalSpending", "operator": ">=", "value": 100 },
            { "field": "lastVisit", "operator": "after", "value": "2026-01-01" },
        ],
        "connectors": ["AND"],
    });
    let rules = normalize_rules(&candidate);
    assert_eq!(serde_json::to_value(&rules).unwrap(), candidate);
}
