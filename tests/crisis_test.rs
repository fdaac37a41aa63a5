//! Crisis detection behavior across the public API

use std::collections::HashMap;

use kokoro::crisis::{assess, catalog, DISPLAY_LIMIT};
use kokoro::models::{EmotionFocus, ResourcePriority, RiskLevel};

fn no_emotions() -> HashMap<String, f64> {
    HashMap::new()
}

#[test]
fn hopeless_statement_is_high_risk() {
    let result = assess("I feel hopeless and don't see a way out", None, &no_emotions());
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(result.requires_immediate_attention);
}

#[test]
fn high_risk_always_includes_emergency_contact() {
    let result = assess("i can't stop thinking about suicide", None, &no_emotions());
    assert_eq!(result.resources[0].phone, "911");
    assert_eq!(result.resources[0].priority, ResourcePriority::Immediate);
}

#[test]
fn distress_language_is_medium_risk() {
    let result = assess(
        "I feel like I'm falling apart and can't take it anymore",
        None,
        &no_emotions(),
    );
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert!(!result.requires_immediate_attention);
}

#[test]
fn ordinary_text_is_low_risk_with_general_resources() {
    let result = assess("Went hiking and felt great", Some(8.5), &no_emotions());
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.indicators.is_empty());
    assert!(!result.resources.is_empty());
    assert!(result.resources.iter().all(|r| r.phone != "911"));
}

#[test]
fn matching_is_case_insensitive() {
    let result = assess("I WANT TO DIE", None, &no_emotions());
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn very_low_mood_escalates_without_keywords() {
    let result = assess("meh", Some(1.0), &no_emotions());
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert!(result
        .indicators
        .iter()
        .any(|i| i.contains("low mood score")));
}

#[test]
fn high_mood_never_downgrades_a_keyword_match() {
    let result = assess("i want to end my life", Some(10.0), &no_emotions());
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn anxiety_focus_surfaces_anxiety_resource() {
    let mut emotions = HashMap::new();
    emotions.insert("anxiety".to_string(), 0.85);

    let result = assess("deadline week", Some(4.5), &emotions);
    assert_eq!(result.emotion_focus, Some(EmotionFocus::Anxiety));
    assert!(result.resources.iter().any(|r| r.name == "Anxiety Canada"));
}

#[test]
fn depression_focus_from_strong_sadness() {
    let mut emotions = HashMap::new();
    emotions.insert("sadness".to_string(), 0.95);

    let result = assess("slow grey week", Some(4.0), &emotions);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.emotion_focus, Some(EmotionFocus::Depression));
}

#[test]
fn resources_are_capped_and_sorted() {
    let mut emotions = HashMap::new();
    emotions.insert("sadness".to_string(), 0.95);

    let result = assess("i want to die", Some(1.0), &emotions);
    assert!(result.resources.len() <= DISPLAY_LIMIT);

    let priorities: Vec<_> = result.resources.iter().map(|r| r.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
}

#[test]
fn catalog_has_general_hotlines() {
    let resources = catalog();
    assert!(resources.iter().any(|r| r.name == "Crisis Services Canada"));
    assert!(resources.iter().any(|r| r.name == "Kids Help Phone"));
    assert!(resources.iter().any(|r| r.phone == "911"));
}

#[test]
fn reasoning_is_absent_by_default() {
    let result = assess("rough day at work", None, &no_emotions());
    assert!(result.reasoning.is_none());
}
