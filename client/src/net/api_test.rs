use super::*;

#[test]
fn workouts_endpoint_without_filters_is_bare() {
    assert_eq!(workouts_endpoint(&WorkoutFilter::default()), "/api/workouts");
}

#[test]
fn workouts_endpoint_joins_filters_in_fixed_order() {
    let filter = WorkoutFilter {
        category: Some("cat-1".to_owned()),
        difficulty: Some("beginner".to_owned()),
        limit: Some(3),
        order: Some("duration".to_owned()),
    };
    assert_eq!(
        workouts_endpoint(&filter),
        "/api/workouts?category=cat-1&difficulty=beginner&limit=3&order=duration"
    );
}

#[test]
fn workouts_endpoint_skips_empty_values_and_encodes() {
    let filter = WorkoutFilter {
        category: Some(String::new()),
        difficulty: Some("all levels".to_owned()),
        ..WorkoutFilter::default()
    };
    assert_eq!(workouts_endpoint(&filter), "/api/workouts?difficulty=all%20levels");
}

#[test]
fn workout_paths_embed_id() {
    assert_eq!(workout_endpoint("w-9"), "/api/workouts/w-9");
    assert_eq!(complete_endpoint("w-9"), "/api/workouts/w-9/complete");
}

#[test]
fn failure_message_prefers_server_error_body() {
    assert_eq!(
        failure_message("sign in", 401, Some(r#"{"error":"Invalid login credentials"}"#)),
        "Invalid login credentials"
    );
}

#[test]
fn failure_message_falls_back_to_status() {
    assert_eq!(failure_message("sign up", 502, Some("<html>")), "sign up failed: 502");
    assert_eq!(failure_message("sign up", 500, None), "sign up failed: 500");
}
