use time::Month;

use super::*;

fn march(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::March, day).unwrap()
}

fn account(email: &str, first: &str) -> NewAccount {
    NewAccount {
        email: email.into(),
        password: "hunter22".into(),
        first_name: first.into(),
        last_name: "Tester".into(),
    }
}

async fn signed_in(gateway: &MemoryGateway, email: &str, first: &str) -> Session {
    gateway.sign_up(&account(email, first)).await.unwrap();
    gateway
        .sign_in(&Credentials { email: email.into(), password: "hunter22".into() })
        .await
        .unwrap()
}

#[tokio::test]
async fn sign_up_then_sign_in_resolves_identity() {
    let gateway = MemoryGateway::new();
    let session = signed_in(&gateway, "Ada@Example.com", "Ada").await;

    assert_eq!(session.user.email.as_deref(), Some("ada@example.com"));
    let me = gateway.current_user(&session.access_token).await.unwrap();
    assert_eq!(me, session.user);

    let profile = gateway.profile(me.id).await.unwrap();
    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn duplicate_sign_up_conflicts() {
    let gateway = MemoryGateway::new();
    gateway.sign_up(&account("a@b.co", "Ann")).await.unwrap();
    let err = gateway.sign_up(&account("A@B.CO", "Ann")).await.unwrap_err();
    assert!(matches!(err, GatewayError::Conflict(_)));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let gateway = MemoryGateway::new();
    gateway.sign_up(&account("a@b.co", "Ann")).await.unwrap();
    let err = gateway
        .sign_in(&Credentials { email: "a@b.co".into(), password: "nope".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized(_)));
}

#[tokio::test]
async fn sign_out_invalidates_token() {
    let gateway = MemoryGateway::new();
    let session = signed_in(&gateway, "a@b.co", "Ann").await;
    gateway.sign_out(&session.access_token).await.unwrap();
    assert!(matches!(
        gateway.current_user(&session.access_token).await,
        Err(GatewayError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn each_sign_in_keeps_its_own_session_until_sign_out() {
    let gateway = MemoryGateway::new();
    let first = signed_in(&gateway, "ada@example.com", "Ada").await;
    let second = gateway
        .sign_in(&Credentials { email: "ada@example.com".into(), password: "hunter22".into() })
        .await
        .unwrap();
    assert_ne!(first.access_token, second.access_token);

    gateway.sign_out(&first.access_token).await.unwrap();
    assert!(gateway.current_user(&first.access_token).await.is_err());
    assert_eq!(gateway.current_user(&second.access_token).await.unwrap(), second.user);
}

#[tokio::test]
async fn list_filters_and_orders() {
    let gateway = MemoryGateway::new();

    let all = gateway.list_workouts(&WorkoutQuery::default()).await.unwrap();
    let titles: Vec<_> = all.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, ["Balance Training", "Chair Yoga Basics", "Gentle Morning Stretches", "Mindful Walking"]);

    let flexibility = gateway
        .list_workouts(&WorkoutQuery { category: Some(FLEXIBILITY_ID), ..WorkoutQuery::default() })
        .await
        .unwrap();
    assert!(flexibility.iter().all(|w| w.category_name.as_deref() == Some("Flexibility")));
    assert_eq!(flexibility.len(), 2);

    let by_duration = gateway
        .list_workouts(&WorkoutQuery {
            difficulty: Some("MEDIUM".into()),
            order: WorkoutOrder::Duration,
            limit: Some(1),
            ..WorkoutQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(by_duration.len(), 1);
    assert_eq!(by_duration[0].id, BALANCE_TRAINING_ID);
}

#[tokio::test]
async fn unknown_workout_is_not_found() {
    let gateway = MemoryGateway::new();
    assert!(matches!(gateway.workout(Uuid::nil()).await, Err(GatewayError::NotFound)));
    assert!(matches!(
        gateway.complete_workout(Uuid::new_v4(), Uuid::nil()).await,
        Err(GatewayError::NotFound)
    ));
    assert_eq!(gateway.completion_count(), 0);
}

#[tokio::test]
async fn completions_build_a_streak() {
    let day = std::sync::Arc::new(std::sync::atomic::AtomicU8::new(10));
    let clock = day.clone();
    let gateway =
        MemoryGateway::new().with_clock(move || march(clock.load(std::sync::atomic::Ordering::SeqCst)));
    let user = Uuid::new_v4();

    gateway.complete_workout(user, CHAIR_YOGA_ID).await.unwrap();
    day.store(11, std::sync::atomic::Ordering::SeqCst);
    gateway.complete_workout(user, MINDFUL_WALKING_ID).await.unwrap();
    let latest = gateway.complete_workout(user, MINDFUL_WALKING_ID).await.unwrap();

    assert_eq!(latest.workouts_completed, 3);
    assert_eq!(latest.points, 30);
    assert_eq!(latest.streak_days, 2);
    assert_eq!(latest.last_workout_date, Some(march(11)));
    assert_eq!(gateway.achievement(user).await.unwrap(), Some(latest));
    assert_eq!(gateway.completion_count(), 3);
}

#[tokio::test]
async fn leaderboard_ranks_by_points_with_names() {
    let gateway = MemoryGateway::new().with_clock(|| march(14));
    let ann = signed_in(&gateway, "ann@b.co", "Ann").await.user.id;
    let bob = signed_in(&gateway, "bob@b.co", "Bob").await.user.id;

    gateway.complete_workout(ann, CHAIR_YOGA_ID).await.unwrap();
    gateway.complete_workout(bob, CHAIR_YOGA_ID).await.unwrap();
    gateway.complete_workout(bob, BALANCE_TRAINING_ID).await.unwrap();

    let board = gateway.leaderboard().await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].first_name.as_deref(), Some("Bob"));
    assert_eq!(board[0].points, 20);
    assert_eq!(board[1].user_id, ann);
}

#[tokio::test]
async fn update_profile_trims_and_replaces() {
    let gateway = MemoryGateway::new();
    let id = Uuid::new_v4();
    let saved = gateway
        .update_profile(id, &ProfileUpdate { first_name: " Grace ".into(), last_name: "Hopper".into(), age: Some(71) })
        .await
        .unwrap();
    assert_eq!(saved.first_name.as_deref(), Some("Grace"));
    assert_eq!(gateway.profile(id).await.unwrap(), saved);
}
