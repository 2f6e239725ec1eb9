use super::test_support::{app, get};
use super::*;

fn rendered(err: ApiError) -> (StatusCode, String) {
    err.status_and_message()
}

#[test]
fn gateway_errors_map_to_status_codes() {
    assert_eq!(rendered(GatewayError::NotFound.into()).0, StatusCode::NOT_FOUND);
    assert_eq!(
        rendered(GatewayError::Unauthorized("Invalid login credentials".into()).into()),
        (StatusCode::UNAUTHORIZED, "Invalid login credentials".to_owned())
    );
    assert_eq!(rendered(GatewayError::Conflict("taken".into()).into()).0, StatusCode::CONFLICT);
    assert_eq!(rendered(GatewayError::Request("timeout".into()).into()).0, StatusCode::BAD_GATEWAY);
    assert_eq!(rendered(GatewayError::Parse("eof".into()).into()).0, StatusCode::BAD_GATEWAY);
    assert_eq!(
        rendered(GatewayError::Db(sqlx::Error::RowNotFound).into()),
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_owned())
    );
}

#[test]
fn upstream_client_errors_surface_their_message() {
    let err = GatewayError::Upstream {
        status: 422,
        body: r#"{"msg":"Password should be at least 6 characters"}"#.into(),
    };
    assert_eq!(
        rendered(err.into()),
        (StatusCode::BAD_REQUEST, "Password should be at least 6 characters".to_owned())
    );

    let err = GatewayError::Upstream { status: 500, body: "boom".into() };
    assert_eq!(rendered(err.into()).0, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn healthz_is_ok() {
    let reply = get(&app(), "/healthz", None).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn error_body_is_json_with_error_field() {
    let reply = get(&app(), "/api/workouts/not-a-uuid", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json["error"], "Not found");
}
