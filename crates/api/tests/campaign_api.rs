//! HTTP-level integration tests for the campaign configuration endpoints.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get, put_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn campaign_reads_null_until_configured(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/campaign").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["remaining_winners"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn campaign_update_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/admin/campaign",
        "not-a-token",
        serde_json::json!({ "remaining_winners": "3" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn campaign_round_trips_and_overwrites(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    let response = put_json_auth(
        app.clone(),
        "/api/v1/admin/campaign",
        &token,
        serde_json::json!({ "remaining_winners": "5 winners left" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), "/api/v1/campaign").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["remaining_winners"], "5 winners left");

    // Upsert semantics: a second write replaces the value.
    put_json_auth(
        app.clone(),
        "/api/v1/admin/campaign",
        &token,
        serde_json::json!({ "remaining_winners": "sold out" }),
    )
    .await;

    let response = get(app, "/api/v1/campaign").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["remaining_winners"], "sold out");
}
