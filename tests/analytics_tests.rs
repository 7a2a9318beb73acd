use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};

mod common;
use common::{bearer, TestApp};

const BROWSER: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/126.0";

async fn insert_views(test_app: &TestApp, count: i64, age: Duration) {
    sqlx::query(
        "WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < ?) \
         INSERT INTO page_views (hashed_ip, hashed_user_agent, viewed_at) \
         SELECT 'ip', 'agent', ? FROM seq",
    )
    .bind(count)
    .bind(Utc::now() - age)
    .execute(&test_app.pool)
    .await
    .unwrap();
}

fn chart_sum(body: &serde_json::Value) -> u64 {
    body["data"]["chart"]
        .as_array()
        .unwrap()
        .iter()
        .map(|point| point["views"].as_u64().unwrap())
        .sum()
}

#[actix_web::test]
async fn test_track_counts_every_browser_call() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/analytics/track")
            .insert_header(("user-agent", BROWSER))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["tracked"], true);
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM page_views")
        .fetch_one(&test_app.pool)
        .await
        .unwrap();
    assert_eq!(count, 3);

    // Only digests are stored
    let agent: String = sqlx::query_scalar("SELECT hashed_user_agent FROM page_views LIMIT 1")
        .fetch_one(&test_app.pool)
        .await
        .unwrap();
    assert_eq!(agent.len(), 64);
    assert_ne!(agent, BROWSER);
}

#[actix_web::test]
async fn test_track_skips_bots() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/analytics/track")
        .insert_header(("user-agent", "Googlebot/2.1 (+http://www.google.com/bot.html)"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["tracked"], false);
    assert_eq!(body["data"]["reason"], "bot");

    let req = test::TestRequest::post().uri("/api/analytics/track").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["tracked"], false);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM page_views")
        .fetch_one(&test_app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn test_report_defaults_to_last_week() {
    let test_app = TestApp::new().await;
    insert_views(&test_app, 4, Duration::hours(2)).await;
    insert_views(&test_app, 5, Duration::days(10)).await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/analytics")
        .insert_header(bearer(&token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["range"], "7d");
    assert_eq!(body["data"]["total_views"], 4);
    assert_eq!(chart_sum(&body), 4);
    assert_eq!(body["data"]["chart"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/analytics?range=all")
        .insert_header(bearer(&token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["range"], "all");
    assert_eq!(body["data"]["total_views"], 9);
    assert_eq!(chart_sum(&body), 9);
}

#[actix_web::test]
async fn test_report_on_empty_log() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    for range in ["1h", "1d", "7d", "1m", "1y", "all"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/analytics?range={}", range))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", range);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["range"], range);
        assert_eq!(body["data"]["total_views"], 0);
        assert!(body["data"]["chart"].as_array().unwrap().is_empty());
    }
}

#[actix_web::test]
async fn test_chart_is_capped_but_total_is_not() {
    let test_app = TestApp::new().await;
    insert_views(&test_app, 10_010, Duration::minutes(5)).await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/analytics?range=1h")
        .insert_header(bearer(&token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["total_views"], 10_010);
    assert_eq!(chart_sum(&body), 10_000);
}

#[actix_web::test]
async fn test_report_rejects_unknown_range() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/analytics?range=2w")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid range. Valid ranges: 1h, 1d, 7d, 1m, 1y, all");
}

#[actix_web::test]
async fn test_report_requires_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/analytics?range=1d").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_track_hashes_the_socket_peer() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for forwarded in ["198.51.100.1", "198.51.100.2"] {
        let req = test::TestRequest::post()
            .uri("/api/analytics/track")
            .peer_addr("10.0.0.9:51000".parse().unwrap())
            .insert_header(("user-agent", BROWSER))
            .insert_header(("x-forwarded-for", forwarded))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let hashes: Vec<String> = sqlx::query_scalar("SELECT DISTINCT hashed_ip FROM page_views")
        .fetch_all(&test_app.pool)
        .await
        .unwrap();
    assert_eq!(hashes, vec![storefront_cms::utils::hash::hash_text("10.0.0.9")]);
}
