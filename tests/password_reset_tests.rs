use actix_web::{http::StatusCode, test};
use serde_json::json;

mod common;
use common::{TestApp, ADMIN_ACCOUNT_EMAIL, ADMIN_USERNAME, REGISTERED_EMAIL};

fn forgot(email: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/auth/forgot-password")
        .set_json(json!({ "email": email }))
        .to_request()
}

fn verify(email: &str, otp: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .set_json(json!({ "email": email, "otp": otp }))
        .to_request()
}

fn reset(email: &str, otp: &str, new_password: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({ "email": email, "otp": otp, "newPassword": new_password }))
        .to_request()
}

fn login(password: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "usernameOrEmail": ADMIN_USERNAME, "password": password }))
        .to_request()
}

#[actix_web::test]
async fn test_full_reset_flow() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP telah dikirim ke email");
    assert_eq!(body["data"]["success"], true);

    let code = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();
    assert_eq!(code.len(), 6);
    {
        let sent = test_app.mail.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, REGISTERED_EMAIL);
        assert!(sent[0].1.contains(&code));
        assert!(sent[0].1.contains(ADMIN_USERNAME));
    }

    let resp = test::call_service(&app, verify(REGISTERED_EMAIL, &code)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP valid");

    let resp = test::call_service(&app, reset(REGISTERED_EMAIL, &code, "brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password berhasil direset");

    assert!(test_app.stored_code(REGISTERED_EMAIL).await.is_none());
    let resp = test::call_service(&app, login("brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_request_matches_registered_email_case_insensitively() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(&app, forgot(&REGISTERED_EMAIL.to_uppercase())).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Codes are always stored under the registered spelling
    assert!(test_app.stored_code(REGISTERED_EMAIL).await.is_some());
}

#[actix_web::test]
async fn test_request_rejects_unregistered_email() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    // The account email is not the registered one
    let resp = test::call_service(&app, forgot(ADMIN_ACCOUNT_EMAIL)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Email tidak terdaftar. Gunakan email yang terdaftar di Settings."
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM otp_codes")
        .fetch_one(&test_app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert!(test_app.mail.sent.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_request_without_admin_email_setting() {
    let test_app = TestApp::new().await;
    sqlx::query("DELETE FROM site_settings WHERE key = 'admin_email'")
        .execute(&test_app.pool)
        .await
        .unwrap();
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Email admin belum diatur di Settings. Hubungi administrator."
    );
}

#[actix_web::test]
async fn test_request_without_admin_account() {
    let test_app = TestApp::empty().await;
    sqlx::query("INSERT INTO site_settings (key, value, created_at, updated_at) VALUES ('admin_email', ?, ?, ?)")
        .bind(REGISTERED_EMAIL)
        .bind(chrono::Utc::now())
        .bind(chrono::Utc::now())
        .execute(&test_app.pool)
        .await
        .unwrap();
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Akun admin tidak ditemukan");
}

#[actix_web::test]
async fn test_new_request_supersedes_previous_code() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    let first = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();
    test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    let second = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM otp_codes")
        .fetch_one(&test_app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    if first != second {
        let resp = test::call_service(&app, verify(REGISTERED_EMAIL, &first)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    let resp = test::call_service(&app, verify(REGISTERED_EMAIL, &second)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_verify_is_single_use() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    let code = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();

    let resp = test::call_service(&app, verify(REGISTERED_EMAIL, &code)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, verify(REGISTERED_EMAIL, &code)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP tidak valid atau sudah expired");

    // Verified codes stay in the table until the reset consumes them
    assert!(test_app.stored_code(REGISTERED_EMAIL).await.is_some());
}

#[actix_web::test]
async fn test_expired_code_is_rejected_everywhere() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    let code = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();
    test_app.expire_codes().await;

    let resp = test::call_service(&app, verify(REGISTERED_EMAIL, &code)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, reset(REGISTERED_EMAIL, &code, "brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP tidak valid atau sudah expired");
}

#[actix_web::test]
async fn test_reset_without_prior_verify_succeeds() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    let code = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();

    let resp = test::call_service(&app, reset(REGISTERED_EMAIL, &code, "brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_reset_cannot_be_repeated() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    let code = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();

    let resp = test::call_service(&app, reset(REGISTERED_EMAIL, &code, "brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, reset(REGISTERED_EMAIL, &code, "another1")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, login("brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_reset_rejects_other_email_even_with_valid_code() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    test::call_service(&app, forgot(REGISTERED_EMAIL)).await;
    let code = test_app.stored_code(REGISTERED_EMAIL).await.unwrap();

    // An account with this email exists, but it is not the registered address
    let resp = test::call_service(&app, reset(ADMIN_ACCOUNT_EMAIL, &code, "brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email tidak valid");

    let resp = test::call_service(&app, login("brandnew1")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_reset_validates_input_before_lookup() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(&app, reset(REGISTERED_EMAIL, "123456", "short")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password minimal 6 karakter");

    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({ "email": REGISTERED_EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email, OTP, dan password baru diperlukan");

    let req = test::TestRequest::post()
        .uri("/api/auth/forgot-password")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email diperlukan");
}
