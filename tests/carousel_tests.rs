use actix_web::{http::StatusCode, test};
use serde_json::json;

mod common;
use common::{bearer, TestApp};

fn create(token: &str, body: serde_json::Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/carousel")
        .insert_header(bearer(token))
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn test_carousel_crud() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(
        &app,
        create(
            &token,
            json!({
                "imageUrl": "https://cdn.test/reel.jpg",
                "productName": "Reel Daiwa",
                "price": "450000",
                "link": "https://shopee.co.id/reel",
                "badge": "Best Seller"
            }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Carousel item created successfully");
    assert_eq!(body["data"]["price"], 450000.0);
    assert_eq!(body["data"]["currency"], "IDR");
    assert_eq!(body["data"]["isActive"], true);
    assert_eq!(body["data"]["sortOrder"], 0);
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/carousel/{}", id))
        .insert_header(bearer(&token))
        .set_json(json!({ "price": 399000, "sortOrder": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["price"], 399000.0);
    assert_eq!(body["data"]["sortOrder"], 3);
    assert_eq!(body["data"]["productName"], "Reel Daiwa");
    assert_eq!(body["data"]["badge"], "Best Seller");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/carousel/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Carousel item deleted successfully");

    let req = test::TestRequest::get()
        .uri("/api/carousel/all")
        .insert_header(bearer(&token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_requires_fields() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(
        &app,
        create(&token, json!({ "imageUrl": "https://cdn.test/a.jpg", "price": 10 })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        create(
            &token,
            json!({
                "imageUrl": "https://cdn.test/a.jpg",
                "productName": "Kail",
                "price": "murah",
                "link": "https://shop.test/kail"
            }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_public_list_shows_active_items_in_order() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    for (name, sort_order, active) in [("Joran", 2, true), ("Senar", 1, true), ("Umpan", 0, false)] {
        let resp = test::call_service(
            &app,
            create(
                &token,
                json!({
                    "imageUrl": "https://cdn.test/x.jpg",
                    "productName": name,
                    "price": 10000,
                    "link": "https://shop.test/x",
                    "sortOrder": sort_order,
                    "isActive": active
                }),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/carousel").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("cache-control").unwrap(),
        "no-store, no-cache, must-revalidate"
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["productName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Senar", "Joran"]);

    let req = test::TestRequest::get()
        .uri("/api/carousel/all")
        .insert_header(bearer(&token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"][0]["productName"], "Umpan");
}

#[actix_web::test]
async fn test_missing_and_malformed_ids() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/carousel/999")
        .insert_header(bearer(&token))
        .set_json(json!({ "productName": "Ghost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Item not found");

    let req = test::TestRequest::delete()
        .uri("/api/carousel/999")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/api/carousel/abc")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid item ID");
}

#[actix_web::test]
async fn test_mutations_require_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/carousel")
        .set_json(json!({ "productName": "Joran" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete().uri("/api/carousel/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
