use actix_web::{
    App,
    http::{StatusCode, header},
    test,
};
use serde_json::{Value, json};

use evcare_leads::auth::hash_password;
use evcare_leads::build_app_state;
use evcare_leads::domain::types::LeadId;
use evcare_leads::models::config::ServerConfig;
use evcare_leads::routes;

mod common;

const ADMIN_EMAIL: &str = "admin@enliteev.com";
const ADMIN_PASSWORD: &str = "s3cret";

fn server_config(test_db: &common::TestDb) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: test_db.path().to_string_lossy().into_owned(),
        secret: "test-secret".into(),
        admin_email: ADMIN_EMAIL.into(),
        admin_password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
        token_ttl_minutes: 5,
    }
}

macro_rules! init_app {
    ($test_db:expr) => {{
        let (repo, auth) = build_app_state(&server_config($test_db)).unwrap();
        test::init_service(
            App::new()
                .app_data(repo)
                .app_data(auth)
                .configure(routes::configure),
        )
        .await
    }};
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], true);
        body["token"].as_str().unwrap().to_string()
    }};
}

macro_rules! list {
    ($app:expr, $token:expr) => {{
        let req = test::TestRequest::get()
            .uri("/api/contact")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", $token)))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body.as_array().unwrap().clone()
    }};
}

#[actix_web::test]
async fn asha_rao_submission_reaches_the_dashboard_listing() {
    let test_db = common::TestDb::new("asha_rao_scenario.db");
    let app = init_app!(&test_db);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Asha Rao",
            "phone": "9999999999",
            "vehicleType": "2-wheeler",
            "serviceType": "repair",
            "message": "Brakes squeal"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact request submitted successfully");
    let id = body["id"].as_str().unwrap().to_string();

    let token = login!(&app);
    let leads = list!(&app, &token);
    assert_eq!(leads.len(), 1);
    let lead = &leads[0];
    assert_eq!(lead["id"], id.as_str());
    assert_eq!(lead["name"], "Asha Rao");
    assert_eq!(lead["phone"], "9999999999");
    assert_eq!(lead["vehicleType"], "2-wheeler");
    assert_eq!(lead["serviceType"], "repair");
    assert_eq!(lead["message"], "Brakes squeal");
    assert_eq!(lead["status"], "pending");
    assert!(lead["createdAt"].is_string());
}

#[actix_web::test]
async fn listing_returns_submitted_text_unchanged() {
    let test_db = common::TestDb::new("submitted_text_unchanged.db");
    let app = init_app!(&test_db);

    let message = "Range < 50km & brakes \"squeal\"";
    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Asha Rao",
            "phone": "9999999999",
            "email": "Asha@Example.com",
            "vehicleType": "2-wheeler",
            "message": message
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let token = login!(&app);
    let leads = list!(&app, &token);
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["message"], message);
    assert_eq!(leads[0]["email"], "Asha@Example.com");
}

#[actix_web::test]
async fn missing_required_fields_are_rejected_without_storing() {
    let test_db = common::TestDb::new("missing_required_fields.db");
    let app = init_app!(&test_db);

    for payload in [
        json!({ "phone": "9999999999", "vehicleType": "bus" }),
        json!({ "name": "Asha Rao", "vehicleType": "bus" }),
        json!({ "name": "Asha Rao", "phone": "9999999999" }),
        json!({ "name": "  ", "phone": "9999999999", "vehicleType": "bus" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid form data");
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    let token = login!(&app);
    assert!(list!(&app, &token).is_empty());
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let test_db = common::TestDb::new("malformed_body.db");
    let app = init_app!(&test_db);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn listing_requires_a_token() {
    let test_db = common::TestDb::new("listing_requires_token.db");
    let app = init_app!(&test_db);

    let req = test::TestRequest::get().uri("/api/contact").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let test_db = common::TestDb::new("wrong_password.db");
    let app = init_app!(&test_db);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": "guess" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[actix_web::test]
async fn listing_supports_search_and_total_header() {
    let test_db = common::TestDb::new("listing_search.db");
    let app = init_app!(&test_db);

    for (name, phone) in [("Asha Rao", "9999999999"), ("Ravi Kumar", "8888888888")] {
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(json!({ "name": name, "phone": phone, "vehicleType": "3-wheeler" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let token = login!(&app);
    let req = test::TestRequest::get()
        .uri("/api/contact?q=kumar")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Total-Count").unwrap(), "1");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Ravi Kumar");
}

#[actix_web::test]
async fn huge_page_number_returns_an_empty_page() {
    let test_db = common::TestDb::new("huge_page_number.db");
    let app = init_app!(&test_db);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "Asha Rao", "phone": "9999999999", "vehicleType": "bus" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let token = login!(&app);
    let req = test::TestRequest::get()
        .uri(&format!("/api/contact?page={}&perPage=100", usize::MAX))
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Total-Count").unwrap(), "1");
    let body: Value = test::read_body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn status_update_flow() {
    let test_db = common::TestDb::new("status_update_flow.db");
    let app = init_app!(&test_db);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "Ravi Kumar", "phone": "8888888888", "vehicleType": "bus" }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let id = body["id"].as_str().unwrap().to_string();
    let token = login!(&app);
    let auth = (header::AUTHORIZATION, format!("Bearer {token}"));

    for _ in 0..2 {
        let req = test::TestRequest::patch()
            .uri(&format!("/api/contact/{id}/status"))
            .insert_header(auth.clone())
            .set_json(json!({ "status": "contacted" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Status updated successfully");
        assert_eq!(body["request"]["status"], "contacted");
        assert_eq!(body["request"]["id"], id.as_str());
    }

    let req = test::TestRequest::patch()
        .uri(&format!("/api/contact/{id}/status"))
        .insert_header(auth.clone())
        .set_json(json!({ "status": "archived" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::patch()
        .uri(&format!("/api/contact/{id}/status"))
        .insert_header(auth.clone())
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Status is required and must be a string");

    let missing = LeadId::new();
    let req = test::TestRequest::patch()
        .uri(&format!("/api/contact/{missing}/status"))
        .insert_header(auth.clone())
        .set_json(json!({ "status": "resolved" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Contact request not found");

    let leads = list!(&app, &token);
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["status"], "contacted");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/contact/{id}/status"))
        .set_json(json!({ "status": "resolved" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}
