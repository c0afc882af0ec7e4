//! Route-level tests. The ones marked `#[ignore]` need a Postgres database
//! at `TEST_DATABASE_URL`; run them with `cargo test -- --ignored`.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Once,
};

use actix_web::{http::header::AUTHORIZATION, http::StatusCode, test, web, App};
use chrono::Utc;
use diesel::{connection::SimpleConnection, r2d2::ConnectionManager, PgConnection};
use serde_json::{json, Value};

use crate::{
    auth::{Role, TokenService},
    routes, not_found,
    settings::Settings,
    DbPool,
};

const SCHEMA_SQL: &str = include_str!("../migrations/2024-06-01-000000_create_tables/up.sql");

fn test_settings() -> Settings {
    let builder = config::Config::builder()
        .set_override("auth.secret", "route-test-secret")
        .unwrap();
    Settings::load(builder).unwrap()
}

/// A pool that never connects, for routes rejected before any query runs.
fn idle_pool() -> DbPool {
    r2d2::Pool::builder()
        .min_idle(Some(0))
        .build_unchecked(ConnectionManager::new("postgres://localhost/unused"))
}

fn db_pool() -> DbPool {
    static MIGRATE: Once = Once::new();

    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL is not set");
    let pool = r2d2::Pool::builder()
        .max_size(4)
        .build(ConnectionManager::<PgConnection>::new(url))
        .unwrap();
    MIGRATE.call_once(|| {
        pool.get().unwrap().batch_execute(SCHEMA_SQL).unwrap();
    });
    pool
}

fn unique(prefix: &str) -> String {
    static SEQ: AtomicUsize = AtomicUsize::new(0);
    format!(
        "{}{}x{}",
        prefix,
        Utc::now().timestamp_micros(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

fn unique_email(prefix: &str) -> String {
    format!("{}@medlink.test", unique(prefix))
}

macro_rules! test_app {
    ($pool:expr) => {{
        let settings = test_settings();
        let tokens = TokenService::from_settings(&settings.auth).unwrap();
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool))
                .app_data(web::Data::new(tokens))
                .app_data(web::Data::new(settings))
                .configure(routes)
                .default_service(web::route().to(not_found)),
        )
        .await
    }};
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
    ($app:expr, $req:expr, $token:expr) => {
        send!(
            $app,
            $req.insert_header((AUTHORIZATION, format!("Bearer {}", $token)))
        )
    };
}

/// Registers an account of the given kind and returns `(id, token)`.
macro_rules! register {
    ($app:expr, $kind:literal, $body:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri(concat!("/api/", $kind, "/register"))
                .set_json($body)
        );
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let account = body["data"]
            .as_object()
            .and_then(|data| data.values().find(|v| v.is_object()))
            .cloned()
            .unwrap();
        (
            account["id"].as_i64().unwrap(),
            body["data"]["token"].as_str().unwrap().to_string(),
        )
    }};
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

fn issue(role: Role) -> String {
    let settings = test_settings();
    TokenService::from_settings(&settings.auth)
        .unwrap()
        .issue(1, role)
        .unwrap()
}

#[actix_web::test]
async fn health_reports_running() {
    let app = test_app!(idle_pool());
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Server is running" }));
}

#[actix_web::test]
async fn unknown_route_is_not_found() {
    let app = test_app!(idle_pool());
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/nowhere"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Route not found" }));
}

#[actix_web::test]
async fn search_requires_a_user_token() {
    let app = test_app!(idle_pool());

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/users/search/doctors"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");

    let (status, _) = send!(
        app,
        test::TestRequest::get().uri("/api/users/search/medicines"),
        issue(Role::Pharmacy)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn owner_routes_reject_other_roles() {
    let app = test_app!(idle_pool());
    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/api/hospitals/doctors"),
        issue(Role::User)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri("/api/pharmacies/medicines/1"),
        issue(Role::Hospital)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn malformed_requests_are_bad_requests() {
    let app = test_app!(idle_pool());
    let token = issue(Role::Hospital);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/hospitals/doctors/abc")
            .set_json(json!({ "full_name": "Dr. B" })),
        token
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/hospitals/doctors/1")
            .set_json(json!({})),
        token
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields to update");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/hospitals/doctors/1")
            .set_json(json!({ "hospital_id": 99 })),
        token
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Field 'hospital_id' cannot be updated");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/pharmacies/medicines/1")
            .set_json(json!({ "price": -10.0 })),
        issue(Role::Pharmacy)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Field 'price' cannot be negative");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users/register")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(json!({ "full_name": " ", "email": "a@b.c", "password": "p1" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide all required fields");
}

#[actix_web::test]
#[ignore]
async fn doctor_lifecycle_is_scoped_to_its_hospital() {
    let app = test_app!(db_pool());
    let specialization = unique("Cardiology");

    let (hospital_id, hospital_token) = register!(
        app,
        "hospitals",
        json!({
            "hospital_name": "City Hospital",
            "email": unique_email("city"),
            "password": "p1",
            "city": "Pune",
        })
    );

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/hospitals/doctors")
            .set_json(json!({
                "full_name": "Dr. A",
                "specialization": specialization,
                "consultation_fee": 500,
                "available_time_start": "09:00",
            })),
        hospital_token
    );
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], "Doctor added successfully");
    assert_eq!(body["data"]["hospital_id"].as_i64(), Some(hospital_id));
    assert_eq!(body["data"]["is_available"], true);
    let doctor_id = body["data"]["id"].as_i64().unwrap();

    let (_, user_token) = register!(
        app,
        "users",
        json!({ "full_name": "Asha", "email": unique_email("asha"), "password": "p1" })
    );

    // case-insensitive substring match, joined with the hospital's contact
    let search = format!(
        "/api/users/search/doctors?specialization={}",
        specialization.to_lowercase()
    );
    let (status, body) = send!(app, test::TestRequest::get().uri(&search), user_token);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(ids(&body), vec![doctor_id]);
    assert_eq!(body["data"][0]["hospital_name"], "City Hospital");
    assert_eq!(body["data"][0]["city"], "Pune");

    let (_, rival_token) = register!(
        app,
        "hospitals",
        json!({ "hospital_name": "Rival", "email": unique_email("rival"), "password": "p2" })
    );
    let doctor_uri = format!("/api/hospitals/doctors/{}", doctor_id);

    let (status, body) = send!(app, test::TestRequest::delete().uri(&doctor_uri), rival_token);
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Doctor not found");

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&doctor_uri)
            .set_json(json!({ "consultation_fee": 650 })),
        rival_token
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/hospitals/doctors"), hospital_token);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![doctor_id]);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&doctor_uri)
            .set_json(json!({ "consultation_fee": 650, "is_available": false })),
        hospital_token
    );
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["consultation_fee"], 650.0);
    assert_eq!(body["data"]["is_available"], false);

    let (_, body) = send!(app, test::TestRequest::get().uri(&search), user_token);
    assert_eq!(body["count"], 0);

    let (status, body) = send!(app, test::TestRequest::delete().uri(&doctor_uri), hospital_token);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Doctor deleted successfully");

    let (status, _) = send!(app, test::TestRequest::delete().uri(&doctor_uri), hospital_token);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[ignore]
async fn medicine_search_matches_generic_name_and_skips_empty_stock() {
    let app = test_app!(db_pool());
    let tag = unique("Acetaminophen");

    let (_, pharmacy_token) = register!(
        app,
        "pharmacies",
        json!({
            "pharmacy_name": "Corner Pharmacy",
            "email": unique_email("corner"),
            "password": "p1",
            "city": "Nagpur",
        })
    );
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/pharmacies/medicines")
            .set_json(json!({
                "medicine_name": "Paracetamol 500",
                "generic_name": tag,
                "category": "Analgesic",
                "price": 25.5,
                "stock_quantity": 10,
                "expiry_date": "2030-01-31",
            })),
        pharmacy_token
    );
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let medicine_id = body["data"]["id"].as_i64().unwrap();

    let (_, user_token) = register!(
        app,
        "users",
        json!({ "full_name": "Ravi", "email": unique_email("ravi"), "password": "p1" })
    );
    let search = format!(
        "/api/users/search/medicines?medicine_name={}&category=",
        tag.to_uppercase()
    );
    let (status, body) = send!(app, test::TestRequest::get().uri(&search), user_token);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![medicine_id]);
    assert_eq!(body["data"][0]["pharmacy_name"], "Corner Pharmacy");

    let medicine_uri = format!("/api/pharmacies/medicines/{}", medicine_id);
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&medicine_uri)
            .set_json(json!({ "stock_quantity": 0 })),
        pharmacy_token
    );
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["stock_quantity"], 0);

    let (_, body) = send!(app, test::TestRequest::get().uri(&search), user_token);
    assert_eq!(body["count"], 0);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&medicine_uri)
            .set_json(json!({ "pharmacy_id": 1 })),
        pharmacy_token
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&medicine_uri)
            .set_json(json!({ "stock_quantity": -5 })),
        pharmacy_token
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
#[ignore]
async fn adding_a_filter_never_widens_results() {
    let app = test_app!(db_pool());
    let specialization = unique("Neurology");

    for (name, city) in [("North Clinic", "Pune"), ("South Clinic", "Chennai")] {
        let (_, token) = register!(
            app,
            "hospitals",
            json!({
                "hospital_name": name,
                "email": unique_email("clinic"),
                "password": "p1",
                "city": city,
            })
        );
        let (status, _) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/hospitals/doctors")
                .set_json(json!({ "full_name": "Dr. N", "specialization": specialization })),
            token
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, user_token) = register!(
        app,
        "users",
        json!({ "full_name": "Meera", "email": unique_email("meera"), "password": "p1" })
    );
    let base = format!("/api/users/search/doctors?specialization={}", specialization);

    let (_, wide) = send!(app, test::TestRequest::get().uri(&base), user_token);
    let (_, blank) = send!(
        app,
        test::TestRequest::get().uri(&format!("{}&city=", base)),
        user_token
    );
    let (_, narrow) = send!(
        app,
        test::TestRequest::get().uri(&format!("{}&city=pun", base)),
        user_token
    );

    assert_eq!(wide["count"], 2);
    assert_eq!(ids(&blank), ids(&wide));
    assert_eq!(narrow["count"], 1);
    assert!(ids(&narrow).iter().all(|id| ids(&wide).contains(id)));
    assert_eq!(narrow["data"][0]["hospital_name"], "North Clinic");
}

#[actix_web::test]
#[ignore]
async fn registration_and_login() {
    let app = test_app!(db_pool());
    let email = unique_email("dup");
    let body = json!({ "full_name": "Kiran", "email": email, "password": "p1" });

    register!(app, "users", body.clone());
    let (status, resp) = send!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(body)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "User already exists with this email");

    // each role keeps its own email namespace
    register!(
        app,
        "hospitals",
        json!({ "hospital_name": "Kiran Care", "email": email, "password": "p1" })
    );

    let (status, wrong) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": email, "password": "nope" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, unknown) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": unique_email("ghost"), "password": "p1" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["message"], "Invalid email or password");

    let (status, resp) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": email, "password": "p1" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Login successful");
    assert_eq!(resp["data"]["user"]["email"], email.as_str());
    assert!(resp["data"]["user"].get("password_hash").is_none());

    let token = resp["data"]["token"].as_str().unwrap().to_string();
    let (status, _) = send!(
        app,
        test::TestRequest::get().uri("/api/users/search/doctors"),
        token
    );
    assert_eq!(status, StatusCode::OK);
}
