//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use store::{AgencyId, AgencyRecord, AgentId, AgentRecord, InMemoryTravelStore, PackageId, PackageRow};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup_with_store(store: InMemoryTravelStore) -> axum::Router {
    api::create_app(api::create_state(store), get_metrics_handle())
}

async fn seeded_store() -> InMemoryTravelStore {
    let store = InMemoryTravelStore::new();
    store
        .add_package(PackageRow::new(
            PackageId::new(7),
            "Bali Escape",
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap(),
            Decimal::new(249900, 2),
        ))
        .await;
    store
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn ann_lee_booking() -> Value {
    json!({
        "CustFirstName": "Ann",
        "CustLastName": "Lee",
        "CustEmail": "a@x.com",
        "TravelerCount": 2,
        "PackageId": 7
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_with_store(InMemoryTravelStore::new());

    let (status, json) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_list_packages() {
        let store = seeded_store().await;
        let now = Utc::now();
        store
            .add_package(PackageRow::new(
                PackageId::new(8),
                "Expired Cruise",
                now - Duration::days(60),
                now - Duration::days(30),
                Decimal::new(99900, 2),
            ))
            .await;
        let app = setup_with_store(store);

        let (status, json) = send(app, get("/api/packages")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["PackageId"], 7);
        assert_eq!(data[0]["PkgName"], "Bali Escape");
        assert_eq!(data[0]["Started"], true);
    }

    #[tokio::test]
    async fn test_list_agencies_keeps_agency_without_agents() {
        let store = InMemoryTravelStore::new();
        store
            .add_agency(AgencyRecord::new(AgencyId::new(1), "Calgary"))
            .await;
        store
            .add_agency(AgencyRecord::new(AgencyId::new(2), "Okotoks"))
            .await;
        store
            .add_agent(AgentRecord::new(
                AgentId::new(1),
                AgencyId::new(1),
                "Janet",
                "Delton",
            ))
            .await;
        let app = setup_with_store(store);

        let (status, json) = send(app, get("/api/agencies")).await;

        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["AgencyId"], 1);
        assert_eq!(data[0]["Agents"][0]["AgtLastName"], "Delton");
        assert_eq!(data[1]["AgencyId"], 2);
        assert_eq!(data[1]["Agents"], json!([]));
    }
}

mod bookings {
    use super::*;

    #[tokio::test]
    async fn test_create_booking() {
        let store = seeded_store().await;
        let app = setup_with_store(store.clone());

        let (status, json) = send(app, post_json("/api/bookings", &ann_lee_booking())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        let booking = &json["booking"];
        let booking_no = booking["BookingNo"].as_str().unwrap();
        assert_eq!(booking_no.len(), 6);
        assert!(
            booking_no
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
        assert_eq!(booking["PkgName"], "Bali Escape");
        assert_eq!(booking["TravelerCount"], 2);
        assert_eq!(booking["CustFirstName"], "Ann");
        assert_eq!(booking["CustLastName"], "Lee");
        assert_eq!(booking["CustEmail"], "a@x.com");
        assert!(booking["BookingDate"].as_str().is_some());

        assert_eq!(store.customers().await.len(), 1);
        assert_eq!(store.bookings().await.len(), 1);
    }

    #[tokio::test]
    async fn test_orders_alias() {
        let store = seeded_store().await;
        let app = setup_with_store(store.clone());

        let (status, json) = send(app, post_json("/api/orders", &ann_lee_booking())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["booking"]["PkgName"], "Bali Escape");
        assert_eq!(store.bookings().await.len(), 1);
    }

    #[tokio::test]
    async fn test_loose_fields_are_coerced() {
        let store = seeded_store().await;
        let app = setup_with_store(store.clone());
        let body = json!({
            "CustFirstName": " Ann ",
            "CustLastName": "Lee",
            "CustEmail": "a@x.com",
            "TravelerCount": "abc",
            "PackageId": "7"
        });

        let (status, json) = send(app, post_json("/api/bookings", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["booking"]["TravelerCount"], 1);
        assert_eq!(json["booking"]["CustFirstName"], "Ann");
    }

    #[tokio::test]
    async fn test_book_by_package_name() {
        let store = seeded_store().await;
        let app = setup_with_store(store.clone());
        let body = json!({
            "CustFirstName": "Ann",
            "CustLastName": "Lee",
            "CustEmail": "a@x.com",
            "package": "Bali Escape"
        });

        let (status, json) = send(app, post_json("/api/bookings", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["booking"]["PkgName"], "Bali Escape");
        assert_eq!(store.bookings().await[0].package_id, PackageId::new(7));
    }

    #[tokio::test]
    async fn test_unknown_package_is_not_found() {
        let store = seeded_store().await;
        let app = setup_with_store(store.clone());
        let mut body = ann_lee_booking();
        body["PackageId"] = json!(999);

        let (status, json) = send(app, post_json("/api/bookings", &body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "NOT_FOUND");
        assert!(json["message"].as_str().unwrap().contains("not found"));
        assert!(store.customers().await.is_empty());
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let store = seeded_store().await;

        for field in ["CustFirstName", "CustLastName", "CustEmail", "PackageId"] {
            let mut body = ann_lee_booking();
            body.as_object_mut().unwrap().remove(field);

            let (status, json) =
                send(setup_with_store(store.clone()), post_json("/api/bookings", &body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "without {field}");
            assert_eq!(json["error"], "BAD_REQUEST");
        }

        assert!(store.customers().await.is_empty());
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_server_error() {
        let store = seeded_store().await;
        store.set_fail_on_place_booking(true).await;
        let app = setup_with_store(store.clone());

        let (status, json) = send(app, post_json("/api/bookings", &ann_lee_booking())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "DB_ERROR_ORDER");
        assert_eq!(json["message"], "order failed");
        assert!(store.customers().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = setup_with_store(seeded_store().await);
        let request = Request::builder()
            .method("POST")
            .uri("/api/bookings")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, json) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "BAD_REQUEST");
        assert!(json["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_wrong_typed_field_is_bad_request() {
        let store = seeded_store().await;
        let app = setup_with_store(store.clone());
        let mut body = ann_lee_booking();
        body["CustFirstName"] = json!(123);

        let (status, json) = send(app, post_json("/api/bookings", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "BAD_REQUEST");
        assert!(store.customers().await.is_empty());
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let app = setup_with_store(seeded_store().await);
        let request = Request::builder()
            .method("POST")
            .uri("/api/bookings")
            .body(Body::from(ann_lee_booking().to_string()))
            .unwrap();

        let (status, json) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "BAD_REQUEST");
    }
}

mod registration {
    use super::*;

    #[tokio::test]
    async fn test_register_customer() {
        let store = InMemoryTravelStore::new();
        let app = setup_with_store(store.clone());
        let body = json!({
            "CustFirstName": "Ann",
            "CustLastName": "Lee",
            "CustEmail": "a@x.com",
            "CustCity": "Calgary",
            "CustBusPhone": "403-555-0100"
        });

        let (status, json) = send(app, post_json("/api/register", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        assert_eq!(json["message"], "Registration successful!");
        let customers = store.customers().await;
        assert_eq!(customers.len(), 1);
        assert_eq!(
            customers[0].customer.cust_bus_phone.as_deref(),
            Some("403-555-0100")
        );
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_missing_email() {
        let store = InMemoryTravelStore::new();
        let app = setup_with_store(store.clone());
        let body = json!({ "CustFirstName": "Ann", "CustLastName": "Lee" });

        let (status, json) = send(app, post_json("/api/register", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert_eq!(json["message"], "Missing required field: email");
        assert!(store.customers().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_malformed_body() {
        let store = InMemoryTravelStore::new();
        let app = setup_with_store(store.clone());
        let request = Request::builder()
            .method("POST")
            .uri("/api/register")
            .header("content-type", "application/json")
            .body(Body::from("[\"Ann\"]"))
            .unwrap();

        let (status, json) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "BAD_REQUEST");
        assert!(store.customers().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_over_long_province() {
        let store = InMemoryTravelStore::new();
        let app = setup_with_store(store.clone());
        let body = json!({
            "CustFirstName": "Ann",
            "CustLastName": "Lee",
            "CustEmail": "a@x.com",
            "CustProv": "Alberta"
        });

        let (status, json) = send(app, post_json("/api/register", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "BAD_REQUEST");
        assert!(store.customers().await.is_empty());
    }
}

#[tokio::test]
async fn test_metrics_after_booking() {
    let app = setup_with_store(seeded_store().await);

    let (status, _) = send(
        app.clone(),
        post_json("/api/bookings", &ann_lee_booking()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("bookings_created_total"));
}
