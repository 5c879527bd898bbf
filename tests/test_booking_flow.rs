//! Pricing, raw booking records, and the checked reservation flow over HTTP.

mod common;

use async_trait::async_trait;
use common::{as_user, body, spawn_app, spawn_app_with};
use serde_json::json;
use stayfinder::infra::geocoding::DisabledGeocoder;
use stayfinder::infra::payment::{PaymentConfirmation, PaymentGateway};
use stayfinder::storage::BookingStore;
use stayfinder::{MarketError, MarketResult};
use std::sync::Arc;
use uuid::Uuid;

struct DecliningGateway;

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn capture(&self, _amount: f64, _currency: &str) -> MarketResult<PaymentConfirmation> {
        Err(MarketError::Payment("card declined".to_string()))
    }
}

#[tokio::test]
async fn quoted_total_is_recorded_and_read_back_once() {
    let app = spawn_app().await;
    let (host, guest) = (Uuid::new_v4(), Uuid::new_v4());
    let listing = app.create_listing(host, "Goa", 2000.0).await;

    let quote = body(
        app.get(&format!(
            "/api/listings/{}/quote?startDate=2024-01-01&endDate=2024-01-04",
            listing
        ))
        .send()
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(quote["data"]["nights"], 3);
    assert_eq!(quote["data"]["subtotal"].as_f64(), Some(6000.0));
    assert_eq!(quote["data"]["serviceFee"].as_f64(), Some(300.0));
    assert_eq!(quote["data"]["total"].as_f64(), Some(6300.0));

    let created = app
        .post("/api/bookings")
        .json(&json!({
            "listingId": listing,
            "userId": guest,
            "startDate": "2024-01-01",
            "endDate": "2024-01-04",
            "totalPrice": quote["data"]["total"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);

    let mine = body(
        app.get(&format!("/api/bookings/user/{}", guest))
            .send()
            .await
            .unwrap(),
    )
    .await;
    let mine = mine["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["booking"]["totalPrice"].as_f64(), Some(6300.0));
    assert_eq!(mine[0]["listing"]["title"], "Stay in Goa");
}

#[tokio::test]
async fn quote_rejects_empty_or_reversed_ranges() {
    let app = spawn_app().await;
    let listing = app.create_listing(Uuid::new_v4(), "Mumbai", 5400.0).await;

    for (start, end) in [("2024-05-02", "2024-05-02"), ("2024-05-03", "2024-05-01")] {
        let resp = app
            .get(&format!(
                "/api/listings/{}/quote?startDate={}&endDate={}",
                listing, start, end
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }

    let missing = app
        .get(&format!("/api/listings/{}/quote?startDate=2024-05-02", listing))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 400);

    let unknown = app
        .get(&format!(
            "/api/listings/{}/quote?startDate=2024-05-01&endDate=2024-05-02",
            Uuid::new_v4()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), 404);
}

#[tokio::test]
async fn bookings_of_deleted_listings_stay_visible_without_listing() {
    let app = spawn_app().await;
    let (host, guest) = (Uuid::new_v4(), Uuid::new_v4());
    let listing = app.create_listing(host, "Manali", 2500.0).await;

    app.post("/api/bookings")
        .json(&json!({
            "listingId": listing, "userId": guest,
            "startDate": "2024-02-01", "endDate": "2024-02-03", "totalPrice": 5250.0
        }))
        .send()
        .await
        .unwrap();
    common::as_host(app.delete(&format!("/api/listings/{}", listing)), host)
        .send()
        .await
        .unwrap();

    let mine = body(
        app.get(&format!("/api/bookings/user/{}", guest))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
    assert!(mine["data"][0]["listing"].is_null());
}

#[tokio::test]
async fn reservation_rejects_overlapping_stays() {
    let app = spawn_app().await;
    let listing = app.create_listing(Uuid::new_v4(), "Udaipur", 4000.0).await;
    let path = format!("/api/listings/{}/reserve", listing);

    let first = as_user(app.post(&path), Uuid::new_v4())
        .json(&json!({ "startDate": "2024-03-10", "endDate": "2024-03-13" }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 201);
    let first = body(first).await;
    assert_eq!(first["data"]["booking"]["totalPrice"].as_f64(), Some(12600.0));
    assert_eq!(first["data"]["payment"]["currency"], "INR");

    let overlapping = as_user(app.post(&path), Uuid::new_v4())
        .json(&json!({ "startDate": "2024-03-12", "endDate": "2024-03-14" }))
        .send()
        .await
        .unwrap();
    assert_eq!(overlapping.status(), 409);

    let back_to_back = as_user(app.post(&path), Uuid::new_v4())
        .json(&json!({ "startDate": "2024-03-13", "endDate": "2024-03-15" }))
        .send()
        .await
        .unwrap();
    assert_eq!(back_to_back.status(), 201);

    let anonymous = app
        .post(&path)
        .json(&json!({ "startDate": "2024-04-01", "endDate": "2024-04-02" }))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), 401);

    assert_eq!(app.store.bookings_for_listing(listing).await.unwrap().len(), 2);
}

#[tokio::test]
async fn declined_payment_leaves_no_booking() {
    let app = spawn_app_with(Arc::new(DisabledGeocoder), Arc::new(DecliningGateway)).await;
    let guest = Uuid::new_v4();
    let listing = app.create_listing(Uuid::new_v4(), "Goa", 3200.0).await;

    let resp = as_user(app.post(&format!("/api/listings/{}/reserve", listing)), guest)
        .json(&json!({ "startDate": "2024-06-01", "endDate": "2024-06-05" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 402);
    assert_eq!(body(resp).await["data"]["code"], "payment_error");

    assert!(app.store.bookings_for_user(guest).await.unwrap().is_empty());
}
