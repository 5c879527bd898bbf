//! In-process server harness shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value as JsonValue};
use stayfinder::infra::assistant::{AssistantModel, DisabledAssistant};
use stayfinder::infra::geocoding::{DisabledGeocoder, Geocoder};
use stayfinder::infra::payment::{InstantApproval, PaymentGateway};
use stayfinder::transport;
use stayfinder::MemoryStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryStore>,
    server_handle: JoinHandle<()>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(DisabledGeocoder), Arc::new(InstantApproval)).await
}

pub async fn spawn_app_with(
    geocoder: Arc<dyn Geocoder>,
    payments: Arc<dyn PaymentGateway>,
) -> TestApp {
    launch(geocoder, payments, Arc::new(DisabledAssistant)).await
}

pub async fn spawn_app_with_assistant(assistant: Arc<dyn AssistantModel>) -> TestApp {
    launch(Arc::new(DisabledGeocoder), Arc::new(InstantApproval), assistant).await
}

async fn launch(
    geocoder: Arc<dyn Geocoder>,
    payments: Arc<dyn PaymentGateway>,
    assistant: Arc<dyn AssistantModel>,
) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let app_state = transport::http::AppState::new(
        store.clone(),
        geocoder,
        payments,
        assistant,
        "INR".to_string(),
    );
    let router = transport::http::create_router(app_state);

    // Bind to an ephemeral port to avoid conflicts if an API server is already running.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        store,
        server_handle,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Creates a listing as `host_id` and returns its id.
    pub async fn create_listing(&self, host_id: Uuid, location: &str, price: f64) -> Uuid {
        let resp = as_host(self.post("/api/listings"), host_id)
            .json(&json!({
                "title": format!("Stay in {}", location),
                "location": location,
                "price": price,
                "description": "Clean rooms, fast WiFi.",
                "imageRef": "/uploads/stay.jpg"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body: JsonValue = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().parse().unwrap()
    }
}

pub fn as_host(req: reqwest::RequestBuilder, host_id: Uuid) -> reqwest::RequestBuilder {
    req.header("x-user-id", host_id.to_string())
        .header("x-user-role", "host")
}

pub fn as_user(req: reqwest::RequestBuilder, user_id: Uuid) -> reqwest::RequestBuilder {
    req.header("x-user-id", user_id.to_string())
        .header("x-user-role", "user")
}

pub async fn body(resp: reqwest::Response) -> JsonValue {
    resp.json().await.unwrap()
}
