#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use laptop_service::config::LaptopConfig;
use laptop_service::models::Laptop;
use laptop_service::services::{InMemoryLaptopStore, LaptopStore, MongoDb};
use laptop_service::startup::{build_router, AppState, Application};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

/// Builds a laptop record with the fields the catalog queries on.
pub fn laptop(brand: &str, price: f64, rating: f64, on_flash_sale: bool, created_ms: i64) -> Laptop {
    Laptop::new(doc! {
        "_id": ObjectId::new(),
        "name": format!("{} {}", brand, price),
        "brand": brand,
        "price": price,
        "ratings": { "average": rating, "count": 10 },
        "isOnFlashSale": on_flash_sale,
        "createdAt": DateTime::from_millis(created_ms),
    })
}

/// Eleven records spread over brands, prices, ratings and flash-sale flags.
pub fn fixture_laptops() -> Vec<Laptop> {
    vec![
        laptop("Dell", 450.0, 3.9, false, 1_000),
        laptop("HP", 520.0, 4.0, true, 5_000),
        laptop("Dell", 999.99, 4.5, true, 3_000),
        laptop("Lenovo", 1000.0, 4.85, false, 7_000),
        laptop("HP", 1000.5, 4.9, true, 2_000),
        laptop("Apple", 1800.0, 4.95, false, 9_000),
        laptop("Asus", 750.0, 4.2, true, 8_000),
        laptop("Acer", 300.0, 3.2, false, 4_000),
        laptop("Dell", 800.0, 4.7, false, 6_000),
        laptop("MSI", 1500.0, 4.1, true, 10_000),
        laptop("HP", 650.0, 2.9, false, 11_000),
    ]
}

pub fn router_with(store: impl LaptopStore + 'static) -> Router {
    build_router(AppState::new(Arc::new(store)))
}

pub fn fixture_router() -> Router {
    router_with(InMemoryLaptopStore::new(fixture_laptops()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// The records of a JSON array response.
pub fn records(response: &TestResponse) -> &Vec<serde_json::Value> {
    response.body.as_array().expect("expected a JSON array")
}

/// A running server backed by a throwaway MongoDB database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        if std::env::var("MONGODB_URI").is_err() {
            std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        }

        let db_name = format!("laptop_test_{}", Uuid::new_v4());

        let mut config = LaptopConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling the root endpoint
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub async fn seed(&self, laptops: &[Laptop]) {
        self.db
            .laptops()
            .insert_many(laptops, None)
            .await
            .expect("Failed to seed laptops");
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
