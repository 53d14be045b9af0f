#![allow(dead_code)]

use std::sync::Arc;

use book_catalog::domain::book::service::BookService;
use book_catalog::inbound::http::router::create_router;
use book_catalog::inbound::http::router::AppState;
use book_catalog::outbound::repositories::InMemoryBookRepository;

/// Test application that spawns a real server over the starter catalog
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let repository =
            InMemoryBookRepository::seeded().expect("Failed to seed catalog");
        let state = AppState {
            book_service: Arc::new(BookService::new(Arc::new(repository))),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

        let router = create_router(state);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// GET `path` and return the `data` array of the response body.
    pub async fn list(&self, path: &str) -> Vec<serde_json::Value> {
        let response = self.get(path).send().await.expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].as_array().expect("Missing book list").clone()
    }
}
