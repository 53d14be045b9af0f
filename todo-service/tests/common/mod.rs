#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::FixedClock;
use auth::JwtHandler;
use chrono::Utc;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use todo_service::domain::authentication::service::AuthService;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::inbound::http::router::AppState;
use todo_service::outbound::repositories;
use todo_service::outbound::repositories::SqliteTodoRepository;
use todo_service::outbound::repositories::SqliteUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_TTL_MINUTES: i64 = 15;
pub const PASSWORD: &str = "hunter2plus";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub pool: SqlitePool,
    pub clock: Arc<FixedClock>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // A single connection that is never recycled keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        repositories::migrate(&pool)
            .await
            .expect("Failed to run migrations");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(FixedClock::new(Utc::now()));
        let authenticator = Arc::new(Authenticator::with_handler(
            JwtHandler::new(JWT_SECRET),
            clock.clone(),
        ));

        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let todo_repository = Arc::new(SqliteTodoRepository::new(pool.clone()));

        let state = AppState {
            user_service: Arc::new(UserService::new(Arc::clone(&user_repository))),
            todo_service: Arc::new(TodoService::new(todo_repository)),
            auth_service: Arc::new(AuthService::new(
                user_repository,
                authenticator,
                chrono::Duration::minutes(TOKEN_TTL_MINUTES),
            )),
            cookie_secure: false,
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            pool,
            clock,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user with the shared test password and return its id.
    pub async fn register(&self, username: &str) -> i64 {
        let response = self
            .post("/api/users")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "first_name": "Test",
                "last_name": "User",
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing user id")
    }

    /// Submit the login form and return the raw response.
    pub async fn login_response(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in with the shared test password and return the access token.
    pub async fn login(&self, username: &str) -> String {
        let response = self.login_response(username, PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Register and log in, returning `(user_id, token)`.
    pub async fn register_and_login(&self, username: &str) -> (i64, String) {
        let id = self.register(username).await;
        let token = self.login(username).await;
        (id, token)
    }

    /// Create a todo for the token's owner and return its id.
    pub async fn create_todo(&self, token: &str, title: &str) -> i64 {
        let response = self
            .post_authenticated("/api/todos", token)
            .json(&json!({
                "title": title,
                "description": "Something to do",
                "priority": 3,
                "completed": false
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing todo id")
    }

    /// Count the todos stored for `owner_id`.
    pub async fn count_todos(&self, owner_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count todos")
    }

    /// Grant the admin role directly in the store.
    pub async fn promote_to_admin(&self, user_id: i64) {
        sqlx::query("UPDATE users SET role = 'admin' WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .expect("Failed to promote user");
    }
}
