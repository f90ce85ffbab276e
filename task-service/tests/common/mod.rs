use std::sync::Arc;
use std::time::Duration;

use auth::AuthSettings;
use auth::Authenticator;
use chrono::Duration as ChronoDuration;
use serde_json::json;
use serde_json::Value;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::service::AuthService;
use task_service::inbound::http::router::create_router;
use task_service::outbound::repositories::InMemoryTaskRepository;
use task_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

pub fn test_settings() -> AuthSettings {
    AuthSettings {
        secret: TEST_SECRET.to_string(),
        token_ttl: ChronoDuration::hours(24),
        hash_cost: 1,
        issuer: "todo-api".to_string(),
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Same settings as the server; used to mint tokens directly
    pub authenticator: Authenticator,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server_authenticator =
            Arc::new(Authenticator::new(test_settings()).expect("Failed to build authenticator"));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            server_authenticator,
        ));
        let task_service = Arc::new(TaskService::new(Arc::new(InMemoryTaskRepository::new())));

        let router = create_router(auth_service, task_service, Duration::from_secs(10));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator: Authenticator::new(test_settings())
                .expect("Failed to build authenticator"),
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

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Register a user and return its session token.
    pub async fn register_token(&self, username: &str, email: &str) -> String {
        let body = self.register(username, email, "hunter22").await;
        body["data"]["token"]
            .as_str()
            .expect("Token missing")
            .to_string()
    }
}
