//! Test helpers for integration tests
//!
//! Provides utilities for spawning in-process test servers and making HTTP
//! requests against them.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use murmur_api::{create_app, create_app_state};
use murmur_common::{AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, RateLimitConfig, RedisConfig, ServerConfig};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Check whether the environment provides the backing services.
///
/// Returns false (and the test should return early) when DATABASE_URL or
/// REDIS_URL is missing.
pub async fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();
    let present =
        std::env::var("DATABASE_URL").is_ok() && std::env::var("REDIS_URL").is_ok();
    if !present {
        eprintln!("Skipping integration test: DATABASE_URL/REDIS_URL not set");
    }
    present
}

/// Build a test configuration from the environment
pub fn test_config() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();

    Ok(AppConfig {
        app: AppSettings {
            name: "murmur-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL")?,
            max_connections: 5,
            min_connections: 1,
        },
        redis: RedisConfig {
            url: std::env::var("REDIS_URL")?,
            max_connections: 4,
        },
        rate_limit: RateLimitConfig {
            max_requests: 5,
            window_secs: 60,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
    })
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with a fresh state (fresh rate limiter)
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a forwarded-for header (distinct origin key)
    pub async fn post_from<T: Serialize>(
        &self,
        path: &str,
        origin: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("x-forwarded-for", origin)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with JSON body
    pub async fn delete<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).json(body).send().await?)
    }
}

/// Assert a response has the expected status, consuming it
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("expected {expected}, got {status}: {body}");
    }
    Ok(())
}

/// Assert status and deserialize the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status != expected {
        anyhow::bail!("expected {expected}, got {status}: {body}");
    }
    Ok(serde_json::from_str(&body)?)
}
