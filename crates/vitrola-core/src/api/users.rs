//! User service client (authentication, profile, signup, wallet).

use std::time::Duration;

use anyhow::Result;

use super::Service;
use super::shared::{ApiResult, Credentials, build_http_client, send, send_json};
use crate::config::Config;
use crate::models::{AuthResponse, LoginRequest, NewUser, UserProfile, Wallet};

#[derive(Debug, Clone)]
pub struct UserApi {
    http: reqwest::Client,
    base_url: String,
}

impl UserApi {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    /// Creates a client from config, resolving the base URL (env > config > default).
    ///
    /// # Errors
    /// Returns an error if the base URL is malformed or the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = Service::Users.resolve_base_url(config)?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /users/auth`
    pub async fn authenticate(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let request = self
            .http
            .post(self.url("/users/auth"))
            .json(&LoginRequest { email, password });
        send_json(request).await
    }

    /// `GET /users/:id`
    pub async fn fetch_profile(&self, id: i64, creds: &Credentials) -> ApiResult<UserProfile> {
        let request = self
            .http
            .get(self.url(&format!("/users/{id}")))
            .headers(creds.headers());
        send_json(request).await
    }

    /// `POST /users/create`
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> ApiResult<()> {
        let request = self.http.post(self.url("/users/create")).json(&NewUser {
            name,
            email,
            password,
        });
        send(request).await.map(|_| ())
    }

    /// `GET /wallet`
    pub async fn wallet(&self, creds: &Credentials) -> ApiResult<Wallet> {
        let request = self.http.get(self.url("/wallet")).headers(creds.headers());
        send_json(request).await
    }

    /// `POST /wallet/credit/:value`
    pub async fn credit_wallet(&self, value: f64, creds: &Credentials) -> ApiResult<Wallet> {
        let request = self
            .http
            .post(self.url(&format!("/wallet/credit/{value}")))
            .headers(creds.headers());
        send_json(request).await
    }
}
