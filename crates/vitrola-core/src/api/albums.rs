//! Album service client (catalog search, sales, collection).

use std::time::Duration;

use anyhow::Result;

use super::Service;
use super::shared::{ApiResult, Credentials, build_http_client, send, send_json};
use crate::config::Config;
use crate::models::{Album, CollectionAlbum, SaleRequest};

#[derive(Debug, Clone)]
pub struct AlbumApi {
    http: reqwest::Client,
    base_url: String,
}

impl AlbumApi {
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
        let base_url = Service::Albums.resolve_base_url(config)?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /albums/all?search=<text>`
    pub async fn search(&self, text: &str, creds: &Credentials) -> ApiResult<Vec<Album>> {
        let request = self
            .http
            .get(self.url("/albums/all"))
            .query(&[("search", text)])
            .headers(creds.headers());
        send_json(request).await
    }

    /// `GET /albums/my-collection`
    pub async fn my_collection(&self, creds: &Credentials) -> ApiResult<Vec<CollectionAlbum>> {
        let request = self
            .http
            .get(self.url("/albums/my-collection"))
            .headers(creds.headers());
        send_json(request).await
    }

    /// `POST /albums/sale`
    pub async fn buy(&self, sale: &SaleRequest, creds: &Credentials) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url("/albums/sale"))
            .headers(creds.headers())
            .json(sale);
        send(request).await.map(|_| ())
    }

    /// `DELETE /albums/remove/:id`
    pub async fn remove(&self, id: i64, creds: &Credentials) -> ApiResult<()> {
        let request = self
            .http
            .delete(self.url(&format!("/albums/remove/{id}")))
            .headers(creds.headers());
        send(request).await.map(|_| ())
    }
}
