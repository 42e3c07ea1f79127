// Fare search client: one JSON POST per query, no retries

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::FareError;
use crate::request::FareQuery;

#[async_trait]
pub trait FareSource: Send + Sync {
    // Run one search and return the parsed JSON body
    async fn search(&self, query: &FareQuery) -> Result<Value, FareError>;
}

pub struct QpxClient {
    http: reqwest::Client,
    url: Url,
}

impl QpxClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FareError> {
        let url = Url::parse_with_params(&config.endpoint, &[("key", config.key.as_str())])
            .map_err(|e| FareError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl FareSource for QpxClient {
    async fn search(&self, query: &FareQuery) -> Result<Value, FareError> {
        debug!(endpoint = %self.url.path(), "Posting fare search");

        let response = self
            .http
            .post(self.url.clone())
            .json(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}
