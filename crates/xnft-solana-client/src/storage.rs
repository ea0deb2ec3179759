//! Off-chain document storage collaborator.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use xnft_core::config::FetchConfig;
use xnft_core::{XnftError, XnftResult};

/// Fetches JSON documents by uri. Every call carries its own deadline.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    async fn get_json(&self, uri: &str, deadline: Duration) -> XnftResult<Value>;
}

/// Plain HTTP(S) gateway. Scheme rewriting happens before the uri gets here.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
}

impl HttpGateway {
    pub fn new(fetch: &FetchConfig) -> XnftResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(fetch.user_agent.clone())
            .build()
            .map_err(|e| XnftError::config(format!("http client: {e}")))?;
        Ok(Self { http })
    }

    async fn fetch(&self, url: &str) -> XnftResult<Value> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| XnftError::metadata_fetch(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(XnftError::metadata_fetch(url, format!("http status {status}")));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| XnftError::metadata_fetch(url, e))
    }
}

#[async_trait]
impl StorageGateway for HttpGateway {
    async fn get_json(&self, uri: &str, deadline: Duration) -> XnftResult<Value> {
        match tokio::time::timeout(deadline, self.fetch(uri)).await {
            Ok(result) => result,
            Err(_) => Err(XnftError::metadata_fetch(
                uri,
                format!("deadline of {}ms exceeded", deadline.as_millis()),
            )),
        }
    }
}
