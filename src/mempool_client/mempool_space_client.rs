use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use tracing::instrument;

use crate::{
    error_fmt::error_chain_fmt,
    fee_distribution::{FeeSample, FeeTarget},
};

#[derive(thiserror::Error)]
pub enum FetchError {
    #[error("fee distribution request failed")]
    Request(#[from] reqwest::Error),
    #[error("fee distribution request returned {0}")]
    Status(StatusCode),
}

impl Debug for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Source of per-transaction fee rates for one block.
#[async_trait]
pub trait FeeFetcher: Send + Sync + 'static {
    async fn fees_by_height(&self, height: u64) -> Result<Vec<FeeSample>, FetchError>;

    async fn fees_by_projected_index(&self, index: usize) -> Result<Vec<FeeSample>, FetchError>;

    async fn fetch(&self, target: FeeTarget) -> Result<Vec<FeeSample>, FetchError> {
        match target {
            FeeTarget::Height(height) => self.fees_by_height(height).await,
            FeeTarget::Projected(index) => self.fees_by_projected_index(index).await,
        }
    }
}

/// REST client for the fee endpoints of a mempool instance.
#[derive(Clone, Debug)]
pub struct MempoolSpaceClient {
    mempool_space: String,
    http_client: reqwest::Client,
}

impl MempoolSpaceClient {
    /// `base_url` includes the scheme, e.g. `https://mempool.space`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            mempool_space: base_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn transactions(&self, path: String) -> Result<Vec<FeeSample>, FetchError> {
        let url = format!("{}/api/v1/transactions/{}", self.mempool_space, path);
        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            tracing::error!("error getting fee distribution: {:?}", response);
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.json::<Vec<FeeSample>>().await?)
    }
}

#[async_trait]
impl FeeFetcher for MempoolSpaceClient {
    #[instrument(skip(self))]
    async fn fees_by_height(&self, height: u64) -> Result<Vec<FeeSample>, FetchError> {
        self.transactions(format!("height/{}", height)).await
    }

    #[instrument(skip(self))]
    async fn fees_by_projected_index(&self, index: usize) -> Result<Vec<FeeSample>, FetchError> {
        self.transactions(format!("projected/{}", index)).await
    }
}
