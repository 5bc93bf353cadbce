//! HTTP embedding provider.
//!
//! Talks to an OpenAI-compatible `/embeddings` endpoint, which is how the
//! multilingual sentence-transformer model is hosted. One request per
//! batch, no retries: a failed request fails the sentence being aligned.
//!
//! The client and a one-worker runtime are built once and reused, so
//! connections are pooled across batches. Callers may sit inside their own
//! tokio runtime; requests then run on the provider's worker and the caller
//! waits on a channel instead of nesting `block_on`.

use std::sync::mpsc;
use std::time::Duration;

use phrasal_core::errors::{EmbeddingError, PhrasalError, PhrasalResult};
use phrasal_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tokio::runtime::{Handle, Runtime};
use tracing::{debug, warn};

/// Embedding provider backed by a remote model server.
pub struct ApiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimensions: usize,
    client: reqwest::Client,
    /// Always `Some` until drop.
    runtime: Option<Runtime>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

fn inference_failed(reason: String) -> PhrasalError {
    EmbeddingError::InferenceFailed { reason }.into()
}

impl ApiProvider {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: Option<String>,
        dimensions: usize,
        timeout_secs: u64,
    ) -> PhrasalResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PhrasalError::ConfigError {
                reason: format!("embedding http client: {e}"),
            })?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("phrasal-embed")
            .enable_all()
            .build()
            .map_err(|e| PhrasalError::ConfigError {
                reason: format!("embedding runtime: {e}"),
            })?;

        Ok(Self {
            endpoint,
            model,
            api_key,
            dimensions,
            client,
            runtime: Some(runtime),
        })
    }

    /// Restore input order when the server reports indices.
    fn order_by_index(mut data: Vec<EmbedData>) -> Vec<Vec<f32>> {
        if data.iter().all(|d| d.index.is_some()) {
            data.sort_by_key(|d| d.index);
        }
        data.into_iter().map(|d| d.embedding).collect()
    }

    /// Send one request on the provider's runtime and wait for the reply.
    fn send_request(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        let Some(runtime) = &self.runtime else {
            return Err(inference_failed("embedding runtime shut down".to_string()));
        };

        let body = serde_json::to_string(&EmbedRequest {
            model: &self.model,
            input: texts,
        })?;
        let request = post(
            self.client.clone(),
            self.endpoint.clone(),
            self.api_key.clone(),
            body,
        );

        if Handle::try_current().is_err() {
            return runtime.block_on(request);
        }

        // Inside a caller's runtime: nested block_on would panic.
        let (tx, rx) = mpsc::sync_channel(1);
        runtime.spawn(async move {
            let _ = tx.send(request.await);
        });
        rx.recv()
            .unwrap_or_else(|_| Err(inference_failed("embedding task aborted".to_string())))
    }
}

async fn post(
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    body: String,
) -> PhrasalResult<Vec<Vec<f32>>> {
    let mut request = client
        .post(&endpoint)
        .header("Content-Type", "application/json")
        .body(body);
    if let Some(key) = &api_key {
        request = request.bearer_auth(key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| inference_failed(format!("HTTP error: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(inference_failed(format!("API returned {status}: {body}")));
    }

    let resp: EmbedResponse = response
        .json()
        .await
        .map_err(|e| inference_failed(format!("JSON parse error: {e}")))?;

    Ok(ApiProvider::order_by_index(resp.data))
}

impl Drop for ApiProvider {
    fn drop(&mut self) {
        // A blocking shutdown panics when dropped inside an async context.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl IEmbeddingProvider for ApiProvider {
    fn embed_batch(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(batch = texts.len(), endpoint = %self.endpoint, "embedding request");
        self.send_request(texts).inspect_err(|e| {
            warn!(error = %e, "embedding request failed");
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "api"
    }

    fn is_available(&self) -> bool {
        !self.endpoint.is_empty()
    }
}
