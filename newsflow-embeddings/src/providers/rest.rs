//! Remote embedder over HTTP.
//!
//! POSTs `{model, title, content}` to the configured endpoint and expects
//! `{embedding: [f32; D]}`. The article deadline caps the request timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use newsflow_core::deadline::Deadline;
use newsflow_core::errors::{EmbeddingError, NewsflowResult};
use newsflow_core::model::PipelineStage;
use newsflow_core::traits::IEmbeddingProvider;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    title: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// REST embedding provider.
pub struct RestProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model_name: String,
    dimensions: usize,
    timeout: Duration,
}

impl RestProvider {
    pub fn new(
        endpoint: &str,
        model_name: &str,
        dimensions: usize,
        timeout_secs: u64,
    ) -> NewsflowResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                name: format!("rest ({e})"),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            model_name: model_name.to_string(),
            dimensions,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl IEmbeddingProvider for RestProvider {
    fn embed(&self, title: &str, content: &str, deadline: &Deadline) -> NewsflowResult<Vec<f32>> {
        deadline.check(PipelineStage::Embedded)?;

        let request = EmbedRequest {
            model: &self.model_name,
            title,
            content,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(deadline.cap(self.timeout))
            .json(&request)
            .send()
            .map_err(|e| request_failed(deadline, e.to_string()))?;

        if !response.status().is_success() {
            return Err(EmbeddingError::RequestFailed {
                reason: format!("embedder returned HTTP {}", response.status()),
            }
            .into());
        }

        let body: EmbedResponse = response
            .json()
            .map_err(|e| request_failed(deadline, format!("malformed embedder response: {e}")))?;

        Ok(body.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "rest"
    }

    fn is_available(&self) -> bool {
        // Availability is discovered per request; a probe endpoint is not
        // part of the embedder contract.
        true
    }
}

/// A transport failure after the deadline fired is reported as the deadline,
/// not as an embedder fault.
fn request_failed(deadline: &Deadline, reason: String) -> newsflow_core::NewsflowError {
    if deadline.expired() {
        newsflow_core::NewsflowError::DeadlineExceeded {
            stage: PipelineStage::Embedded,
        }
    } else {
        EmbeddingError::RequestFailed { reason }.into()
    }
}
