//! Inference client: one request per invocation, streamed response.

use std::time::Duration;

use crate::api::ChatRequest;
use crate::core::config::Config;
use crate::core::context::{ContextStrategy, FullReplay};
use crate::core::error::{Error, Result};
use crate::core::history::ConversationRecord;
use crate::core::stream::collect_response;

const AGENTS_ENDPOINT: &str = "v1/agents/heroku";

pub struct InferenceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    context: Box<dyn ContextStrategy>,
}

impl InferenceClient {
    /// Fails with [`Error::MissingCredential`] before any network use when no
    /// credential is configured.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.credential().ok_or(Error::MissingCredential)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()
            .map_err(Error::Transport)?;
        Ok(Self {
            http,
            base_url: config.base_url(),
            api_key,
            model: config.model(),
            context: Box::new(FullReplay),
        })
    }

    /// Swap the context reconstruction strategy (full replay by default).
    pub fn with_context_strategy(mut self, strategy: Box<dyn ContextStrategy>) -> Self {
        self.context = strategy;
        self
    }

    /// Send one prompt with the tag's replayed context and return the
    /// accumulated response text.
    ///
    /// The call blocks until the upstream stream ends, errors, or the overall
    /// request deadline fires. An empty accumulation is an error; the caller
    /// must not persist anything for such a turn.
    pub async fn send(
        &self,
        history: &[ConversationRecord],
        tag: &str,
        prompt: &str,
    ) -> Result<String> {
        let messages = self.context.build(history, tag, prompt);
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
        };
        let url = endpoint_url(&self.base_url, AGENTS_ENDPOINT);
        tracing::debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("X-Forwarded-Proto", "https")
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(Error::Upstream { status, body });
        }

        let text = collect_response(response).await?;
        finalize_response(text)
    }

    #[cfg(test)]
    fn messages_for(
        &self,
        history: &[ConversationRecord],
        tag: &str,
        prompt: &str,
    ) -> Vec<crate::api::ChatMessage> {
        self.context.build(history, tag, prompt)
    }
}

/// A stream that ended without contributing any content is a failure, not a
/// response.
fn finalize_response(text: String) -> Result<String> {
    if text.is_empty() {
        Err(Error::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// Joins base URL and endpoint path without doubling slashes.
fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
