//! Error taxonomy for the conversation-history engine and inference client.
//!
//! Every variant surfaces at the command boundary and terminates the
//! invocation; none are retried. Malformed individual stream frames are the
//! one failure handled locally (logged and skipped) rather than through this
//! type — see [`crate::core::stream`].

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No credential was available; raised before any network attempt.
    #[error("INFERENCE_KEY not configured")]
    MissingCredential,

    /// The request could not be sent at all.
    #[error("failed to call endpoint: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("response status {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// The response body stream itself failed mid-read.
    #[error("failed to read stream: {0}")]
    StreamRead(#[source] reqwest::Error),

    /// The stream ended without contributing any content. An empty answer is
    /// never useful, so this counts as a failure even though the HTTP
    /// exchange succeeded.
    #[error("empty response from model; check prompt or add-on configuration")]
    EmptyResponse,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The history file exists but does not hold valid serialized records.
    #[error("invalid conversation history: {0}")]
    Decode(#[from] serde_json::Error),
}
