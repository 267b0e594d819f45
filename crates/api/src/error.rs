// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors from the platform REST client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    /// Any non-2xx response. Never retried; polling loops propagate this
    /// immediately.
    #[error("unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("invalid request path `{path}`: {source}")]
    Url {
        path: String,
        source: url::ParseError,
    },
}
