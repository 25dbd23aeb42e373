/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::error::Error;

use miette::Diagnostic;
use thiserror::Error;

use crate::requests::Method;

/// An error produced by a single API call.
///
/// Every variant is terminal for the call that produced it:
/// nothing is retried, and nothing is inspected beyond what the
/// variant carries.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    /// The base URL, endpoint and query did not form a valid URL.
    #[error("Invalid URL: {url}")]
    #[diagnostic(code(news_api::invalid_url))]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The method is reserved but has no request mapping.
    #[error("Unsupported HTTP method: {0}")]
    #[diagnostic(
        code(news_api::unsupported_method),
        help("only GET and POST are supported")
    )]
    UnsupportedMethod(Method),

    /// The request body could not be encoded as JSON.
    #[error("Could not serialise request body")]
    #[diagnostic(code(news_api::serialization))]
    Serialization(#[source] serde_json::Error),

    /// The response had no status, or a status outside `200..=299`.
    #[error("Invalid response{}", describe_status(.status))]
    #[diagnostic(code(news_api::invalid_response))]
    InvalidResponse { status: Option<u16> },

    /// The response body was not JSON or did not match the expected shape.
    #[error("Could not decode response: {0}")]
    #[diagnostic(code(news_api::decoding))]
    Decoding(#[source] serde_json::Error),

    /// The transport failed before a response arrived.
    #[error("Request failed")]
    #[diagnostic(code(news_api::transport))]
    Transport(#[source] Box<dyn Error + Send + Sync + 'static>),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(status) => format!(" (status {})", status),
        None => String::new(),
    }
}

impl ApiError {
    /// Wraps a transport failure, keeping it as the source.
    pub fn transport<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        ApiError::Transport(Box::new(cause))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::transport(err)
    }
}
