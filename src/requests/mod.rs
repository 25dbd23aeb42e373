/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod query;

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::ApiError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Query parameters for GET requests.
pub type Params = HashMap<String, Value>;
/// JSON object sent as the body of POST requests.
pub type Body = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    // Reserved: rejected by call_api until they get a request mapping.
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown HTTP method: {0}")]
pub struct ParseMethodError(String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully built request, ready to hand to a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// The raw result of a request.
/// `status` is `None` when the transport could not report one.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: Option<u16>,
    pub body: Bytes,
}

/// Performs the network I/O for a request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl Transport for Client {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .request(request.method.into(), request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status: Some(status),
            body,
        })
    }
}

/// Calls an API endpoint and decodes its JSON response.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Calls `endpoint` with `method` and decodes the response into `T`.
    ///
    /// `params` is only used for GET and `body` only for POST;
    /// the other one is ignored.
    async fn call_api<T>(
        &self,
        endpoint: &str,
        method: Method,
        params: Option<&Params>,
        body: Option<&Body>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send;
}

/// A typed request against an [`ApiClient`].
#[async_trait]
pub trait ApiRequest<T> {
    async fn request<C: ApiClient>(&self, client: &C) -> Result<T, ApiError>;
}

/// The default [`ApiClient`].
///
/// Holds no mutable state; clones share the underlying transport
/// (a [`Client`] is reference counted internally).
#[derive(Debug, Clone)]
pub struct ApiManager<C = Client> {
    transport: C,
    config: Config,
}

impl ApiManager<Client> {
    pub fn new() -> Self {
        Self::with_transport(Client::new(), Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_transport(Client::new(), config)
    }
}

impl Default for ApiManager<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Transport> ApiManager<C> {
    pub fn with_transport(transport: C, config: Config) -> Self {
        ApiManager { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// Builds the request `call_api` would send, without sending it.
    pub fn build_request(
        &self,
        endpoint: &str,
        method: Method,
        params: Option<&Params>,
        body: Option<&Body>,
    ) -> Result<HttpRequest, ApiError> {
        let base_url = self
            .config
            .base_url(method)
            .ok_or(ApiError::UnsupportedMethod(method))?;
        let mut url = build_url(base_url, endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let body = match method {
            Method::Get => {
                if let Some(params) = params {
                    query::set_query(&mut url, params);
                }
                None
            }
            Method::Post => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                body.map(|body| serde_json::to_vec(body).map(Bytes::from))
                    .transpose()
                    .map_err(ApiError::Serialization)?
            }
            Method::Put | Method::Delete => return Err(ApiError::UnsupportedMethod(method)),
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

#[async_trait]
impl<C: Transport> ApiClient for ApiManager<C> {
    async fn call_api<T>(
        &self,
        endpoint: &str,
        method: Method,
        params: Option<&Params>,
        body: Option<&Body>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let request = self.build_request(endpoint, method, params, body)?;
        debug!(method = %request.method, url = %request.url, "Sending request");

        let response = self.transport.send(request).await?;
        debug!(status = ?response.status, bytes = response.body.len(), "Received response");

        validate_status(&response)?;
        decode(&response.body)
    }
}

/// Appends `endpoint` to `base_url` verbatim and parses the result.
pub fn build_url(base_url: &str, endpoint: &str) -> Result<Url, ApiError> {
    let url = format!("{}{}", base_url, endpoint);
    Url::parse(&url).map_err(|source| ApiError::InvalidUrl { url, source })
}

/// Accepts only responses with a status in `200..=299`.
pub fn validate_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        Some(status) if (200..=299).contains(&status) => Ok(()),
        status => Err(ApiError::InvalidResponse { status }),
    }
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<T>(bytes).map_err(ApiError::Decoding)
}
