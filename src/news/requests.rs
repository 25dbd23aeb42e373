/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::news::{ArticlesResponse, SortBy};
use crate::requests::{ApiClient, ApiRequest, Method, Params};

const API_KEY: &str = "apiKey";

#[derive(Default, Debug, Clone)]
pub struct TopHeadlines {
    pub country: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
    pub page_size: Option<u32>,
    pub api_key: Option<String>,
}

impl TopHeadlines {
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        insert(&mut params, "country", self.country.clone());
        insert(&mut params, "category", self.category.clone());
        insert(&mut params, "q", self.query.clone());
        insert(&mut params, "pageSize", self.page_size);
        insert(&mut params, API_KEY, self.api_key.clone());
        params
    }
}

#[async_trait]
impl ApiRequest<ArticlesResponse> for TopHeadlines {
    async fn request<C: ApiClient>(&self, client: &C) -> Result<ArticlesResponse, ApiError> {
        let params = self.params();
        client
            .call_api("top-headlines", Method::Get, Some(&params), None)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct Everything {
    pub query: String,
    pub language: Option<String>,
    pub sort_by: Option<SortBy>,
    pub api_key: Option<String>,
}

impl Everything {
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        insert(&mut params, "q", Some(self.query.clone()));
        insert(&mut params, "language", self.language.clone());
        insert(&mut params, "sortBy", self.sort_by.map(|sort| sort.as_str()));
        insert(&mut params, API_KEY, self.api_key.clone());
        params
    }
}

#[async_trait]
impl ApiRequest<ArticlesResponse> for Everything {
    async fn request<C: ApiClient>(&self, client: &C) -> Result<ArticlesResponse, ApiError> {
        let params = self.params();
        client
            .call_api("everything", Method::Get, Some(&params), None)
            .await
    }
}

fn insert<V: Into<Value>>(params: &mut Params, key: &str, value: Option<V>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.into());
    }
}
