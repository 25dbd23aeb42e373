/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use async_trait::async_trait;
use serde_json::json;

use crate::error::ApiError;
use crate::placeholder::Post;
use crate::requests::{ApiClient, ApiRequest, Body, Method};

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub user_id: u32,
    pub title: String,
    pub body: String,
}

impl CreatePost {
    pub fn body(&self) -> Body {
        let mut body = Body::new();
        body.insert("userId".to_string(), json!(self.user_id));
        body.insert("title".to_string(), json!(self.title));
        body.insert("body".to_string(), json!(self.body));
        body
    }
}

#[async_trait]
impl ApiRequest<Post> for CreatePost {
    async fn request<C: ApiClient>(&self, client: &C) -> Result<Post, ApiError> {
        let body = self.body();
        client
            .call_api("posts", Method::Post, None, Some(&body))
            .await
    }
}
