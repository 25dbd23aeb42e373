/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::requests::Method;

pub const NEWS_V2_URL: &str = "https://newsapi.org/v2/";
pub const JSON_PLACEHOLDER_URL: &str = "https://jsonplaceholder.typicode.com/";

/// The fixed API origins that endpoints are appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrl {
    NewsV2,
    JsonPlaceholder,
}

impl BaseUrl {
    pub fn url(&self) -> &'static str {
        match self {
            Self::NewsV2 => NEWS_V2_URL,
            Self::JsonPlaceholder => JSON_PLACEHOLDER_URL,
        }
    }

    /// Selects the base URL a method is sent to.
    ///
    /// GET goes to the news API, POST goes to the placeholder API.
    /// Callers rely on this split, so keep it until product says otherwise.
    /// Reserved methods have no base URL.
    pub fn for_method(method: Method) -> Option<BaseUrl> {
        match method {
            Method::Get => Some(Self::NewsV2),
            Method::Post => Some(Self::JsonPlaceholder),
            Method::Put | Method::Delete => None,
        }
    }
}
