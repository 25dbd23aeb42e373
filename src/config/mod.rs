/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::Deserialize;

pub use base_url::*;

use crate::requests::Method;

mod base_url;

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL for GET requests (default: the news API)
    pub news_url: String,
    /// Base URL for POST requests (default: the placeholder API)
    pub placeholder_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            news_url: BaseUrl::NewsV2.url().to_string(),
            placeholder_url: BaseUrl::JsonPlaceholder.url().to_string(),
        }
    }
}

impl Config {
    /// Creates a config that sends every method to the same origin.
    /// Mostly useful for pointing the client at a local server.
    pub fn single_origin<S: AsRef<str>>(url: S) -> Self {
        Config {
            news_url: url.as_ref().to_string(),
            placeholder_url: url.as_ref().to_string(),
        }
    }

    pub fn base_url(&self, method: Method) -> Option<&str> {
        BaseUrl::for_method(method).map(|base| match base {
            BaseUrl::NewsV2 => self.news_url.as_str(),
            BaseUrl::JsonPlaceholder => self.placeholder_url.as_str(),
        })
    }
}

#[derive(Deserialize, Default, Clone)]
pub struct Secrets {
    pub news_api_key: Option<String>,
}
