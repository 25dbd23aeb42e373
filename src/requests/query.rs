/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde_json::Value;
use url::Url;

use crate::requests::Params;

/// Converts a parameter value into its query string form.
///
/// Strings are written without quotes; everything else uses its
/// compact JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(str) => str.clone(),
        other => other.to_string(),
    }
}

/// Replaces the query of `url` with `params`.
/// An empty map leaves the URL without a query.
pub fn set_query(url: &mut Url, params: &Params) {
    url.set_query(None);

    if params.is_empty() {
        return;
    }

    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        pairs.append_pair(key, &stringify(value));
    }
}
