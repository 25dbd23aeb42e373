/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Typed requests against the news API (reached through GET).

pub use data::*;
pub use requests::*;

mod data;
mod requests;
