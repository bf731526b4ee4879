// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base path of the backend API, without a trailing slash.
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let api_url = std::env::var("MONEYDASH_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Config { api_url }
    }
}
