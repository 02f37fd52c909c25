//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::currency::CurrencyFormat;

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_list_views() -> usize {
    1024
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Cookie signing key; at least 64 bytes.
    pub secret: String,
    pub graphql_url: String,
    #[serde(default)]
    pub graphql_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound of list views kept in memory across sessions.
    #[serde(default = "default_max_list_views")]
    pub max_list_views: usize,
    #[serde(default)]
    pub currency: CurrencyFormat,
}
