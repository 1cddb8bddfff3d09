use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

/// One bounded attempt per request, no retries; a failed fetch falls
/// through to the snapshot cache instead.
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = concat!("bf6-banner/", env!("CARGO_PKG_VERSION"));

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client for the stats endpoint and class-icon fetches.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build http client")
    })
}
