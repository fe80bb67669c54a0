use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client. The timeout of the first call wins; `None` means the
/// transport's own behaviour decides when a request gives up.
pub fn http_client(timeout: Option<Duration>) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| build_http_client(timeout))
}

pub fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
    // The blocking builder defaults to 30s; `None` clears it.
    Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}
