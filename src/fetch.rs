// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Query-string parameters, in the order they are sent.
pub type Params = Vec<(String, String)>;

/// `<base>/rest/<version>/app/<query>`; any path on `base_url` is kept.
pub fn build_url(base_url: &str, version: &str, query: &str) -> Result<Url> {
    let mut base =
        Url::parse(base_url).with_context(|| format!("parsing base URL {}", base_url))?;
    // join() replaces the last segment unless the path ends in '/'
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    let path = format!("rest/{}/app/{}", version, query);
    base.join(&path)
        .with_context(|| format!("joining {} onto {}", path, base))
}

/// GET `url` with `params` as the query string and return the body text.
/// Non-success statuses are errors; nothing is retried.
#[instrument(level = "debug", skip(client, params), fields(url = %url))]
pub async fn get_text(client: &Client, url: &Url, params: &Params) -> Result<String> {
    debug!(params = params.len(), "GET");
    let text = client
        .get(url.clone())
        .query(params)
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?;
    debug!(bytes = text.len(), "received body");
    Ok(text)
}
