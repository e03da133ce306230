//! Retrieval of the raw station and trip files.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Downloads `url` and returns the response body.
///
/// # Errors
///
/// Fails on transport errors and on non-success HTTP statuses.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("GET {} returned {}", url, status);
    }
    Ok(resp.bytes().await?.to_vec())
}

/// Reads a data source: `http(s)://` sources are fetched, anything else is a local path.
#[tracing::instrument(skip(client), fields(source = %source))]
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(client, source).await?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("reading {}", source))?
    };
    debug!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}
