//! HTTP retrieval of remote trip datasets.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::dataset::loader::is_gzip_path;
use crate::error::{Error, Result};
use bytes::Bytes;
use tracing::debug;

/// Downloads `url` and returns the response body.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] before any request is made if `url` does not
/// parse, and [`Error::Fetch`] on transport failures or a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req).await?.error_for_status()?;
    let body = resp.bytes().await?;
    debug!(url, bytes = body.len(), "Dataset downloaded");
    Ok(body)
}

/// Returns `true` when the URL's path ends in `.gz`, ignoring any query
/// string or fragment.
pub fn is_gzip_url(url: &str) -> bool {
    url.parse::<reqwest::Url>()
        .map(|u| is_gzip_path(u.path()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_rejects_unparsable_url() {
        let client = BasicClient::new().unwrap();
        let err = fetch_bytes(&client, "not a url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_is_gzip_url_ignores_query_and_fragment() {
        assert!(is_gzip_url("https://host/trips.csv.gz"));
        assert!(is_gzip_url("https://host/trips.csv.gz?sig=abc&exp=1"));
        assert!(is_gzip_url("https://host/data/trips.csv.gz#part"));
        assert!(!is_gzip_url("https://host/trips.csv?name=trips.csv.gz"));
        assert!(!is_gzip_url("not a url"));
    }
}
