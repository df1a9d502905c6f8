use crate::core::error::{Error, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const USER_AGENT: &str = "catalog-report/1.0";

pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::Client)
}

/// Parses `base_url` and makes sure it ends with a slash so relative paths
/// join underneath it instead of replacing its last segment.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized)
        .map_err(|e| Error::Config(format!("Invalid service URL '{base_url}': {e}")))
}

/// Renders `url` for logs and errors with credential query values masked.
pub fn redacted(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == "access_key") {
        return url.to_string();
    }
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "access_key" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Issues a single GET and decodes the JSON body. Non-success statuses are
/// reported before any decoding is attempted.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T> {
    let display_url = redacted(&url);
    debug!("Requesting {}", display_url);
    let response = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|source| Error::Request {
            url: display_url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: display_url.clone(),
            status,
        });
    }

    let text = response.text().await.map_err(|source| Error::Request {
        url: display_url.clone(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| Error::Parse {
        url: display_url,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://services.odata.org/V3/Northwind/Northwind.svc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://services.odata.org/V3/Northwind/Northwind.svc/"
        );
        assert_eq!(
            url.join("Products").unwrap().as_str(),
            "https://services.odata.org/V3/Northwind/Northwind.svc/Products"
        );
    }

    #[test]
    fn test_redacted_masks_access_key() {
        let url = Url::parse("http://api.currencylayer.com/live?access_key=secret&source=USD")
            .unwrap();
        let shown = redacted(&url);
        assert!(!shown.contains("secret"));
        assert!(shown.contains("access_key=***") || shown.contains("access_key=%2A%2A%2A"));
        assert!(shown.contains("source=USD"));

        let plain = Url::parse("http://localhost/Products?$skiptoken=2").unwrap();
        assert_eq!(redacted(&plain), plain.to_string());
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
