use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{EnforcementOracle, EnforcementResult, LookupError};
use crate::models::BIN_LENGTH;

pub const DEFAULT_API_BASE: &str = "https://3ds-lookup.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "3ds-lookup.p.rapidapi.com";

/// Characters of an error response body kept in `LookupError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for the RapidAPI "3ds-lookup" service.
#[derive(Debug, Clone)]
pub struct ThreeDsClient {
    http: Client,
    base_url: String,
    api_host: String,
    api_key: Option<String>,
}

impl ThreeDsClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: DEFAULT_API_BASE.into(),
            api_host: DEFAULT_API_HOST.into(),
            api_key,
        }
    }

    /// Client with its own HTTP connection pool and request timeout.
    pub fn with_timeout(api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http, api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    /// Lookup URL for an input. With an IP the `binip` endpoint is used,
    /// otherwise `cards`, which wants a full card number: a bare 6-digit BIN
    /// is padded with ten zeros.
    pub fn lookup_url(&self, input: &str, ip: Option<IpAddr>) -> String {
        match ip {
            Some(ip) => format!("{}/binip/?bin={}&ip={}", self.base_url, input, ip),
            None => {
                let card_number = if input.len() == BIN_LENGTH {
                    format!("{input}0000000000")
                } else {
                    input.to_string()
                };
                format!("{}/cards/?num={}", self.base_url, card_number)
            }
        }
    }
}

#[async_trait]
impl EnforcementOracle for ThreeDsClient {
    async fn lookup(
        &self,
        input: &str,
        ip: Option<IpAddr>,
    ) -> Result<EnforcementResult, LookupError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LookupError::MissingCredentials)?;

        let url = self.lookup_url(input, ip);
        let resp = self
            .http
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let value: serde_json::Value = resp.json().await?;
        EnforcementResult::from_api_value(value)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ThreeDsClient {
        ThreeDsClient::new(Client::new(), Some("key".into()))
            .with_base_url("https://lookup.test/")
    }

    #[test]
    fn test_lookup_url_pads_bare_bin() {
        assert_eq!(
            client().lookup_url("411111", None),
            "https://lookup.test/cards/?num=4111110000000000"
        );
    }

    #[test]
    fn test_lookup_url_keeps_full_card() {
        assert_eq!(
            client().lookup_url("4571730021788388", None),
            "https://lookup.test/cards/?num=4571730021788388"
        );
    }

    #[test]
    fn test_lookup_url_with_ip_uses_binip() {
        let ip: IpAddr = "203.0.113.7".parse().unwrap();
        assert_eq!(
            client().lookup_url("411111", Some(ip)),
            "https://lookup.test/binip/?bin=411111&ip=203.0.113.7"
        );
    }

    #[tokio::test]
    async fn test_lookup_without_key_fails_fast() {
        let client = ThreeDsClient::new(Client::new(), None);
        assert!(!client.is_configured());
        let err = client.lookup("411111", None).await.unwrap_err();
        assert!(matches!(err, LookupError::MissingCredentials));
    }
}
