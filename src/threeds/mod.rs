pub mod client;
pub mod types;

pub use client::ThreeDsClient;
pub use types::{ApiLookupResponse, EnforcementResult};

use std::net::IpAddr;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lookup API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("lookup API error: {0}")]
    Api(String),

    #[error("no API key configured for the 3DS lookup service")]
    MissingCredentials,

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Anything that can answer "is 3DS enforced for this BIN / card number,
/// optionally from this IP".
#[async_trait]
pub trait EnforcementOracle: Send + Sync {
    async fn lookup(
        &self,
        input: &str,
        ip: Option<IpAddr>,
    ) -> Result<EnforcementResult, LookupError>;

    /// Whether the oracle can serve lookups at all (e.g. has credentials).
    fn is_configured(&self) -> bool {
        true
    }
}
