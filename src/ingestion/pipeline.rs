use metrics::{counter, histogram};
use std::net::IpAddr;
use std::time::Instant;
use thiserror::Error;

use crate::ingestion::page_fetcher::{FetchError, PageFetcher};
use crate::intelligence::{classify, extract, is_fraud_context, RiskTier};
use crate::models::{CandidateBin, DiscoveryRecord};
use crate::threeds::{EnforcementOracle, EnforcementResult, LookupError};
use crate::validation::{is_valid_bin, is_valid_url};

/// Upper bound on oracle calls per scraped page.
pub const MAX_CANDIDATES_PER_PAGE: usize = 15;

/// Discover BINs in page text and classify each one:
/// 1. Extract standalone 6-digit candidates
/// 2. Keep the first 15 in digit order
/// 3. Look each one up, sequentially
/// 4. Classify with the page's fraud-context signal
///
/// Candidates whose lookup fails are dropped; the rest of the batch goes on.
pub async fn discover_and_classify<O>(
    url: &str,
    page_text: &str,
    ip: Option<IpAddr>,
    oracle: &O,
) -> Vec<DiscoveryRecord>
where
    O: EnforcementOracle + ?Sized,
{
    let start = Instant::now();

    let candidates = extract(page_text);
    counter!("candidates_extracted_total").increment(candidates.len() as u64);

    if candidates.is_empty() {
        tracing::debug!(url = %url, "No BIN candidates found");
        return Vec::new();
    }

    if candidates.len() > MAX_CANDIDATES_PER_PAGE {
        tracing::info!(
            url = %url,
            found = candidates.len(),
            cap = MAX_CANDIDATES_PER_PAGE,
            "Candidate count over cap, truncating"
        );
    }

    // One signal per page, shared by every candidate on it.
    let fraud_context = is_fraud_context(url, page_text);
    if fraud_context {
        counter!("fraud_context_pages_total").increment(1);
    }

    let mut records = Vec::new();
    for bin in candidates.into_iter().take(MAX_CANDIDATES_PER_PAGE) {
        counter!("oracle_lookups_total").increment(1);

        let enforcement = match oracle.lookup(bin.as_str(), ip).await {
            Ok(result) => result,
            Err(e) => {
                counter!("oracle_lookup_failures_total").increment(1);
                tracing::warn!(bin = %bin, error = %e, "Lookup failed, skipping candidate");
                continue;
            }
        };

        let risk_tier = classify(enforcement.is_3ds, fraud_context);
        counter!("bins_classified_total").increment(1);
        tracing::debug!(
            bin = %bin,
            is_3ds = enforcement.is_3ds,
            fraud_context,
            risk = %risk_tier,
            "Candidate classified"
        );

        records.push(DiscoveryRecord {
            bin,
            enforcement,
            risk_tier,
            fraud_context,
        });
    }

    histogram!("discovery_latency_seconds").record(start.elapsed().as_secs_f64());

    tracing::info!(
        url = %url,
        classified = records.len(),
        fraud_context,
        "Discovery finished"
    );

    records
}

// ---------------------------------------------------------------------------
// Scrape flow: validate → fetch → discover
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL format. Please provide a valid URL.")]
    InvalidUrl,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub async fn scrape_url<O>(
    fetcher: &PageFetcher,
    oracle: &O,
    url: &str,
    ip: Option<IpAddr>,
) -> Result<Vec<DiscoveryRecord>, ScrapeError>
where
    O: EnforcementOracle + ?Sized,
{
    if !is_valid_url(url) {
        return Err(ScrapeError::InvalidUrl);
    }

    tracing::info!(url = %url, "Scraping page for BINs");
    let text = fetcher.fetch_text(url).await?;

    Ok(discover_and_classify(url, &text, ip, oracle).await)
}

// ---------------------------------------------------------------------------
// Manual check: single BIN or card number
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Please enter a valid BIN number (6 digits) or full card number (13-19 digits).")]
    InvalidInput,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

#[derive(Debug, Clone)]
pub struct ManualCheck {
    /// Leading six digits of the input.
    pub bin: CandidateBin,
    pub enforcement: EnforcementResult,
    pub risk_tier: RiskTier,
}

/// Look up a single BIN or card number. Manual input carries no source
/// context, so fraud context is always false.
pub async fn check_bin<O>(
    oracle: &O,
    input: &str,
    ip: Option<IpAddr>,
) -> Result<ManualCheck, CheckError>
where
    O: EnforcementOracle + ?Sized,
{
    if !is_valid_bin(input) {
        return Err(CheckError::InvalidInput);
    }
    let bin = CandidateBin::from_card_prefix(input).ok_or(CheckError::InvalidInput)?;

    counter!("oracle_lookups_total").increment(1);
    let enforcement = oracle.lookup(input, ip).await.inspect_err(|_| {
        counter!("oracle_lookup_failures_total").increment(1);
    })?;

    let risk_tier = classify(enforcement.is_3ds, false);
    counter!("bins_classified_total").increment(1);

    tracing::info!(
        bin = %bin,
        is_3ds = enforcement.is_3ds,
        risk = %risk_tier,
        "Manual BIN check"
    );

    Ok(ManualCheck {
        bin,
        enforcement,
        risk_tier,
    })
}
