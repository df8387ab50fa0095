use serde::Deserialize;
use thiserror::Error;

use crate::models::BinRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// History filters. Multi-select fields take comma-separated values; an
/// empty selection matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub risk: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Substring of the BIN.
    #[serde(default)]
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &BinRecord) -> bool {
        selected(&self.scheme, record.scheme.as_deref())
            && selected(&self.risk, Some(record.risk_level.as_str()))
            && selected(&self.country, record.country.as_deref())
            && self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map_or(true, |s| record.bin_number.contains(s))
    }

    pub fn apply(&self, records: Vec<BinRecord>) -> Vec<BinRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn selected(selection: &Option<String>, value: Option<&str>) -> bool {
    let options: Vec<&str> = selection
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if options.is_empty() {
        return true;
    }
    value.is_some_and(|v| options.contains(&v))
}

const CSV_HEADER: [&str; 14] = [
    "bin",
    "checked_at",
    "scheme",
    "card_type",
    "country",
    "ip_country",
    "issuer",
    "is_3ds",
    "risk_level",
    "source",
    "ip_address",
    "source_url",
    "fraud_context",
    "id",
];

/// Render records as CSV, header first.
pub fn records_to_csv(records: &[BinRecord]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for r in records {
        writer.write_record([
            r.bin_number.clone(),
            r.checked_at.format("%Y-%m-%d %H:%M").to_string(),
            r.scheme.clone().unwrap_or_default(),
            r.card_type.clone().unwrap_or_default(),
            r.country.clone().unwrap_or_default(),
            r.ip_country.clone().unwrap_or_default(),
            r.issuer.clone().unwrap_or_default(),
            r.is_3ds.to_string(),
            r.risk_level.clone(),
            r.source.clone(),
            r.ip_address.clone(),
            r.source_url.clone().unwrap_or_default(),
            r.fraud_context.to_string(),
            r.id.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn record(bin: &str, scheme: &str, risk: &str, country: &str) -> BinRecord {
        BinRecord {
            id: Uuid::nil(),
            bin_number: bin.into(),
            ip_address: "0.0.0.0".into(),
            scheme: Some(scheme.into()),
            card_type: Some("CREDIT".into()),
            country: Some(country.into()),
            issuer: Some("Bank, N.A.".into()),
            ip_country: None,
            is_3ds: risk == "Enforced",
            risk_level: risk.into(),
            fraud_context: risk == "Unsafe",
            raw_response: serde_json::json!({}),
            source: "scraper".into(),
            source_url: Some("https://example.com".into()),
            checked_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
        }
    }

    fn sample() -> Vec<BinRecord> {
        vec![
            record("411111", "VISA", "Weak", "US"),
            record("555555", "MASTERCARD", "Unsafe", "GB"),
            record("378282", "AMEX", "Enforced", "US"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(RecordFilter::default().apply(sample()).len(), 3);
    }

    #[test]
    fn test_multi_select_filters() {
        let filter = RecordFilter {
            scheme: Some("VISA, MASTERCARD".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(sample()).len(), 2);

        let filter = RecordFilter {
            scheme: Some("VISA,MASTERCARD".into()),
            country: Some("GB".into()),
            ..Default::default()
        };
        let kept = filter.apply(sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].bin_number, "555555");
    }

    #[test]
    fn test_risk_and_search_filters() {
        let filter = RecordFilter {
            risk: Some("Weak,Unsafe".into()),
            search: Some("55".into()),
            ..Default::default()
        };
        let kept = filter.apply(sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].risk_level, "Unsafe");
    }

    #[test]
    fn test_missing_field_fails_non_empty_selection() {
        let mut r = record("411111", "VISA", "Weak", "US");
        r.scheme = None;
        let filter = RecordFilter {
            scheme: Some("VISA".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&r));
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let csv = records_to_csv(&sample()[..1]).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("bin,checked_at,scheme"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("411111,2024-06-01 12:30,VISA,CREDIT,US,,"));
        assert!(row.contains("\"Bank, N.A.\""));
        assert!(lines.next().is_none());
    }
}
