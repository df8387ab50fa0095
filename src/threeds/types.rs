use serde::{Deserialize, Serialize};

use super::LookupError;

// ---------------------------------------------------------------------------
// 3ds-lookup API response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiLookupResponse {
    #[serde(default, rename = "is3DS")]
    pub is_3ds: bool,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default, rename = "cardType")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default, rename = "ipCountry")]
    pub ip_country: Option<String>,
}

// ---------------------------------------------------------------------------
// EnforcementResult: oracle answer consumed by the classifier
// ---------------------------------------------------------------------------

/// Answer from an enforcement oracle. Only `is_3ds` feeds classification;
/// the remaining fields are advisory display data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnforcementResult {
    pub is_3ds: bool,
    pub scheme: Option<String>,
    pub card_type: Option<String>,
    pub country: Option<String>,
    pub issuer: Option<String>,
    pub ip_country: Option<String>,
    /// Oracle payload as received.
    pub raw_response: serde_json::Value,
}

impl EnforcementResult {
    pub fn new(is_3ds: bool) -> Self {
        Self {
            is_3ds,
            ..Self::default()
        }
    }

    /// Build a result from an API JSON body. A body carrying an `error`
    /// field is a failed lookup even when the HTTP status was 2xx.
    pub fn from_api_value(value: serde_json::Value) -> Result<Self, LookupError> {
        if let Some(err) = value.get("error") {
            let msg = err
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(LookupError::Api(msg));
        }

        let parsed: ApiLookupResponse = serde_json::from_value(value.clone())
            .map_err(|e| LookupError::Unexpected(e.to_string()))?;

        Ok(Self {
            is_3ds: parsed.is_3ds,
            scheme: parsed.scheme,
            card_type: parsed.card_type,
            country: parsed.country,
            issuer: parsed.issuer,
            ip_country: parsed.ip_country,
            raw_response: value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_response() {
        let body = json!({
            "is3DS": true,
            "scheme": "VISA",
            "cardType": "CREDIT",
            "country": "US",
            "issuer": "JPMORGAN CHASE BANK",
            "ipCountry": "US"
        });

        let result = EnforcementResult::from_api_value(body.clone()).unwrap();
        assert!(result.is_3ds);
        assert_eq!(result.scheme.as_deref(), Some("VISA"));
        assert_eq!(result.card_type.as_deref(), Some("CREDIT"));
        assert_eq!(result.ip_country.as_deref(), Some("US"));
        assert_eq!(result.raw_response, body);
    }

    #[test]
    fn test_missing_is3ds_reads_false() {
        let result = EnforcementResult::from_api_value(json!({ "scheme": "MASTERCARD" })).unwrap();
        assert!(!result.is_3ds);
        assert!(result.issuer.is_none());
    }

    #[test]
    fn test_error_field_is_failure() {
        let err = EnforcementResult::from_api_value(json!({ "error": "quota exceeded" }))
            .unwrap_err();
        assert!(matches!(err, LookupError::Api(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn test_non_object_is_failure() {
        let err = EnforcementResult::from_api_value(json!("not an object")).unwrap_err();
        assert!(matches!(err, LookupError::Unexpected(_)));
    }
}
