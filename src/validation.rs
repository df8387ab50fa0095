//! Input-shape guards applied by callers before invoking the core.

use std::net::IpAddr;
use std::sync::OnceLock;

use regex::Regex;

/// A 6-digit BIN or a full card number, up to 19 digits.
pub fn is_valid_bin(input: &str) -> bool {
    (6..=19).contains(&input.len()) && input.bytes().all(|b| b.is_ascii_digit())
}

pub fn parse_ip(input: &str) -> Option<IpAddr> {
    input.trim().parse().ok()
}

pub fn is_valid_ip(input: &str) -> bool {
    parse_ip(input).is_some()
}

/// Optional IP form field: blank means "no IP", anything else must parse.
pub fn parse_optional_ip(input: Option<&str>) -> Result<Option<IpAddr>, String> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_ip(raw)
            .map(Some)
            .ok_or_else(|| format!("invalid IP address: {raw}")),
    }
}

/// http(s) URL with a domain, `localhost`, IPv4 or IPv6 host, optional port
/// and optional path.
pub fn is_valid_url(url: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)^(?:http|https)://",
            r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|",
            r"localhost|",
            r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}|",
            r"\[?[A-F0-9]*:[A-F0-9:]+\]?)",
            r"(?::[0-9]+)?",
            r"(?:/?|[/?]\S+)$",
        ))
        .expect("url regex is valid")
    });

    re.is_match(url)
}
