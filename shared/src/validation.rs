use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::{
    INVALID_HOSTNAMES_ERROR, INVALID_ORIGIN_ERROR, INVALID_PORTS_ERROR, MAX_PORT_DIGITS,
};

// scheme://host[:port] and nothing after it
static ORIGIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(?:\[[0-9A-Fa-f:.]+\]|[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*)(?::(?P<port>[0-9]{1,5}))?$",
    )
    .expect("origin pattern is a valid regex")
});

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn is_valid_port(port: &str) -> bool {
    port.len() <= MAX_PORT_DIGITS
        && port.chars().all(|c| c.is_ascii_digit())
        && port.parse::<u16>().is_ok()
}

pub fn validate_origin(origin: &str) -> Result<(), ValidationError> {
    let captures = ORIGIN_PATTERN
        .captures(origin)
        .ok_or_else(|| error_with_message("invalid_origin", INVALID_ORIGIN_ERROR))?;

    if let Some(port) = captures.name("port") {
        if !is_valid_port(port.as_str()) {
            return Err(error_with_message("invalid_origin_port", INVALID_ORIGIN_ERROR));
        }
    }
    Ok(())
}

pub fn validate_hostnames(hostnames: &[String]) -> Result<(), ValidationError> {
    if hostnames.is_empty() {
        return Err(error_with_message("empty_hostnames", INVALID_HOSTNAMES_ERROR));
    }

    for hostname in hostnames {
        let bracketed = hostname.starts_with('[') && hostname.ends_with(']');
        if hostname.is_empty()
            || hostname.contains('/')
            || hostname.chars().any(char::is_whitespace)
            || (hostname.contains(':') && !bracketed)
        {
            return Err(error_with_message("invalid_hostname", INVALID_HOSTNAMES_ERROR));
        }
    }
    Ok(())
}

/// An empty entry stands for the scheme's default port.
pub fn validate_ports(ports: &[String]) -> Result<(), ValidationError> {
    if ports.is_empty() {
        return Err(error_with_message("empty_ports", INVALID_PORTS_ERROR));
    }

    if ports.iter().all(|port| port.is_empty() || is_valid_port(port)) {
        Ok(())
    } else {
        Err(error_with_message("invalid_port", INVALID_PORTS_ERROR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://127.0.0.1:5002")]
    #[case("http://localhost")]
    #[case("https://api.example.com")]
    #[case("https://api.example.com:8443")]
    #[case("http://[::1]:5002")]
    fn test_accepts_origins(#[case] origin: &str) {
        assert!(validate_origin(origin).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("127.0.0.1:5002")]
    #[case("ftp://127.0.0.1")]
    #[case("http://127.0.0.1:5002/")]
    #[case("http://127.0.0.1:5002/api")]
    #[case("http://127.0.0.1:99999")]
    #[case("http://user@example.com")]
    #[case("http://example.com?x=1")]
    #[case("http://exa mple.com")]
    fn test_rejects_non_origins(#[case] origin: &str) {
        assert!(validate_origin(origin).is_err());
    }

    #[test]
    fn test_hostnames() {
        let ok = vec!["localhost".to_string(), "[::1]".to_string()];
        assert!(validate_hostnames(&ok).is_ok());

        assert!(validate_hostnames(&[]).is_err());
        assert!(validate_hostnames(&["".to_string()]).is_err());
        assert!(validate_hostnames(&["localhost:5002".to_string()]).is_err());
        assert!(validate_hostnames(&["local host".to_string()]).is_err());
    }

    #[test]
    fn test_ports() {
        let ok = vec!["5002".to_string(), "".to_string()];
        assert!(validate_ports(&ok).is_ok());
        assert!(validate_ports(&["".to_string()]).is_ok());
        assert!(validate_ports(&[]).is_err());

        assert!(validate_ports(&["http".to_string()]).is_err());
        assert!(validate_ports(&["70000".to_string()]).is_err());
        assert!(validate_ports(&["123456".to_string()]).is_err());
    }

    #[test]
    fn test_error_carries_message() {
        let error = validate_origin("nope").unwrap_err();
        assert_eq!(error.code, "invalid_origin");
        assert_eq!(error.message.as_deref(), Some(INVALID_ORIGIN_ERROR));
    }
}
