use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::constants::{BACKEND_PORT, DEFAULT_API_BASE, DEFAULT_PORT, LOOPBACK_HOSTS};
use crate::validation::{validate_hostnames, validate_origin, validate_ports};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint policy: {0}")]
    InvalidPolicy(#[from] ValidationErrors),
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),
    #[error("malformed endpoint policy: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Hostname and port of the page, as reported by the browser's `location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub hostname: String,
    /// Empty when the page was loaded on the scheme's default port.
    pub port: String,
}

impl PageLocation {
    pub fn new(hostname: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            port: port.into(),
        }
    }
}

/// An absolute `http(s)://host[:port]` origin with no path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin(String);

impl Origin {
    pub fn parse(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        match validate_origin(&value) {
            Ok(()) => Ok(Self(value)),
            Err(_) => Err(ConfigError::InvalidOrigin(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base URL prefixed onto every API path.
///
/// Either empty (paths stay relative to the page's own origin) or an absolute
/// origin such as `http://127.0.0.1:5002` with no path and no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResolvedBase {
    SameOrigin,
    Absolute(Origin),
}

impl ResolvedBase {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SameOrigin => "",
            Self::Absolute(origin) => origin.as_str(),
        }
    }

    pub fn is_same_origin(&self) -> bool {
        matches!(self, Self::SameOrigin)
    }

    /// Prefixes `path` with the base. Absolute `http(s)://` URLs pass through.
    /// Leading slashes collapse to one so `//host/x` stays on the API origin.
    pub fn join(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let path = path.trim_start_matches(['/', '\\']);
        format!("{}/{}", self.as_str(), path)
    }
}

impl fmt::Display for ResolvedBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ResolvedBase {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self::SameOrigin);
        }
        Origin::parse(value).map(Self::Absolute)
    }
}

impl From<ResolvedBase> for String {
    fn from(base: ResolvedBase) -> Self {
        match base {
            ResolvedBase::SameOrigin => String::new(),
            ResolvedBase::Absolute(origin) => origin.0,
        }
    }
}

/// Which page locations count as "served by the backend", and where to send
/// API calls otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(try_from = "RawEndpointPolicy")]
pub struct EndpointPolicy {
    #[validate(custom = "validate_origin")]
    fallback_origin: String,
    #[validate(custom = "validate_hostnames")]
    same_origin_hosts: Vec<String>,
    #[validate(custom = "validate_ports")]
    same_origin_ports: Vec<String>,
}

impl Default for EndpointPolicy {
    fn default() -> Self {
        Self {
            fallback_origin: DEFAULT_API_BASE.to_string(),
            same_origin_hosts: LOOPBACK_HOSTS.iter().map(|h| h.to_string()).collect(),
            same_origin_ports: vec![BACKEND_PORT.to_string(), DEFAULT_PORT.to_string()],
        }
    }
}

// Unchecked wire form; every deserialized policy goes through `EndpointPolicy::new`.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawEndpointPolicy {
    fallback_origin: String,
    same_origin_hosts: Vec<String>,
    same_origin_ports: Vec<String>,
}

impl Default for RawEndpointPolicy {
    fn default() -> Self {
        let policy = EndpointPolicy::default();
        Self {
            fallback_origin: policy.fallback_origin,
            same_origin_hosts: policy.same_origin_hosts,
            same_origin_ports: policy.same_origin_ports,
        }
    }
}

impl TryFrom<RawEndpointPolicy> for EndpointPolicy {
    type Error = ConfigError;

    fn try_from(raw: RawEndpointPolicy) -> Result<Self, Self::Error> {
        Self::new(raw.fallback_origin, raw.same_origin_hosts, raw.same_origin_ports)
    }
}

impl EndpointPolicy {
    pub fn new(
        fallback_origin: impl Into<String>,
        same_origin_hosts: Vec<String>,
        same_origin_ports: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let policy = Self {
            fallback_origin: fallback_origin.into(),
            same_origin_hosts,
            same_origin_ports,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Parses a policy from JSON. Missing fields keep their default values,
    /// unknown fields are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawEndpointPolicy = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn fallback_origin(&self) -> &str {
        &self.fallback_origin
    }

    pub fn same_origin_hosts(&self) -> &[String] {
        &self.same_origin_hosts
    }

    pub fn same_origin_ports(&self) -> &[String] {
        &self.same_origin_ports
    }

    pub fn is_same_origin(&self, location: &PageLocation) -> bool {
        self.same_origin_hosts.iter().any(|h| *h == location.hostname)
            && self.same_origin_ports.iter().any(|p| *p == location.port)
    }

    fn fallback(&self) -> ResolvedBase {
        // validated on construction
        ResolvedBase::Absolute(Origin(self.fallback_origin.clone()))
    }

    /// `None` means the page location could not be read at all.
    pub fn resolve(&self, location: Option<&PageLocation>) -> ResolvedBase {
        match location {
            Some(location) if self.is_same_origin(location) => {
                debug!(
                    "Page served by backend at {}:{}, using relative API paths",
                    location.hostname, location.port
                );
                ResolvedBase::SameOrigin
            }
            Some(location) => {
                debug!(
                    "Page served from {}:{}, using API base {}",
                    location.hostname, location.port, self.fallback_origin
                );
                self.fallback()
            }
            None => {
                debug!("No page location available, using API base {}", self.fallback_origin);
                self.fallback()
            }
        }
    }
}

pub fn resolve_base(location: Option<&PageLocation>) -> ResolvedBase {
    EndpointPolicy::default().resolve(location)
}
