pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5002";
pub const BACKEND_PORT: &str = "5002";
pub const DEFAULT_PORT: &str = "";
pub const LOOPBACK_HOSTS: [&str; 2] = ["127.0.0.1", "localhost"];

pub const INVALID_ORIGIN_ERROR: &str = "Fallback must be an absolute http(s) origin without a path";
pub const INVALID_HOSTNAMES_ERROR: &str = "Same-origin hostnames must be non-empty bare hostnames";
pub const INVALID_PORTS_ERROR: &str = "Same-origin ports must be a non-empty list of empty or up to 5 digit ports";

pub const MAX_PORT_DIGITS: usize = 5;
