pub mod constants;
pub mod endpoint;
pub mod validation;

pub use endpoint::{resolve_base, ConfigError, EndpointPolicy, Origin, PageLocation, ResolvedBase};
