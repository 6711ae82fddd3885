use log::warn;
use once_cell::sync::Lazy;
use shared::{EndpointPolicy, PageLocation, ResolvedBase};
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("no browsing context available")]
    NoBrowsingContext,
    #[error("page location could not be read: {0}")]
    Unreadable(String),
}

impl From<JsValue> for LocationError {
    fn from(value: JsValue) -> Self {
        LocationError::Unreadable(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
pub fn read_page_location() -> Result<PageLocation, LocationError> {
    let window = web_sys::window().ok_or(LocationError::NoBrowsingContext)?;
    let location = window.location();

    Ok(PageLocation {
        hostname: location.hostname()?,
        port: location.port()?,
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_page_location() -> Result<PageLocation, LocationError> {
    Err(LocationError::NoBrowsingContext)
}

/// Settings shared by every module that talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    api_base: ResolvedBase,
}

impl AppConfig {
    pub fn new(api_base: ResolvedBase) -> Self {
        Self { api_base }
    }

    pub fn from_location(
        location: Result<PageLocation, LocationError>,
        policy: &EndpointPolicy,
    ) -> Self {
        let location = match location {
            Ok(location) => Some(location),
            Err(e) => {
                warn!("{}, falling back to {}", e, policy.fallback_origin());
                None
            }
        };

        Self::new(policy.resolve(location.as_ref()))
    }

    pub fn load() -> Self {
        Self::from_location(read_page_location(), &EndpointPolicy::default())
    }

    pub fn api_base(&self) -> &ResolvedBase {
        &self.api_base
    }

    pub fn api_url(&self, path: &str) -> String {
        self.api_base.join(path)
    }
}

// Resolved on first access, never recomputed for the life of the page.
static APP_CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::load);

pub fn app_config() -> &'static AppConfig {
    &APP_CONFIG
}

pub fn get_api_base_url() -> String {
    app_config().api_base().to_string()
}

pub fn get_api_url(path: &str) -> String {
    app_config().api_url(path)
}

/// Upload paths like `/static/uploads/..` are served by the backend too.
pub fn get_asset_url(path: &str) -> String {
    app_config().api_url(path)
}
