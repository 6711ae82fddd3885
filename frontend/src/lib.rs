pub mod config;

use wasm_bindgen::prelude::*;

pub use config::{app_config, get_api_base_url, get_api_url, get_asset_url, AppConfig};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    use log::info;

    // Initialize the logger for WebAssembly
    wasm_logger::init(wasm_logger::Config::default());

    let base = app_config().api_base();
    if base.is_same_origin() {
        info!("Served by the backend, API requests use relative paths");
    } else {
        info!("API requests go to {}", base);
    }
}

/// Base URL for API calls from plain JavaScript pages. Empty when the page is
/// served by the backend itself.
#[wasm_bindgen(js_name = apiBase)]
pub fn api_base() -> String {
    get_api_base_url()
}

#[wasm_bindgen(js_name = apiUrl)]
pub fn api_url(path: &str) -> String {
    get_api_url(path)
}
