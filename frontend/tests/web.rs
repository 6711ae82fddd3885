#![cfg(target_arch = "wasm32")]

use frontend::config::{read_page_location, AppConfig};
use frontend::{api_base, api_url};
use shared::constants::DEFAULT_API_BASE;
use shared::EndpointPolicy;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn reads_location_in_browser() {
    let location = read_page_location().expect("browser tests run inside a window");
    assert!(!location.hostname.is_empty());
}

#[wasm_bindgen_test]
fn resolved_base_has_one_of_two_shapes() {
    let base = api_base();
    assert!(base.is_empty() || base == DEFAULT_API_BASE);
    assert_eq!(api_url("/api/items"), format!("{}/api/items", base));
}

#[wasm_bindgen_test]
fn cached_base_matches_fresh_resolution() {
    let fresh = AppConfig::from_location(read_page_location(), &EndpointPolicy::default());
    assert_eq!(fresh.api_base().as_str(), api_base());
}
