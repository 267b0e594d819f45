// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration specs.

use ae_api::ApiClient;
use ae_config::HarnessConfig;

#[test]
fn checked_in_fixture_loads_from_the_default_path() {
    let config = HarnessConfig::load_default().unwrap();
    assert_eq!(config.project, "default");
    assert!(config.base_url.as_str().starts_with("https://"));
}

#[test]
fn fixture_substitutes_endpoint_placeholders() {
    let config = HarnessConfig::load_default().unwrap();
    let url = config.endpoints.templates_url("acme", "main");
    assert!(url.contains("/orgs/acme/"), "got: {url}");
    assert!(url.contains("/projects/main/"), "got: {url}");
    assert!(!url.contains('{'), "unsubstituted placeholder in {url}");
}

#[test]
fn fixture_drives_the_api_client() {
    let config = HarnessConfig::load_default().unwrap();
    let client = ApiClient::new(config.base_url.clone(), config.auth.token.clone()).unwrap();
    // Secrets never leak through Debug output.
    let debug = format!("{client:?} {:?}", config.auth);
    assert!(!debug.contains(&config.auth.token));
    assert!(!debug.contains(&config.auth.password));
}
