// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request routing: which requests are intercepted and how.

use std::sync::LazyLock;

use regex::Regex;
use strum::{Display, EnumString};

static ASSET_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(js|css|png|jpg|jpeg|gif|svg|woff|woff2|ttf|eot)$").unwrap()
});

/// How an intercepted request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum RequestRoute {
    /// Not intercepted; the caller performs its default fetch.
    Bypass,
    /// HTML shell; falls back to the cached fallback page when offline.
    Navigation,
    /// Static asset; successful responses are cached.
    Asset,
    /// Fetched from the network and never cached.
    Network,
}

/// Ordering of network and cache for navigation and asset requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum CachePolicy {
    #[default]
    NetworkFirst,
    CacheFirst,
}

pub fn is_navigation(path: &str) -> bool {
    path == "/" || path == "/index.html" || path.ends_with(".html")
}

pub fn is_asset(path: &str) -> bool {
    path.starts_with("/assets/") || ASSET_EXTENSION.is_match(path)
}

/// Routes a request by method and URL path. Only `GET` is intercepted.
pub fn route(method: &str, path: &str) -> RequestRoute {
    if !method.eq_ignore_ascii_case("GET") {
        RequestRoute::Bypass
    } else if is_navigation(path) {
        RequestRoute::Navigation
    } else if is_asset(path) {
        RequestRoute::Asset
    } else {
        RequestRoute::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_get_is_bypassed() {
        assert_eq!(route("POST", "/index.html"), RequestRoute::Bypass);
        assert_eq!(route("PUT", "/assets/app.js"), RequestRoute::Bypass);
    }

    #[test]
    fn navigation_paths() {
        assert_eq!(route("GET", "/"), RequestRoute::Navigation);
        assert_eq!(route("GET", "/index.html"), RequestRoute::Navigation);
        assert_eq!(route("GET", "/docs/help.html"), RequestRoute::Navigation);
    }

    #[test]
    fn asset_paths() {
        assert_eq!(route("GET", "/assets/index-abc123.js"), RequestRoute::Asset);
        assert_eq!(route("GET", "/assets/data.json"), RequestRoute::Asset);
        assert_eq!(route("GET", "/icon-192.png"), RequestRoute::Asset);
        assert_eq!(route("GET", "/fonts/x.woff2"), RequestRoute::Asset);
    }

    #[test]
    fn everything_else_goes_to_network() {
        assert_eq!(route("GET", "/manifest.json"), RequestRoute::Network);
        assert_eq!(route("GET", "/api/chat"), RequestRoute::Network);
        assert_eq!(route("GET", "/app.jsx"), RequestRoute::Network);
    }

    #[test]
    fn html_wins_over_asset_directory() {
        assert_eq!(route("GET", "/assets/page.html"), RequestRoute::Navigation);
    }

    #[test]
    fn policy_parses_from_kebab_case() {
        assert_eq!("cache-first".parse::<CachePolicy>().unwrap(), CachePolicy::CacheFirst);
        assert_eq!(CachePolicy::default().to_string(), "network-first");
    }
}
