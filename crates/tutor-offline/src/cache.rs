// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named cache generations holding responses keyed by path.

use std::collections::HashMap;

use dashmap::DashMap;

/// A stored or fetched HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CachedResponse {
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.into()),
            body: body.into(),
        }
    }
}

/// Generation name for a cache prefix and version.
pub fn generation_name(prefix: &str, version: &str) -> String {
    format!("{prefix}{version}")
}

/// Concurrent map of generation name to its entries.
#[derive(Debug, Default)]
pub struct CacheStorage {
    generations: DashMap<String, HashMap<String, CachedResponse>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, generation: &str, path: &str, response: CachedResponse) {
        self.generations
            .entry(generation.to_string())
            .or_default()
            .insert(path.to_string(), response);
    }

    /// Looks `path` up in one generation.
    pub fn get(&self, generation: &str, path: &str) -> Option<CachedResponse> {
        self.generations
            .get(generation)
            .and_then(|entries| entries.get(path).cloned())
    }

    /// Looks `path` up across every generation.
    pub fn match_any(&self, path: &str) -> Option<CachedResponse> {
        self.generations
            .iter()
            .find_map(|generation| generation.value().get(path).cloned())
    }

    pub fn generation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generations.iter().map(|g| g.key().clone()).collect();
        names.sort();
        names
    }

    pub fn delete(&self, generation: &str) -> bool {
        self.generations.remove(generation).is_some()
    }

    /// Deletes every generation except `current`; returns how many were removed.
    pub fn purge_except(&self, current: &str) -> usize {
        let stale: Vec<String> = self
            .generations
            .iter()
            .filter(|g| g.key() != current)
            .map(|g| g.key().clone())
            .collect();
        stale.iter().filter(|name| self.delete(name)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_and_match_any() {
        let cache = CacheStorage::new();
        cache.put("v1", "/a.js", CachedResponse::ok("text/javascript", "a"));
        assert_eq!(cache.get("v1", "/a.js").unwrap().body, b"a");
        assert!(cache.get("v2", "/a.js").is_none());
        assert!(cache.match_any("/a.js").is_some());
        assert!(cache.match_any("/b.js").is_none());
    }

    #[test]
    fn purge_keeps_only_current() {
        let cache = CacheStorage::new();
        for g in ["ai-teacher-v1", "ai-teacher-v2", "ai-teacher-v3"] {
            cache.put(g, "/", CachedResponse::ok("text/html", g));
        }
        assert_eq!(cache.purge_except("ai-teacher-v3"), 2);
        assert_eq!(cache.generation_names(), vec!["ai-teacher-v3"]);
        assert_eq!(cache.purge_except("ai-teacher-v3"), 0);
    }

    #[test]
    fn generation_names_concatenate() {
        assert_eq!(generation_name("ai-teacher-v", "42"), "ai-teacher-v42");
    }
}
