// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline cache for the tutor's static web shell.
//!
//! Only `GET` requests are intercepted. HTML navigations and static assets
//! are served network-first (or cache-first when configured), with assets
//! written into the current cache generation and the fallback page served
//! for navigations while offline. Everything else passes straight through.

pub mod cache;
pub mod strategy;
pub mod worker;

pub use cache::{CacheStorage, CachedResponse, generation_name};
pub use strategy::{CachePolicy, RequestRoute, route};
pub use worker::{Fetcher, OfflineWorker, ReqwestFetcher, Served};
