// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait shared by the provider and storage backends.

use async_trait::async_trait;

use crate::error::TutorError;
use crate::types::{AdapterType, HealthStatus};

/// Identity and health reporting for a pluggable collaborator.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the kind of adapter.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check without consuming provider tokens.
    async fn health_check(&self) -> Result<HealthStatus, TutorError>;
}
