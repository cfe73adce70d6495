// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog of models offered to the student.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

const AVAILABLE_MODELS: &[ModelInfo] = &[ModelInfo {
    id: DEFAULT_MODEL,
    name: "Llama 3.1 8B Instant",
    category: "Llama 3.1 系列（META）",
}];

pub fn available_models() -> &'static [ModelInfo] {
    AVAILABLE_MODELS
}

pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    AVAILABLE_MODELS.iter().find(|m| m.id == id)
}

pub fn default_model() -> &'static ModelInfo {
    &AVAILABLE_MODELS[0]
}
