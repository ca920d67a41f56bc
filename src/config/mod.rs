pub mod settings;

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::catalog;
use crate::core::{CoreError, Filter};

/// Persisted defaults applied to every run before command-line options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Extra glob patterns, tried after the catalog patterns.
    pub exclude_patterns: Vec<String>,
    /// Catalog category IDs whose patterns are dropped.
    pub disabled_categories: Vec<String>,
    /// Skip the catalog entirely.
    pub no_defaults: bool,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        settings::load_config(path)
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// Patterns from `overrides` come after ours, disabled categories are the
    /// union in first-seen order, and `no_defaults` is set if either sets it.
    pub fn merge(&self, overrides: &AppConfig) -> AppConfig {
        let mut disabled_categories = self.disabled_categories.clone();
        for id in &overrides.disabled_categories {
            if !disabled_categories.contains(id) {
                disabled_categories.push(id.clone());
            }
        }

        AppConfig {
            exclude_patterns: self
                .exclude_patterns
                .iter()
                .chain(&overrides.exclude_patterns)
                .cloned()
                .collect(),
            disabled_categories,
            no_defaults: self.no_defaults || overrides.no_defaults,
        }
    }

    /// Builds the filter these settings describe.
    ///
    /// Unknown category IDs are rejected even when the catalog is skipped.
    pub fn build_filter(&self) -> Result<Filter, CoreError> {
        let invalid = catalog::validate_category_ids(&self.disabled_categories);
        if !invalid.is_empty() {
            return Err(CoreError::InvalidCategories(invalid));
        }

        if self.no_defaults {
            Ok(Filter::new(&self.exclude_patterns))
        } else {
            Ok(Filter::with_defaults(
                &self.exclude_patterns,
                &self.disabled_categories,
            ))
        }
    }
}
