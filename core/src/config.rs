//! Generator configuration.
//!
//! Configuration names metadata types and strategies by string, so it can be
//! loaded from JSON or YAML and applied with
//! [`ResourceGenerator::apply_config()`](crate::ResourceGenerator::apply_config).
//!
//! ```yaml
//! strategies:
//!   - metadata_type: halogen.metadata.v1.RouteBasedResourceMetadata
//!     strategy: halogen.strategy.v1.RouteBasedResourceStrategy
//! ```

use crate::HalError;
use serde::Deserialize;

/// Configuration for a [`ResourceGenerator`](crate::ResourceGenerator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Strategy overrides, applied in order (later entries win).
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

/// One `metadata type → strategy` registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StrategyConfig {
    /// Metadata type URL, e.g. `halogen.metadata.v1.UrlBasedResourceMetadata`.
    pub metadata_type: String,

    /// Strategy name as registered in a [`StrategyCatalog`](crate::StrategyCatalog).
    pub strategy: String,
}

impl GeneratorConfig {
    /// Parse configuration from JSON.
    ///
    /// # Errors
    ///
    /// [`HalError::InvalidConfig`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, HalError> {
        serde_json::from_str(json).map_err(|e| HalError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Add a registration (builder pattern).
    #[must_use]
    pub fn with_strategy(
        mut self,
        metadata_type: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Self {
        self.strategies.push(StrategyConfig {
            metadata_type: metadata_type.into(),
            strategy: strategy.into(),
        });
        self
    }
}
