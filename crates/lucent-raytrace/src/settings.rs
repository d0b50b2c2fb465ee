//! Build parameters for the bounding volume hierarchy.

use serde::{Deserialize, Serialize};

use crate::error::{BvhError, Result};

/// Strategy used to partition primitives at each interior node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMethod {
    /// Bucketed surface area heuristic.
    #[default]
    Sah,
    /// Split at the midpoint of the centroid bounds along the widest axis.
    Middle,
    /// Split into two halves with equal primitive counts along the widest axis.
    EqualCounts,
}

/// Bounding volume hierarchy build parameters.
///
/// `leaf_max_size` trades build cost against traversal cost: larger leaves
/// give shallower trees that are cheaper to build but scan more primitives
/// per leaf; smaller leaves give deeper trees with faster traversal at the
/// price of build time and node memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhSettings {
    /// Largest number of primitives a leaf may hold (unless all centroids coincide).
    pub leaf_max_size: u16,
    /// Partitioning strategy.
    pub split_method: SplitMethod,
    /// Accept an empty primitive list and build an empty structure.
    pub allow_empty: bool,
}

impl Default for BvhSettings {
    fn default() -> Self {
        Self {
            leaf_max_size: 4,
            split_method: SplitMethod::Sah,
            allow_empty: true,
        }
    }
}

impl BvhSettings {
    /// Settings with the given leaf size and defaults elsewhere.
    pub fn with_leaf_max_size(leaf_max_size: u16) -> Self {
        Self {
            leaf_max_size,
            ..Default::default()
        }
    }

    /// Parse settings from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.leaf_max_size == 0 {
            return Err(BvhError::InvalidSettings(
                "leaf_max_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
