//! Branch-and-bound configuration.

use crate::error::Result;

/// Configuration for [`BnbRunner`](super::BnbRunner).
///
/// The search is exact and has no tuning knobs; the type exists so every
/// runner takes the same `(instance, config)` arguments.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {}

impl BnbConfig {
    /// Always succeeds.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
