//! Memoization of network computations.
//!
//! The engine itself keeps no state between calls; a caller that recomputes
//! on every edit can hold a `NetworkCache` instead. Caching is explicit and
//! keyed on a structural hash of the input conditions - same input, same
//! (cloned) output, no recomputation.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::models::{NetworkOutput, PrecedenceCondition};
use crate::PertConfig;

use super::{compute_network, NetworkError};

/// Single-entry memoization of [`compute_network`].
///
/// A failed computation leaves the previous entry in place, so a caller can
/// keep showing its last-known-good network while the user fixes the input.
#[derive(Default)]
pub struct NetworkCache {
    entry: Option<(u64, NetworkOutput)>,
    hits: u64,
    misses: u64,
}

impl NetworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute (or replay) the network for `conditions`.
    pub fn compute(
        &mut self,
        conditions: &[PrecedenceCondition],
        config: &PertConfig,
    ) -> Result<NetworkOutput, NetworkError> {
        let key = structural_hash(conditions);
        if let Some((cached_key, output)) = &self.entry {
            if *cached_key == key {
                self.hits += 1;
                return Ok(output.clone());
            }
        }

        self.misses += 1;
        let output = compute_network(conditions, config)?;
        self.entry = Some((key, output.clone()));
        Ok(output)
    }

    /// Drop the cached entry.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Order-sensitive hash of the condition list (input order is significant:
/// it drives level, group and arc ordering).
fn structural_hash(conditions: &[PrecedenceCondition]) -> u64 {
    let mut hasher = FxHasher::default();
    conditions.len().hash(&mut hasher);
    for condition in conditions {
        condition.task.hash(&mut hasher);
        condition.anteriors.hash(&mut hasher);
        condition.duration.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}
