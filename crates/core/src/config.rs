//! Tree configuration types

use serde::{Deserialize, Serialize};

use crate::HashAlgorithm;

/// How leaves equal to the padding sentinel are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentinelPolicy {
    /// Fail with `InvalidInput` when a leaf equals the sentinel
    #[default]
    Reject,
    /// Accept sentinel-valued leaves (padding becomes indistinguishable)
    Allow,
}

/// Parameters a prover and verifier must agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    #[serde(default)]
    pub sentinel_policy: SentinelPolicy,
}

impl TreeConfig {
    pub fn new(hash_algorithm: HashAlgorithm) -> Self {
        Self {
            hash_algorithm,
            sentinel_policy: SentinelPolicy::default(),
        }
    }

    pub fn with_sentinel_policy(mut self, policy: SentinelPolicy) -> Self {
        self.sentinel_policy = policy;
        self
    }
}
