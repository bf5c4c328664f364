//! The algorithm registry
//!
//! An explicit, constructed registry passed into the device manager at
//! startup. No process-wide mutable state: extensions register themselves
//! before the registry is shared.

use crate::{CryptoError, CryptoResult, EcdsaP384, RsaSha256, SignatureAlgorithm};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps algorithm names to their signing and key-generation capabilities
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<&'static str, Arc<dyn SignatureAlgorithm>>,
}

impl AlgorithmRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Create a registry with the built-in algorithms registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(RsaSha256::new()));
        registry.register(Arc::new(EcdsaP384::new()));
        registry
    }

    /// Register an algorithm under its own name, replacing any previous
    /// registration with that name
    pub fn register(&mut self, algorithm: Arc<dyn SignatureAlgorithm>) {
        self.algorithms.insert(algorithm.name(), algorithm);
    }

    /// Whether `name` refers to a registered algorithm
    pub fn is_valid(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Look up a registered algorithm
    pub fn get(&self, name: &str) -> CryptoResult<Arc<dyn SignatureAlgorithm>> {
        self.algorithms
            .get(name)
            .cloned()
            .ok_or_else(|| CryptoError::UnknownAlgorithm(name.to_string()))
    }

    /// Names of all registered algorithms
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.algorithms.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
