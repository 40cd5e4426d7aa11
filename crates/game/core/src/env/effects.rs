//! Composable effect oracle.

use std::collections::HashMap;
use std::sync::Arc;

use super::OracleError;
use crate::conditions::{EffectDefinition, EffectId};

/// Oracle providing composable effect definitions.
pub trait EffectOracle: Send + Sync {
    fn effect(&self, id: EffectId) -> Option<Arc<EffectDefinition>>;
}

/// In-memory effect catalog.
#[derive(Clone, Debug, Default)]
pub struct EffectCatalog {
    effects: HashMap<EffectId, Arc<EffectDefinition>>,
}

impl EffectCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(
        definitions: impl IntoIterator<Item = EffectDefinition>,
    ) -> Result<Self, OracleError> {
        let mut effects = HashMap::new();
        for definition in definitions {
            if effects.contains_key(&definition.id) {
                return Err(OracleError::DuplicateEffect(definition.id));
            }
            effects.insert(definition.id, Arc::new(definition));
        }
        Ok(Self { effects })
    }

    pub fn require(&self, id: EffectId) -> Result<Arc<EffectDefinition>, OracleError> {
        self.effect(id).ok_or(OracleError::EffectNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl EffectOracle for EffectCatalog {
    fn effect(&self, id: EffectId) -> Option<Arc<EffectDefinition>> {
        self.effects.get(&id).cloned()
    }
}
