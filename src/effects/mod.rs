pub mod catalog;
pub mod strategy;

pub use self::catalog::{Candidate, EffectCatalog};
pub use self::strategy::{RandomizationMode, SamplingStrategy};

use crate::records::{EffectFields, EffectId};

/// One concrete effect occurrence harvested from a source ingredient.
///
/// `source` is the store's handle to the occurrence; it is never modified,
/// only handed back to the store when the occurrence is assigned elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRecord<H> {
    pub source: H,
    pub fields: EffectFields,
}

impl<H> EffectRecord<H> {
    pub fn new(source: H, fields: EffectFields) -> Self {
        Self { source, fields }
    }

    #[inline]
    pub fn id(&self) -> EffectId {
        self.fields.effect_id
    }

    /// Same effect type, regardless of magnitude/area/duration.
    #[inline]
    pub fn same_effect(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
