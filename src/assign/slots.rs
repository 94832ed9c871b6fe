use crate::consts::{PARALYSIS_EFFECT_ID, SLOT_COUNT};
use crate::effects::{EffectCatalog, EffectRecord, SamplingStrategy};
use crate::error::{RandomizerError, RzResult};
use crate::records::{EffectId, FormId};
use fastrand::Rng;
use tracing::trace;

/// Fills the effect slots of one ingredient from a shared catalog.
#[derive(Debug, Clone, Copy)]
pub struct SlotAssigner {
    strategy: SamplingStrategy,
}

impl SlotAssigner {
    pub fn new(strategy: SamplingStrategy) -> Self {
        Self { strategy }
    }

    /// Picks `SLOT_COUNT` effects with pairwise distinct identities, slot 0
    /// never being paralysis.
    ///
    /// Identities already placed are excluded from each draw rather than
    /// rejected afterwards, so the loop runs exactly once per slot. When no
    /// eligible identity is left the whole assignment fails with
    /// `Starvation`. Consuming strategies remove accepted occurrences from
    /// the catalog.
    pub fn assign<H: Clone>(
        &self,
        record: FormId,
        catalog: &mut EffectCatalog<H>,
        rng: &mut Rng,
    ) -> RzResult<Vec<EffectRecord<H>>> {
        let mut accepted: Vec<EffectRecord<H>> = Vec::with_capacity(SLOT_COUNT);
        let mut taken: Vec<EffectId> = Vec::with_capacity(SLOT_COUNT);

        for slot in 0..SLOT_COUNT {
            let candidate = self
                .strategy
                .pick(catalog, rng, slot, &taken)
                .ok_or_else(|| RandomizerError::Starvation {
                    record,
                    slot,
                    distinct_remaining: catalog.distinct_count(),
                })?;

            debug_assert!(!accepted.iter().any(|e| e.same_effect(&candidate.record)));
            debug_assert!(slot != 0 || candidate.record.id() != PARALYSIS_EFFECT_ID);

            if self.strategy.consumes() {
                catalog.remove(candidate.index);
            }

            trace!(
                "{} slot {} <- {} [{}]",
                record,
                slot,
                candidate.record.fields.name,
                candidate.record.id()
            );
            taken.push(candidate.record.id());
            accepted.push(candidate.record);
        }

        Ok(accepted)
    }
}
