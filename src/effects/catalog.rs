use super::EffectRecord;
use crate::records::EffectId;
use fastrand::Rng;
use std::collections::{HashMap, VecDeque};

/// A pick made from the catalog: the occurrence plus its current position.
///
/// `index` is only valid until the next mutating call on the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<H> {
    pub index: usize,
    pub record: EffectRecord<H>,
}

/// Pool of effect occurrences with a per-identity occurrence count.
///
/// Invariant: the counts always sum to `items.len()`, and `identities` holds
/// exactly the ids with a non-zero count, in first-seen order.
#[derive(Debug, Clone)]
pub struct EffectCatalog<H> {
    items: Vec<EffectRecord<H>>,
    counts: HashMap<EffectId, usize>,
    identities: Vec<EffectId>,
    pending_unique: VecDeque<EffectId>,
}

impl<H: Clone> EffectCatalog<H> {
    /// Builds the catalog from an already shuffled sequence of occurrences.
    pub fn new(items: Vec<EffectRecord<H>>) -> Self {
        let mut counts: HashMap<EffectId, usize> = HashMap::new();
        let mut identities = Vec::new();

        for item in &items {
            let count = counts.entry(item.id()).or_insert(0);
            if *count == 0 {
                identities.push(item.id());
            }
            *count += 1;
        }

        let pending_unique = identities.iter().copied().collect();

        Self {
            items,
            counts,
            identities,
            pending_unique,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[EffectRecord<H>] {
        &self.items
    }

    /// Live occurrences of `id`.
    pub fn count(&self, id: EffectId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Sum of all per-identity counts. Equal to `len()`.
    pub fn total_count(&self) -> usize {
        self.counts.values().sum()
    }

    /// Distinct identities with at least one live occurrence, first-seen order.
    pub fn identities(&self) -> &[EffectId] {
        &self.identities
    }

    pub fn distinct_count(&self) -> usize {
        self.identities.len()
    }

    /// Identities not yet dispensed by [`take_next_unique`](Self::take_next_unique).
    pub fn pending_unique(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.pending_unique.iter().copied()
    }

    /// Distinct identities left once `exclude` is taken out.
    pub fn distinct_count_excluding(&self, exclude: &[EffectId]) -> usize {
        self.identities
            .iter()
            .filter(|id| !exclude.contains(id))
            .count()
    }

    /// First occurrence of `id` in the current item order.
    pub fn find_first(&self, id: EffectId) -> Option<(usize, &EffectRecord<H>)> {
        self.items.iter().enumerate().find(|(_, item)| item.id() == id)
    }

    fn candidate_for(&self, id: EffectId) -> Option<Candidate<H>> {
        self.find_first(id).map(|(index, record)| Candidate {
            index,
            record: record.clone(),
        })
    }

    /// Deletes the occurrence at `index` and decrements its identity's count.
    /// The unique queue is left untouched.
    pub fn remove(&mut self, index: usize) -> Option<EffectRecord<H>> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        let id = removed.id();

        if let Some(count) = self.counts.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&id);
                self.identities.retain(|known| *known != id);
            }
        }

        Some(removed)
    }

    /// First occurrence of the identity with the highest count.
    ///
    /// Ties go to the identity seen first in insertion order. Identities in
    /// `exclude` are not considered at all.
    pub fn most_frequent(&self, exclude: &[EffectId]) -> Option<Candidate<H>> {
        let mut best: Option<(EffectId, usize)> = None;
        for &id in &self.identities {
            if exclude.contains(&id) {
                continue;
            }
            let count = self.count(id);
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((id, count)),
            }
        }
        best.and_then(|(id, _)| self.candidate_for(id))
    }

    /// Pops the next never-dispensed identity and returns its first occurrence.
    ///
    /// If the front of the queue is `exclude`, the second entry is taken
    /// instead and the excluded id keeps its place. `None` means the queue is
    /// exhausted (or holds only the excluded id); callers fall back to another
    /// pick. Queued ids with no live occurrence left are discarded on the way.
    pub fn take_next_unique(&mut self, exclude: Option<EffectId>) -> Option<Candidate<H>> {
        loop {
            let position = match self.pending_unique.front() {
                None => return None,
                Some(front) if Some(*front) == exclude => {
                    if self.pending_unique.len() < 2 {
                        return None;
                    }
                    1
                }
                Some(_) => 0,
            };

            let id = self.pending_unique.remove(position)?;
            if let Some(candidate) = self.candidate_for(id) {
                return Some(candidate);
            }
        }
    }

    /// Uniform over distinct identities (not occurrences), then any occurrence
    /// of the chosen identity. Reshuffles the item order as a side effect.
    pub fn uniform_random_from_distinct(
        &mut self,
        rng: &mut Rng,
        exclude: &[EffectId],
    ) -> Option<Candidate<H>> {
        let eligible: Vec<EffectId> = self
            .identities
            .iter()
            .copied()
            .filter(|id| !exclude.contains(id))
            .collect();
        if eligible.is_empty() {
            return None;
        }

        let id = eligible[rng.usize(..eligible.len())];
        rng.shuffle(&mut self.items);
        self.candidate_for(id)
    }

    /// Uniform over remaining occurrences, i.e. weighted by current frequency.
    /// All occurrences of identities in `exclude` are filtered out first.
    pub fn weighted_random_from_pool(
        &self,
        rng: &mut Rng,
        exclude: &[EffectId],
    ) -> Option<Candidate<H>> {
        let excluded: usize = exclude.iter().map(|id| self.count(*id)).sum();
        let eligible = self.items.len().saturating_sub(excluded);
        if eligible == 0 {
            return None;
        }

        let target = rng.usize(..eligible);
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !exclude.contains(&item.id()))
            .nth(target)
            .map(|(index, record)| Candidate {
                index,
                record: record.clone(),
            })
    }
}
