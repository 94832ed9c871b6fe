use crate::records::{EffectFields, FormId};
use fastrand::Rng;

/// One ingredient's complete original effect list, moved as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectGroup<G> {
    pub handle: G,
    pub origin: FormId,
    pub effects: Vec<EffectFields>,
}

/// Deals out a uniform permutation of the original effect groups.
///
/// Each group is handed out at most once. A record may draw its own group.
#[derive(Debug, Clone)]
pub struct GroupAssigner<G> {
    permutation: Vec<EffectGroup<G>>,
    cursor: usize,
}

impl<G: Clone> GroupAssigner<G> {
    /// Shuffles `groups` (Fisher–Yates) into the dealing order.
    pub fn new(mut groups: Vec<EffectGroup<G>>, rng: &mut Rng) -> Self {
        rng.shuffle(&mut groups);
        Self {
            permutation: groups,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// Next group in shuffle order, or `None` once every group is dealt.
    pub fn next_group(&mut self) -> Option<EffectGroup<G>> {
        let group = self.permutation.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(group)
    }
}
