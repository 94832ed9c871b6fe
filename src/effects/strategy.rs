use super::{Candidate, EffectCatalog};
use crate::consts::PARALYSIS_EFFECT_ID;
use crate::error::{RandomizerError, RzResult};
use crate::records::EffectId;
use fastrand::Rng;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Randomization type as configured by the user.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum RandomizationMode {
    /// Swap whole effect groups between ingredients.
    #[strum(to_string = "groups")]
    Groups,
    /// Frequency-weighted, consuming each occurrence once.
    #[strum(to_string = "dist", serialize = "distribution")]
    Distribution,
    /// Every distinct effect reaches some first slot before the pool repeats.
    #[strum(to_string = "inclusion")]
    Inclusion,
    /// Independent picks with no inclusion guarantee.
    #[strum(
        to_string = "random",
        serialize = "no_inclusion",
        serialize = "noinclusion"
    )]
    Random,
}

impl RandomizationMode {
    /// Parses a configured mode string; unknown strings are a configuration error.
    pub fn parse(raw: &str) -> RzResult<Self> {
        Self::from_str(raw.trim()).map_err(|_| RandomizerError::UnknownMode(raw.to_string()))
    }

    /// Sampling strategy for slot-filling modes; `None` for group mode.
    pub fn sampling_strategy(self, ignore_dist: bool) -> Option<SamplingStrategy> {
        match self {
            Self::Groups => None,
            Self::Distribution => Some(SamplingStrategy::Distribution),
            Self::Inclusion => Some(SamplingStrategy::Inclusion {
                uniform: ignore_dist,
            }),
            Self::Random => Some(SamplingStrategy::Random {
                uniform: ignore_dist,
            }),
        }
    }
}

/// How one slot candidate is drawn from the catalog.
///
/// `uniform` picks evenly among distinct identities; otherwise picks are
/// proportional to how often each identity occurs in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStrategy {
    Distribution,
    Inclusion { uniform: bool },
    Random { uniform: bool },
}

impl SamplingStrategy {
    /// Whether an accepted candidate is removed from the catalog.
    pub fn consumes(self) -> bool {
        matches!(self, Self::Distribution)
    }

    /// Draws a candidate for `slot`, never returning an identity in `exclude`.
    ///
    /// The caller passes every identity already on the record; slot 0 also
    /// gets the paralysis id added here.
    pub fn pick<H: Clone>(
        self,
        catalog: &mut EffectCatalog<H>,
        rng: &mut Rng,
        slot: usize,
        exclude: &[EffectId],
    ) -> Option<Candidate<H>> {
        let mut excluded = exclude.to_vec();
        if slot == 0 && !excluded.contains(&PARALYSIS_EFFECT_ID) {
            excluded.push(PARALYSIS_EFFECT_ID);
        }

        match (self, slot) {
            (Self::Distribution, 0) => catalog.most_frequent(&excluded),
            (Self::Distribution, _) => catalog.weighted_random_from_pool(rng, &excluded),
            (Self::Inclusion { uniform }, 0) => {
                // Nothing is on the record yet, so paralysis is the only exclusion.
                catalog
                    .take_next_unique(Some(PARALYSIS_EFFECT_ID))
                    .or_else(|| Self::open_pick(catalog, rng, uniform, &excluded))
            }
            (Self::Inclusion { uniform }, _) | (Self::Random { uniform }, _) => {
                Self::open_pick(catalog, rng, uniform, &excluded)
            }
        }
    }

    fn open_pick<H: Clone>(
        catalog: &mut EffectCatalog<H>,
        rng: &mut Rng,
        uniform: bool,
        exclude: &[EffectId],
    ) -> Option<Candidate<H>> {
        if uniform {
            catalog.uniform_random_from_distinct(rng, exclude)
        } else {
            catalog.weighted_random_from_pool(rng, exclude)
        }
    }
}
