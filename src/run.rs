use crate::assign::{EffectGroup, GroupAssigner, SlotAssigner};
use crate::consts::{PARALYSIS_EFFECT_ID, SLOT_COUNT};
use crate::effects::{EffectCatalog, EffectRecord, RandomizationMode};
use crate::error::{RandomizerError, RzResult};
use crate::outcome::{EffectUsage, RecordChange, RunReport};
use crate::records::{EffectFields, RecordInfo};
use crate::store::RecordStore;
use fastrand::Rng;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RandomizationMode,
    /// Pick uniformly among distinct effects instead of by frequency.
    pub ignore_dist: bool,
    pub seed: Option<u64>,
}

impl RunOptions {
    pub fn new(mode: RandomizationMode) -> Self {
        Self {
            mode,
            ignore_dist: false,
            seed: None,
        }
    }

    fn rng(&self) -> Rng {
        match self.seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        }
    }
}

/// An ingredient about to be randomized, with the effects it had before.
#[derive(Debug, Clone)]
pub struct TargetRecord<R> {
    pub handle: R,
    pub info: RecordInfo,
    pub original: Vec<EffectFields>,
}

/// Effects chosen for one target, not yet written to the store.
#[derive(Debug, Clone)]
pub enum AssignedEffects<O, G> {
    Slots(Vec<EffectRecord<O>>),
    Group(EffectGroup<G>),
}

impl<O, G> AssignedEffects<O, G> {
    pub fn fields(&self) -> Vec<EffectFields> {
        match self {
            Self::Slots(slots) => slots.iter().map(|e| e.fields.clone()).collect(),
            Self::Group(group) => group.effects.clone(),
        }
    }
}

#[derive(Debug, Clone)]
enum Engine<O, G> {
    Slots {
        catalog: EffectCatalog<O>,
        assigner: SlotAssigner,
    },
    Groups(GroupAssigner<G>),
}

/// Run context built once from the store, then consumed by [`assign`](Self::assign).
pub struct RandomizationRun<S: RecordStore> {
    mode: RandomizationMode,
    targets: Vec<TargetRecord<S::Record>>,
    engine: Engine<S::Occurrence, S::Group>,
    pool_initial: Option<usize>,
    rng: Rng,
}

impl<S: RecordStore> RandomizationRun<S> {
    /// Harvests every source ingredient (winning overrides), shuffles the
    /// harvested effects or effect groups, and shuffles the target order.
    pub fn build(store: &S, options: &RunOptions) -> RzResult<Self> {
        let mut rng = options.rng();
        let mut targets = harvest_targets(store)?;
        info!(
            "🧪 Building {} run over {} ingredient(s)",
            options.mode,
            targets.len()
        );

        let (engine, pool_initial) = match options.mode.sampling_strategy(options.ignore_dist) {
            None => {
                let groups = targets
                    .iter()
                    .map(|t| EffectGroup {
                        handle: store.effect_group(&t.handle),
                        origin: t.info.form_id,
                        effects: t.original.clone(),
                    })
                    .collect();
                let assigner = GroupAssigner::new(groups, &mut rng);
                debug!("   Dealing {} effect group(s)", assigner.len());
                (Engine::Groups(assigner), None)
            }
            Some(strategy) => {
                let mut items = harvest_effects(store, &targets);
                rng.shuffle(&mut items);

                let catalog = EffectCatalog::new(items);
                check_slot_preconditions(&catalog)?;
                debug!(
                    "   Catalog: {} occurrence(s), {} distinct effect(s)",
                    catalog.len(),
                    catalog.distinct_count()
                );
                let total = catalog.len();
                (
                    Engine::Slots {
                        catalog,
                        assigner: SlotAssigner::new(strategy),
                    },
                    Some(total),
                )
            }
        };

        rng.shuffle(&mut targets);

        Ok(Self {
            mode: options.mode,
            targets,
            engine,
            pool_initial,
            rng,
        })
    }

    pub fn mode(&self) -> RandomizationMode {
        self.mode
    }

    /// Targets in the order they will be processed.
    pub fn targets(&self) -> &[TargetRecord<S::Record>] {
        &self.targets
    }

    /// The effect catalog, for slot-filling modes.
    pub fn catalog(&self) -> Option<&EffectCatalog<S::Occurrence>> {
        match &self.engine {
            Engine::Slots { catalog, .. } => Some(catalog),
            Engine::Groups(_) => None,
        }
    }

    /// Plans every target in order. Nothing is written to the store; any
    /// failure aborts the whole run.
    pub fn assign(self) -> RzResult<RunPlan<S>> {
        let Self {
            mode,
            targets,
            mut engine,
            pool_initial,
            mut rng,
        } = self;

        let mut entries = Vec::with_capacity(targets.len());
        for target in targets {
            let assigned = match &mut engine {
                Engine::Slots { catalog, assigner } => AssignedEffects::Slots(assigner.assign(
                    target.info.form_id,
                    catalog,
                    &mut rng,
                )?),
                Engine::Groups(groups) => {
                    let group = groups.next_group().ok_or_else(|| {
                        RandomizerError::Store(format!(
                            "no effect group left for {}",
                            target.info.form_id
                        ))
                    })?;
                    AssignedEffects::Group(group)
                }
            };
            debug!("   {} [{}] planned", target.info.name, target.info.form_id);
            entries.push((target, assigned));
        }

        let pool_remaining = match &engine {
            Engine::Slots { catalog, .. } => Some(catalog.len()),
            Engine::Groups(_) => None,
        };

        Ok(RunPlan {
            mode,
            entries,
            pool_initial,
            pool_remaining,
        })
    }
}

/// Winning overrides of every source ingredient, in store order.
fn harvest_targets<S: RecordStore>(store: &S) -> RzResult<Vec<TargetRecord<S::Record>>> {
    let sources = store.list_source_records()?;
    let mut targets = Vec::with_capacity(sources.len());
    for source in &sources {
        let handle = store.resolve_override(source);
        let info = store.record_info(&handle);
        let original = store
            .effect_occurrences(&handle)
            .iter()
            .map(|occ| store.read_effect_fields(occ))
            .collect::<RzResult<Vec<_>>>()?;
        if original.len() != SLOT_COUNT {
            warn!(
                "⚠️  {} [{}] has {} effect(s), expected {}",
                info.name,
                info.form_id,
                original.len(),
                SLOT_COUNT
            );
        }
        targets.push(TargetRecord {
            handle,
            info,
            original,
        });
    }
    Ok(targets)
}

fn harvest_effects<S: RecordStore>(
    store: &S,
    targets: &[TargetRecord<S::Record>],
) -> Vec<EffectRecord<S::Occurrence>> {
    let mut items = Vec::new();
    for target in targets {
        let occurrences = store.effect_occurrences(&target.handle);
        for (occ, fields) in occurrences.into_iter().zip(target.original.iter()) {
            items.push(EffectRecord::new(occ, fields.clone()));
        }
    }
    items
}

/// Catalog of every effect occurrence in the source set, unshuffled.
pub fn harvest_catalog<S: RecordStore>(store: &S) -> RzResult<EffectCatalog<S::Occurrence>> {
    let targets = harvest_targets(store)?;
    Ok(EffectCatalog::new(harvest_effects(store, &targets)))
}

fn check_slot_preconditions<O: Clone>(catalog: &EffectCatalog<O>) -> RzResult<()> {
    if catalog.distinct_count() < SLOT_COUNT {
        return Err(RandomizerError::Config(format!(
            "only {} distinct effect(s) in the source set, at least {} are needed",
            catalog.distinct_count(),
            SLOT_COUNT
        )));
    }
    if catalog.distinct_count_excluding(&[PARALYSIS_EFFECT_ID]) == 0 {
        return Err(RandomizerError::Config(
            "no effect other than paralysis is available for the first slot".to_string(),
        ));
    }
    Ok(())
}

/// A fully planned run, ready to be written to the store.
pub struct RunPlan<S: RecordStore> {
    mode: RandomizationMode,
    entries: Vec<(
        TargetRecord<S::Record>,
        AssignedEffects<S::Occurrence, S::Group>,
    )>,
    pool_initial: Option<usize>,
    pool_remaining: Option<usize>,
}

impl<S: RecordStore> RunPlan<S> {
    pub fn entries(
        &self,
    ) -> &[(
        TargetRecord<S::Record>,
        AssignedEffects<S::Occurrence, S::Group>,
    )] {
        &self.entries
    }

    pub fn pool_remaining(&self) -> Option<usize> {
        self.pool_remaining
    }

    /// Writes every planned assignment and returns the report data.
    pub fn apply(self, store: &mut S) -> RzResult<RunReport> {
        let mut changes = Vec::with_capacity(self.entries.len());
        let mut usage = EffectUsage::default();

        for (target, assigned) in self.entries {
            match &assigned {
                AssignedEffects::Slots(slots) => {
                    for (slot, effect) in slots.iter().enumerate() {
                        store.write_effect_slot(&target.handle, slot, &effect.source)?;
                    }
                    // Leftover effects past the last slot would shadow the new ones.
                    store.truncate_effects(&target.handle, slots.len())?;
                }
                AssignedEffects::Group(group) => {
                    store.write_effect_group(&target.handle, &group.handle)?;
                }
            }

            let new_effects = assigned.fields();
            for effect in &new_effects {
                usage.record(effect, &target.info.name);
            }
            changes.push(RecordChange {
                form_id: target.info.form_id,
                name: target.info.name,
                original: target.original,
                assigned: new_effects,
            });
        }

        info!("✅ Randomized {} ingredient(s)", changes.len());

        Ok(RunReport {
            mode: self.mode,
            changes,
            usage,
            pool_initial: self.pool_initial,
            pool_remaining: self.pool_remaining,
        })
    }
}

/// Build, assign and apply in one go.
pub fn randomize<S: RecordStore>(store: &mut S, options: &RunOptions) -> RzResult<RunReport> {
    let run = RandomizationRun::build(store, options)?;
    let plan = run.assign()?;
    plan.apply(store)
}
