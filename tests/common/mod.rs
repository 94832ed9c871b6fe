#![allow(dead_code)]

use alchemy_randomizer::consts::PARALYSIS_EFFECT_ID;
use alchemy_randomizer::effects::{EffectCatalog, EffectRecord};
use alchemy_randomizer::records::{EffectFields, EffectId, FormId, Magnitude};
use alchemy_randomizer::store::plugin::{IngredientRecord, LoadOrder, PluginFile};
use alchemy_randomizer::store::PluginStore;

pub const PARA: u32 = PARALYSIS_EFFECT_ID.raw();

pub fn eid(raw: u32) -> EffectId {
    FormId::new(raw)
}

pub fn effect(raw: u32) -> EffectFields {
    EffectFields {
        effect_id: FormId::new(raw),
        name: if raw == PARA {
            "Paralysis".to_string()
        } else {
            format!("Effect {:X}", raw)
        },
        magnitude: Magnitude::from_f64(1.0 + (raw % 7) as f64 * 0.25),
        area: raw % 3,
        duration: (raw % 5) * 10,
    }
}

/// Catalog over bare effect ids; the handle is the original position.
pub fn catalog_of(ids: &[u32]) -> EffectCatalog<usize> {
    let items = ids
        .iter()
        .enumerate()
        .map(|(i, &raw)| EffectRecord::new(i, effect(raw)))
        .collect();
    EffectCatalog::new(items)
}

pub struct IngredientBuilder {
    record: IngredientRecord,
}

impl IngredientBuilder {
    pub fn new(form_id: u32, name: &str) -> Self {
        Self {
            record: IngredientRecord {
                form_id: FormId::new(form_id),
                editor_id: name.replace(' ', ""),
                name: name.to_string(),
                effects: Vec::new(),
            },
        }
    }

    pub fn effects(mut self, ids: &[u32]) -> Self {
        self.record.effects = ids.iter().map(|&raw| effect(raw)).collect();
        self
    }

    pub fn effect_fields(mut self, fields: EffectFields) -> Self {
        self.record.effects.push(fields);
        self
    }

    pub fn build(self) -> IngredientRecord {
        self.record
    }
}

pub fn plugin(name: &str, records: Vec<IngredientRecord>) -> PluginFile {
    PluginFile {
        name: name.to_string(),
        records,
    }
}

pub fn store_of(plugins: Vec<PluginFile>) -> PluginStore {
    PluginStore::new(LoadOrder { plugins }, "TestPatch.esp")
}

/// `count` ingredients with four pairwise distinct effects each, drawn from
/// a pool of `distinct` effect ids (paralysis included as id 0 of the pool).
pub fn ingredient_set(count: u32, distinct: u32) -> Vec<IngredientRecord> {
    let pool: Vec<u32> = (0..distinct)
        .map(|i| if i == 0 { PARA } else { 0x0003_EB00 + i })
        .collect();
    (0..count)
        .map(|i| {
            let ids: Vec<u32> = (0..4u32)
                .map(|k| pool[((i * 4 + k) % distinct) as usize])
                .collect();
            IngredientBuilder::new(0x0010_0000 + i, &format!("Ingredient {:02}", i))
                .effects(&ids)
                .build()
        })
        .collect()
}

pub fn ids_of(effects: &[EffectFields]) -> Vec<u32> {
    effects.iter().map(|e| e.effect_id.raw()).collect()
}

pub fn pairwise_distinct(ids: &[u32]) -> bool {
    ids.iter()
        .enumerate()
        .all(|(i, a)| ids[i + 1..].iter().all(|b| a != b))
}
