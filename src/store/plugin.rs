use super::RecordStore;
use crate::error::{RandomizerError, RzResult};
use crate::records::{EffectFields, FormId, RecordInfo};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub form_id: FormId,
    #[serde(default)]
    pub editor_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub effects: Vec<EffectFields>,
}

impl IngredientRecord {
    /// Display name, falling back to the editor id for unnamed records.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.editor_id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginFile {
    pub name: String,
    #[serde(default)]
    pub records: Vec<IngredientRecord>,
}

/// Plugins in load order; later plugins override earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadOrder {
    pub plugins: Vec<PluginFile>,
}

/// The output plugin: header flags plus every record that was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchFile {
    pub name: String,
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    #[serde(default)]
    pub records: Vec<IngredientRecord>,
}

impl PatchFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RzResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn record(&self, form_id: FormId) -> Option<&IngredientRecord> {
        self.records.iter().find(|r| r.form_id == form_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle {
    plugin: usize,
    record: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle {
    record: RecordHandle,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle(RecordHandle);

/// JSON-backed record store. Source plugins are read-only; every write
/// lands in a separate patch keyed by form id.
#[derive(Debug, Clone)]
pub struct PluginStore {
    load_order: LoadOrder,
    winners: HashMap<FormId, RecordHandle>,
    patch_name: String,
    patch_flags: BTreeMap<String, bool>,
    patch_records: BTreeMap<FormId, IngredientRecord>,
}

impl PluginStore {
    pub fn new(load_order: LoadOrder, patch_name: impl Into<String>) -> Self {
        let mut winners = HashMap::new();
        for (p, plugin) in load_order.plugins.iter().enumerate() {
            for (r, record) in plugin.records.iter().enumerate() {
                winners.insert(record.form_id, RecordHandle { plugin: p, record: r });
            }
        }

        Self {
            load_order,
            winners,
            patch_name: patch_name.into(),
            patch_flags: BTreeMap::new(),
            patch_records: BTreeMap::new(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P, patch_name: impl Into<String>) -> RzResult<Self> {
        let path = path.as_ref();
        info!("📂 Loading load order from {}", path.display());
        let content = fs::read_to_string(path)?;
        let load_order: LoadOrder = serde_json::from_str(&content)?;
        debug!("   {} plugin(s) in load order", load_order.plugins.len());
        Ok(Self::new(load_order, patch_name))
    }

    pub fn load_order(&self) -> &LoadOrder {
        &self.load_order
    }

    fn get(&self, handle: &RecordHandle) -> RzResult<&IngredientRecord> {
        self.load_order
            .plugins
            .get(handle.plugin)
            .and_then(|p| p.records.get(handle.record))
            .ok_or_else(|| RandomizerError::Store(format!("dangling record handle {:?}", handle)))
    }

    fn patch_entry(&mut self, handle: &RecordHandle) -> RzResult<&mut IngredientRecord> {
        let source = self.get(handle)?;
        let form_id = source.form_id;
        if !self.patch_records.contains_key(&form_id) {
            let winner = self.winners.get(&form_id).copied().unwrap_or(*handle);
            let copy = self.get(&winner)?.clone();
            self.patch_records.insert(form_id, copy);
        }
        self.patch_records
            .get_mut(&form_id)
            .ok_or_else(|| RandomizerError::Store(format!("patch record {} missing", form_id)))
    }

    pub fn patch(&self) -> PatchFile {
        PatchFile {
            name: self.patch_name.clone(),
            flags: self.patch_flags.clone(),
            records: self.patch_records.values().cloned().collect(),
        }
    }

    pub fn save_patch<P: AsRef<Path>>(&self, path: P) -> RzResult<()> {
        let json = serde_json::to_string_pretty(&self.patch())?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl RecordStore for PluginStore {
    type Record = RecordHandle;
    type Occurrence = EffectHandle;
    type Group = GroupHandle;

    fn list_source_records(&self) -> RzResult<Vec<RecordHandle>> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for (p, plugin) in self.load_order.plugins.iter().enumerate() {
            for (r, record) in plugin.records.iter().enumerate() {
                if seen.insert(record.form_id) {
                    records.push(RecordHandle { plugin: p, record: r });
                }
            }
        }

        if records.is_empty() {
            return Err(RandomizerError::NoRecords);
        }
        Ok(records)
    }

    fn resolve_override(&self, record: &RecordHandle) -> RecordHandle {
        self.get(record)
            .ok()
            .and_then(|r| self.winners.get(&r.form_id).copied())
            .unwrap_or(*record)
    }

    fn record_info(&self, record: &RecordHandle) -> RecordInfo {
        match self.get(record) {
            Ok(r) => RecordInfo {
                form_id: r.form_id,
                name: r.display_name().to_string(),
            },
            Err(_) => RecordInfo {
                form_id: FormId::new(0),
                name: String::new(),
            },
        }
    }

    fn effect_group(&self, record: &RecordHandle) -> GroupHandle {
        GroupHandle(*record)
    }

    fn effect_occurrences(&self, record: &RecordHandle) -> Vec<EffectHandle> {
        let count = self.get(record).map(|r| r.effects.len()).unwrap_or(0);
        (0..count)
            .map(|index| EffectHandle {
                record: *record,
                index,
            })
            .collect()
    }

    fn read_effect_fields(&self, occurrence: &EffectHandle) -> RzResult<EffectFields> {
        self.get(&occurrence.record)?
            .effects
            .get(occurrence.index)
            .cloned()
            .ok_or_else(|| {
                RandomizerError::Store(format!("dangling effect handle {:?}", occurrence))
            })
    }

    fn write_effect_slot(
        &mut self,
        record: &RecordHandle,
        slot: usize,
        occurrence: &EffectHandle,
    ) -> RzResult<()> {
        let fields = self.read_effect_fields(occurrence)?;
        let target = self.patch_entry(record)?;
        match slot.cmp(&target.effects.len()) {
            std::cmp::Ordering::Less => target.effects[slot] = fields,
            std::cmp::Ordering::Equal => target.effects.push(fields),
            std::cmp::Ordering::Greater => {
                return Err(RandomizerError::Store(format!(
                    "slot {} is past the end of {} ({} effects)",
                    slot,
                    target.form_id,
                    target.effects.len()
                )))
            }
        }
        Ok(())
    }

    fn truncate_effects(&mut self, record: &RecordHandle, len: usize) -> RzResult<()> {
        let target = self.patch_entry(record)?;
        if target.effects.len() > len {
            debug!(
                "   {} trimmed from {} to {} effect(s)",
                target.form_id,
                target.effects.len(),
                len
            );
            target.effects.truncate(len);
        }
        Ok(())
    }

    fn write_effect_group(&mut self, record: &RecordHandle, group: &GroupHandle) -> RzResult<()> {
        let effects = self.get(&group.0)?.effects.clone();
        self.patch_entry(record)?.effects = effects;
        Ok(())
    }

    fn set_output_flag(&mut self, name: &str, value: bool) {
        self.patch_flags.insert(name.to_string(), value);
    }
}
