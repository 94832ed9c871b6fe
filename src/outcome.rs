use crate::effects::RandomizationMode;
use crate::error::RzResult;
use crate::records::{EffectFields, EffectId, FormId};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

/// Original and new effects of one processed ingredient, in slot order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordChange {
    pub form_id: FormId,
    pub name: String,
    pub original: Vec<EffectFields>,
    pub assigned: Vec<EffectFields>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageEntry {
    pub name: String,
    pub records: BTreeSet<String>,
}

/// Reverse index: effect identity -> names of the ingredients that received it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectUsage {
    entries: BTreeMap<EffectId, UsageEntry>,
}

impl EffectUsage {
    pub fn record(&mut self, effect: &EffectFields, record_name: &str) {
        let entry = self.entries.entry(effect.effect_id).or_default();
        if entry.name.is_empty() {
            entry.name = effect.name.clone();
        }
        entry.records.insert(record_name.to_string());
    }

    pub fn get(&self, id: EffectId) -> Option<&UsageEntry> {
        self.entries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EffectId, &UsageEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by effect name, then id.
    pub fn sorted_by_name(&self) -> Vec<(&EffectId, &UsageEntry)> {
        let mut rows: Vec<_> = self.entries.iter().collect();
        rows.sort_by(|a, b| a.1.name.cmp(&b.1.name).then(a.0.cmp(b.0)));
        rows
    }
}

/// Everything the run exposes to logging and summary reporting.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: RandomizationMode,
    pub changes: Vec<RecordChange>,
    pub usage: EffectUsage,
    /// Catalog size at build time (slot modes only).
    pub pool_initial: Option<usize>,
    /// Catalog size after the last assignment (slot modes only).
    pub pool_remaining: Option<usize>,
}

impl RunReport {
    pub fn change(&self, form_id: FormId) -> Option<&RecordChange> {
        self.changes.iter().find(|c| c.form_id == form_id)
    }

    /// Plain-text change log, one block per ingredient.
    pub fn write_log<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "Randomization type: {}", self.mode)?;
        writeln!(out, "Ingredients processed: {}", self.changes.len())?;

        for change in &self.changes {
            writeln!(out)?;
            writeln!(out, "{} [{}]", change.name, change.form_id)?;
            writeln!(out, "  Original effects:")?;
            for effect in &change.original {
                writeln!(out, "    - {}", effect)?;
            }
            writeln!(out, "  New effects:")?;
            for effect in &change.assigned {
                writeln!(out, "    - {}", effect)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Effect summary:")?;
        for (_, entry) in self.usage.sorted_by_name() {
            let names: Vec<&str> = entry.records.iter().map(String::as_str).collect();
            writeln!(out, "  {}: {}", entry.name, names.join(", "))?;
        }
        Ok(())
    }

    /// Reverse index as CSV: `effect_id,effect,ingredient_count,ingredients`.
    pub fn write_usage_csv<W: Write>(&self, out: W) -> RzResult<()> {
        let mut wtr = csv::Writer::from_writer(out);
        wtr.write_record(["effect_id", "effect", "ingredient_count", "ingredients"])?;
        for (id, entry) in self.usage.sorted_by_name() {
            let names: Vec<&str> = entry.records.iter().map(String::as_str).collect();
            wtr.write_record([
                id.to_string(),
                entry.name.clone(),
                entry.records.len().to_string(),
                names.join("; "),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
