pub mod plugin;

pub use self::plugin::{PatchFile, PluginStore};

use crate::error::RzResult;
use crate::records::{EffectFields, RecordInfo};

/// Host-side record access needed by a randomization run.
///
/// Handles are opaque to the run: it only passes them back to the store.
pub trait RecordStore {
    type Record: Clone;
    type Occurrence: Clone;
    type Group: Clone;

    /// Every ingredient record to randomize. Fails with `NoRecords` when empty.
    fn list_source_records(&self) -> RzResult<Vec<Self::Record>>;

    /// The winning override of `record`.
    fn resolve_override(&self, record: &Self::Record) -> Self::Record;

    fn record_info(&self, record: &Self::Record) -> RecordInfo;

    /// The record's whole effect list as one unit.
    fn effect_group(&self, record: &Self::Record) -> Self::Group;

    fn effect_occurrences(&self, record: &Self::Record) -> Vec<Self::Occurrence>;

    fn read_effect_fields(&self, occurrence: &Self::Occurrence) -> RzResult<EffectFields>;

    /// Overwrites one effect slot of `record` with a copy of `occurrence`.
    fn write_effect_slot(
        &mut self,
        record: &Self::Record,
        slot: usize,
        occurrence: &Self::Occurrence,
    ) -> RzResult<()>;

    /// Drops every effect of `record` past the first `len`.
    fn truncate_effects(&mut self, record: &Self::Record, len: usize) -> RzResult<()>;

    /// Overwrites the whole effect list of `record` with a copy of `group`.
    fn write_effect_group(&mut self, record: &Self::Record, group: &Self::Group) -> RzResult<()>;

    /// Sets a flag on the output file header.
    fn set_output_flag(&mut self, name: &str, value: bool);
}
