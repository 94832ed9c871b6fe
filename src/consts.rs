use crate::records::EffectId;

/// Every ingredient carries exactly this many effect slots.
pub const SLOT_COUNT: usize = 4;

/// Paralysis (MGEF 00073F30). Balance rule: it may never sit in the first
/// effect slot of an ingredient, since the first slot names the potion.
pub const PARALYSIS_EFFECT_ID: EffectId = EffectId::new(0x0007_3F30);

/// Number of decimal places a magnitude keeps.
pub const MAGNITUDE_DECIMALS: u32 = 6;

/// Integer scale matching `MAGNITUDE_DECIMALS`.
pub const MAGNITUDE_SCALE: i64 = 1_000_000;

/// Name of the file header flag set on the patch during finalize.
pub const ESL_FLAG: &str = "ESL";
