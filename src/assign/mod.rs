pub mod groups;
pub mod slots;

pub use self::groups::{EffectGroup, GroupAssigner};
pub use self::slots::SlotAssigner;
