use crate::consts::{MAGNITUDE_DECIMALS, MAGNITUDE_SCALE};
use crate::error::RandomizerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 32-bit record identity, written as eight hex digits (`00073F30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormId(u32);

/// Identity of an effect *type*. Two occurrences are the same effect iff
/// their effect ids match; numeric parameters play no part.
pub type EffectId = FormId;

impl FormId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl FromStr for FormId {
    type Err = RandomizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > 8 {
            return Err(RandomizerError::InvalidFormId(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(FormId)
            .map_err(|_| RandomizerError::InvalidFormId(s.to_string()))
    }
}

impl TryFrom<String> for FormId {
    type Error = RandomizerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormId> for String {
    fn from(id: FormId) -> Self {
        id.to_string()
    }
}

/// Fixed-precision magnitude, stored as millionths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Magnitude(i64);

impl Magnitude {
    pub const fn from_scaled(scaled: i64) -> Self {
        Self(scaled)
    }

    pub fn from_f64(value: f64) -> Self {
        Self((value * MAGNITUDE_SCALE as f64).round() as i64)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MAGNITUDE_SCALE as f64
    }
}

impl From<f64> for Magnitude {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Magnitude> for f64 {
    fn from(m: Magnitude) -> Self {
        m.to_f64()
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = MAGNITUDE_SCALE as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }
        let digits = format!("{:0width$}", frac, width = MAGNITUDE_DECIMALS as usize);
        write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

/// The fields read from one effect occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectFields {
    pub effect_id: EffectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub magnitude: Magnitude,
    #[serde(default)]
    pub area: u32,
    #[serde(default)]
    pub duration: u32,
}

impl fmt::Display for EffectFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Mag: {}, Area: {}, Dur: {})",
            self.name, self.magnitude, self.area, self.duration
        )
    }
}

/// Identity and display name of an ingredient record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInfo {
    pub form_id: FormId,
    pub name: String,
}
