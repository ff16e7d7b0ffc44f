mod catalog;

pub use catalog::{PopulationRecord, RegionCatalog};

use serde::Deserialize;
use std::fmt;

/// Width of a canonical county code (2-digit state + 3-digit county)
pub const REGION_ID_WIDTH: usize = 5;

/// Area code as it appears in source datasets: either a bare number
/// (`1001`) or a string of any width (`"01001"`, `"1001"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AreaCode {
    Number(u64),
    Text(String),
}

impl From<u64> for AreaCode {
    fn from(n: u64) -> Self {
        AreaCode::Number(n)
    }
}

impl From<&str> for AreaCode {
    fn from(s: &str) -> Self {
        AreaCode::Text(s.to_string())
    }
}

impl From<String> for AreaCode {
    fn from(s: String) -> Self {
        AreaCode::Text(s)
    }
}

/// Canonical 5-character region identifier.
///
/// Every code that enters the system, from population records, geometry
/// features or user lookups, goes through [`RegionId::normalize`] so that
/// `1001`, `"1001"` and `"01001"` all name the same county.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId([u8; REGION_ID_WIDTH]);

impl RegionId {
    /// Decimal string form left-padded with '0' to exactly 5 characters.
    /// Returns `None` for codes that are longer than 5 characters, empty,
    /// or not ASCII.
    pub fn normalize(code: impl Into<AreaCode>) -> Option<Self> {
        match code.into() {
            AreaCode::Number(n) => Self::from_text(&n.to_string()),
            AreaCode::Text(s) => Self::from_text(&s),
        }
    }

    fn from_text(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > REGION_ID_WIDTH || !s.is_ascii() {
            return None;
        }

        let mut id = [b'0'; REGION_ID_WIDTH];
        id[REGION_ID_WIDTH - bytes.len()..].copy_from_slice(bytes);
        Some(RegionId(id))
    }

    pub fn as_str(&self) -> &str {
        // Only ever built from ASCII input
        std::str::from_utf8(&self.0).unwrap_or("?????")
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionId({})", self.as_str())
    }
}

/// A county with its population and display names
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub population: u64,
    pub name: String,
    /// Parent area (state) display name
    pub parent_name: String,
}

/// A reference city whose population is the selection target
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferencePoint {
    pub name: String,
    pub country: String,
    pub population: u64,
}

impl ReferencePoint {
    /// Label used in the city selector, e.g. `Chicago, USA (2,746,388)`
    pub fn label(&self) -> String {
        format!(
            "{}, {} ({})",
            self.name,
            self.country,
            crate::format::thousands(self.population)
        )
    }
}
