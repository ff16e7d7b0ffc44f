//! Population-equivalent county footprints.
//!
//! Pick a reference city, hover a county, and the map highlights the
//! nearest counties whose combined population reaches the city's.

pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod engine;
pub mod format;
pub mod logging;
pub mod map;
pub mod region;
pub mod ui;

pub use engine::{GeometryProjector, SelectionEngine, SelectionResult};
pub use region::{ReferencePoint, Region, RegionCatalog, RegionId};
