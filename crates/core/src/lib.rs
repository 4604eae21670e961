//! `sitegrid-core` -- hazard classification and export encoding.
//!
//! Turns per-hazard sensor-grid sources into three report artifacts:
//!
//! - [`source`] -- dimension inference and parsing of delimited sources.
//! - [`band`] -- the four-level severity classifier.
//! - [`hazard`] -- threshold profiles and the ordered hazard registry.
//! - [`grid`] -- immutable reading and classified grids.
//! - [`encoding`] -- RAF, DAT and RPT serializers.
//! - [`export`] -- artifact writer and the sequential orchestrator.
//!
//! Everything runs synchronously on the calling thread.

pub mod band;
pub mod encoding;
pub mod error;
pub mod export;
pub mod grid;
pub mod hazard;
pub mod source;
pub mod types;

pub use band::{classify, Band};
pub use error::HazardError;
pub use hazard::{HazardProfile, HazardRegistry};
