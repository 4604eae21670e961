//! Hazard threshold profiles and the registry that orders them.
//!
//! A [`HazardProfile`] is an immutable set of band boundaries for one
//! monitored condition. The [`HazardRegistry`] maps hazard codes to
//! profiles and fixes the order in which hazards are exported, so new
//! hazards can be added from a profile file without touching the
//! classifier.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HazardError;
use crate::types::Reading;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CODE_SO2: &str = "SO2";
pub const CODE_NO2: &str = "NO2";
pub const CODE_CO: &str = "CO";
pub const CODE_OBSTRUCT: &str = "Obstruct";

/// Default export order.
pub const DEFAULT_ORDER: &[&str] = &[CODE_SO2, CODE_NO2, CODE_CO, CODE_OBSTRUCT];

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Band boundaries for a single hazard.
///
/// `green_limit` is carried for fidelity with the field-deployed threshold
/// tables but is never used as a comparison bound; see
/// [`crate::band::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardProfile {
    /// Short identifier used in file names (e.g. `SO2`).
    pub code: String,
    /// Human-readable name (e.g. `Sulphur Dioxide`).
    pub name: String,
    pub green_limit: Reading,
    pub yellow_limit: Reading,
    pub red_limit: Reading,
}

impl HazardProfile {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        green_limit: Reading,
        yellow_limit: Reading,
        red_limit: Reading,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            green_limit,
            yellow_limit,
            red_limit,
        }
    }

    /// Check that the code is non-empty and the limits are ascending
    /// positive integers.
    pub fn validate(&self) -> Result<(), HazardError> {
        if self.code.trim().is_empty() {
            return Err(HazardError::InvalidProfile(
                "hazard code must not be empty".to_string(),
            ));
        }
        if self.code.contains(['/', '\\']) {
            return Err(HazardError::InvalidProfile(format!(
                "hazard code {:?} must not contain path separators",
                self.code
            )));
        }
        if self.green_limit == 0 {
            return Err(HazardError::InvalidProfile(format!(
                "{}: green_limit must be positive",
                self.code
            )));
        }
        if !(self.green_limit < self.yellow_limit && self.yellow_limit < self.red_limit) {
            return Err(HazardError::InvalidProfile(format!(
                "{}: limits must be ascending, got green={} yellow={} red={}",
                self.code, self.green_limit, self.yellow_limit, self.red_limit
            )));
        }
        Ok(())
    }
}

/// The four built-in profiles, in default export order.
pub fn default_profiles() -> Vec<HazardProfile> {
    vec![
        HazardProfile::new(CODE_SO2, "Sulphur Dioxide", 1, 10, 30),
        HazardProfile::new(CODE_NO2, "Nitrogen Dioxide", 1, 10, 30),
        HazardProfile::new(CODE_CO, "Carbon Monoxide", 1, 8, 25),
        HazardProfile::new(CODE_OBSTRUCT, "Obstructions", 1, 2, 3),
    ]
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered, validated collection of hazard profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardRegistry {
    profiles: Vec<HazardProfile>,
}

impl Default for HazardRegistry {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
        }
    }
}

impl HazardRegistry {
    /// Build a registry, validating every profile and rejecting duplicate
    /// codes. Iteration order is the order given.
    pub fn from_profiles(profiles: Vec<HazardProfile>) -> Result<Self, HazardError> {
        if profiles.is_empty() {
            return Err(HazardError::InvalidProfile(
                "at least one hazard profile is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for profile in &profiles {
            profile.validate()?;
            if !seen.insert(profile.code.as_str()) {
                return Err(HazardError::InvalidProfile(format!(
                    "duplicate hazard code {:?}",
                    profile.code
                )));
            }
        }

        Ok(Self { profiles })
    }

    /// Parse a JSON array of profiles.
    pub fn from_json(json: &str) -> Result<Self, HazardError> {
        let profiles: Vec<HazardProfile> = serde_json::from_str(json)
            .map_err(|e| HazardError::InvalidProfile(format!("malformed profile JSON: {e}")))?;
        Self::from_profiles(profiles)
    }

    /// Load a JSON profile file.
    pub fn load(path: &Path) -> Result<Self, HazardError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| HazardError::ProfileFileUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::from_json(&json)
    }

    /// Look up a profile by its code.
    pub fn get(&self, code: &str) -> Option<&HazardProfile> {
        self.profiles.iter().find(|p| p.code == code)
    }

    /// Profiles in export order.
    pub fn iter(&self) -> impl Iterator<Item = &HazardProfile> {
        self.profiles.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
