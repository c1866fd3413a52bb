// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable query results
//!
//! Each record serializes to the JSON payload returned by the building info
//! service (camelCase keys) and displays as a one-line text summary.

use crate::{round2, Metric, Room};
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Rounded total of one metric, serialized as `{"totalArea": 105.0}` etc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TotalReport {
    /// Aggregated metric
    pub metric: Metric,
    /// Rounded value
    pub value: f64,
}

impl Serialize for TotalReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.metric.report_key(), &self.value)?;
        map.end()
    }
}

impl fmt::Display for TotalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.metric.label(), self.value)
    }
}

/// Occupancy capacity of a scope
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    /// Rounded total area
    pub total_area: f64,
    /// People the area can hold
    pub max_people: i64,
}

impl fmt::Display for OccupancyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Maximum people: {} (total area: {})", self.max_people, self.total_area)
    }
}

/// Restroom requirement of a scope
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestroomReport {
    /// People the area can hold
    pub max_people: i64,
    /// Restrooms needed for them
    pub required_restrooms: i64,
}

impl fmt::Display for RestroomReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Required restrooms: {} (maximum people: {})",
            self.required_restrooms, self.max_people
        )
    }
}

/// Lighting output per m²
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingDensityReport {
    pub lighting_density: f64,
}

impl fmt::Display for LightingDensityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lighting per area: {}", self.lighting_density)
    }
}

/// A room selected by the heating threshold query
///
/// Zero-volume rooms carry an infinite `heat_per_cube`, which JSON output
/// writes as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatingReport {
    pub name: Option<String>,
    pub cube: f64,
    pub heating: f64,
    /// Rounded heating per m³
    pub heat_per_cube: f64,
}

impl From<&Room> for HeatingReport {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.as_str().map(str::to_string),
            cube: room.cube,
            heating: room.heating,
            heat_per_cube: round2(room.heat_per_cube()),
        }
    }
}

impl fmt::Display for HeatingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Heat per cube: {}",
            self.name.as_deref().unwrap_or("(unnamed)"),
            self.heat_per_cube
        )
    }
}

/// Rooms exceeding a heating threshold, in traversal order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdReport {
    pub rooms_exceeding_threshold: Vec<HeatingReport>,
}

impl fmt::Display for ThresholdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rooms_exceeding_threshold.is_empty() {
            return f.write_str("No rooms exceed the threshold");
        }
        for (i, room) in self.rooms_exceeding_threshold.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{room}")?;
        }
        Ok(())
    }
}

/// Rounded area per level id
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelAreaReport {
    pub level_areas: FxHashMap<String, f64>,
}

impl fmt::Display for LevelAreaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.level_areas.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (i, (id, area)) in entries.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{id}: {area}")?;
        }
        Ok(())
    }
}

/// Failure payload, `{"error": "..."}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(error: impl fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
