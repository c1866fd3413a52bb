// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared by every building component
//!
//! This module defines the small value types used throughout the component
//! tree: optional names, component kinds and the aggregatable metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional, human-provided component name
///
/// A missing name is kept as [`ComponentName::Anonymous`] rather than an empty
/// string so that name lookups can never match it by accident.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ComponentName {
    /// Component carries a name
    Named(String),
    /// Component has no name
    #[default]
    Anonymous,
}

impl ComponentName {
    /// Get the name, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ComponentName::Named(name) => Some(name.as_str()),
            ComponentName::Anonymous => None,
        }
    }

    /// Check whether this component has no name
    pub fn is_anonymous(&self) -> bool {
        matches!(self, ComponentName::Anonymous)
    }

    /// Case-insensitive exact comparison; anonymous names never match
    pub fn matches(&self, query: &str) -> bool {
        match self {
            ComponentName::Named(name) => name
                .chars()
                .flat_map(char::to_lowercase)
                .eq(query.chars().flat_map(char::to_lowercase)),
            ComponentName::Anonymous => false,
        }
    }
}

impl From<Option<String>> for ComponentName {
    fn from(name: Option<String>) -> Self {
        name.map_or(ComponentName::Anonymous, ComponentName::Named)
    }
}

impl From<ComponentName> for Option<String> {
    fn from(name: ComponentName) -> Self {
        match name {
            ComponentName::Named(name) => Some(name),
            ComponentName::Anonymous => None,
        }
    }
}

impl From<&str> for ComponentName {
    fn from(name: &str) -> Self {
        ComponentName::Named(name.to_string())
    }
}

impl From<String> for ComponentName {
    fn from(name: String) -> Self {
        ComponentName::Named(name)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentName::Named(name) => f.write_str(name),
            ComponentName::Anonymous => f.write_str("(unnamed)"),
        }
    }
}

/// Kind of component in the building hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Root of the hierarchy
    Building,
    /// A floor holding rooms
    Level,
    /// Leaf carrying physical attributes
    Room,
}

impl ComponentKind {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Building => "Building",
            ComponentKind::Level => "Level",
            ComponentKind::Room => "Room",
        }
    }

    /// Heading used when listing the children of this kind
    pub fn children_label(&self) -> &'static str {
        match self {
            ComponentKind::Building => "Levels",
            ComponentKind::Level => "Rooms",
            ComponentKind::Room => "Components",
        }
    }

    /// Whether components of this kind own children
    pub fn is_composite(&self) -> bool {
        !matches!(self, ComponentKind::Room)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Room attribute that can be summed over a subtree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Floor area in m²
    Area,
    /// Heating demand
    Heat,
    /// Volume in m³
    Cube,
    /// Lighting output in lumens
    Light,
}

impl Metric {
    /// All metrics in display order
    pub const ALL: [Metric; 4] = [Metric::Area, Metric::Heat, Metric::Cube, Metric::Light];

    /// Key used in serialized reports (e.g. `totalArea`)
    pub fn report_key(&self) -> &'static str {
        match self {
            Metric::Area => "totalArea",
            Metric::Heat => "totalHeat",
            Metric::Cube => "totalCube",
            Metric::Light => "totalLight",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Area => "Total area",
            Metric::Heat => "Total heating",
            Metric::Cube => "Total cube",
            Metric::Light => "Total lighting",
        }
    }

    /// Unit of measurement
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Area => "sqm",
            Metric::Heat => "",
            Metric::Cube => "cubic meters",
            Metric::Light => "lumens",
        }
    }
}
