// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for building components and parsers
//!
//! These traits define the main abstractions for working with building trees.

use crate::{Building, BuildingComponent, ComponentKind, ComponentName, Metric, Result, Room};
use std::path::Path;

/// Capability set shared by buildings, levels and rooms
///
/// Composites aggregate by summing the same calculation over their children;
/// rooms override [`Component::calculate`] and return their stored values.
/// An empty composite therefore yields `0` for every metric.
///
/// The trait is object safe so that queries can scope to any node of the
/// tree through `&dyn Component`.
///
/// # Example
///
/// ```ignore
/// use building_info_model::{Component, Metric};
///
/// fn report(component: &dyn Component) {
///     println!("{} {}: {} sqm", component.kind(), component.id(), component.calculate_area());
///     for child in component.components() {
///         println!("  {}", child.name());
///     }
/// }
/// ```
pub trait Component {
    /// Identifier, unique among siblings
    fn id(&self) -> &str;

    /// Optional display name used for lookups
    fn name(&self) -> &ComponentName;

    /// Kind of this component
    fn kind(&self) -> ComponentKind;

    /// Children in stored order (empty for rooms)
    fn components(&self) -> &[BuildingComponent];

    /// Downcast to a room
    fn as_room(&self) -> Option<&Room> {
        None
    }

    /// Sum a metric over this subtree
    fn calculate(&self, metric: Metric) -> f64 {
        self.components()
            .iter()
            .fold(0.0, |total, child| total + child.calculate(metric))
    }

    /// Total area in m²
    fn calculate_area(&self) -> f64 {
        self.calculate(Metric::Area)
    }

    /// Total heating demand
    fn calculate_heat(&self) -> f64 {
        self.calculate(Metric::Heat)
    }

    /// Total volume in m³
    fn calculate_cube(&self) -> f64 {
        self.calculate(Metric::Cube)
    }

    /// Total lighting output in lumens
    fn calculate_light(&self) -> f64 {
        self.calculate(Metric::Light)
    }
}

/// Main parsing interface - entry point for turning a document into a tree
///
/// # Example
///
/// ```ignore
/// use building_info_model::BuildingParser;
///
/// let parser: Box<dyn BuildingParser> = get_parser();
/// let building = parser.parse(json)?;
/// println!("{} levels", building.levels().count());
/// ```
pub trait BuildingParser: Send + Sync {
    /// Parse document content into a building tree
    ///
    /// # Returns
    /// The building on success, or `BuildingError::MalformedInput` naming the
    /// offending field
    fn parse(&self, content: &str) -> Result<Building>;

    /// Read a document from disk and parse it
    fn parse_file(&self, path: &Path) -> Result<Building> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }
}
