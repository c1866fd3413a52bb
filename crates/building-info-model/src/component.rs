// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building component tree and hierarchy traversal

use crate::{BuildingError, Component, ComponentKind, ComponentName, Metric, Result};
use serde::Serialize;
use std::fmt;

/// Leaf of the hierarchy carrying the physical attributes
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Room {
    /// Identifier, unique within the level
    pub id: String,
    /// Display name
    #[serde(skip_serializing_if = "ComponentName::is_anonymous")]
    pub name: ComponentName,
    /// Floor area in m²
    pub area: f64,
    /// Volume in m³ (may be zero)
    pub cube: f64,
    /// Heating demand
    pub heating: f64,
    /// Lighting output in lumens
    pub light: f64,
}

impl Room {
    /// Create a new room
    pub fn new(id: impl Into<String>, area: f64, cube: f64, heating: f64, light: f64) -> Self {
        Self {
            id: id.into(),
            name: ComponentName::Anonymous,
            area,
            cube,
            heating,
            light,
        }
    }

    /// Set name
    pub fn with_name(mut self, name: impl Into<ComponentName>) -> Self {
        self.name = name.into();
        self
    }

    /// Stored value of a metric
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Area => self.area,
            Metric::Heat => self.heating,
            Metric::Cube => self.cube,
            Metric::Light => self.light,
        }
    }

    /// Heating demand per cubic meter
    ///
    /// A room with zero volume is treated as infinitely intense, whatever its
    /// heating value.
    pub fn heat_per_cube(&self) -> f64 {
        if self.cube == 0.0 {
            f64::INFINITY
        } else {
            self.heating / self.cube
        }
    }
}

impl Component for Room {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &ComponentName {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Room
    }

    fn components(&self) -> &[BuildingComponent] {
        &[]
    }

    fn as_room(&self) -> Option<&Room> {
        Some(self)
    }

    fn calculate(&self, metric: Metric) -> f64 {
        self.metric(metric)
    }
}

/// A floor of the building
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Level {
    /// Identifier, unique within the building
    pub id: String,
    /// Display name
    #[serde(skip_serializing_if = "ComponentName::is_anonymous")]
    pub name: ComponentName,
    /// Child components, rooms in the canonical shape
    #[serde(rename = "rooms")]
    pub components: Vec<BuildingComponent>,
}

impl Level {
    /// Create a new empty level
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: ComponentName::Anonymous,
            components: Vec::new(),
        }
    }

    /// Set name
    pub fn with_name(mut self, name: impl Into<ComponentName>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a room
    pub fn with_room(mut self, room: Room) -> Self {
        self.components.push(BuildingComponent::Room(room));
        self
    }

    /// Rooms directly on this level
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.components.iter().filter_map(BuildingComponent::as_room)
    }

    /// Add a child component
    pub fn add_component(&mut self, component: BuildingComponent) {
        self.components.push(component);
    }

    /// Remove the first direct child with the given id
    pub fn remove_component(&mut self, id: &str) -> Option<BuildingComponent> {
        remove_by_id(&mut self.components, id)
    }
}

impl Component for Level {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &ComponentName {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Level
    }

    fn components(&self) -> &[BuildingComponent] {
        &self.components
    }
}

/// Root of the hierarchy
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Building {
    /// Document identifier
    pub id: String,
    /// Display name
    #[serde(skip_serializing_if = "ComponentName::is_anonymous")]
    pub name: ComponentName,
    /// Child components, levels in the canonical shape
    #[serde(rename = "levels")]
    pub components: Vec<BuildingComponent>,
}

impl Building {
    /// Create a new empty building
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: ComponentName::Anonymous,
            components: Vec::new(),
        }
    }

    /// Set name
    pub fn with_name(mut self, name: impl Into<ComponentName>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a level
    pub fn with_level(mut self, level: Level) -> Self {
        self.components.push(BuildingComponent::Level(level));
        self
    }

    /// Levels directly in this building
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.components.iter().filter_map(|c| match c {
            BuildingComponent::Level(level) => Some(level),
            _ => None,
        })
    }

    /// Every room in the building, in pre-order
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.iter().filter_map(|c| c.as_room())
    }

    /// Iterate all components (depth-first, pre-order), starting with the building itself
    pub fn iter(&self) -> ComponentIter<'_> {
        ComponentIter::new(self)
    }

    /// Add a child component
    pub fn add_component(&mut self, component: BuildingComponent) {
        self.components.push(component);
    }

    /// Remove the first direct child with the given id
    pub fn remove_component(&mut self, id: &str) -> Option<BuildingComponent> {
        remove_by_id(&mut self.components, id)
    }
}

impl Component for Building {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &ComponentName {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Building
    }

    fn components(&self) -> &[BuildingComponent] {
        &self.components
    }
}

/// Node in the component tree
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BuildingComponent {
    Building(Building),
    Level(Level),
    Room(Room),
}

impl BuildingComponent {
    /// Downcast to a room
    pub fn as_room(&self) -> Option<&Room> {
        match self {
            BuildingComponent::Room(room) => Some(room),
            _ => None,
        }
    }

    /// Add a child component
    ///
    /// Only composites accept children; rooms fail with
    /// `BuildingError::UnsupportedOperation`.
    pub fn add_component(&mut self, component: BuildingComponent) -> Result<()> {
        match self {
            BuildingComponent::Building(building) => building.add_component(component),
            BuildingComponent::Level(level) => level.add_component(component),
            BuildingComponent::Room(room) => {
                return Err(unsupported("add_component", room));
            }
        }
        Ok(())
    }

    /// Remove the first direct child with the given id
    ///
    /// Fails with `BuildingError::UnsupportedOperation` on rooms.
    pub fn remove_component(&mut self, id: &str) -> Result<Option<BuildingComponent>> {
        match self {
            BuildingComponent::Building(building) => Ok(building.remove_component(id)),
            BuildingComponent::Level(level) => Ok(level.remove_component(id)),
            BuildingComponent::Room(room) => Err(unsupported("remove_component", room)),
        }
    }

    /// Iterate all components (depth-first, pre-order)
    pub fn iter(&self) -> ComponentIter<'_> {
        ComponentIter::new(self)
    }

    fn inner(&self) -> &dyn Component {
        match self {
            BuildingComponent::Building(building) => building,
            BuildingComponent::Level(level) => level,
            BuildingComponent::Room(room) => room,
        }
    }
}

impl Component for BuildingComponent {
    fn id(&self) -> &str {
        self.inner().id()
    }

    fn name(&self) -> &ComponentName {
        self.inner().name()
    }

    fn kind(&self) -> ComponentKind {
        self.inner().kind()
    }

    fn components(&self) -> &[BuildingComponent] {
        self.inner().components()
    }

    fn as_room(&self) -> Option<&Room> {
        BuildingComponent::as_room(self)
    }

    fn calculate(&self, metric: Metric) -> f64 {
        self.inner().calculate(metric)
    }
}

impl From<Building> for BuildingComponent {
    fn from(building: Building) -> Self {
        BuildingComponent::Building(building)
    }
}

impl From<Level> for BuildingComponent {
    fn from(level: Level) -> Self {
        BuildingComponent::Level(level)
    }
}

impl From<Room> for BuildingComponent {
    fn from(room: Room) -> Self {
        BuildingComponent::Room(room)
    }
}

fn remove_by_id(components: &mut Vec<BuildingComponent>, id: &str) -> Option<BuildingComponent> {
    let index = components.iter().position(|c| c.id() == id)?;
    Some(components.remove(index))
}

fn unsupported(operation: &'static str, room: &Room) -> BuildingError {
    BuildingError::UnsupportedOperation {
        operation,
        component: format!("room '{}'", room.id),
    }
}

/// Iterator over components (depth-first, pre-order)
pub struct ComponentIter<'a> {
    stack: Vec<&'a dyn Component>,
}

impl<'a> ComponentIter<'a> {
    /// Start a traversal at `root`, which is yielded first
    pub fn new(root: &'a dyn Component) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for ComponentIter<'a> {
    type Item = &'a dyn Component;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Add children in reverse order so first child is processed first
        for child in node.components().iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Multi-line summary of a subtree
pub fn describe(component: &dyn Component) -> String {
    Describe(component).to_string()
}

struct Describe<'a>(&'a dyn Component);

impl fmt::Display for Describe<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_component(f, self.0, 0)
    }
}

fn write_component(f: &mut fmt::Formatter<'_>, component: &dyn Component, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    writeln!(f, "{indent}{} ID: {}", component.kind(), component.id())?;
    writeln!(f, "{indent}Name: {}", component.name())?;

    if let Some(room) = component.as_room() {
        writeln!(f, "{indent}Area: {} {}", room.area, Metric::Area.unit())?;
        writeln!(f, "{indent}Cube: {} {}", room.cube, Metric::Cube.unit())?;
        writeln!(f, "{indent}Heating: {}", room.heating)?;
        writeln!(f, "{indent}Light: {} {}", room.light, Metric::Light.unit())?;
    }

    if component.kind().is_composite() {
        writeln!(f, "{indent}{}:", component.kind().children_label())?;
        for child in component.components() {
            write_component(f, child, depth + 1)?;
        }
    }
    Ok(())
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_component(f, self, 0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_component(f, self, 0)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_component(f, self, 0)
    }
}
