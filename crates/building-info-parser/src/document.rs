// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component tree builder for building documents

use crate::fields::{
    expect_object, optional_name, required_array, required_number, required_str, FieldPath,
};
use building_info_model::{Building, BuildingError, Level, Result, Room};
use log::debug;
use serde_json::Value;

/// Builds the Building → Level → Room tree from a JSON document
pub(crate) struct TreeBuilder {
    numeric_strings: bool,
}

impl TreeBuilder {
    pub(crate) fn new(numeric_strings: bool) -> Self {
        Self { numeric_strings }
    }

    /// Parse raw text and build the tree
    pub(crate) fn build_str(&self, content: &str) -> Result<Building> {
        let document: Value = serde_json::from_str(content).map_err(|e| {
            BuildingError::malformed(FieldPath::root().as_str(), format!("invalid JSON: {}", e))
        })?;
        self.build(&document)
    }

    /// Build the tree from an already parsed document
    pub(crate) fn build(&self, document: &Value) -> Result<Building> {
        let path = FieldPath::root();
        let object = expect_object(document, &path)?;

        let mut building = Building::new(required_str(object, "id", &path)?);
        building.name = optional_name(object, "name", &path)?;

        let levels_path = path.field("levels");
        for (i, value) in required_array(object, "levels", &path)?.iter().enumerate() {
            let level = self.level(value, &levels_path.index(i))?;
            building = building.with_level(level);
        }

        debug!(
            "parsed building '{}' with {} levels and {} rooms",
            building.id,
            building.levels().count(),
            building.rooms().count()
        );
        Ok(building)
    }

    fn level(&self, value: &Value, path: &FieldPath) -> Result<Level> {
        let object = expect_object(value, path)?;

        let mut level = Level::new(required_str(object, "id", path)?);
        level.name = optional_name(object, "name", path)?;

        let rooms_path = path.field("rooms");
        for (i, value) in required_array(object, "rooms", path)?.iter().enumerate() {
            let room = self.room(value, &rooms_path.index(i))?;
            level = level.with_room(room);
        }
        Ok(level)
    }

    fn room(&self, value: &Value, path: &FieldPath) -> Result<Room> {
        let object = expect_object(value, path)?;
        let number = |key: &str| required_number(object, key, path, self.numeric_strings);

        let room = Room::new(
            required_str(object, "id", path)?,
            number("area")?,
            number("cube")?,
            number("heating")?,
            number("light")?,
        )
        .with_name(optional_name(object, "name", path)?);
        Ok(room)
    }
}
