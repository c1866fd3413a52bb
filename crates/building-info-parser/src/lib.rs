// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building-Info Parser - JSON building document parser
//!
//! This crate turns a JSON building document into the component tree defined
//! in `building-info-model`. It implements the [`BuildingParser`] trait so
//! front ends can stay backend-agnostic.
//!
//! # Features
//!
//! - **Path-aware errors** - failures name the offending field, e.g.
//!   `$.levels[1].rooms[0].cube`
//! - **Optional names** - absent or `null` names become anonymous components
//! - **Lenient mode** - opt-in acceptance of numeric strings for room attributes
//!
//! # Example
//!
//! ```ignore
//! use building_info_parser::JsonParser;
//! use building_info_model::{query, BuildingParser};
//!
//! let parser = JsonParser::new();
//! let building = parser.parse(json)?;
//! println!("Total area: {}", query::area(&building, None)?);
//! ```

mod document;
mod fields;

pub use fields::FieldPath;

use building_info_model::{Building, BuildingParser, Result};
use document::TreeBuilder;
use std::path::Path;

/// Main JSON parser implementing `BuildingParser` trait
///
/// Strict by default: every room attribute must be a JSON number.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonParser {
    /// Whether numeric strings (`"50.5"`) are accepted for room attributes
    pub numeric_strings: bool,
}

impl JsonParser {
    /// Create a new strict parser
    pub fn new() -> Self {
        Self {
            numeric_strings: false,
        }
    }

    /// Create a parser that also accepts numeric strings
    pub fn lenient() -> Self {
        Self {
            numeric_strings: true,
        }
    }

    /// Set whether numeric strings are accepted
    pub fn with_numeric_strings(mut self, enabled: bool) -> Self {
        self.numeric_strings = enabled;
        self
    }

    /// Build a tree from an already decoded JSON value
    pub fn parse_value(&self, document: &serde_json::Value) -> Result<Building> {
        TreeBuilder::new(self.numeric_strings).build(document)
    }
}

impl BuildingParser for JsonParser {
    fn parse(&self, content: &str) -> Result<Building> {
        TreeBuilder::new(self.numeric_strings).build_str(content)
    }
}

/// Quick parse function for simple use cases
pub fn parse(content: &str) -> Result<Building> {
    JsonParser::new().parse(content)
}

/// Read and parse a document from disk
pub fn parse_file(path: impl AsRef<Path>) -> Result<Building> {
    JsonParser::new().parse_file(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use building_info_model::{query, BuildingError, Component};

    const MAIN_OFFICE: &str = r#"{
  "id": "building1",
  "name": "Main Office",
  "levels": [
    {
      "id": "level1",
      "name": "Ground Floor",
      "rooms": [
        {
          "id": "room1",
          "name": "Conference Room",
          "area": 50.0,
          "cube": 150.0,
          "heating": 20.5,
          "light": 300.0
        },
        {
          "id": "room2",
          "name": "Office 101",
          "area": 30.0,
          "cube": 90.0,
          "heating": 15.0,
          "light": 200.0
        }
      ]
    },
    {
      "id": "level2",
      "name": "First Floor",
      "rooms": [
        {
          "id": "room3",
          "name": "Office 201",
          "area": 25.0,
          "cube": 75.0,
          "heating": 10.0,
          "light": 150.0
        }
      ]
    }
  ]
}"#;

    #[test]
    fn test_parse_main_office() {
        let building = parse(MAIN_OFFICE).unwrap();
        assert_eq!(building.id, "building1");
        assert_eq!(building.name.as_str(), Some("Main Office"));
        assert_eq!(building.levels().count(), 2);
        assert_eq!(building.rooms().count(), 3);
    }

    #[test]
    fn test_main_office_totals() {
        let building = parse(MAIN_OFFICE).unwrap();
        assert_eq!(query::area(&building, None).unwrap(), 105.0);
        assert_eq!(query::heat(&building, None).unwrap(), 45.5);
        assert_eq!(query::cube(&building, None).unwrap(), 315.0);
        assert_eq!(query::light(&building, None).unwrap(), 650.0);
    }

    #[test]
    fn test_main_office_derived_metrics() {
        let building = parse(MAIN_OFFICE).unwrap();
        assert_eq!(query::occupancy(&building, None).unwrap().max_people, 35);
        assert_eq!(
            query::restrooms(&building, None).unwrap().required_restrooms,
            3
        );
        assert_eq!(query::lighting_density(&building, None).unwrap(), 6.19);
        assert_eq!(
            query::lighting_density(&building, Some("Office 101")).unwrap(),
            6.67
        );
    }

    #[test]
    fn test_main_office_threshold() {
        let building = parse(MAIN_OFFICE).unwrap();
        let report = query::rooms_above_threshold_report(&building, 0.11);
        let ratios: Vec<f64> = report
            .rooms_exceeding_threshold
            .iter()
            .map(|r| r.heat_per_cube)
            .collect();
        assert_eq!(ratios, vec![0.14, 0.17, 0.13]);
    }

    #[test]
    fn test_main_office_scoped_queries() {
        let building = parse(MAIN_OFFICE).unwrap();
        assert_eq!(query::area(&building, Some("Ground Floor")).unwrap(), 80.0);
        assert_eq!(query::heat(&building, Some("first floor")).unwrap(), 10.0);

        let err = query::area(&building, Some("Roof")).unwrap_err();
        assert!(matches!(err, BuildingError::NotFound(_)));
    }

    #[test]
    fn test_level_sum_invariant() {
        let building = parse(MAIN_OFFICE).unwrap();
        let by_level: f64 = building.levels().map(|l| l.calculate_area()).sum();
        assert_eq!(building.calculate_area(), by_level);

        let areas = query::per_level_area(&building);
        assert_eq!(areas["level1"], 80.0);
        assert_eq!(areas["level2"], 25.0);
    }

    #[test]
    fn test_parser_builder() {
        let parser = JsonParser::new().with_numeric_strings(true);
        assert!(parser.numeric_strings);
        assert!(JsonParser::lenient().numeric_strings);
        assert!(!JsonParser::default().numeric_strings);
    }

    #[test]
    fn test_parse_through_trait_object() {
        let parser: Box<dyn BuildingParser> = Box::new(JsonParser::new());
        let building = parser.parse(MAIN_OFFICE).unwrap();
        assert_eq!(building.calculate_cube(), 315.0);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("/nonexistent/building-info/missing.json").unwrap_err();
        assert!(matches!(err, BuildingError::Io(_)));
    }

    #[test]
    fn test_parse_value() {
        let value: serde_json::Value = serde_json::from_str(MAIN_OFFICE).unwrap();
        let building = JsonParser::new().parse_value(&value).unwrap();
        assert_eq!(building, parse(MAIN_OFFICE).unwrap());
    }
}
