// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Name lookup, aggregation and threshold queries over a component tree
//!
//! Every query takes the tree root as `&dyn Component` plus an optional
//! component name. A present, non-empty name scopes the query to the first
//! component carrying that name (see [`find_by_name`]); otherwise the whole
//! tree is used. Floating results are rounded with [`round2`].
//!
//! # Example
//!
//! ```ignore
//! use building_info_model::query;
//!
//! let building = building_info_parser::parse(json)?;
//! println!("{}", query::area(&building, None)?);
//! println!("{}", query::area(&building, Some("Ground Floor"))?);
//! for room in query::rooms_above_threshold(&building, 0.11) {
//!     println!("{} exceeds", room.id);
//! }
//! ```

use crate::metrics::{self, round2};
use crate::report::{
    HeatingReport, LevelAreaReport, LightingDensityReport, OccupancyReport, RestroomReport,
    ThresholdReport, TotalReport,
};
use crate::{BuildingError, Component, ComponentIter, ComponentKind, Metric, Result, Room};
use log::{debug, warn};
use rustc_hash::FxHashMap;

/// Find the first component whose name matches, case-insensitively
///
/// The search is a pre-order depth-first traversal starting at (and
/// including) `root`. Names are not unique, so when several components share
/// a name the one met first in that order is returned. Anonymous components
/// never match.
pub fn find_by_name<'a>(root: &'a dyn Component, name: &str) -> Option<&'a dyn Component> {
    let found = ComponentIter::new(root).find(|c| c.name().matches(name));
    match found {
        Some(component) => debug!(
            "resolved name '{}' to {} '{}'",
            name,
            component.kind(),
            component.id()
        ),
        None => debug!("no component named '{}' under '{}'", name, root.id()),
    }
    found
}

/// Resolve the scope of a query
///
/// `None` or an empty name selects `root`; otherwise the name is looked up
/// and a miss yields `BuildingError::NotFound`.
pub fn resolve_scope<'a>(root: &'a dyn Component, name: Option<&str>) -> Result<&'a dyn Component> {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => find_by_name(root, name).ok_or_else(|| BuildingError::not_found(name)),
        None => Ok(root),
    }
}

/// Rounded total of a metric over the resolved scope
pub fn total(root: &dyn Component, name: Option<&str>, metric: Metric) -> Result<f64> {
    let scope = resolve_scope(root, name)?;
    Ok(round2(scope.calculate(metric)))
}

/// Total as a serializable report
pub fn total_report(root: &dyn Component, name: Option<&str>, metric: Metric) -> Result<TotalReport> {
    Ok(TotalReport {
        metric,
        value: total(root, name, metric)?,
    })
}

/// Total area in m²
pub fn area(root: &dyn Component, name: Option<&str>) -> Result<f64> {
    total(root, name, Metric::Area)
}

/// Total heating demand
pub fn heat(root: &dyn Component, name: Option<&str>) -> Result<f64> {
    total(root, name, Metric::Heat)
}

/// Total volume in m³
pub fn cube(root: &dyn Component, name: Option<&str>) -> Result<f64> {
    total(root, name, Metric::Cube)
}

/// Total lighting output in lumens
pub fn light(root: &dyn Component, name: Option<&str>) -> Result<f64> {
    total(root, name, Metric::Light)
}

/// Occupancy capacity at 3 m² per person
pub fn occupancy(root: &dyn Component, name: Option<&str>) -> Result<OccupancyReport> {
    let total_area = resolve_scope(root, name)?.calculate_area();
    Ok(OccupancyReport {
        total_area: round2(total_area),
        max_people: metrics::max_people(total_area),
    })
}

/// Restrooms required at one per 15 occupants
pub fn restrooms(root: &dyn Component, name: Option<&str>) -> Result<RestroomReport> {
    let total_area = resolve_scope(root, name)?.calculate_area();
    let max_people = metrics::max_people(total_area);
    Ok(RestroomReport {
        max_people,
        required_restrooms: metrics::required_restrooms(max_people),
    })
}

/// Lighting output per m²
///
/// A scope with zero area fails with `BuildingError::DivisionAmbiguity`.
pub fn lighting_density(root: &dyn Component, name: Option<&str>) -> Result<f64> {
    let scope = resolve_scope(root, name)?;
    metrics::lighting_density(scope.calculate_light(), scope.calculate_area())
        .map(round2)
        .ok_or_else(|| BuildingError::DivisionAmbiguity {
            quantity: "lighting density",
            component: scope.id().to_string(),
        })
}

/// Lighting density as a serializable report
pub fn lighting_density_report(
    root: &dyn Component,
    name: Option<&str>,
) -> Result<LightingDensityReport> {
    Ok(LightingDensityReport {
        lighting_density: lighting_density(root, name)?,
    })
}

/// Rooms whose heating per m³ is strictly above `threshold`
///
/// Rooms are collected in pre-order across all levels. Zero-volume rooms are
/// infinitely intense and exceed every finite threshold.
pub fn rooms_above_threshold(root: &dyn Component, threshold: f64) -> Vec<&Room> {
    let rooms: Vec<&Room> = ComponentIter::new(root)
        .filter_map(|c| c.as_room())
        .filter(|room| {
            if room.cube == 0.0 {
                warn!("room '{}' has zero volume", room.id);
            }
            room.heat_per_cube() > threshold
        })
        .collect();
    debug!("{} rooms above heating threshold {}", rooms.len(), threshold);
    rooms
}

/// Threshold query as a serializable report
pub fn rooms_above_threshold_report(root: &dyn Component, threshold: f64) -> ThresholdReport {
    ThresholdReport {
        rooms_exceeding_threshold: rooms_above_threshold(root, threshold)
            .into_iter()
            .map(HeatingReport::from)
            .collect(),
    }
}

/// Rounded area of every level, keyed by level id
///
/// Level ids are only unique within their building; if a tree repeats an id
/// the areas of those levels are added together.
pub fn per_level_area(root: &dyn Component) -> FxHashMap<String, f64> {
    let mut areas: FxHashMap<String, f64> = FxHashMap::default();
    for level in ComponentIter::new(root).filter(|c| c.kind() == ComponentKind::Level) {
        *areas.entry(level.id().to_string()).or_default() += level.calculate_area();
    }
    for area in areas.values_mut() {
        *area = round2(*area);
    }
    areas
}

/// Per-level areas as a serializable report
pub fn per_level_area_report(root: &dyn Component) -> LevelAreaReport {
    LevelAreaReport {
        level_areas: per_level_area(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Building, Level};

    fn sample() -> Building {
        Building::new("building1")
            .with_name("Main Office")
            .with_level(
                Level::new("level1")
                    .with_name("Ground Floor")
                    .with_room(Room::new("room1", 50.0, 150.0, 20.5, 300.0).with_name("Conference Room"))
                    .with_room(Room::new("room2", 30.0, 90.0, 15.0, 200.0).with_name("Office 101")),
            )
            .with_level(
                Level::new("level2")
                    .with_name("First Floor")
                    .with_room(Room::new("room3", 25.0, 75.0, 10.0, 150.0).with_name("Office 201")),
            )
    }

    #[test]
    fn test_whole_building_totals() {
        let building = sample();
        assert_eq!(area(&building, None).unwrap(), 105.0);
        assert_eq!(heat(&building, None).unwrap(), 45.5);
        assert_eq!(cube(&building, None).unwrap(), 315.0);
        assert_eq!(light(&building, None).unwrap(), 650.0);
    }

    #[test]
    fn test_empty_name_means_whole_tree() {
        let building = sample();
        assert_eq!(area(&building, Some("")).unwrap(), 105.0);
    }

    #[test]
    fn test_scoped_totals() {
        let building = sample();
        assert_eq!(area(&building, Some("ground floor")).unwrap(), 80.0);
        assert_eq!(heat(&building, Some("Office 201")).unwrap(), 10.0);
        assert_eq!(area(&building, Some("MAIN OFFICE")).unwrap(), 105.0);
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let building = sample();
        let err = area(&building, Some("Basement")).unwrap_err();
        assert!(matches!(err, BuildingError::NotFound(ref n) if n == "Basement"));
    }

    #[test]
    fn test_first_preorder_match_wins() {
        let building = Building::new("b")
            .with_level(
                Level::new("l1")
                    .with_room(Room::new("a", 10.0, 1.0, 1.0, 1.0).with_name("Office"))
                    .with_room(Room::new("b", 20.0, 1.0, 1.0, 1.0).with_name("Office")),
            )
            .with_level(Level::new("l2").with_room(Room::new("c", 30.0, 1.0, 1.0, 1.0).with_name("office")));

        let found = find_by_name(&building, "office").unwrap();
        assert_eq!(found.id(), "a");
    }

    #[test]
    fn test_parent_matches_before_children() {
        let building = Building::new("b").with_level(
            Level::new("l1")
                .with_name("Shared")
                .with_room(Room::new("r", 10.0, 1.0, 1.0, 1.0).with_name("Shared")),
        );
        assert_eq!(find_by_name(&building, "shared").unwrap().id(), "l1");
    }

    #[test]
    fn test_anonymous_components_are_skipped() {
        let building = Building::new("b").with_level(
            Level::new("l1").with_room(Room::new("r", 10.0, 1.0, 1.0, 1.0)),
        );
        assert!(find_by_name(&building, "").is_none());
        assert!(find_by_name(&building, "r").is_none());
    }

    #[test]
    fn test_occupancy_and_restrooms() {
        let building = sample();
        let report = occupancy(&building, None).unwrap();
        assert_eq!(report.total_area, 105.0);
        assert_eq!(report.max_people, 35);

        let report = restrooms(&building, None).unwrap();
        assert_eq!(report.max_people, 35);
        assert_eq!(report.required_restrooms, 3);

        let scoped = restrooms(&building, Some("Office 101")).unwrap();
        assert_eq!(scoped.max_people, 10);
        assert_eq!(scoped.required_restrooms, 1);
    }

    #[test]
    fn test_lighting_density() {
        let building = sample();
        assert_eq!(lighting_density(&building, None).unwrap(), 6.19);
        assert_eq!(lighting_density(&building, Some("Office 101")).unwrap(), 6.67);
    }

    #[test]
    fn test_lighting_density_zero_area() {
        let building = Building::new("b").with_level(Level::new("empty").with_name("Attic"));
        let err = lighting_density(&building, Some("attic")).unwrap_err();
        match err {
            BuildingError::DivisionAmbiguity { quantity, component } => {
                assert_eq!(quantity, "lighting density");
                assert_eq!(component, "empty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rooms_above_threshold() {
        let building = sample();
        let report = rooms_above_threshold_report(&building, 0.11);
        let ratios: Vec<f64> = report
            .rooms_exceeding_threshold
            .iter()
            .map(|r| r.heat_per_cube)
            .collect();
        assert_eq!(ratios, vec![0.14, 0.17, 0.13]);

        let names: Vec<Option<&str>> = report
            .rooms_exceeding_threshold
            .iter()
            .map(|r| r.name.as_deref())
            .collect();
        assert_eq!(
            names,
            vec![Some("Conference Room"), Some("Office 101"), Some("Office 201")]
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        let building = Building::new("b").with_level(
            Level::new("l")
                .with_room(Room::new("exact", 10.0, 100.0, 25.0, 1.0))
                .with_room(Room::new("above", 10.0, 100.0, 26.0, 1.0)),
        );
        let rooms = rooms_above_threshold(&building, 0.25);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "above");
    }

    #[test]
    fn test_threshold_zero_cube_included() {
        let building = Building::new("b").with_level(
            Level::new("l")
                .with_room(Room::new("vault", 10.0, 0.0, 0.0, 1.0))
                .with_room(Room::new("normal", 10.0, 100.0, 1.0, 1.0)),
        );
        let rooms = rooms_above_threshold(&building, 1_000_000.0);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "vault");
    }

    #[test]
    fn test_threshold_empty_tree() {
        assert!(rooms_above_threshold(&Building::new("b"), 0.0).is_empty());
        assert!(rooms_above_threshold(&sample(), 10.0).is_empty());
    }

    #[test]
    fn test_threshold_scoped_to_level() {
        let building = sample();
        let level = find_by_name(&building, "First Floor").unwrap();
        let rooms = rooms_above_threshold(level, 0.0);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "room3");
    }

    #[test]
    fn test_per_level_area() {
        let areas = per_level_area(&sample());
        assert_eq!(areas.len(), 2);
        assert_eq!(areas["level1"], 80.0);
        assert_eq!(areas["level2"], 25.0);
    }

    #[test]
    fn test_per_level_area_duplicate_ids() {
        let building = Building::new("b")
            .with_level(Level::new("x").with_room(Room::new("r1", 1.5, 1.0, 1.0, 1.0)))
            .with_level(Level::new("x").with_room(Room::new("r2", 2.5, 1.0, 1.0, 1.0)));
        let areas = per_level_area(&building);
        assert_eq!(areas.len(), 1);
        assert_eq!(areas["x"], 4.0);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let building = sample();
        for metric in Metric::ALL {
            let first = total(&building, None, metric).unwrap();
            let second = total(&building, None, metric).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(
            rooms_above_threshold_report(&building, 0.11),
            rooms_above_threshold_report(&building, 0.11)
        );
    }
}
