// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derived metrics and rounding rules

/// Floor area needed per occupant, in m²
pub const AREA_PER_PERSON: f64 = 3.0;

/// Occupants served by one restroom
pub const PEOPLE_PER_RESTROOM: f64 = 15.0;

/// Round half-up at the second decimal digit
///
/// Non-finite values pass through unchanged.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Maximum number of people for a floor area
pub fn max_people(total_area: f64) -> i64 {
    (total_area / AREA_PER_PERSON).floor() as i64
}

/// Restrooms required for a number of occupants
pub fn required_restrooms(max_people: i64) -> i64 {
    (max_people as f64 / PEOPLE_PER_RESTROOM).ceil() as i64
}

/// Lighting output per m², `None` when the area is zero
pub fn lighting_density(total_light: f64, total_area: f64) -> Option<f64> {
    if total_area == 0.0 {
        None
    } else {
        Some(total_light / total_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(79.995), 80.0);
        assert_eq!(round2(79.996), 80.0);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(20.0 / 3.0), 6.67);
        assert_eq!(round2(650.0 / 105.0), 6.19);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(105.0), 105.0);
    }

    #[test]
    fn test_round2_non_finite() {
        assert!(round2(f64::INFINITY).is_infinite());
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn test_occupancy_and_restrooms() {
        assert_eq!(max_people(105.0), 35);
        assert_eq!(required_restrooms(35), 3);
        assert_eq!(max_people(2.99), 0);
        assert_eq!(required_restrooms(0), 0);
        assert_eq!(required_restrooms(15), 1);
        assert_eq!(required_restrooms(16), 2);
    }

    #[test]
    fn test_occupancy_uses_unrounded_area() {
        // 8.999 would round to 9.0 and allow 3 people
        assert_eq!(max_people(8.999), 2);
    }

    #[test]
    fn test_lighting_density_zero_area() {
        assert_eq!(lighting_density(100.0, 0.0), None);
        assert_eq!(lighting_density(200.0, 30.0).map(round2), Some(6.67));
    }
}
