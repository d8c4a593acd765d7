//! Spatial placement — random spots inside the garden circle and the
//! minimum-spacing validator.

use rand::Rng;

use crate::shared::*;

/// Uniform angle, uniform radial distance. Deliberately NOT area-uniform:
/// sampling the radius directly biases density toward the center, which is
/// the planting feel the game shipped with.
pub fn random_position(radius: f32, rng: &mut impl Rng) -> [f32; 3] {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let distance = rng.gen::<f32>() * radius;
    [angle.cos() * distance, 0.0, angle.sin() * distance]
}

/// A candidate is valid iff its horizontal distance to every existing
/// planting is at least `min_distance`.
pub fn is_valid_position(candidate: [f32; 3], existing: &[[f32; 3]], min_distance: f32) -> bool {
    existing
        .iter()
        .all(|pos| horizontal_distance(candidate, *pos) >= min_distance)
}

/// Retry random spots against the validator until one clears the spacing
/// rule. Returns None when the garden is too crowded to place anything
/// after a bounded number of attempts.
pub fn find_open_position(garden: &Garden, rng: &mut impl Rng) -> Option<[f32; 3]> {
    const MAX_ATTEMPTS: usize = 24;

    let existing = garden.occupied_positions();
    for _ in 0..MAX_ATTEMPTS {
        let candidate = random_position(GARDEN_RADIUS, rng);
        if is_valid_position(candidate, &existing, MIN_PLANT_SPACING) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_position_stays_in_disc_on_ground() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let p = random_position(GARDEN_RADIUS, &mut rng);
            assert_eq!(p[1], 0.0, "plantings sit on the ground plane");
            assert!(
                horizontal_distance(p, [0.0, 0.0, 0.0]) < GARDEN_RADIUS,
                "position {p:?} escaped the garden"
            );
        }
    }

    #[test]
    fn test_spacing_validator_thresholds() {
        let existing = [[0.0, 0.0, 0.0]];
        // 1.0 away is too close for a 1.5 minimum; 2.0 clears it.
        assert!(!is_valid_position([1.0, 0.0, 0.0], &existing, MIN_PLANT_SPACING));
        assert!(is_valid_position([2.0, 0.0, 0.0], &existing, MIN_PLANT_SPACING));
        // Exactly at the minimum counts as valid.
        assert!(is_valid_position([1.5, 0.0, 0.0], &existing, MIN_PLANT_SPACING));
    }

    #[test]
    fn test_spacing_ignores_height() {
        let existing = [[0.0, 5.0, 0.0]];
        assert!(!is_valid_position([1.0, 0.0, 0.0], &existing, MIN_PLANT_SPACING));
    }

    #[test]
    fn test_find_open_position_respects_existing_plantings() {
        let mut rng = rand::thread_rng();
        let mut garden = Garden::default();
        garden.trees.push(Tree {
            id: "tree-a".into(),
            position: [0.0, 0.0, 0.0],
            growth: 0.0,
            is_golden: false,
            planted_at_ms: 0.0,
            last_watered_ms: 0.0,
            is_watered: false,
        });

        for _ in 0..50 {
            if let Some(p) = find_open_position(&garden, &mut rng) {
                assert!(horizontal_distance(p, [0.0, 0.0, 0.0]) >= MIN_PLANT_SPACING);
            }
        }
    }

    #[test]
    fn test_empty_garden_always_finds_a_spot() {
        let mut rng = rand::thread_rng();
        let garden = Garden::default();
        assert!(find_open_position(&garden, &mut rng).is_some());
    }
}
