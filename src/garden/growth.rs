//! Growth model — pure functions over timestamps.
//!
//! Called once per displayed entity per frame by the scene layer, and by
//! the tool systems when they need the watered-recently subset. Everything
//! here is deterministic in `now_ms` so it can be tested with synthetic
//! clocks.

use crate::shared::*;

/// Growth fraction in [0,1] computed live from timestamps.
///
/// Base growth ramps linearly to `base_rate` over seven days, then the
/// watering multipliers apply in a fixed order: the 1.5x bonus for being
/// watered within 24h first, the 0.5x neglect penalty beyond 48h second.
/// The two windows cannot overlap, but the order is load-bearing for
/// anyone extending the thresholds.
pub fn compute_growth(planted_at_ms: f64, last_watered_ms: f64, now_ms: f64, base_rate: f32) -> f32 {
    let since_planted = now_ms - planted_at_ms;
    let since_watered = now_ms - last_watered_ms;

    let mut growth = ((since_planted / GROWTH_PERIOD_MS) as f32 * base_rate).min(1.0);

    if since_watered < WATERING_BONUS_MS {
        growth *= 1.5;
    }
    if since_watered > NEGLECT_THRESHOLD_MS {
        growth *= 0.5;
    }

    growth.clamp(0.0, 1.0)
}

/// What the scene layer actually renders: stored growth is a floor that
/// only tool use raises, so display never regresses as time passes.
pub fn display_growth(stored: f32, computed: f32) -> f32 {
    stored.max(computed)
}

/// Healthy iff watered within the 48h neglect window.
pub fn is_healthy(last_watered_ms: f64, now_ms: f64) -> bool {
    now_ms - last_watered_ms < NEGLECT_THRESHOLD_MS
}

/// Band an entity for display tinting. Golden trees override the
/// time-based bands entirely.
pub fn health_band(last_watered_ms: f64, now_ms: f64, is_golden: bool) -> HealthBand {
    if is_golden {
        return HealthBand::Golden;
    }
    let since_watered = now_ms - last_watered_ms;
    if since_watered < WATERING_BONUS_MS {
        HealthBand::Healthy
    } else if since_watered < NEGLECT_THRESHOLD_MS {
        HealthBand::Normal
    } else {
        HealthBand::Unhealthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_growth_stays_in_unit_range() {
        // Sweep a grid of plausible planted/watered/now combinations.
        for days_planted in [0.0, 0.5, 1.0, 3.5, 7.0, 14.0, 60.0] {
            for hours_unwatered in [0.0, 12.0, 23.9, 24.0, 47.9, 48.1, 200.0] {
                for rate in [0.4, 0.6, 0.8, 1.0] {
                    let now = 1_700_000_000_000.0;
                    let planted = now - days_planted * DAY_MS;
                    let watered = now - hours_unwatered * HOUR_MS;
                    let g = compute_growth(planted, watered, now, rate);
                    assert!(
                        (0.0..=1.0).contains(&g),
                        "growth {g} out of range (planted {days_planted}d, unwatered {hours_unwatered}h)"
                    );
                }
            }
        }
    }

    #[test]
    fn test_watering_bonus_applies_when_freshly_watered() {
        let now = 1_700_000_000_000.0;
        let planted = now - 7.0 * DAY_MS;
        // Watered right now → full base times 1.5, clamped.
        let g = compute_growth(planted, now, now, TREE_GROWTH_RATE);
        assert!((g - (TREE_GROWTH_RATE * 1.5).min(1.0)).abs() < EPS);

        // The plant rate is high enough that the bonus clamps at 1.
        let g = compute_growth(planted, now, now, PLANT_GROWTH_RATE);
        assert!((g - 1.0).abs() < EPS);
    }

    #[test]
    fn test_neglect_penalty_after_49_hours() {
        let now = 1_700_000_000_000.0;
        let planted = now - 7.0 * DAY_MS;
        let watered = now - 49.0 * HOUR_MS;
        let g = compute_growth(planted, watered, now, TREE_GROWTH_RATE);
        assert!((g - 0.3).abs() < EPS, "expected 0.6 * 0.5, got {g}");
    }

    #[test]
    fn test_no_multiplier_in_middle_window() {
        let now = 1_700_000_000_000.0;
        let planted = now - 7.0 * DAY_MS;
        // 30h since watering: neither bonus nor penalty.
        let watered = now - 30.0 * HOUR_MS;
        let g = compute_growth(planted, watered, now, 0.6);
        assert!((g - 0.6).abs() < EPS);
    }

    #[test]
    fn test_growth_never_negative_for_future_planting() {
        // Clock skew can put planted_at ahead of now; clamp holds the floor.
        let now = 1_700_000_000_000.0;
        let g = compute_growth(now + DAY_MS, now, now, 0.6);
        assert!(g >= 0.0);
    }

    #[test]
    fn test_display_growth_ratchets() {
        assert!((display_growth(0.7, 0.4) - 0.7).abs() < EPS);
        assert!((display_growth(0.2, 0.9) - 0.9).abs() < EPS);
    }

    #[test]
    fn test_health_thresholds() {
        let now = 1_700_000_000_000.0;
        assert!(is_healthy(now - 47.9 * HOUR_MS, now));
        assert!(!is_healthy(now - 48.1 * HOUR_MS, now));

        assert_eq!(health_band(now - 1.0 * HOUR_MS, now, false), HealthBand::Healthy);
        assert_eq!(health_band(now - 30.0 * HOUR_MS, now, false), HealthBand::Normal);
        assert_eq!(health_band(now - 60.0 * HOUR_MS, now, false), HealthBand::Unhealthy);
        // Golden overrides even a badly neglected tree.
        assert_eq!(health_band(now - 60.0 * HOUR_MS, now, true), HealthBand::Golden);
    }

    #[test]
    fn test_band_colors_match_display_palette() {
        use bevy::prelude::Color;
        assert_eq!(HealthBand::Golden.color(), Color::srgb_u8(255, 215, 0));
        assert_eq!(HealthBand::Unhealthy.color(), Color::srgb_u8(239, 68, 68));
    }
}
