//! Cloud bursts and cooldown/rain-window decay.

use bevy::prelude::*;

use crate::shared::*;

/// Trigger a cloud burst. No-op (false) when the cloud id is unknown or
/// its cooldown has not fully decayed.
///
/// On success the cloud starts its 5s cooldown and 2s rain window, and
/// every tree/plant within horizontal radius 3 of the cloud is watered.
/// Entities outside the radius are untouched.
pub fn burst_cloud(garden: &mut Garden, cloud_id: &str, now_ms: f64) -> bool {
    let Some(cloud) = garden.clouds.iter_mut().find(|c| c.id == cloud_id) else {
        return false;
    };
    if cloud.cooldown_ms > 0.0 {
        return false;
    }

    cloud.is_raining = true;
    cloud.cooldown_ms = CLOUD_COOLDOWN_MS;
    cloud.rain_remaining_ms = RAIN_DURATION_MS;
    let center = cloud.position;

    for tree in &mut garden.trees {
        if horizontal_distance(tree.position, center) <= WATER_RADIUS {
            tree.water(now_ms);
        }
    }
    for plant in &mut garden.plants {
        if horizontal_distance(plant.position, center) <= WATER_RADIUS {
            plant.water(now_ms);
        }
    }
    true
}

/// Per-tick decay. The cooldown and the rain window count down
/// independently; the rain flag clears the moment its window empties.
pub fn tick_clouds(garden: &mut Garden, delta_ms: f32) {
    for cloud in &mut garden.clouds {
        cloud.cooldown_ms = (cloud.cooldown_ms - delta_ms).max(0.0);
        if cloud.is_raining {
            cloud.rain_remaining_ms = (cloud.rain_remaining_ms - delta_ms).max(0.0);
            if cloud.rain_remaining_ms <= 0.0 {
                cloud.is_raining = false;
            }
        }
    }
}

/// Frame-rate-bound tick: decay every cloud by the frame delta.
pub fn tick_clouds_system(time: Res<Time>, mut garden: ResMut<Garden>) {
    tick_clouds(&mut garden, time.delta_secs() * 1000.0);
}

/// Listen for [`CloudBurstEvent`] from the scene layer.
pub fn handle_cloud_burst(mut burst_events: EventReader<CloudBurstEvent>, mut garden: ResMut<Garden>) {
    for ev in burst_events.read() {
        if burst_cloud(&mut garden, &ev.cloud_id, now_ms()) {
            info!("[Garden] Cloud {} burst", ev.cloud_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_at(id: &str, position: [f32; 3]) -> Tree {
        Tree {
            id: id.into(),
            position,
            growth: 0.0,
            is_golden: false,
            planted_at_ms: 0.0,
            last_watered_ms: 0.0,
            is_watered: false,
        }
    }

    #[test]
    fn test_burst_waters_only_in_radius() {
        let mut garden = Garden::default();
        // cloud-3 sits at (0, 3, 5).
        garden.trees.push(tree_at("near", [1.0, 0.0, 5.0]));
        garden.trees.push(tree_at("far", [6.0, 0.0, 5.0]));

        let now = 42_000.0;
        assert!(burst_cloud(&mut garden, "cloud-3", now));

        let near = &garden.trees[0];
        assert!(near.is_watered);
        assert_eq!(near.last_watered_ms, now);

        let far = &garden.trees[1];
        assert!(!far.is_watered);
        assert_eq!(far.last_watered_ms, 0.0);

        let cloud = garden.cloud("cloud-3").unwrap();
        assert!(cloud.is_raining);
        assert_eq!(cloud.cooldown_ms, CLOUD_COOLDOWN_MS);
    }

    #[test]
    fn test_burst_rejected_while_cooling_down() {
        let mut garden = Garden::default();
        assert!(burst_cloud(&mut garden, "cloud-1", 0.0));
        assert!(!burst_cloud(&mut garden, "cloud-1", 1.0));

        // Another cloud is unaffected by the first one's cooldown.
        assert!(burst_cloud(&mut garden, "cloud-2", 1.0));
    }

    #[test]
    fn test_unknown_cloud_is_a_noop() {
        let mut garden = Garden::default();
        assert!(!burst_cloud(&mut garden, "cloud-99", 0.0));
        assert!(garden.clouds.iter().all(|c| !c.is_raining));
    }

    #[test]
    fn test_rain_window_and_cooldown_decay_independently() {
        let mut garden = Garden::default();
        burst_cloud(&mut garden, "cloud-1", 0.0);

        // After 2000ms the rain stops but the cooldown is still running.
        tick_clouds(&mut garden, 2_000.0);
        let cloud = garden.cloud("cloud-1").unwrap();
        assert!(!cloud.is_raining);
        assert_eq!(cloud.cooldown_ms, 3_000.0);

        // After the full 5000ms the cloud is usable again.
        tick_clouds(&mut garden, 3_000.0);
        let cloud = garden.cloud("cloud-1").unwrap();
        assert_eq!(cloud.cooldown_ms, 0.0);
        assert!(burst_cloud(&mut garden, "cloud-1", 10_000.0));
    }

    #[test]
    fn test_reburst_restarts_rain_window() {
        let mut garden = Garden::default();
        burst_cloud(&mut garden, "cloud-1", 0.0);
        tick_clouds(&mut garden, 5_000.0);

        // Second burst: the rain window starts fresh rather than inheriting
        // whatever the stale one left behind.
        assert!(burst_cloud(&mut garden, "cloud-1", 5_000.0));
        let cloud = garden.cloud("cloud-1").unwrap();
        assert!(cloud.is_raining);
        assert_eq!(cloud.rain_remaining_ms, RAIN_DURATION_MS);

        tick_clouds(&mut garden, 1_999.0);
        assert!(garden.cloud("cloud-1").unwrap().is_raining);
        tick_clouds(&mut garden, 1.0);
        assert!(!garden.cloud("cloud-1").unwrap().is_raining);
    }

    #[test]
    fn test_tick_never_goes_negative() {
        let mut garden = Garden::default();
        tick_clouds(&mut garden, 99_999.0);
        for cloud in &garden.clouds {
            assert_eq!(cloud.cooldown_ms, 0.0);
            assert_eq!(cloud.rain_remaining_ms, 0.0);
        }
    }
}
