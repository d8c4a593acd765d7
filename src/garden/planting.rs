//! Seed planting — consumes inventory and appends new garden entities.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

use super::placement::find_open_position;

/// Plant one seed at `position`. Returns false (and changes nothing) when
/// the matching seed count is zero.
///
/// Spacing is NOT enforced here: callers validate candidates through the
/// placement module first, or hand the engine a `None` position via
/// [`PlantSeedEvent`] and let [`handle_plant_seed`] pick a clear spot.
pub fn plant_seed(
    garden: &mut Garden,
    inventory: &mut GardenInventory,
    seed: SeedKind,
    position: [f32; 3],
    now_ms: f64,
    rng: &mut impl Rng,
) -> bool {
    let count = inventory.seeds.get_mut(seed);
    if *count == 0 {
        return false;
    }
    *count -= 1;

    match seed.plant_kind() {
        None => {
            let is_golden = rng.gen::<f32>() < GOLDEN_TREE_CHANCE;
            garden.trees.push(Tree {
                id: entity_id("tree", now_ms, rng),
                position,
                growth: 0.0,
                is_golden,
                planted_at_ms: now_ms,
                last_watered_ms: now_ms,
                is_watered: false,
            });
        }
        Some(kind) => {
            garden.plants.push(Plant {
                id: entity_id("plant", now_ms, rng),
                position,
                kind,
                growth: 0.0,
                planted_at_ms: now_ms,
                last_watered_ms: now_ms,
                is_watered: false,
            });
        }
    }
    true
}

/// Unique-enough entity id: timestamp plus a random suffix.
fn entity_id(prefix: &str, now_ms: f64, rng: &mut impl Rng) -> String {
    format!("{}-{}-{:04}", prefix, now_ms as i64, rng.gen_range(0..10_000))
}

/// Listen for [`PlantSeedEvent`] and plant. A `None` position is resolved
/// through the placement retry loop; a full garden drops the request with
/// a log line rather than stacking plantings.
pub fn handle_plant_seed(
    mut plant_events: EventReader<PlantSeedEvent>,
    mut garden: ResMut<Garden>,
    mut inventory: ResMut<GardenInventory>,
) {
    let mut rng = rand::thread_rng();
    for ev in plant_events.read() {
        let position = match ev.position {
            Some(p) => p,
            None => match find_open_position(&garden, &mut rng) {
                Some(p) => p,
                None => {
                    info!("[Garden] No open spot for {:?} seed; garden is full", ev.seed);
                    continue;
                }
            },
        };

        let now = now_ms();
        if plant_seed(&mut garden, &mut inventory, ev.seed, position, now, &mut rng) {
            info!(
                "[Garden] Planted {:?} at ({:.1}, {:.1}); {} entities total",
                ev.seed,
                position[0],
                position[2],
                garden.trees.len() + garden.plants.len()
            );
        }
    }
}
