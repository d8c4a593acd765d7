//! Daily check-in rewards — streak tracking and the capped reward curves.

use bevy::prelude::*;

use crate::shared::*;

/// What one day's check-in grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardBundle {
    pub seeds: SeedCounts,
    pub tools: ToolCounts,
}

/// The reward curve: step functions of the streak, each capped so a long
/// streak settles into a steady daily income rather than growing forever.
pub fn rewards_for_streak(streak: u32) -> RewardBundle {
    RewardBundle {
        seeds: SeedCounts {
            tree: (2 + streak / 3).min(5),
            flower: (5 + streak / 2).min(10),
            bush: (3 + streak / 2).min(8),
            small_tree: (1 + streak / 5).min(3),
        },
        tools: ToolCounts {
            watering_can: (1 + streak / 7).min(3),
            fertilizer: (streak / 10).min(2),
            pruning_shears: (streak / 14).min(1),
        },
    }
}

/// Pure eligibility predicate: a full day must have passed since the last
/// collection. No mutation.
pub fn reward_available(check_in: &DailyCheckIn, now_ms: f64) -> bool {
    now_ms - check_in.last_check_in_ms >= DAY_MS
}

/// Collect today's reward if eligible. Advances the streak first, grants
/// the rewards for the NEW streak additively, and stamps the check-in
/// time. Returns `None` without touching anything when ineligible.
pub fn collect_daily_reward(
    check_in: &mut DailyCheckIn,
    inventory: &mut GardenInventory,
    now_ms: f64,
) -> Option<RewardBundle> {
    if !reward_available(check_in, now_ms) {
        return None;
    }

    check_in.streak += 1;
    check_in.last_check_in_ms = now_ms;

    let bundle = rewards_for_streak(check_in.streak);
    inventory.seeds.add(&bundle.seeds);
    inventory.tools.add(&bundle.tools);
    Some(bundle)
}

/// Listen for [`CollectRewardEvent`] from the UI layer.
pub fn handle_collect_reward(
    mut collect_events: EventReader<CollectRewardEvent>,
    mut check_in: ResMut<DailyCheckIn>,
    mut inventory: ResMut<GardenInventory>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for _ in collect_events.read() {
        match collect_daily_reward(&mut check_in, &mut inventory, now_ms()) {
            Some(bundle) => {
                info!(
                    "[Rewards] Day {} streak collected: {:?} seeds, {:?} tools",
                    check_in.streak, bundle.seeds, bundle.tools
                );
                toasts.send(ToastEvent {
                    message: format!("Daily reward collected! Streak: {}", check_in.streak),
                });
            }
            None => {
                // Too early — stay silent; the UI greys the button out anyway.
            }
        }
    }
}

pub struct RewardsPlugin;

impl Plugin for RewardsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_collect_reward);
    }
}
