//! Tool use — one-shot consumables with garden-wide effects.

use bevy::prelude::*;

use crate::shared::*;

use super::growth::is_healthy;

/// Consume one tool and apply its effect. Returns false (nothing changes)
/// when the tool count is already zero.
///
/// Pruning shears boost only the entities watered within the last 48h;
/// neglected ones are left in place unboosted rather than removed, so the
/// only way plantings ever disappear is a full reset.
pub fn use_tool(
    garden: &mut Garden,
    inventory: &mut GardenInventory,
    tool: ToolKind,
    now_ms: f64,
) -> bool {
    let count = inventory.tools.get_mut(tool);
    if *count == 0 {
        return false;
    }
    *count -= 1;

    match tool {
        ToolKind::WateringCan => {
            for tree in &mut garden.trees {
                tree.water(now_ms);
            }
            for plant in &mut garden.plants {
                plant.water(now_ms);
            }
        }
        ToolKind::Fertilizer => {
            for tree in &mut garden.trees {
                tree.boost_growth(FERTILIZER_BOOST);
            }
            for plant in &mut garden.plants {
                plant.boost_growth(FERTILIZER_BOOST);
            }
        }
        ToolKind::PruningShears => {
            for tree in &mut garden.trees {
                if is_healthy(tree.last_watered_ms, now_ms) {
                    tree.boost_growth(PRUNING_BOOST);
                }
            }
            for plant in &mut garden.plants {
                if is_healthy(plant.last_watered_ms, now_ms) {
                    plant.boost_growth(PRUNING_BOOST);
                }
            }
        }
    }
    true
}

/// Listen for [`UseToolEvent`] from the UI layer.
pub fn handle_use_tool(
    mut tool_events: EventReader<UseToolEvent>,
    mut garden: ResMut<Garden>,
    mut inventory: ResMut<GardenInventory>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in tool_events.read() {
        if use_tool(&mut garden, &mut inventory, ev.tool, now_ms()) {
            let message = match ev.tool {
                ToolKind::WateringCan => "Watering can used! Every plant got a drink.",
                ToolKind::Fertilizer => "Fertilizer spread! The whole garden perks up.",
                ToolKind::PruningShears => "Pruned! Well-watered plants surge ahead.",
            };
            info!("[Garden] {:?} used, {} left", ev.tool, inventory.tools.get(ev.tool));
            toasts.send(ToastEvent {
                message: message.to_string(),
            });
        }
    }
}
