//! Garden domain — planting, growth, clouds, watering, and tool use.
//!
//! Owns every mutation of the [`Garden`] resource. The scene/UI layers
//! talk to it exclusively through the events declared in crate::shared
//! and read state back each frame (growth is computed per entity per
//! frame from timestamps, never stored eagerly).

use bevy::prelude::*;

use crate::shared::*;

pub mod clouds;
pub mod growth;
pub mod placement;
pub mod planting;
pub mod tools;

pub struct GardenPlugin;

impl Plugin for GardenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                // Frame-rate-bound decay of cloud cooldowns and rain windows.
                clouds::tick_clouds_system,
                // User actions, routed through shared events.
                planting::handle_plant_seed,
                clouds::handle_cloud_burst,
                tools::handle_use_tool,
            ),
        );
    }
}
