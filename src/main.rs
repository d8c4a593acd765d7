mod garden;
mod rewards;
mod save;
mod shared;

use bevy::prelude::*;
use bevy::window::PresentMode;

use shared::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Verdant Grove".into(),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Shared resources
        .init_resource::<Garden>()
        .init_resource::<GardenInventory>()
        .init_resource::<DailyCheckIn>()
        // Shared events
        .add_event::<PlantSeedEvent>()
        .add_event::<CloudBurstEvent>()
        .add_event::<UseToolEvent>()
        .add_event::<CollectRewardEvent>()
        .add_event::<ToastEvent>()
        // Domain plugins
        .add_plugins(garden::GardenPlugin)
        .add_plugins(rewards::RewardsPlugin)
        .add_plugins(save::SavePlugin)
        // The 3D scene and UI layers attach their own plugins here; the
        // engine only provides the camera anchor they expect.
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 10.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
