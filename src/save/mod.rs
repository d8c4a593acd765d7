//! Persistence gateway — one JSON snapshot of the whole game state.
//!
//! Native builds keep the snapshot in a `saves/` directory next to the
//! executable; wasm builds use one localStorage key. Every failure path
//! is fail-soft: a broken or missing store logs a warning and the game
//! keeps playing on whatever state it already has.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;
#[cfg(not(target_arch = "wasm32"))]
const SAVE_FILE_NAME: &str = "garden.json";
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "verdant_garden_state";

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT FORMAT
// ═══════════════════════════════════════════════════════════════════════

/// The full persisted aggregate. Every field carries `#[serde(default)]`
/// so snapshots from older builds merge on load: missing fields keep
/// their defaults, unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub garden: Garden,
    #[serde(default)]
    pub inventory: GardenInventory,
    #[serde(default)]
    pub check_in: DailyCheckIn,
}

fn current_version() -> u32 {
    SAVE_VERSION
}

impl SaveFile {
    fn capture(garden: &Garden, inventory: &GardenInventory, check_in: &DailyCheckIn) -> Self {
        Self {
            version: SAVE_VERSION,
            garden: garden.clone(),
            inventory: inventory.clone(),
            check_in: check_in.clone(),
        }
    }

    /// Apply a loaded snapshot onto the live resources. A snapshot with no
    /// clouds (pre-cloud saves, hand-edited files) gets the default set
    /// back so the invariant of exactly three clouds holds post-load.
    fn apply(
        self,
        garden: &mut Garden,
        inventory: &mut GardenInventory,
        check_in: &mut DailyCheckIn,
    ) {
        *garden = self.garden;
        *inventory = self.inventory;
        *check_in = self.check_in;
        if garden.clouds.is_empty() {
            garden.clouds = default_clouds();
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Sent by UI or the autosave timer to trigger a save.
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

/// Sent by UI to reload the persisted snapshot.
#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent;

/// Restore defaults and erase the persisted snapshot.
#[derive(Event, Debug, Clone)]
pub struct ResetGameEvent;

/// Sent after a save completes (success or failure).
#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Sent after a load completes.
#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// Wall-clock autosave cadence, independent of the frame tick.
#[derive(Resource, Debug)]
pub struct AutosaveTimer {
    pub timer: Timer,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(AUTOSAVE_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STORE BACKENDS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_path() -> PathBuf {
    saves_directory().join(SAVE_FILE_NAME)
}

#[cfg(not(target_arch = "wasm32"))]
fn write_snapshot(json: &str) -> Result<(), String> {
    let dir = saves_directory();
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| format!("Could not create saves directory: {}", e))?;
    }
    let path = snapshot_path();
    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

/// `Ok(None)` means no snapshot exists yet — not an error.
#[cfg(not(target_arch = "wasm32"))]
fn read_snapshot() -> Result<Option<String>, String> {
    let path = snapshot_path();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))
}

#[cfg(not(target_arch = "wasm32"))]
fn erase_snapshot() -> Result<(), String> {
    let path = snapshot_path();
    if path.exists() {
        fs::remove_file(&path).map_err(|e| format!("Delete failed: {}", e))?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No window object".to_string())?
        .local_storage()
        .map_err(|_| "localStorage unavailable".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn write_snapshot(json: &str) -> Result<(), String> {
    local_storage()?
        .set_item(STORAGE_KEY, json)
        .map_err(|_| "localStorage write failed".to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_snapshot() -> Result<Option<String>, String> {
    local_storage()?
        .get_item(STORAGE_KEY)
        .map_err(|_| "localStorage read failed".to_string())
}

#[cfg(target_arch = "wasm32")]
fn erase_snapshot() -> Result<(), String> {
    local_storage()?
        .remove_item(STORAGE_KEY)
        .map_err(|_| "localStorage delete failed".to_string())
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE / LOAD LOGIC
// ═══════════════════════════════════════════════════════════════════════

fn save_state(
    garden: &Garden,
    inventory: &GardenInventory,
    check_in: &DailyCheckIn,
) -> Result<(), String> {
    let file = SaveFile::capture(garden, inventory, check_in);
    let json =
        serde_json::to_string_pretty(&file).map_err(|e| format!("Serialization failed: {}", e))?;
    write_snapshot(&json)
}

/// Load the snapshot onto the live resources. Missing snapshot → Ok(false)
/// and state untouched; malformed snapshot → Err with state untouched.
fn load_state(
    garden: &mut Garden,
    inventory: &mut GardenInventory,
    check_in: &mut DailyCheckIn,
) -> Result<bool, String> {
    let Some(json) = read_snapshot()? else {
        return Ok(false);
    };
    let file: SaveFile =
        serde_json::from_str(&json).map_err(|e| format!("Deserialization failed: {}", e))?;

    // Version check — future versions can add migration here
    if file.version != SAVE_VERSION {
        warn!(
            "Snapshot has version {} but current version is {}. Attempting to load anyway.",
            file.version, SAVE_VERSION
        );
    }

    file.apply(garden, inventory, check_in);
    Ok(true)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// One load attempt at startup, mirroring the session-restore behavior of
/// the shipped game. Failures are logged and the defaults stand.
fn load_on_boot(
    mut garden: ResMut<Garden>,
    mut inventory: ResMut<GardenInventory>,
    mut check_in: ResMut<DailyCheckIn>,
) {
    match load_state(&mut garden, &mut inventory, &mut check_in) {
        Ok(true) => info!(
            "[Save] Session restored: {} trees, {} plants, streak {}",
            garden.trees.len(),
            garden.plants.len(),
            check_in.streak
        ),
        Ok(false) => info!("[Save] No snapshot found; starting fresh"),
        Err(e) => warn!("[Save] Snapshot restore failed, keeping defaults: {}", e),
    }
}

/// Wall-clock autosave: every 30 seconds, route a save through the same
/// request event manual saves use.
fn tick_autosave(
    time: Res<Time>,
    mut autosave: ResMut<AutosaveTimer>,
    mut save_writer: EventWriter<SaveRequestEvent>,
) {
    if autosave.timer.tick(time.delta()).just_finished() {
        save_writer.send(SaveRequestEvent);
    }
}

fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    garden: Res<Garden>,
    inventory: Res<GardenInventory>,
    check_in: Res<DailyCheckIn>,
) {
    // Collapse bursts of requests (autosave firing alongside a manual
    // save) into a single snapshot write.
    if save_events.read().count() == 0 {
        return;
    }

    match save_state(&garden, &inventory, &check_in) {
        Ok(()) => {
            info!("[Save] Snapshot written");
            complete_events.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("[Save] Snapshot write FAILED: {}", e);
            complete_events.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e),
            });
        }
    }
}

fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
    mut garden: ResMut<Garden>,
    mut inventory: ResMut<GardenInventory>,
    mut check_in: ResMut<DailyCheckIn>,
) {
    for _ in load_events.read() {
        match load_state(&mut garden, &mut inventory, &mut check_in) {
            Ok(loaded) => {
                info!("[Save] Load request finished (snapshot present: {})", loaded);
                complete_events.send(LoadCompleteEvent {
                    success: true,
                    error_message: None,
                });
            }
            Err(e) => {
                warn!("[Save] Load FAILED, state unchanged: {}", e);
                complete_events.send(LoadCompleteEvent {
                    success: false,
                    error_message: Some(e),
                });
            }
        }
    }
}

/// Full reset: default resources, snapshot erased.
fn handle_reset(
    mut reset_events: EventReader<ResetGameEvent>,
    mut garden: ResMut<Garden>,
    mut inventory: ResMut<GardenInventory>,
    mut check_in: ResMut<DailyCheckIn>,
) {
    for _ in reset_events.read() {
        *garden = Garden::default();
        *inventory = GardenInventory::default();
        *check_in = DailyCheckIn::default();
        if let Err(e) = erase_snapshot() {
            warn!("[Save] Could not erase snapshot during reset: {}", e);
        }
        info!("[Save] Game reset to defaults");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosaveTimer>()
            .add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<ResetGameEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            .add_systems(Startup, load_on_boot)
            .add_systems(
                Update,
                (
                    tick_autosave,
                    handle_save_request,
                    handle_load_request,
                    handle_reset,
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trip() {
        let mut garden = Garden::default();
        garden.trees.push(Tree {
            id: "tree-1".into(),
            position: [1.0, 0.0, -2.0],
            growth: 0.4,
            is_golden: true,
            planted_at_ms: 123.0,
            last_watered_ms: 456.0,
            is_watered: true,
        });
        let mut inventory = GardenInventory::default();
        inventory.seeds.tree = 1;
        inventory.special_items.push("rainbow_rose".to_string());
        let check_in = DailyCheckIn {
            last_check_in_ms: 789.0,
            streak: 4,
        };

        let json =
            serde_json::to_string(&SaveFile::capture(&garden, &inventory, &check_in)).unwrap();
        let file: SaveFile = serde_json::from_str(&json).unwrap();

        let mut garden2 = Garden::default();
        let mut inventory2 = GardenInventory::default();
        let mut check_in2 = DailyCheckIn {
            last_check_in_ms: 0.0,
            streak: 0,
        };
        file.apply(&mut garden2, &mut inventory2, &mut check_in2);

        assert_eq!(garden2.trees.len(), 1);
        assert!(garden2.trees[0].is_golden);
        assert_eq!(garden2.clouds.len(), CLOUD_COUNT);
        assert_eq!(inventory2.seeds.tree, 1);
        assert_eq!(inventory2.special_items, vec!["rainbow_rose".to_string()]);
        assert_eq!(check_in2.streak, 4);
        assert_eq!(check_in2.last_check_in_ms, 789.0);
    }

    #[test]
    fn test_merge_on_load_tolerates_missing_and_extra_fields() {
        // An almost-empty snapshot: everything falls back to defaults.
        let file: SaveFile = serde_json::from_str(r#"{ "daily_streak_legacy": 9 }"#).unwrap();
        assert_eq!(file.version, SAVE_VERSION);
        assert_eq!(file.inventory.seeds.tree, 5);
        assert_eq!(file.garden.clouds.len(), CLOUD_COUNT);
    }

    #[test]
    fn test_apply_restores_default_clouds_when_snapshot_has_none() {
        let json = r#"{ "version": 1, "garden": { "trees": [], "plants": [], "clouds": [], "water_level": 55.0 } }"#;
        let file: SaveFile = serde_json::from_str(json).unwrap();

        let mut garden = Garden::default();
        let mut inventory = GardenInventory::default();
        let mut check_in = DailyCheckIn {
            last_check_in_ms: 0.0,
            streak: 0,
        };
        file.apply(&mut garden, &mut inventory, &mut check_in);

        assert_eq!(garden.clouds.len(), CLOUD_COUNT);
        assert_eq!(garden.water_level, 55.0);
    }

    #[test]
    fn test_malformed_snapshot_is_an_error_not_a_panic() {
        let result: Result<SaveFile, _> = serde_json::from_str("{ not json");
        assert!(result.is_err());
    }
}
