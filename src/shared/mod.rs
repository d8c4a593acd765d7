//! Shared components, resources, events, and constants for Verdant Grove.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// SEEDS, PLANTS & TOOLS — closed enumerations
// ═══════════════════════════════════════════════════════════════════════

/// Every seed packet the player can hold. Unknown seed kinds are a type
/// error here rather than a silent runtime no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    Tree,
    Flower,
    Bush,
    SmallTree,
}

impl SeedKind {
    /// `None` means the seed grows into a full Tree entity rather than a Plant.
    pub fn plant_kind(self) -> Option<PlantKind> {
        match self {
            SeedKind::Tree => None,
            SeedKind::Flower => Some(PlantKind::Flower),
            SeedKind::Bush => Some(PlantKind::Bush),
            SeedKind::SmallTree => Some(PlantKind::SmallTree),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    Flower,
    Bush,
    SmallTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    WateringCan,
    Fertilizer,
    PruningShears,
}

// ═══════════════════════════════════════════════════════════════════════
// GARDEN ENTITIES
// ═══════════════════════════════════════════════════════════════════════

/// A planted tree. `growth` is a stored floor: the render layer displays
/// `max(growth, compute_growth(..))`, so growth ratchets upward from tool
/// use and never visibly regresses from the passage of time alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub id: String,
    pub position: [f32; 3],
    pub growth: f32,
    pub is_golden: bool,
    pub planted_at_ms: f64,
    pub last_watered_ms: f64,
    pub is_watered: bool,
}

impl Tree {
    pub fn water(&mut self, now_ms: f64) {
        self.last_watered_ms = now_ms;
        self.is_watered = true;
    }

    pub fn boost_growth(&mut self, amount: f32) {
        self.growth = (self.growth + amount).min(1.0);
    }
}

/// A smaller planting (flower, bush, or sapling). Same shape as [`Tree`]
/// plus a kind tag; trees alone can roll golden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub position: [f32; 3],
    pub kind: PlantKind,
    pub growth: f32,
    pub planted_at_ms: f64,
    pub last_watered_ms: f64,
    pub is_watered: bool,
}

impl Plant {
    pub fn water(&mut self, now_ms: f64) {
        self.last_watered_ms = now_ms;
        self.is_watered = true;
    }

    pub fn boost_growth(&mut self, amount: f32) {
        self.growth = (self.growth + amount).min(1.0);
    }
}

/// A rain cloud hovering over the garden. `cooldown_ms` gates reuse;
/// `rain_remaining_ms` drives the transient rain visual. The two decay
/// independently every tick, so a fresh burst restarts the rain window
/// without stale timers racing the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub id: String,
    pub position: [f32; 3],
    pub is_raining: bool,
    pub cooldown_ms: f32,
    #[serde(default)]
    pub rain_remaining_ms: f32,
}

impl Cloud {
    pub fn new(id: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            id: id.into(),
            position,
            is_raining: false,
            cooldown_ms: 0.0,
            rain_remaining_ms: 0.0,
        }
    }
}

/// Health classification driven by time-since-last-watered. The render
/// layer maps each band to a tint; golden trees override the banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthBand {
    Golden,
    Healthy,
    Normal,
    Unhealthy,
}

impl HealthBand {
    pub fn color(self) -> Color {
        match self {
            HealthBand::Golden => Color::srgb_u8(255, 215, 0),
            HealthBand::Healthy => Color::srgb_u8(74, 222, 128),
            HealthBand::Normal => Color::srgb_u8(132, 204, 22),
            HealthBand::Unhealthy => Color::srgb_u8(239, 68, 68),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCounts {
    pub tree: u32,
    pub flower: u32,
    pub bush: u32,
    pub small_tree: u32,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            tree: 5,
            flower: 10,
            bush: 8,
            small_tree: 3,
        }
    }
}

impl SeedCounts {
    pub const ZERO: Self = Self {
        tree: 0,
        flower: 0,
        bush: 0,
        small_tree: 0,
    };

    pub fn get(&self, kind: SeedKind) -> u32 {
        match kind {
            SeedKind::Tree => self.tree,
            SeedKind::Flower => self.flower,
            SeedKind::Bush => self.bush,
            SeedKind::SmallTree => self.small_tree,
        }
    }

    pub fn get_mut(&mut self, kind: SeedKind) -> &mut u32 {
        match kind {
            SeedKind::Tree => &mut self.tree,
            SeedKind::Flower => &mut self.flower,
            SeedKind::Bush => &mut self.bush,
            SeedKind::SmallTree => &mut self.small_tree,
        }
    }

    pub fn add(&mut self, other: &SeedCounts) {
        self.tree += other.tree;
        self.flower += other.flower;
        self.bush += other.bush;
        self.small_tree += other.small_tree;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCounts {
    pub watering_can: u32,
    pub fertilizer: u32,
    pub pruning_shears: u32,
}

impl Default for ToolCounts {
    fn default() -> Self {
        Self {
            watering_can: 3,
            fertilizer: 2,
            pruning_shears: 1,
        }
    }
}

impl ToolCounts {
    pub const ZERO: Self = Self {
        watering_can: 0,
        fertilizer: 0,
        pruning_shears: 0,
    };

    pub fn get(&self, kind: ToolKind) -> u32 {
        match kind {
            ToolKind::WateringCan => self.watering_can,
            ToolKind::Fertilizer => self.fertilizer,
            ToolKind::PruningShears => self.pruning_shears,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut u32 {
        match kind {
            ToolKind::WateringCan => &mut self.watering_can,
            ToolKind::Fertilizer => &mut self.fertilizer,
            ToolKind::PruningShears => &mut self.pruning_shears,
        }
    }

    pub fn add(&mut self, other: &ToolCounts) {
        self.watering_can += other.watering_can;
        self.fertilizer += other.fertilizer;
        self.pruning_shears += other.pruning_shears;
    }
}

/// Seed packets, tools, and special item identifiers the player owns.
/// Counts never go negative: mutators refuse rather than underflow.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GardenInventory {
    pub seeds: SeedCounts,
    pub tools: ToolCounts,
    pub special_items: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// GARDEN — the root aggregate
// ═══════════════════════════════════════════════════════════════════════

/// All live garden entities. Mutated only through the operations in the
/// garden domain; snapshotted verbatim by the save domain.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Garden {
    pub trees: Vec<Tree>,
    pub plants: Vec<Plant>,
    pub clouds: Vec<Cloud>,
    /// Reserved for a future water-reservoir mechanic; nothing reads it yet.
    pub water_level: f32,
}

impl Default for Garden {
    fn default() -> Self {
        Self {
            trees: Vec::new(),
            plants: Vec::new(),
            clouds: default_clouds(),
            water_level: 100.0,
        }
    }
}

impl Garden {
    /// Positions of every planted entity, for spacing checks.
    pub fn occupied_positions(&self) -> Vec<[f32; 3]> {
        self.trees
            .iter()
            .map(|t| t.position)
            .chain(self.plants.iter().map(|p| p.position))
            .collect()
    }

    pub fn cloud(&self, id: &str) -> Option<&Cloud> {
        self.clouds.iter().find(|c| c.id == id)
    }
}

/// The fixed cloud set: exactly three, spawned once at initialization.
pub fn default_clouds() -> Vec<Cloud> {
    vec![
        Cloud::new("cloud-1", [-5.0, 3.0, -2.0]),
        Cloud::new("cloud-2", [5.0, 3.0, 2.0]),
        Cloud::new("cloud-3", [0.0, 3.0, 5.0]),
    ]
}

/// Daily check-in bookkeeping. `last_check_in_ms` only ever advances,
/// and only when a reward is actually collected.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DailyCheckIn {
    pub last_check_in_ms: f64,
    pub streak: u32,
}

impl Default for DailyCheckIn {
    fn default() -> Self {
        Self {
            last_check_in_ms: now_ms(),
            streak: 0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — the only mutation surface exposed to UI/scene layers
// ═══════════════════════════════════════════════════════════════════════

/// Plant one seed. `position: None` asks the engine to pick a random spot
/// that clears the minimum spacing; `Some` positions are planted as-is
/// (the sender is expected to have validated them).
#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub seed: SeedKind,
    pub position: Option<[f32; 3]>,
}

/// The player clicked a cloud: water everything under it.
#[derive(Event, Debug, Clone)]
pub struct CloudBurstEvent {
    pub cloud_id: String,
}

/// Consume one tool and apply its garden-wide effect.
#[derive(Event, Debug, Clone)]
pub struct UseToolEvent {
    pub tool: ToolKind,
}

/// Attempt the daily check-in. Silently ignored if collected within 24h.
#[derive(Event, Debug, Clone)]
pub struct CollectRewardEvent;

/// Player-facing feedback line for the external UI layer.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const GARDEN_RADIUS: f32 = 8.0;
pub const MIN_PLANT_SPACING: f32 = 1.5;
pub const WATER_RADIUS: f32 = 3.0;

pub const CLOUD_COOLDOWN_MS: f32 = 5_000.0;
pub const RAIN_DURATION_MS: f32 = 2_000.0;
pub const CLOUD_COUNT: usize = 3;

pub const HOUR_MS: f64 = 60.0 * 60.0 * 1000.0;
pub const DAY_MS: f64 = 24.0 * HOUR_MS;
/// A plant reaches full base growth after a week of real time.
pub const GROWTH_PERIOD_MS: f64 = 7.0 * DAY_MS;
/// Watered within this window → 1.5x growth and a Healthy band.
pub const WATERING_BONUS_MS: f64 = 24.0 * HOUR_MS;
/// Unwatered beyond this window → 0.5x growth and an Unhealthy band.
pub const NEGLECT_THRESHOLD_MS: f64 = 48.0 * HOUR_MS;

pub const TREE_GROWTH_RATE: f32 = 0.6;
pub const PLANT_GROWTH_RATE: f32 = 0.8;

pub const GOLDEN_TREE_CHANCE: f32 = 0.03;
pub const FERTILIZER_BOOST: f32 = 0.3;
pub const PRUNING_BOOST: f32 = 0.2;

pub const AUTOSAVE_INTERVAL_SECS: f32 = 30.0;

// ═══════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Current wall-clock time in milliseconds since the Unix epoch.
/// The client clock is trusted; all growth math keys off these stamps.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Distance in the horizontal (x,z) plane; the y component is ignored for
/// both spacing checks and cloud watering.
pub fn horizontal_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dz = a[2] - b[2];
    (dx * dx + dz * dz).sqrt()
}
