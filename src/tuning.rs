//! Data-driven game balance
//!
//! Every number a screen uses lives here with its default. Partial JSON
//! overrides are accepted: missing fields keep their defaults.

use serde::{Deserialize, Serialize};

/// Day 1: reaction timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionTuning {
    /// Shortest wait before the go signal (inclusive)
    pub min_delay_ms: u32,
    /// Longest wait before the go signal (exclusive)
    pub max_delay_ms: u32,
    /// Reactions strictly faster than this succeed
    pub success_threshold_ms: u32,
}

impl Default for ReactionTuning {
    fn default() -> Self {
        Self {
            min_delay_ms: 2000,
            max_delay_ms: 5000,
            success_threshold_ms: 800,
        }
    }
}

/// Day 2: radial defense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldTuning {
    pub duration_ms: u32,
    pub max_health: u32,
    pub hit_damage: u32,
    pub spawn_interval_ms: u32,
    /// Spawn distance from the core (px)
    pub spawn_distance: f32,
    /// Inward speed (px/s)
    pub enemy_speed: f32,
    /// Radius of the shield's centerline (px)
    pub shield_radius: f32,
    /// Half thickness of the blocking band around `shield_radius` (px)
    pub shield_band: f32,
    /// Half of the shield's angular coverage (degrees)
    pub shield_half_width_deg: f32,
    /// Enemies closer than this hit the core (px)
    pub core_radius: f32,
}

impl Default for ShieldTuning {
    fn default() -> Self {
        Self {
            duration_ms: 15_000,
            max_health: 100,
            hit_damage: 20,
            spawn_interval_ms: 800,
            spawn_distance: 250.0,
            enemy_speed: 90.0,
            shield_radius: 100.0,
            shield_band: 20.0,
            shield_half_width_deg: 45.0,
            core_radius: 30.0,
        }
    }
}

/// Item identity for the catch game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    Sushi,
    Noodles,
    Flower,
    Broccoli,
    Onion,
}

impl FoodKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            FoodKind::Sushi => "🍣",
            FoodKind::Noodles => "🍜",
            FoodKind::Flower => "🌸",
            FoodKind::Broccoli => "🥦",
            FoodKind::Onion => "🧅",
        }
    }
}

/// Whether catching an item helps or hurts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemTag {
    Good,
    Bad,
}

/// One row of the catch game's spawn table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub kind: FoodKind,
    /// Signed score change when caught
    pub score: i32,
    pub tag: ItemTag,
    /// Relative spawn weight
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// Day 3: catch/dodge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchTuning {
    pub spawn_interval_ms: u32,
    /// Spawn column range (% of width, max exclusive)
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Spawn row (% of height, negative is above the top edge)
    pub spawn_y: f32,
    /// Fall speed range (% of height per second, max exclusive)
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
    /// Vertical catch band (% of height, both exclusive)
    pub catch_top: f32,
    pub catch_bottom: f32,
    /// Horizontal reach of the catcher (% of width, exclusive)
    pub catch_half_width: f32,
    /// Items below this row are gone
    pub despawn_y: f32,
    pub target_score: u32,
    /// Pointer is kept this many px inside the container edges
    pub pointer_padding_px: f32,
    pub items: Vec<ItemSpec>,
}

impl Default for CatchTuning {
    fn default() -> Self {
        let item = |kind, score, tag| ItemSpec {
            kind,
            score,
            tag,
            weight: 1,
        };
        Self {
            spawn_interval_ms: 600,
            spawn_x_min: 5.0,
            spawn_x_max: 95.0,
            spawn_y: -10.0,
            min_fall_speed: 30.0,
            max_fall_speed: 60.0,
            catch_top: 85.0,
            catch_bottom: 95.0,
            catch_half_width: 10.0,
            despawn_y: 100.0,
            target_score: 100,
            pointer_padding_px: 20.0,
            items: vec![
                item(FoodKind::Sushi, 10, ItemTag::Good),
                item(FoodKind::Noodles, 15, ItemTag::Good),
                item(FoodKind::Flower, 10, ItemTag::Good),
                item(FoodKind::Broccoli, -10, ItemTag::Bad),
                item(FoodKind::Onion, -5, ItemTag::Bad),
            ],
        }
    }
}

/// A point of interest along the drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Progress (%) at which the landmark is passed
    pub at: f32,
    pub label: String,
}

/// Day 4: drive accumulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTuning {
    /// Speed gained per second while the throttle is held (%/s²)
    pub acceleration: f32,
    /// Speed lost per second while released (%/s²)
    pub deceleration: f32,
    /// Top speed (%/s)
    pub max_speed: f32,
    pub notice_ms: u32,
    /// Sorted by `at`
    pub landmarks: Vec<Landmark>,
}

impl Default for DriveTuning {
    fn default() -> Self {
        let landmark = |at, label: &str| Landmark {
            at,
            label: label.to_string(),
        };
        Self {
            acceleration: 18.0,
            deceleration: 9.0,
            max_speed: 9.0,
            notice_ms: 2000,
            landmarks: vec![
                landmark(20.0, "Late Night Office"),
                landmark(50.0, "Burger Stop"),
                landmark(80.0, "Third Wave Coffee"),
            ],
        }
    }
}

/// Day 5: scratch to reveal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchTuning {
    pub brush_radius: f32,
    /// Chance that a scratch event triggers a full transparency scan
    pub scan_probability: f32,
    /// Pixels with alpha below this count as cleared
    pub clear_alpha: u8,
    /// Cleared fraction that must be exceeded to reveal
    pub reveal_fraction: f32,
}

impl Default for ScratchTuning {
    fn default() -> Self {
        Self {
            brush_radius: 20.0,
            scan_probability: 0.2,
            clear_alpha: 128,
            reveal_fraction: 0.6,
        }
    }
}

/// Day 6: the question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalTuning {
    pub show_ms: u32,
    pub burst_every_ms: u32,
    /// Particles per emitter at the start of the show
    pub peak_particles: f32,
    /// Decline control jumps within ±range/2 px on each axis
    pub dodge_range_px: f32,
}

impl Default for ProposalTuning {
    fn default() -> Self {
        Self {
            show_ms: 5000,
            burst_every_ms: 250,
            peak_particles: 50.0,
            dodge_range_px: 300.0,
        }
    }
}

/// All balance tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub reaction: ReactionTuning,
    pub shield: ShieldTuning,
    #[serde(rename = "catch")]
    pub catching: CatchTuning,
    pub drive: DriveTuning,
    pub scratch: ScratchTuning,
    pub proposal: ProposalTuning,
}

impl Tuning {
    /// Parse overrides; any field left out keeps its default
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse overrides, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning JSON: {}", e);
                Self::default()
            }
        }
    }

    /// DOM element holding optional overrides (used only in wasm32)
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "tuning";

    /// Load tuning from an inline `<script id="tuning">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => {
                log::info!("Loaded tuning overrides");
                Self::from_json_or_default(&json)
            }
            _ => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
