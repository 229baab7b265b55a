//! Data-driven game balance
//!
//! Every numeric knob of the simulation lives here so balance passes can
//! ship as JSON overrides instead of code changes. Missing fields keep
//! their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Difficulty;

/// Playfield dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldTuning {
    pub width: f32,
    pub height: f32,
    /// Height of the ground band at the bottom of the playfield
    pub ground_height: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 640.0,
            ground_height: 92.0,
        }
    }
}

impl WorldTuning {
    /// Y coordinate of the ground line (y grows downward)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Falling body physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyTuning {
    /// Fixed horizontal position
    pub x: f32,
    pub radius: f32,
    /// Hitbox shrink relative to the visual radius (bigger = more forgiving)
    pub hitbox_pad: f32,
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = up)
    pub flap_velocity: f32,
    pub max_fall_speed: f32,
    pub max_rise_speed: f32,
    pub tilt_up: f32,
    pub tilt_down: f32,
    pub tilt_smoothing: f32,
    /// Downward speed cap while the flap control is held in hold mode
    pub hold_fall_speed: f32,
    /// Height the body is reset to at the start of every run
    pub start_y: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            x: 110.0,
            radius: 14.0,
            hitbox_pad: 3.0,
            gravity: 1600.0,
            flap_velocity: -460.0,
            max_fall_speed: 720.0,
            max_rise_speed: 1000.0,
            tilt_up: -0.35,
            tilt_down: 0.55,
            tilt_smoothing: 0.12,
            hold_fall_speed: 120.0,
            start_y: 260.0,
        }
    }
}

/// Obstacle geometry and cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObstacleTuning {
    pub gap: f32,
    pub width: f32,
    pub min_top: f32,
    pub max_top: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Base scroll speed (units/s)
    pub speed: f32,
    /// Distance past the right edge for the first obstacle of a run
    pub first_spawn_offset: f32,
    /// Distance past the right edge for every later obstacle
    pub spawn_offset: f32,
    /// How far past the left edge a trailing edge must go before culling
    pub cull_margin: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            gap: 165.0,
            width: 62.0,
            min_top: 70.0,
            max_top: 380.0,
            spawn_interval: 1.25,
            speed: 210.0,
            first_spawn_offset: 80.0,
            spawn_offset: 30.0,
            cull_margin: 20.0,
        }
    }
}

/// Shape parameters for the generation patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatternTuning {
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub stair_rate: f32,
    pub stair_count: u32,
    pub stair_height: f32,
}

impl Default for PatternTuning {
    fn default() -> Self {
        Self {
            wave_amplitude: 70.0,
            wave_frequency: 0.9,
            stair_rate: 0.8,
            stair_count: 6,
            stair_height: 28.0,
        }
    }
}

/// Frame delta sanitation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingTuning {
    pub nominal_dt: f32,
    pub max_stable_dt: f32,
}

impl Default for TimingTuning {
    fn default() -> Self {
        Self {
            nominal_dt: NOMINAL_DT,
            max_stable_dt: MAX_STABLE_DT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringTuning {
    pub perfect_threshold: f32,
    pub min_collision_radius: f32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            perfect_threshold: PERFECT_PASS_THRESHOLD,
            min_collision_radius: MIN_COLLISION_RADIUS,
        }
    }
}

/// Currency payout per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoinTuning {
    pub base_per_run: u32,
    pub per_score: u32,
    pub perfect_bonus: u32,
}

impl Default for CoinTuning {
    fn default() -> Self {
        Self {
            base_per_run: 0,
            per_score: 1,
            perfect_bonus: 1,
        }
    }
}

/// Multipliers applied for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyParams {
    pub gap_multiplier: f32,
    pub speed_multiplier: f32,
    /// Fractional speed increase per survived second
    pub ramp_rate: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub soft: DifficultyParams,
    pub normal: DifficultyParams,
    pub hard: DifficultyParams,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            soft: DifficultyParams {
                gap_multiplier: 1.08,
                speed_multiplier: 0.95,
                ramp_rate: 0.007,
            },
            normal: DifficultyParams {
                gap_multiplier: 1.0,
                speed_multiplier: 1.0,
                ramp_rate: 0.010,
            },
            hard: DifficultyParams {
                gap_multiplier: 0.92,
                speed_multiplier: 1.06,
                ramp_rate: 0.013,
            },
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> DifficultyParams {
        match difficulty {
            Difficulty::Soft => self.soft,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    /// Look up by name; unknown names get the normal row
    pub fn by_name(&self, name: &str) -> DifficultyParams {
        self.get(Difficulty::from_name(name))
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub body: BodyTuning,
    pub obstacles: ObstacleTuning,
    pub patterns: PatternTuning,
    pub timing: TimingTuning,
    pub scoring: ScoringTuning,
    pub coins: CoinTuning,
    pub difficulty: DifficultyTable,
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Gap size for newly spawned obstacles at the given difficulty
    pub fn gap_for(&self, difficulty: Difficulty) -> f32 {
        self.obstacles.gap * self.difficulty.get(difficulty).gap_multiplier
    }

    /// Scroll speed after `survived` seconds; ramps gently upward within a run
    pub fn speed_for(&self, difficulty: Difficulty, survived: f32) -> f32 {
        let d = self.difficulty.get(difficulty);
        let ramp = 1.0 + survived * d.ramp_rate;
        self.obstacles.speed * d.speed_multiplier * ramp
    }
}
