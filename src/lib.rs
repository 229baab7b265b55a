//! Flap Remix - An endless side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, obstacle generation, run state)
//! - `game`: Run controller and the home/ready/playing/paused/result machine
//! - `missions`: Daily mission rotation and evaluation
//! - `stats`: Cumulative player statistics and run payouts
//! - `persistence`: Save data envelope and storage backends
//! - `platform`: Calendar clock, browser bindings
//! - `tuning`: Data-driven game balance

pub mod feedback;
pub mod game;
pub mod missions;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use feedback::{Cue, FeedbackSink, LogFeedback, NullFeedback};
pub use game::{Frame, Game, Phase, RunSummary};
pub use settings::{Difficulty, InputMode, Settings};
pub use stats::PersistentStats;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fallback timestep substituted for missing or unstable frame deltas (seconds)
    pub const NOMINAL_DT: f32 = 0.016;
    /// Largest frame delta integrated as-is (seconds)
    pub const MAX_STABLE_DT: f32 = 0.05;

    /// Collision radius never shrinks below this, whatever the hitbox pad
    pub const MIN_COLLISION_RADIUS: f32 = 6.0;
    /// Max distance from gap midpoint that still counts as a perfect pass
    pub const PERFECT_PASS_THRESHOLD: f32 = 18.0;

    /// Vibration pulse lengths (milliseconds)
    pub const VIBRATE_FLAP_MS: u32 = 12;
    pub const VIBRATE_PASS_MS: u32 = 10;
    pub const VIBRATE_PERFECT_MS: u32 = 18;
    pub const VIBRATE_DEATH_MS: u32 = 35;
}

/// Bound `value` to `[lo, hi]`.
///
/// Total: when `lo > hi` the result is `lo`, and NaN collapses to `hi`.
#[inline]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_and_outside() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(42.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_is_total() {
        // Inverted bounds do not panic
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp(f32::NAN, 1.0, 2.0), 2.0);
    }
}
