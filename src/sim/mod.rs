//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep with delta sanitation
//! - Injectable randomness only
//! - Gates kept in spawn order (oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap};
pub use rng::{RandomSource, ScriptedRandom, range_random, seeded_random, system_random};
pub use spawn::{shape_top, spawn_obstacle};
pub use state::{Body, DeathCause, ObstaclePair, Pattern, RunState, Theme};
pub use tick::{GameEvent, StepContext, TickInput, TickReport, sanitize_dt, tick};
