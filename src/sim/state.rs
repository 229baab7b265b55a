//! Run state and core simulation types

use std::collections::VecDeque;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::missions::Mission;

/// Obstacle generation pattern, chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pattern {
    /// Uniformly random gate heights
    #[default]
    Classic,
    /// Heights oscillate smoothly with survival time
    Wave,
    /// Heights step through a symmetric staircase
    Stairs,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Classic, Pattern::Wave, Pattern::Stairs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Classic => "Classic",
            Pattern::Wave => "Wave",
            Pattern::Stairs => "Stairs",
        }
    }

    /// Unrecognized names fall back to `Classic`
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "wave" => Pattern::Wave,
            "stairs" => Pattern::Stairs,
            _ => Pattern::Classic,
        }
    }
}

/// Cosmetic backdrop, chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Day,
    Sunset,
    Night,
    Rain,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Day, Theme::Sunset, Theme::Night, Theme::Rain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Day => "Day",
            Theme::Sunset => "Sunset",
            Theme::Night => "Night",
            Theme::Rain => "Rain",
        }
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathCause {
    Ground,
    Ceiling,
    Pipe,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeathCause::Ground => "ground",
            DeathCause::Ceiling => "ceiling",
            DeathCause::Pipe => "pipe",
        };
        f.write_str(s)
    }
}

/// The player-controlled falling body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Center; x is fixed for the whole run
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    /// Visual radius, constant within a run
    pub radius: f32,
    /// Cosmetic tilt angle (radians)
    pub tilt: f32,
    pub perfect_passes: u32,
    pub last_pass_perfect: bool,
}

impl Body {
    pub fn new(x: f32, radius: f32, start_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, start_y),
            vel_y: 0.0,
            radius,
            tilt: 0.0,
            perfect_passes: 0,
            last_pass_perfect: false,
        }
    }

    /// Reinitialize for a new run
    pub fn reset(&mut self, start_y: f32) {
        self.pos.y = start_y;
        self.vel_y = 0.0;
        self.tilt = 0.0;
        self.perfect_passes = 0;
        self.last_pass_perfect = false;
    }

    /// Hitbox radius: visual radius shrunk by `pad`, never below `min`
    #[inline]
    pub fn collision_radius(&self, pad: f32, min: f32) -> f32 {
        (self.radius - pad).max(min)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Left edge; a gate counts as passed once its trailing edge clears this
    #[inline]
    pub fn back_x(&self) -> f32 {
        self.pos.x - self.radius
    }
}

/// One gate: a top block and a bottom block separated by a gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Leading (left) edge
    pub x: f32,
    /// Fixed at spawn
    pub width: f32,
    pub top_height: f32,
    /// Fixed at spawn
    pub gap: f32,
    /// Set once, when scoring fired
    pub passed: bool,
}

impl ObstaclePair {
    pub fn new(x: f32, top_height: f32, gap: f32, width: f32) -> Self {
        Self {
            x,
            width,
            top_height,
            gap,
            passed: false,
        }
    }

    /// Y where the bottom block begins
    #[inline]
    pub fn bottom_y(&self) -> f32 {
        self.top_height + self.gap
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_mid(&self) -> f32 {
        self.top_height + self.gap / 2.0
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    /// Bottom block spans from the gap down to the ground line
    pub fn bottom_rect(&self, ground_y: f32) -> Rect {
        let y = self.bottom_y();
        Rect::new(self.x, y, self.width, ground_y - y)
    }
}

/// Transient state for one playthrough
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    /// Seconds survived this run
    pub survived: f32,
    pub score: u32,
    pub coins: u32,
    /// Active gates, oldest/leftmost first
    pub obstacles: VecDeque<ObstaclePair>,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    pub pattern: Pattern,
    pub theme: Theme,
    /// Practice runs earn nothing and leave stats untouched
    pub practice: bool,
    pub mission: Option<Mission>,
}

impl RunState {
    /// Zero counters and drop every gate; run configuration is kept
    pub fn clear(&mut self) {
        self.survived = 0.0;
        self.score = 0;
        self.coins = 0;
        self.spawn_timer = 0.0;
        self.obstacles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_from_name_falls_back() {
        assert_eq!(Pattern::from_name("Wave"), Pattern::Wave);
        assert_eq!(Pattern::from_name("stairs"), Pattern::Stairs);
        assert_eq!(Pattern::from_name("Spiral"), Pattern::Classic);
    }

    #[test]
    fn test_obstacle_geometry() {
        let pair = ObstaclePair::new(100.0, 120.0, 165.0, 62.0);
        assert_eq!(pair.bottom_y(), 285.0);
        assert_eq!(pair.gap_mid(), 202.5);
        assert_eq!(pair.trailing_edge(), 162.0);
        let bottom = pair.bottom_rect(548.0);
        assert_eq!(bottom.y, 285.0);
        assert_eq!(bottom.bottom(), 548.0);
    }

    #[test]
    fn test_body_reset_keeps_radius_and_x() {
        let mut body = Body::new(110.0, 14.0, 260.0);
        body.pos.y = 500.0;
        body.vel_y = 300.0;
        body.tilt = 0.5;
        body.perfect_passes = 4;
        body.last_pass_perfect = true;
        body.reset(260.0);
        assert_eq!(body.pos, Vec2::new(110.0, 260.0));
        assert_eq!(body.vel_y, 0.0);
        assert_eq!(body.tilt, 0.0);
        assert_eq!(body.perfect_passes, 0);
        assert!(!body.last_pass_perfect);
        assert_eq!(body.radius, 14.0);
    }

    #[test]
    fn test_collision_radius_floor() {
        let body = Body::new(110.0, 14.0, 260.0);
        assert_eq!(body.collision_radius(3.0, 6.0), 11.0);
        assert_eq!(body.collision_radius(10.0, 6.0), 6.0);
    }
}
