//! Obstacle generation
//!
//! Draws a baseline gate height and bends it with the run's pattern. The
//! caller supplies an already difficulty-scaled gap; nothing here knows
//! about difficulty.

use std::collections::VecDeque;

use super::rng::RandomSource;
use super::state::{ObstaclePair, Pattern};
use crate::clamp;
use crate::tuning::{ObstacleTuning, PatternTuning};

/// Apply `pattern` to a baseline top height at `survived` seconds
pub fn shape_top(
    pattern: Pattern,
    survived: f32,
    base_top: f32,
    limits: &ObstacleTuning,
    shape: &PatternTuning,
) -> f32 {
    match pattern {
        Pattern::Classic => base_top,
        Pattern::Wave => {
            let wave = (survived * shape.wave_frequency).sin() * shape.wave_amplitude;
            clamp(base_top + wave, limits.min_top, limits.max_top)
        }
        Pattern::Stairs => {
            let count = shape.stair_count.max(1);
            let step = ((survived * shape.stair_rate).floor() as i64).rem_euclid(count as i64);
            // Centered so the staircase is symmetric around the baseline
            let center = (count - 1) as f32 / 2.0;
            let stair = (step as f32 - center) * shape.stair_height;
            clamp(base_top + stair, limits.min_top, limits.max_top)
        }
    }
}

/// Append one new gate at `x` to the end of `obstacles`
#[allow(clippy::too_many_arguments)]
pub fn spawn_obstacle(
    obstacles: &mut VecDeque<ObstaclePair>,
    x: f32,
    gap: f32,
    width: f32,
    pattern: Pattern,
    survived: f32,
    limits: &ObstacleTuning,
    shape: &PatternTuning,
    rng: &mut dyn RandomSource,
) {
    let base_top = rng.range(limits.min_top, limits.max_top);
    let top = shape_top(pattern, survived, base_top, limits, shape);
    log::debug!(
        "spawn gate x={:.1} top={:.1} gap={:.1} pattern={}",
        x,
        top,
        gap,
        pattern.as_str()
    );
    obstacles.push_back(ObstaclePair::new(x, top, gap, width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;

    fn tunings() -> (ObstacleTuning, PatternTuning) {
        (ObstacleTuning::default(), PatternTuning::default())
    }

    #[test]
    fn test_classic_keeps_baseline() {
        let (limits, shape) = tunings();
        assert_eq!(shape_top(Pattern::Classic, 12.3, 200.0, &limits, &shape), 200.0);
    }

    #[test]
    fn test_wave_oscillates_and_clamps() {
        let (limits, shape) = tunings();
        // sin(0) = 0
        assert_eq!(shape_top(Pattern::Wave, 0.0, 200.0, &limits, &shape), 200.0);
        // Peak pushes past max_top and gets clamped back
        let t = std::f32::consts::FRAC_PI_2 / shape.wave_frequency;
        assert_eq!(shape_top(Pattern::Wave, t, 370.0, &limits, &shape), limits.max_top);
        // Trough pushes below min_top
        let t = 3.0 * std::f32::consts::FRAC_PI_2 / shape.wave_frequency;
        assert_eq!(shape_top(Pattern::Wave, t, 80.0, &limits, &shape), limits.min_top);
    }

    #[test]
    fn test_stairs_steps_symmetrically() {
        let (limits, shape) = tunings();
        // step 0 at t=0 -> offset (0 - 2.5) * 28 = -70
        assert_eq!(shape_top(Pattern::Stairs, 0.0, 200.0, &limits, &shape), 130.0);
        // step 5 at t = 5 / 0.8 = 6.25 -> offset +70
        assert_eq!(shape_top(Pattern::Stairs, 6.3, 200.0, &limits, &shape), 270.0);
        // wraps back to step 0 after six steps
        assert_eq!(shape_top(Pattern::Stairs, 7.6, 200.0, &limits, &shape), 130.0);
    }

    #[test]
    fn test_stairs_clamps_into_range() {
        let (limits, shape) = tunings();
        assert_eq!(shape_top(Pattern::Stairs, 0.0, 80.0, &limits, &shape), limits.min_top);
    }

    #[test]
    fn test_spawn_appends_with_fixed_geometry() {
        let (limits, shape) = tunings();
        let mut obstacles = VecDeque::new();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        spawn_obstacle(&mut obstacles, 400.0, 150.0, 62.0, Pattern::Classic, 0.0, &limits, &shape, &mut rng);
        spawn_obstacle(&mut obstacles, 500.0, 170.0, 62.0, Pattern::Classic, 0.0, &limits, &shape, &mut rng);
        assert_eq!(obstacles.len(), 2);
        let first = &obstacles[0];
        assert_eq!(first.x, 400.0);
        assert_eq!(first.gap, 150.0);
        assert_eq!(first.top_height, 225.0);
        assert!(!first.passed);
        assert_eq!(obstacles[1].x, 500.0);
        assert_eq!(obstacles[1].gap, 170.0);
    }

    #[test]
    fn test_spawn_height_within_range() {
        let (limits, shape) = tunings();
        let mut obstacles = VecDeque::new();
        let mut rng = ScriptedRandom::new(vec![0.0, 0.25, 0.75, 0.999_999]);
        for i in 0..4 {
            spawn_obstacle(&mut obstacles, 0.0, 165.0, 62.0, Pattern::Wave, i as f32, &limits, &shape, &mut rng);
        }
        for pair in &obstacles {
            assert!(pair.top_height >= limits.min_top && pair.top_height <= limits.max_top);
        }
    }
}
