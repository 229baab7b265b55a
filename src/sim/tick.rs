//! Per-tick physics and collision step
//!
//! Advances the body, scrolls and spawns gates, and resolves deaths and
//! scoring passes. Step order matters: a death ends the tick immediately.

use serde::{Deserialize, Serialize};

use super::collision::circle_rect_overlap;
use super::rng::RandomSource;
use super::spawn::spawn_obstacle;
use super::state::{Body, DeathCause, RunState};
use crate::settings::Settings;
use crate::tuning::{TimingTuning, Tuning};

/// Input commands for a single tick
///
/// Owned by the input layer and handed in per call; the simulation keeps no
/// pointer state of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Flap control currently held down (pointer, key or touch)
    pub flap_held: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A gate was cleared; score already incremented
    Pass { perfect: bool },
    /// Run ended; no further updates happened this tick
    Death(DeathCause),
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Delta actually integrated after sanitation
    pub dt: f32,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn death(&self) -> Option<DeathCause> {
        self.events.iter().find_map(|e| match e {
            GameEvent::Death(cause) => Some(*cause),
            _ => None,
        })
    }

    pub fn passes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Pass { .. }))
            .count()
    }
}

/// Read-only collaborators for a tick
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub tuning: &'a Tuning,
    pub settings: &'a Settings,
    pub input: TickInput,
}

/// Replace zero, negative, NaN or oversized deltas with the nominal step
#[inline]
pub fn sanitize_dt(dt: f32, timing: &TimingTuning) -> f32 {
    if dt > 0.0 && dt <= timing.max_stable_dt {
        dt
    } else {
        timing.nominal_dt
    }
}

/// Advance a playing run by one frame
///
/// The caller gates on the playing state; this always simulates.
pub fn tick(
    body: &mut Body,
    run: &mut RunState,
    ctx: &StepContext<'_>,
    rng: &mut dyn RandomSource,
    dt: f32,
) -> TickReport {
    let tuning = ctx.tuning;
    let bt = &tuning.body;
    let dt = sanitize_dt(dt, &tuning.timing);
    let mut report = TickReport {
        dt,
        events: Vec::new(),
    };

    run.survived += dt;

    // Hold assist: soften the fall instead of letting gravity win
    if ctx.settings.hold_assist(ctx.input.flap_held) {
        body.vel_y = body.vel_y.min(bt.hold_fall_speed);
    }

    body.vel_y += bt.gravity * dt;
    body.vel_y = crate::clamp(body.vel_y, -bt.max_rise_speed, bt.max_fall_speed);
    body.pos.y += body.vel_y * dt;

    if ctx.settings.reduced_motion {
        body.tilt = 0.0;
    } else {
        let target = if body.vel_y < 0.0 {
            bt.tilt_up
        } else {
            bt.tilt_down
        };
        body.tilt += (target - body.tilt) * bt.tilt_smoothing;
    }

    // Ground / ceiling
    let ground_y = tuning.world.ground_y();
    if body.bottom() >= ground_y {
        body.pos.y = ground_y - body.radius;
        report.events.push(GameEvent::Death(DeathCause::Ground));
        return report;
    }
    if body.top() <= 0.0 {
        body.pos.y = body.radius;
        report.events.push(GameEvent::Death(DeathCause::Ceiling));
        return report;
    }

    // Scroll
    let difficulty = ctx.settings.difficulty;
    let speed = tuning.speed_for(difficulty, run.survived);
    for pair in run.obstacles.iter_mut() {
        pair.x -= speed * dt;
    }

    // Spawn
    let ot = &tuning.obstacles;
    run.spawn_timer += dt;
    if run.spawn_timer >= ot.spawn_interval {
        run.spawn_timer = 0.0;
        spawn_obstacle(
            &mut run.obstacles,
            tuning.world.width + ot.spawn_offset,
            tuning.gap_for(difficulty),
            ot.width,
            run.pattern,
            run.survived,
            ot,
            &tuning.patterns,
            rng,
        );
    }

    // Cull from the front once fully off-screen
    while run
        .obstacles
        .front()
        .is_some_and(|p| p.trailing_edge() < -ot.cull_margin)
    {
        run.obstacles.pop_front();
    }

    // Collision + scoring
    let hit_radius = body.collision_radius(bt.hitbox_pad, tuning.scoring.min_collision_radius);
    for pair in run.obstacles.iter_mut() {
        // Passed gates stay collidable until culled
        let hit_top = circle_rect_overlap(pair.top_rect(), body.pos, hit_radius);
        let hit_bottom = circle_rect_overlap(pair.bottom_rect(ground_y), body.pos, hit_radius);
        if hit_top || hit_bottom {
            report.events.push(GameEvent::Death(DeathCause::Pipe));
            return report;
        }

        if !pair.passed && pair.trailing_edge() < body.back_x() {
            pair.passed = true;
            run.score += 1;

            let dist = (body.pos.y - pair.gap_mid()).abs();
            let perfect = dist <= tuning.scoring.perfect_threshold;
            body.last_pass_perfect = perfect;
            if perfect {
                body.perfect_passes += 1;
            }
            log::debug!("pass #{} perfect={} dist={:.1}", run.score, perfect, dist);
            report.events.push(GameEvent::Pass { perfect });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::InputMode;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::state::ObstaclePair;
    use proptest::prelude::*;

    struct Fixture {
        tuning: Tuning,
        settings: Settings,
        body: Body,
        run: RunState,
        rng: ScriptedRandom,
    }

    impl Fixture {
        fn new() -> Self {
            let tuning = Tuning::default();
            let body = Body::new(tuning.body.x, tuning.body.radius, tuning.body.start_y);
            Self {
                tuning,
                settings: Settings::default(),
                body,
                run: RunState::default(),
                rng: ScriptedRandom::new(vec![0.5]),
            }
        }

        fn step(&mut self, dt: f32, input: TickInput) -> TickReport {
            let ctx = StepContext {
                tuning: &self.tuning,
                settings: &self.settings,
                input,
            };
            tick(&mut self.body, &mut self.run, &ctx, &mut self.rng, dt)
        }
    }

    #[test]
    fn test_valid_delta_accrues_exactly() {
        let mut f = Fixture::new();
        let report = f.step(0.02, TickInput::default());
        assert_eq!(report.dt, 0.02);
        assert_eq!(f.run.survived, 0.02);
    }

    #[test]
    fn test_bad_deltas_use_nominal() {
        let timing = TimingTuning::default();
        for dt in [0.0, -0.1, f32::NAN, 0.051, 3.0, f32::INFINITY] {
            assert_eq!(sanitize_dt(dt, &timing), timing.nominal_dt);
        }
        assert_eq!(sanitize_dt(0.05, &timing), 0.05);

        let mut f = Fixture::new();
        f.step(1.0, TickInput::default());
        assert_eq!(f.run.survived, timing.nominal_dt);
    }

    #[test]
    fn test_gravity_integrates() {
        let mut f = Fixture::new();
        f.step(0.01, TickInput::default());
        assert!((f.body.vel_y - 16.0).abs() < 1e-4);
        assert!((f.body.pos.y - (260.0 + 0.16)).abs() < 1e-3);
    }

    #[test]
    fn test_ground_death_clamps_and_stops() {
        let mut f = Fixture::new();
        let ground = f.tuning.world.ground_y();
        f.body.pos.y = ground - f.body.radius - 0.5;
        f.body.vel_y = 500.0;
        f.run.obstacles.push_back(ObstaclePair::new(300.0, 100.0, 165.0, 62.0));
        let report = f.step(0.016, TickInput::default());
        assert_eq!(report.death(), Some(DeathCause::Ground));
        assert_eq!(f.body.pos.y, ground - f.body.radius);
        // Obstacles did not scroll on the death tick
        assert_eq!(f.run.obstacles[0].x, 300.0);
    }

    #[test]
    fn test_ceiling_death() {
        let mut f = Fixture::new();
        f.body.pos.y = f.body.radius + 1.0;
        f.body.vel_y = -900.0;
        let report = f.step(0.016, TickInput::default());
        assert_eq!(report.death(), Some(DeathCause::Ceiling));
        assert_eq!(f.body.pos.y, f.body.radius);
    }

    #[test]
    fn test_pipe_collision_kills() {
        let mut f = Fixture::new();
        // Gate directly over the body with the gap far above it
        f.run
            .obstacles
            .push_back(ObstaclePair::new(f.body.pos.x - 20.0, 50.0, 100.0, 62.0));
        let report = f.step(0.016, TickInput::default());
        assert_eq!(report.death(), Some(DeathCause::Pipe));
        assert_eq!(f.run.score, 0);
    }

    #[test]
    fn test_pass_scores_once_and_detects_perfect() {
        let mut f = Fixture::new();
        // Gate just about to clear, gap centered on the body
        let top = f.body.pos.y - 165.0 / 2.0;
        f.run.obstacles.push_back(ObstaclePair::new(30.0, top, 165.0, 62.0));
        let report = f.step(0.016, TickInput::default());
        assert_eq!(report.events, vec![GameEvent::Pass { perfect: true }]);
        assert_eq!(f.run.score, 1);
        assert_eq!(f.body.perfect_passes, 1);
        assert!(f.body.last_pass_perfect);
        assert!(f.run.obstacles[0].passed);

        let report = f.step(0.016, TickInput::default());
        assert_eq!(report.passes(), 0);
        assert_eq!(f.run.score, 1);
        assert!(f.run.obstacles[0].passed);
    }

    #[test]
    fn test_off_center_pass_is_not_perfect() {
        let mut f = Fixture::new();
        let top = f.body.pos.y - 40.0;
        f.run.obstacles.push_back(ObstaclePair::new(30.0, top, 165.0, 62.0));
        let report = f.step(0.016, TickInput::default());
        assert_eq!(report.events, vec![GameEvent::Pass { perfect: false }]);
        assert_eq!(f.body.perfect_passes, 0);
        assert!(!f.body.last_pass_perfect);
    }

    #[test]
    fn test_spawn_timer_fires_and_resets() {
        let mut f = Fixture::new();
        f.run.spawn_timer = f.tuning.obstacles.spawn_interval - 0.001;
        f.step(0.016, TickInput::default());
        assert_eq!(f.run.obstacles.len(), 1);
        assert_eq!(f.run.spawn_timer, 0.0);
        let spawned = &f.run.obstacles[0];
        assert_eq!(spawned.x, f.tuning.world.width + f.tuning.obstacles.spawn_offset);
        assert_eq!(spawned.gap, f.tuning.gap_for(f.settings.difficulty));
    }

    #[test]
    fn test_cull_removes_only_offscreen_front() {
        let mut f = Fixture::new();
        f.run.obstacles.push_back(ObstaclePair::new(-100.0, 100.0, 165.0, 62.0));
        f.run.obstacles.push_back(ObstaclePair::new(-70.0, 100.0, 165.0, 62.0));
        f.run.obstacles.push_back(ObstaclePair::new(300.0, 100.0, 165.0, 62.0));
        f.run.obstacles[0].passed = true;
        f.run.obstacles[1].passed = true;
        f.step(0.016, TickInput::default());
        // -100 + 62 < -20 is culled; -70 + 62 - scroll stays above the margin
        assert_eq!(f.run.obstacles.len(), 2);
        assert!(f.run.obstacles[0].x < -70.0);
    }

    #[test]
    fn test_gap_fixed_after_spawn() {
        let mut f = Fixture::new();
        f.run.obstacles.push_back(ObstaclePair::new(300.0, 100.0, 165.0, 62.0));
        f.settings.difficulty = crate::settings::Difficulty::Hard;
        f.step(0.016, TickInput::default());
        assert_eq!(f.run.obstacles[0].gap, 165.0);
        assert_eq!(f.run.obstacles[0].width, 62.0);
    }

    #[test]
    fn test_hold_assist_caps_fall() {
        let mut f = Fixture::new();
        f.settings.input = InputMode::Hold;
        f.body.vel_y = 600.0;
        f.step(0.01, TickInput { flap_held: true });
        assert!((f.body.vel_y - (120.0 + 16.0)).abs() < 1e-3);

        // Tap mode ignores the held flag
        let mut f = Fixture::new();
        f.body.vel_y = 600.0;
        f.step(0.01, TickInput { flap_held: true });
        assert!((f.body.vel_y - 616.0).abs() < 1e-3);
    }

    #[test]
    fn test_tilt_eases_and_respects_reduced_motion() {
        let mut f = Fixture::new();
        f.body.vel_y = -400.0;
        f.step(0.01, TickInput::default());
        assert!(f.body.tilt < 0.0);

        let mut f = Fixture::new();
        f.settings.reduced_motion = true;
        f.body.tilt = 0.3;
        f.step(0.01, TickInput::default());
        assert_eq!(f.body.tilt, 0.0);
    }

    proptest! {
        #[test]
        fn prop_fall_speed_capped(
            ops in proptest::collection::vec((0.0f32..0.2, any::<bool>()), 1..200)
        ) {
            let mut f = Fixture::new();
            for (dt, flap) in ops {
                if flap {
                    f.body.vel_y = f.tuning.body.flap_velocity;
                }
                let report = f.step(dt, TickInput::default());
                prop_assert!(f.body.vel_y <= f.tuning.body.max_fall_speed);
                if report.death().is_some() {
                    break;
                }
            }
        }

        #[test]
        fn prop_valid_delta_accrues_exactly(dt in 0.0001f32..=0.05) {
            let mut f = Fixture::new();
            f.step(dt, TickInput::default());
            prop_assert_eq!(f.run.survived, dt);
        }

        #[test]
        fn prop_invalid_delta_accrues_nominal(dt in prop_oneof![-10.0f32..=0.0, 0.0501f32..10.0]) {
            let mut f = Fixture::new();
            f.step(dt, TickInput::default());
            prop_assert_eq!(f.run.survived, f.tuning.timing.nominal_dt);
        }
    }
}
