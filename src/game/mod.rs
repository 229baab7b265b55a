//! Run controller
//!
//! Owns the body, the run state and every collaborator handle, routes driver
//! calls through the pure state machine in [`machine`], and applies the
//! resulting effects. This is the only place shared mutable state lives.

pub mod machine;

use std::collections::VecDeque;

use serde::Serialize;

pub use machine::{Command, Effect, Phase, Transition, transition};

use crate::consts::*;
use crate::feedback::{Cue, FeedbackSink};
use crate::missions::{self, Mission, MissionOutcome, RunMetrics};
use crate::persistence::Storage;
use crate::platform::Clock;
use crate::settings::Settings;
use crate::sim::rng::{RandomSource, choose};
use crate::sim::{
    self, Body, DeathCause, GameEvent, ObstaclePair, Pattern, RunState, StepContext, Theme,
    TickInput, TickReport, sanitize_dt, spawn_obstacle,
};
use crate::stats::{PersistentStats, coins_for_run};
use crate::tuning::Tuning;

/// Flavor lines for the result screen
const HINT_LINES: [&str; 4] = [
    "One more run.",
    "Clean lines win.",
    "You were close.",
    "Breathe. Tap.",
];

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub score: u32,
    /// Best score after this run was recorded
    pub best: u32,
    pub new_best: bool,
    pub coins: u32,
    pub perfect_passes: u32,
    pub survived: f32,
    pub practice: bool,
    pub cause: DeathCause,
    pub mission: Option<Mission>,
    pub mission_outcome: Option<MissionOutcome>,
    pub hint: String,
}

impl RunSummary {
    /// Mission line for the result screen
    pub fn mission_text(&self) -> String {
        match &self.mission_outcome {
            Some(outcome) => outcome.to_string(),
            None => "—".to_string(),
        }
    }
}

/// Read-only per-frame snapshot for renderers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame<'a> {
    pub phase: Phase,
    pub body: &'a Body,
    pub obstacles: &'a VecDeque<ObstaclePair>,
    pub score: u32,
    pub best: u32,
    pub survived: f32,
    pub pattern: Pattern,
    pub theme: Theme,
    pub practice: bool,
    pub mission: Option<&'a str>,
    pub world_width: f32,
    pub world_height: f32,
    pub ground_y: f32,
    pub reduced_motion: bool,
    pub high_contrast: bool,
    pub result: Option<&'a RunSummary>,
}

/// The game: state machine plus simulation plus collaborators
pub struct Game {
    tuning: Tuning,
    storage: Storage,
    feedback: Box<dyn FeedbackSink>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    phase: Phase,
    body: Body,
    run: RunState,
    paused_by_focus: bool,
    last_result: Option<RunSummary>,
}

impl Game {
    pub fn new(
        tuning: Tuning,
        storage: Storage,
        feedback: Box<dyn FeedbackSink>,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let body = Body::new(tuning.body.x, tuning.body.radius, tuning.body.start_y);
        log::info!("Game ready (best {})", storage.stats().best);
        Self {
            tuning,
            storage,
            feedback,
            clock,
            rng,
            phase: Phase::Home,
            body,
            run: RunState::default(),
            paused_by_focus: false,
            last_result: None,
        }
    }

    // === Driver API ===

    /// Advance one frame. Returns the tick report while playing, `None` when
    /// the phase gates the simulation off.
    pub fn tick(&mut self, dt: f32, input: TickInput) -> Option<TickReport> {
        let dt = sanitize_dt(dt, &self.tuning.timing);
        if self.phase != Phase::Playing {
            return None;
        }

        let report = {
            let ctx = StepContext {
                tuning: &self.tuning,
                settings: self.storage.settings(),
                input,
            };
            sim::tick(&mut self.body, &mut self.run, &ctx, self.rng.as_mut(), dt)
        };

        for event in &report.events {
            match *event {
                GameEvent::Pass { perfect } => {
                    self.cue(Cue::Score);
                    self.buzz(if perfect {
                        VIBRATE_PERFECT_MS
                    } else {
                        VIBRATE_PASS_MS
                    });
                }
                GameEvent::Death(cause) => {
                    self.dispatch(Command::Died(cause));
                }
            }
        }

        Some(report)
    }

    /// Primary input: starts, confirms, flaps or retries depending on phase
    pub fn handle_flap(&mut self) {
        self.dispatch(Command::Flap);
    }

    pub fn start_run(&mut self, practice: bool, instant: bool) {
        self.dispatch(Command::StartRun { practice, instant });
    }

    pub fn pause(&mut self) {
        self.dispatch(Command::Pause);
    }

    pub fn resume(&mut self) {
        self.dispatch(Command::Resume);
    }

    /// Pause when playing, resume when paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Instant retry with the current practice flag
    pub fn restart(&mut self) {
        self.dispatch(Command::Restart);
    }

    pub fn quit_to_home(&mut self) {
        self.dispatch(Command::Quit);
    }

    /// Foreground lost (tab hidden, window blurred)
    pub fn focus_lost(&mut self) {
        if self.dispatch(Command::FocusLost) {
            log::info!("Auto-paused (focus lost)");
        }
    }

    /// Foreground regained; stays paused until the player resumes
    pub fn focus_gained(&mut self) {
        self.dispatch(Command::FocusGained);
    }

    /// Menu button feedback
    pub fn ui_tap(&mut self) {
        self.cue(Cue::Ui);
    }

    // === Collaborator passthroughs ===

    pub fn settings(&self) -> &Settings {
        self.storage.settings()
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.storage.set_settings(settings);
    }

    pub fn stats(&self) -> &PersistentStats {
        self.storage.stats()
    }

    /// Wipe settings, stats and the daily record
    pub fn reset_all_data(&mut self) {
        self.storage.reset_all();
    }

    /// Today's two missions (draws a new pair on date rollover)
    pub fn daily_missions(&mut self) -> Vec<Mission> {
        let today = self.clock.today_key();
        missions::daily_missions(&mut self.storage, &today, self.rng.as_mut())
    }

    // === Read-only views ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn paused_by_focus(&self) -> bool {
        self.paused_by_focus
    }

    pub fn last_result(&self) -> Option<&RunSummary> {
        self.last_result.as_ref()
    }

    pub fn frame(&self) -> Frame<'_> {
        let settings = self.storage.settings();
        Frame {
            phase: self.phase,
            body: &self.body,
            obstacles: &self.run.obstacles,
            score: self.run.score,
            best: self.storage.stats().best,
            survived: self.run.survived,
            pattern: self.run.pattern,
            theme: self.run.theme,
            practice: self.run.practice,
            mission: self.run.mission.as_ref().map(|m| m.name.as_str()),
            world_width: self.tuning.world.width,
            world_height: self.tuning.world.height,
            ground_y: self.tuning.world.ground_y(),
            reduced_motion: settings.reduced_motion,
            high_contrast: settings.high_contrast,
            result: self.last_result.as_ref(),
        }
    }

    // === Machine plumbing ===

    /// Run a command through the machine; returns whether anything changed
    fn dispatch(&mut self, command: Command) -> bool {
        let from = self.phase;
        let next = transition(from, command, self.run.practice);
        if next.is_noop(from) {
            return false;
        }
        for effect in &next.effects {
            self.apply(*effect);
        }
        self.phase = next.phase;
        if from != next.phase {
            log::debug!("{} -> {} ({:?})", from.as_str(), next.phase.as_str(), command);
        }
        true
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ResetRun { practice } => self.reset_run(practice),
            Effect::Impulse => self.flap(),
            Effect::FinalizeRun(cause) => self.finalize_run(cause),
            Effect::MarkFocusPause => self.paused_by_focus = true,
            Effect::ClearPauseFlags => self.paused_by_focus = false,
        }
    }

    fn reset_run(&mut self, practice: bool) {
        self.run.clear();
        self.run.practice = practice;
        self.body.reset(self.tuning.body.start_y);
        self.last_result = None;

        let rng = self.rng.as_mut();
        self.run.pattern = choose(rng, &Pattern::ALL).copied().unwrap_or_default();
        self.run.theme = choose(rng, &Theme::ALL).copied().unwrap_or_default();

        let today = self.clock.today_key();
        let daily = missions::daily_missions(&mut self.storage, &today, self.rng.as_mut());
        self.run.mission = choose(self.rng.as_mut(), &daily).cloned();

        // First gate starts further off the right edge than later ones
        let ot = &self.tuning.obstacles;
        spawn_obstacle(
            &mut self.run.obstacles,
            self.tuning.world.width + ot.first_spawn_offset,
            self.tuning.gap_for(self.storage.settings().difficulty),
            ot.width,
            self.run.pattern,
            self.run.survived,
            ot,
            &self.tuning.patterns,
            self.rng.as_mut(),
        );

        log::info!(
            "Run started: pattern={} theme={} practice={} mission={}",
            self.run.pattern.as_str(),
            self.run.theme.as_str(),
            practice,
            self.run.mission.as_ref().map_or("—", |m| m.id.as_str())
        );
    }

    fn flap(&mut self) {
        self.body.vel_y = self.tuning.body.flap_velocity;
        self.cue(Cue::Jump);
        self.buzz(VIBRATE_FLAP_MS);
    }

    fn finalize_run(&mut self, cause: DeathCause) {
        self.cue(Cue::Hit);
        self.buzz(VIBRATE_DEATH_MS);

        let practice = self.run.practice;
        let score = self.run.score;
        let perfect_passes = self.body.perfect_passes;
        let coins = coins_for_run(&self.tuning.coins, score, perfect_passes, practice);
        self.run.coins = coins;

        let mut stats = self.storage.stats().clone();
        let new_best = stats.record_run(score, coins, practice);
        if !practice {
            self.storage.set_stats(stats.clone());
        }

        let metrics = RunMetrics {
            score,
            perfect_passes,
            survived: self.run.survived,
        };
        let mission_outcome = self.run.mission.as_ref().map(|m| m.evaluate(&metrics));
        let hint = self.result_hint(cause, practice);

        log::info!(
            "Run over ({}): score={} perfect={} coins={} survived={:.1}s{}",
            cause,
            score,
            perfect_passes,
            coins,
            self.run.survived,
            if practice { " [practice]" } else { "" }
        );

        self.last_result = Some(RunSummary {
            score,
            best: stats.best,
            new_best,
            coins,
            perfect_passes,
            survived: self.run.survived,
            practice,
            cause,
            mission: self.run.mission.clone(),
            mission_outcome,
            hint,
        });
    }

    fn result_hint(&mut self, cause: DeathCause, practice: bool) -> String {
        let line = choose(self.rng.as_mut(), &HINT_LINES)
            .copied()
            .unwrap_or(HINT_LINES[0]);
        let suffix = if practice {
            "Practice"
        } else {
            match cause {
                DeathCause::Pipe => "Clipped a pipe",
                DeathCause::Ground => "Too low",
                DeathCause::Ceiling => "Too high",
            }
        };
        format!("{line} ({suffix})")
    }

    fn cue(&mut self, cue: Cue) {
        if self.storage.settings().sound {
            self.feedback.play(cue);
        }
    }

    fn buzz(&mut self, ms: u32) {
        if self.storage.settings().vibration {
            self.feedback.vibrate(ms);
        }
    }
}
