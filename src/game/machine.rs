//! Run state machine
//!
//! A pure transition function: `(phase, command) -> (phase, effects)`. The
//! controller applies the effects; nothing here touches the world.

use serde::{Deserialize, Serialize};

use crate::sim::DeathCause;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Idle menu
    #[default]
    Home,
    /// Run configured, waiting for the first flap
    Ready,
    /// Simulation active
    Playing,
    /// Simulation frozen, resumable
    Paused,
    /// Run ended, summary available
    Result,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Home => "home",
            Phase::Ready => "ready",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Result => "result",
        }
    }
}

/// Requests fed into the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartRun { practice: bool, instant: bool },
    Flap,
    Pause,
    /// Window/tab lost foreground
    FocusLost,
    /// Window/tab regained foreground; never resumes on its own
    FocusGained,
    Resume,
    Restart,
    Died(DeathCause),
    Quit,
}

/// Side effects for the controller to apply, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fresh run: zero counters, reset body, reseed gates, roll pattern/theme/mission
    ResetRun { practice: bool },
    /// Upward impulse on the body
    Impulse,
    /// Settle coins, stats and mission outcome
    FinalizeRun(DeathCause),
    /// Remember the pause came from focus loss
    MarkFocusPause,
    /// Drop any pause bookkeeping
    ClearPauseFlags,
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub phase: Phase,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(phase: Phase) -> Self {
        Self {
            phase,
            effects: Vec::new(),
        }
    }

    fn to(phase: Phase, effects: Vec<Effect>) -> Self {
        Self { phase, effects }
    }

    /// Whether the command changed anything
    pub fn is_noop(&self, from: Phase) -> bool {
        self.phase == from && self.effects.is_empty()
    }
}

fn start(practice: bool, instant: bool) -> Transition {
    if instant {
        Transition::to(
            Phase::Playing,
            vec![Effect::ResetRun { practice }, Effect::ClearPauseFlags],
        )
    } else {
        Transition::to(Phase::Ready, vec![Effect::ResetRun { practice }])
    }
}

/// Compute the next phase and its effects.
///
/// `practice` is the flag of the most recent run; retries reuse it.
pub fn transition(phase: Phase, command: Command, practice: bool) -> Transition {
    use Command as C;
    use Phase as P;

    match (phase, command) {
        (P::Home | P::Result, C::StartRun { practice, instant }) => start(practice, instant),

        (P::Home, C::Flap) => start(false, false),
        (P::Ready, C::Flap) => Transition::to(P::Playing, vec![Effect::ClearPauseFlags]),
        (P::Playing, C::Flap) => Transition::to(P::Playing, vec![Effect::Impulse]),
        (P::Result, C::Flap) => start(practice, true),

        (P::Playing, C::Pause) => Transition::to(P::Paused, Vec::new()),
        (P::Playing, C::FocusLost) => Transition::to(P::Paused, vec![Effect::MarkFocusPause]),
        (P::Paused, C::FocusGained) => Transition::to(P::Paused, vec![Effect::ClearPauseFlags]),
        (P::Paused, C::Resume) => Transition::to(P::Playing, vec![Effect::ClearPauseFlags]),

        (P::Playing | P::Paused | P::Result, C::Restart) => start(practice, true),

        (P::Playing, C::Died(cause)) => Transition::to(P::Result, vec![Effect::FinalizeRun(cause)]),

        (_, C::Quit) => Transition::to(P::Home, vec![Effect::ClearPauseFlags]),

        (phase, _) => Transition::stay(phase),
    }
}
