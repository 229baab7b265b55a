//! Daily missions
//!
//! Two objectives per calendar day, drawn from a fixed pool of four. The
//! pair is shuffled once per day, persisted, and handed back unchanged for
//! every access until the date key rolls over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;
use crate::sim::rng::{RandomSource, shuffle};

/// Missions active per day
pub const DAILY_MISSION_COUNT: usize = 2;

/// Which run metric a mission measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionKind {
    /// Final score
    Score,
    /// Perfect passes in one run
    Perfect,
    /// Seconds survived
    Time,
}

/// An objective descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MissionKind,
    pub target: u32,
}

impl Mission {
    pub fn new(id: &str, name: &str, kind: MissionKind, target: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            target,
        }
    }

    /// Compare the relevant metric of a finished run against the target
    pub fn evaluate(&self, metrics: &RunMetrics) -> MissionOutcome {
        let (done, current) = match self.kind {
            MissionKind::Score => (metrics.score >= self.target, metrics.score),
            MissionKind::Perfect => (
                metrics.perfect_passes >= self.target,
                metrics.perfect_passes,
            ),
            MissionKind::Time => (
                metrics.survived >= self.target as f32,
                metrics.survived.max(0.0).floor() as u32,
            ),
        };
        if done {
            MissionOutcome::Completed
        } else {
            MissionOutcome::Progress {
                current,
                target: self.target,
                seconds: self.kind == MissionKind::Time,
            }
        }
    }
}

/// The fixed pool missions are drawn from
pub fn mission_pool() -> Vec<Mission> {
    vec![
        Mission::new("score10", "Score 10+", MissionKind::Score, 10),
        Mission::new("score20", "Score 20+", MissionKind::Score, 20),
        Mission::new("perfect3", "3 Perfect Passes", MissionKind::Perfect, 3),
        Mission::new("survive30", "Survive 30s", MissionKind::Time, 30),
    ]
}

/// Persisted selection for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Local date as `YYYY-MM-DD`
    pub date_key: String,
    /// `None` until the day's pair has been drawn
    pub missions: Option<Vec<Mission>>,
}

impl DailyRecord {
    pub fn empty(date_key: &str) -> Self {
        Self {
            date_key: date_key.to_string(),
            missions: None,
        }
    }
}

impl Default for DailyRecord {
    fn default() -> Self {
        Self::empty("")
    }
}

/// Today's missions, drawing and persisting a fresh pair on date rollover
pub fn daily_missions(
    storage: &mut Storage,
    today: &str,
    rng: &mut dyn RandomSource,
) -> Vec<Mission> {
    let daily = storage.daily();
    if daily.date_key == today {
        if let Some(missions) = daily.missions.filter(|m| !m.is_empty()) {
            return missions;
        }
    }

    let mut pool = mission_pool();
    shuffle(rng, &mut pool);
    pool.truncate(DAILY_MISSION_COUNT);
    log::info!(
        "daily missions for {}: {}",
        today,
        pool.iter()
            .map(|m| m.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    storage.set_daily(DailyRecord {
        date_key: today.to_string(),
        missions: Some(pool.clone()),
    });
    pool
}

/// Run metrics a mission can measure
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunMetrics {
    pub score: u32,
    pub perfect_passes: u32,
    pub survived: f32,
}

/// Mission result for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    Completed,
    Progress {
        current: u32,
        target: u32,
        /// Rendered with an `s` suffix
        seconds: bool,
    },
}

impl MissionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, MissionOutcome::Completed)
    }
}

impl fmt::Display for MissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionOutcome::Completed => f.write_str("Completed"),
            MissionOutcome::Progress {
                current,
                target,
                seconds,
            } => {
                let unit = if *seconds { "s" } else { "" };
                write!(f, "Progress: {current}/{target}{unit}")
            }
        }
    }
}
