use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::RadarPoint;
use crate::motion::{FRAME_SECONDS, MAX_STEPS_PER_TICK, Spring, SpringConfig};

/// Lifecycle of one keyed dot. Removal happens when an exiting dot settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionPhase {
    Entering,
    Settled,
    Updating,
    Exiting,
}

/// Starting state for dots whose key was not present before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterTransition {
    /// Appear directly at the target position and size.
    #[default]
    AtTarget,
    /// Grow out of the radar origin with zero size.
    FromOrigin,
}

/// Treatment of dots whose key disappeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveTransition {
    /// Drop the dot on the next target update.
    #[default]
    Immediate,
    /// Shrink to zero size at the last position, then drop it.
    ShrinkInPlace,
}

/// Destination for one keyed dot.
#[derive(Debug, Clone, PartialEq)]
pub struct DotTarget {
    pub point: RadarPoint,
    pub size: f64,
}

#[derive(Debug, Clone)]
struct TransitionEntry {
    point: RadarPoint,
    x: Spring,
    y: Spring,
    size: Spring,
    phase: TransitionPhase,
}

impl TransitionEntry {
    fn entering(target: DotTarget, enter: EnterTransition) -> Self {
        let position = target.point.position;
        let (x, y, size) = match enter {
            EnterTransition::AtTarget => (
                Spring::at_rest(position.x),
                Spring::at_rest(position.y),
                Spring::at_rest(target.size),
            ),
            EnterTransition::FromOrigin => (
                Spring::between(0.0, position.x),
                Spring::between(0.0, position.y),
                Spring::between(0.0, target.size),
            ),
        };
        Self {
            point: target.point,
            x,
            y,
            size,
            phase: TransitionPhase::Entering,
        }
    }

    fn retarget(&mut self, target: DotTarget) {
        let position = target.point.position;
        self.x.retarget(position.x);
        self.y.retarget(position.y);
        self.size.retarget(target.size);
        self.point = target.point;

        self.phase = match self.phase {
            TransitionPhase::Entering => TransitionPhase::Entering,
            TransitionPhase::Settled if self.springs_at_rest() => TransitionPhase::Settled,
            _ => TransitionPhase::Updating,
        };
    }

    fn leave(&mut self) {
        self.size.retarget(0.0);
        self.phase = TransitionPhase::Exiting;
    }

    fn step(&mut self, delta_seconds: f64, config: SpringConfig) {
        self.x.step(delta_seconds, config);
        self.y.step(delta_seconds, config);
        self.size.step(delta_seconds, config);
    }

    fn snap(&mut self) {
        self.x.snap();
        self.y.snap();
        self.size.snap();
    }

    fn springs_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest() && self.size.is_at_rest()
    }
}

/// Current interpolated values for one keyed dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedDot<'a> {
    pub key: &'a str,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub phase: TransitionPhase,
    pub point: &'a RadarPoint,
}

/// Keyed spring interpolation for dot position and size.
///
/// Targets are matched by point identity, so a dot keeping its key across
/// updates moves continuously instead of jumping. Nothing advances until
/// `start` is called; `tick` then integrates the springs in fixed 60 Hz
/// steps, carrying sub-frame time over to the next tick.
#[derive(Debug, Clone)]
pub struct DotsTransition {
    spring: SpringConfig,
    enter: EnterTransition,
    leave: LeaveTransition,
    entries: IndexMap<String, TransitionEntry>,
    accumulated_seconds: f64,
    running: bool,
}

impl DotsTransition {
    #[must_use]
    pub fn new(spring: SpringConfig, enter: EnterTransition, leave: LeaveTransition) -> Self {
        Self {
            spring,
            enter,
            leave,
            entries: IndexMap::new(),
            accumulated_seconds: 0.0,
            running: false,
        }
    }

    #[must_use]
    pub fn spring_config(&self) -> SpringConfig {
        self.spring
    }

    pub fn set_spring_config(&mut self, spring: SpringConfig) {
        self.spring = spring;
    }

    pub fn set_policies(&mut self, enter: EnterTransition, leave: LeaveTransition) {
        self.enter = enter;
        self.leave = leave;
    }

    /// Replaces the target set. Current targets keep their order; leaving
    /// dots that still animate are appended after them.
    pub fn set_targets(&mut self, targets: Vec<DotTarget>) {
        let mut previous = std::mem::take(&mut self.entries);
        let mut next = IndexMap::with_capacity(targets.len());
        let (mut entered, mut updated) = (0usize, 0usize);

        for target in targets {
            let id = target.point.id.clone();
            let entry = match previous.swap_remove(&id) {
                Some(mut entry) => {
                    entry.retarget(target);
                    updated += 1;
                    entry
                }
                None => {
                    entered += 1;
                    TransitionEntry::entering(target, self.enter)
                }
            };
            next.insert(id, entry);
        }

        let left = previous.len();
        if self.leave == LeaveTransition::ShrinkInPlace {
            for (id, mut entry) in previous {
                entry.leave();
                next.insert(id, entry);
            }
        }

        debug!(entered, updated, left, "merged dot transition targets");
        self.entries = next;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Jumps every dot to its target, drops leaving dots and stops.
    pub fn cancel(&mut self) {
        self.entries
            .retain(|_, entry| entry.phase != TransitionPhase::Exiting);
        for entry in self.entries.values_mut() {
            entry.snap();
            entry.phase = TransitionPhase::Settled;
        }
        self.accumulated_seconds = 0.0;
        self.running = false;
    }

    /// Forgets every dot, including their interpolated state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.accumulated_seconds = 0.0;
        self.running = false;
    }

    /// Advances the animation. Returns `true` while any dot is still moving.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.accumulated_seconds += elapsed.as_secs_f64();
        let due = (self.accumulated_seconds / FRAME_SECONDS).floor();
        let steps = if due > f64::from(MAX_STEPS_PER_TICK) {
            self.accumulated_seconds = 0.0;
            MAX_STEPS_PER_TICK
        } else {
            let steps = due as u32;
            self.accumulated_seconds -= f64::from(steps) * FRAME_SECONDS;
            steps
        };

        for _ in 0..steps {
            for entry in self.entries.values_mut() {
                entry.step(FRAME_SECONDS, self.spring);
            }
        }

        self.entries.retain(|_, entry| {
            !(entry.phase == TransitionPhase::Exiting && entry.springs_at_rest())
        });
        for entry in self.entries.values_mut() {
            if entry.springs_at_rest() {
                entry.phase = TransitionPhase::Settled;
            }
        }

        self.running = self
            .entries
            .values()
            .any(|entry| entry.phase != TransitionPhase::Settled);
        trace!(steps, dots = self.entries.len(), running = self.running, "dots tick");
        self.running
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn phase_of(&self, key: &str) -> Option<TransitionPhase> {
        self.entries.get(key).map(|entry| entry.phase)
    }

    /// Interpolated dots in render order.
    pub fn dots(&self) -> impl Iterator<Item = InterpolatedDot<'_>> {
        self.entries.iter().map(|(key, entry)| InterpolatedDot {
            key,
            x: entry.x.position(),
            y: entry.y.position(),
            size: entry.size.position(),
            phase: entry.phase,
            point: &entry.point,
        })
    }
}
