//! Timing state machine for a single in-flight transition.

use crate::core::{StateId, TransitionAnimation, TransitionTrigger};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifier of one started animation, echoed back when it ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationTicket(u64);

impl fmt::Display for AnimationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an animation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationOutcome {
    /// Ran to the end; the target state was committed.
    Completed,
    /// Stopped by `cancel`; the source state stays active.
    Cancelled,
    /// Replaced by a newer animation before finishing.
    Preempted,
}

/// Report of an animation that has ended.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationEnd {
    pub ticket: AnimationTicket,
    pub from: StateId,
    pub to: StateId,
    pub trigger: TransitionTrigger,
    pub outcome: AnimationOutcome,
}

impl AnimationEnd {
    pub fn committed(&self) -> bool {
        self.outcome == AnimationOutcome::Completed
    }
}

/// An animation in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveAnimation {
    pub ticket: AnimationTicket,
    pub from: StateId,
    pub to: StateId,
    pub trigger: TransitionTrigger,
    pub animation: TransitionAnimation,
    elapsed: Duration,
}

impl ActiveAnimation {
    /// Time since the animation started, including the delay.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn end(self, outcome: AnimationOutcome) -> AnimationEnd {
        AnimationEnd {
            ticket: self.ticket,
            from: self.from,
            to: self.to,
            trigger: self.trigger,
            outcome,
        }
    }
}

/// Result of advancing the animator by one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationFrame {
    /// Nothing is animating.
    Idle,
    /// Still inside the start delay; no progress yet.
    Delayed { remaining: Duration },
    /// Mid-animation. `eased` is the value to interpolate properties with.
    Running { progress: f64, eased: f64 },
    /// The animation reached its end during this frame.
    Finished(AnimationEnd),
}

/// Drives at most one transition animation at a time.
///
/// The animator only tracks timing. It never touches the state collection;
/// the owner commits the target state when a frame reports `Finished`.
/// Time advances only through [`tick`](Self::tick), so the host decides the
/// frame rate and tests can step deterministically.
///
/// # Example
///
/// ```rust
/// use poise::animation::{AnimationFrame, TransitionAnimator};
/// use poise::core::{Easing, StateId, TransitionAnimation, TransitionTrigger};
/// use std::time::Duration;
///
/// let mut animator = TransitionAnimator::new();
/// let (idle, hover) = (StateId::new(), StateId::new());
/// animator.start(idle, hover, TransitionTrigger::Hover, TransitionAnimation::new(1000, Easing::Linear));
///
/// match animator.tick(Duration::from_millis(500)) {
///     AnimationFrame::Running { eased, .. } => assert!((eased - 0.5).abs() < 1e-9),
///     other => panic!("unexpected frame {other:?}"),
/// }
/// assert!(matches!(animator.tick(Duration::from_millis(500)), AnimationFrame::Finished(_)));
/// assert!(!animator.is_animating());
/// ```
#[derive(Debug, Default)]
pub struct TransitionAnimator {
    active: Option<ActiveAnimation>,
    next_ticket: u64,
    progress: f64,
    eased: f64,
}

impl TransitionAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveAnimation> {
        self.active.as_ref()
    }

    /// Linear progress of the current animation, 0 when idle.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Eased progress of the current animation, 0 when idle.
    pub fn eased_progress(&self) -> f64 {
        self.eased
    }

    /// Start animating from `from` to `to`.
    ///
    /// Any animation already in flight is pre-empted and returned so the
    /// caller can report it.
    pub fn start(
        &mut self,
        from: StateId,
        to: StateId,
        trigger: TransitionTrigger,
        animation: TransitionAnimation,
    ) -> (AnimationTicket, Option<AnimationEnd>) {
        let preempted = self.stop(AnimationOutcome::Preempted);

        let ticket = AnimationTicket(self.next_ticket);
        self.next_ticket += 1;

        debug!(
            "Animation {ticket} started: {from} -> {to} over {}ms (+{}ms delay, {})",
            animation.duration_ms, animation.delay_ms, animation.easing
        );
        self.active = Some(ActiveAnimation {
            ticket,
            from,
            to,
            trigger,
            animation,
            elapsed: Duration::ZERO,
        });

        (ticket, preempted)
    }

    /// Advance the current animation by `delta`.
    pub fn tick(&mut self, delta: Duration) -> AnimationFrame {
        let Some(active) = self.active.as_mut() else {
            return AnimationFrame::Idle;
        };

        active.elapsed = active.elapsed.saturating_add(delta);
        let delay = active.animation.delay();
        if active.elapsed < delay {
            return AnimationFrame::Delayed {
                remaining: delay - active.elapsed,
            };
        }

        let running = active.elapsed - delay;
        let duration = active.animation.duration();
        let progress = if duration.is_zero() {
            1.0
        } else {
            (running.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };

        if progress >= 1.0 {
            let end = self.stop(AnimationOutcome::Completed);
            return match end {
                Some(end) => AnimationFrame::Finished(end),
                None => AnimationFrame::Idle,
            };
        }

        self.progress = progress;
        self.eased = active.animation.easing.evaluate(progress);
        AnimationFrame::Running {
            progress,
            eased: self.eased,
        }
    }

    /// Abort the current animation without reaching its target.
    ///
    /// Returns `None` when nothing was animating.
    pub fn cancel(&mut self) -> Option<AnimationEnd> {
        self.stop(AnimationOutcome::Cancelled)
    }

    /// Stop the current animation because another request superseded it.
    pub fn preempt(&mut self) -> Option<AnimationEnd> {
        self.stop(AnimationOutcome::Preempted)
    }

    fn stop(&mut self, outcome: AnimationOutcome) -> Option<AnimationEnd> {
        let active = self.active.take()?;
        self.progress = 0.0;
        self.eased = 0.0;
        debug!("Animation {} ended: {:?}", active.ticket, outcome);
        Some(active.end(outcome))
    }
}
