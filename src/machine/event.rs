//! Notifications emitted by the controller.

use crate::animation::{AnimationEnd, AnimationTicket};
use crate::core::{StateId, TransitionTrigger};
use chrono::{DateTime, Utc};

/// Something observable happened to a controller.
#[derive(Clone, Debug, PartialEq)]
pub enum StateEvent {
    /// A new state became active.
    StateChanged {
        from: StateId,
        to: StateId,
        trigger: TransitionTrigger,
    },

    /// An animated transition began.
    TransitionStarted {
        ticket: AnimationTicket,
        from: StateId,
        to: StateId,
    },

    /// An animated transition completed, was cancelled, or was pre-empted.
    TransitionEnded(AnimationEnd),

    /// States or transitions were added, edited, reordered or removed.
    CollectionEdited,

    /// A save round-trip finished and was applied.
    Saved { saved_at: DateTime<Utc> },

    /// A stored collection replaced the in-memory one.
    Loaded,
}

/// Callback invoked for every [`StateEvent`].
pub type Listener = Box<dyn Fn(&StateEvent) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
