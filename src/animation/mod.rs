//! Transition animation timing.
//!
//! The animator moves through `Idle -> Animating -> Idle`. It is advanced
//! explicitly by the host's frame loop and reports each frame's linear and
//! eased progress; consumers blend [`StateProperties`](crate::core::StateProperties)
//! with the eased value.

mod animator;

pub use animator::{
    ActiveAnimation, AnimationEnd, AnimationFrame, AnimationOutcome, AnimationTicket,
    TransitionAnimator,
};
