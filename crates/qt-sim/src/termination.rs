//! Boundary detection and the post-termination reward policy.

use tracing::{debug, warn};

use crate::dynamics::Levels;

/// Reward for every step that ends inside the safe envelope, and for the step that leaves it.
pub const REWARD_SAFE: f64 = 1.0;

/// Reward for a boundary-crossing step taken after the episode has already terminated.
pub const REWARD_AFTER_DONE: f64 = 0.0;

/// True if any level has reached the empty or overflow boundary.
pub fn crossed_boundary(levels: &Levels, h_max: f64) -> bool {
    levels.iter().any(|&h| h <= 0.0 || h >= h_max)
}

/// Where an episode stands relative to its first boundary crossing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// No boundary crossing yet.
    #[default]
    Running,
    /// The last step crossed the boundary; its reward was still granted.
    JustTerminated,
    /// Number of steps after termination whose new state was itself outside the envelope.
    TerminatedSince(u32),
}

impl Termination {
    /// Record the outcome of one step and return its reward.
    ///
    /// A step that ends inside the envelope earns [`REWARD_SAFE`] and leaves the tracker
    /// untouched, even after termination. Only steps that end outside advance it.
    pub fn record(&mut self, done: bool) -> f64 {
        if !done {
            return REWARD_SAFE;
        }
        match *self {
            Termination::Running => {
                debug!("level left the safe envelope, episode terminated");
                *self = Termination::JustTerminated;
                REWARD_SAFE
            }
            Termination::JustTerminated => {
                warn!(
                    "step() called after the environment returned done = true; \
                     call reset() once done is received, further steps are undefined behavior"
                );
                *self = Termination::TerminatedSince(1);
                REWARD_AFTER_DONE
            }
            Termination::TerminatedSince(n) => {
                *self = Termination::TerminatedSince(n.saturating_add(1));
                REWARD_AFTER_DONE
            }
        }
    }

    /// Out-of-envelope steps taken beyond the terminating one, if the episode has terminated.
    pub fn steps_beyond_done(&self) -> Option<u32> {
        match self {
            Termination::Running => None,
            Termination::JustTerminated => Some(0),
            Termination::TerminatedSince(n) => Some(*n),
        }
    }

    pub fn is_terminated(&self) -> bool {
        !matches!(self, Termination::Running)
    }
}
