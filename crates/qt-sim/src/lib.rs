//! Quadruple-tank process simulator with a step/reset interaction contract.
//!
//! Provides:
//! - Tank parameters with YAML/JSON configuration
//! - Nonlinear four-tank level dynamics
//! - Fixed-step forward Euler integrator
//! - Environment with seeded resets, termination tracking and rewards
//! - Episode rollout driver with simple policies
//! - Render primitives for tank level displays

pub mod dynamics;
pub mod env;
pub mod error;
pub mod integrator;
pub mod model;
pub mod params;
pub mod render;
pub mod rollout;
pub mod spaces;
pub mod termination;

// Re-exports for public API
pub use dynamics::{Flows, Levels, QuadTankModel};
pub use env::{Action, Observation, QuadTankEnv, Step, StepInfo};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator};
pub use model::TransientModel;
pub use params::TankParams;
pub use rollout::{
    ConstantPolicy, EpisodeRecord, Policy, RandomPolicy, RolloutOptions, ZeroPolicy, run_batch,
    run_episode,
};
pub use spaces::BoxSpace;
pub use termination::Termination;
