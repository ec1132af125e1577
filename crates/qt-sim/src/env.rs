//! Step/reset environment around the quadruple-tank model.
//!
//! The environment owns everything an episode needs: parameters, the level state,
//! a seeded sampler for initial levels and the termination tracker. Instances share
//! nothing, so separate instances can run on separate threads.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use crate::dynamics::{Flows, Levels, QuadTankModel};
use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator};
use crate::params::TankParams;
use crate::spaces::BoxSpace;
use crate::termination::{Termination, crossed_boundary};

/// Initial levels are drawn uniformly from this closed interval (cm).
pub const INIT_LEVEL_LOW: f64 = 2.0;
pub const INIT_LEVEL_HIGH: f64 = 18.0;

/// Scaled levels `kc * h` as reported to the caller.
pub type Observation = [f64; 4];

/// Pump control signals.
pub type Action = Flows;

/// Static description of the integration scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    pub method: &'static str,
    pub step: f64,
}

/// Result of one call to [`QuadTankEnv::step`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Seed drawn from the thread-local entropy source.
pub fn fresh_seed() -> u64 {
    rand::random::<u64>()
}

/// Quadruple-tank simulator.
#[derive(Debug, Clone)]
pub struct QuadTankEnv {
    model: QuadTankModel,
    integrator: ForwardEuler,
    rng: ChaCha8Rng,
    seed: u64,
    state: Option<Levels>,
    termination: Termination,
    t: f64,
    info: StepInfo,
}

impl QuadTankEnv {
    /// Create an environment seeded from entropy.
    pub fn new(params: TankParams) -> SimResult<Self> {
        Self::with_seed(params, fresh_seed())
    }

    /// Create an environment with a fixed seed.
    pub fn with_seed(params: TankParams, seed: u64) -> SimResult<Self> {
        params.validate()?;
        let integrator = ForwardEuler;
        let info = StepInfo {
            method: integrator.name(),
            step: params.dt,
        };
        Ok(Self {
            model: QuadTankModel::new(params),
            integrator,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            state: None,
            termination: Termination::Running,
            t: 0.0,
            info,
        })
    }

    /// Re-seed the initial-level sampler and return the seed in effect.
    ///
    /// `None` draws a fresh seed from entropy.
    pub fn seed(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(fresh_seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
        debug!(seed, "environment seeded");
        seed
    }

    /// Start a new episode from random levels in `[2, 18]` cm.
    pub fn reset(&mut self) -> Observation {
        let levels: Levels =
            std::array::from_fn(|_| self.rng.random_range(INIT_LEVEL_LOW..=INIT_LEVEL_HIGH));
        self.state = Some(levels);
        self.termination = Termination::Running;
        self.t = 0.0;
        debug!(?levels, "environment reset");
        self.observe(&levels)
    }

    /// Apply pump signals for one integration step.
    ///
    /// Actions are not validated against [`Self::action_space`]. Stepping after `done`
    /// is allowed: the levels keep evolving, and every step that still ends outside the
    /// envelope earns zero until `reset`.
    pub fn step(&mut self, action: Action) -> SimResult<Step> {
        let levels = self.state.ok_or(SimError::NotInitialized)?;
        let dt = self.model.params().dt;

        self.model.set_input(action);
        let next = self
            .integrator
            .step(&mut self.model, self.t, &levels, dt)?;
        self.state = Some(next);
        self.t += dt;

        let done = crossed_boundary(&next, self.model.params().h_max);
        let reward = self.termination.record(done);

        Ok(Step {
            observation: self.observe(&next),
            reward,
            done,
            info: self.info.clone(),
        })
    }

    /// Integration method and step size; identical on every call.
    pub fn info(&self) -> StepInfo {
        self.info.clone()
    }

    /// Seed currently driving the initial-level sampler.
    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    /// Unscaled levels, `None` before the first reset.
    pub fn state(&self) -> Option<&Levels> {
        self.state.as_ref()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Simulated time since the last reset (seconds).
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn params(&self) -> &TankParams {
        self.model.params()
    }

    pub fn model(&self) -> &QuadTankModel {
        &self.model
    }

    /// `[0, h_max / kc]^4`
    pub fn observation_space(&self) -> BoxSpace<4> {
        BoxSpace::splat(0.0, self.params().observation_high())
    }

    /// `[0, q_max / k]^2` with q_max in cm³/s.
    pub fn action_space(&self) -> BoxSpace<2> {
        BoxSpace::splat(0.0, self.params().action_high())
    }

    fn observe(&self, levels: &Levels) -> Observation {
        let kc = self.model.params().kc;
        levels.map(|h| kc * h)
    }
}
