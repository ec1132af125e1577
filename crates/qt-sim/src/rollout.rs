//! Episode driver and result recording.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::env::{Action, Observation, QuadTankEnv};
use crate::error::{SimError, SimResult};
use crate::params::TankParams;
use crate::spaces::BoxSpace;

/// Maps the latest observation to the next pump command.
pub trait Policy {
    fn act(&mut self, observation: &Observation) -> Action;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn act(&mut self, observation: &Observation) -> Action {
        (**self).act(observation)
    }
}

/// Both pumps off.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroPolicy;

impl Policy for ZeroPolicy {
    fn act(&mut self, _observation: &Observation) -> Action {
        [0.0, 0.0]
    }
}

/// Same command every step.
#[derive(Clone, Copy, Debug)]
pub struct ConstantPolicy(pub Action);

impl Policy for ConstantPolicy {
    fn act(&mut self, _observation: &Observation) -> Action {
        self.0
    }
}

/// Uniform samples from an action space, with its own seeded generator.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    space: BoxSpace<2>,
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(space: BoxSpace<2>, seed: u64) -> Self {
        Self {
            space,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &Observation) -> Action {
        self.space.sample(&mut self.rng)
    }
}

/// Options for episode runs.
#[derive(Clone, Debug)]
pub struct RolloutOptions {
    /// Maximum number of steps per episode (safety limit)
    pub max_steps: usize,
    /// Record every N-th observation (decimation)
    pub record_every: usize,
}

impl Default for RolloutOptions {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            record_every: 1,
        }
    }
}

impl RolloutOptions {
    fn validate(&self) -> SimResult<()> {
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// Record of one episode.
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeRecord {
    /// Seed the episode's initial levels were drawn with
    pub seed: u64,
    /// Time points of the recorded observations (seconds)
    pub t: Vec<f64>,
    /// Observation snapshots, starting with the reset observation
    pub observations: Vec<Observation>,
    /// Reward of every step taken
    pub rewards: Vec<f64>,
    /// Number of steps taken
    pub steps: usize,
    /// Whether the episode ended on a boundary crossing
    pub terminated: bool,
}

impl EpisodeRecord {
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    pub fn final_observation(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

/// Reset the environment and step it until done or `max_steps`.
pub fn run_episode<P: Policy + ?Sized>(
    env: &mut QuadTankEnv,
    policy: &mut P,
    opts: &RolloutOptions,
) -> SimResult<EpisodeRecord> {
    opts.validate()?;

    let mut observation = env.reset();
    let mut t_record = vec![env.time()];
    let mut obs_record = vec![observation];
    let mut rewards = Vec::new();
    let mut terminated = false;

    let mut step = 0;
    while step < opts.max_steps {
        let action = policy.act(&observation);
        let outcome = env.step(action)?;
        observation = outcome.observation;
        rewards.push(outcome.reward);
        step += 1;

        if step % opts.record_every == 0 {
            t_record.push(env.time());
            obs_record.push(observation);
        }

        if outcome.done {
            terminated = true;
            debug!(step, seed = env.current_seed(), "episode terminated");
            break;
        }
    }

    // Always record final state
    if step % opts.record_every != 0 {
        t_record.push(env.time());
        obs_record.push(observation);
    }

    Ok(EpisodeRecord {
        seed: env.current_seed(),
        t: t_record,
        observations: obs_record,
        rewards,
        steps: step,
        terminated,
    })
}

/// Run one independent episode per seed in parallel.
///
/// Each episode gets its own environment and its own policy from `make_policy`.
pub fn run_batch<P, F>(
    params: &TankParams,
    seeds: &[u64],
    make_policy: F,
    opts: &RolloutOptions,
) -> SimResult<Vec<EpisodeRecord>>
where
    P: Policy,
    F: Fn(u64) -> P + Sync,
{
    opts.validate()?;
    seeds
        .par_iter()
        .map(|&seed| {
            let mut env = QuadTankEnv::with_seed(params.clone(), seed)?;
            let mut policy = make_policy(seed);
            run_episode(&mut env, &mut policy, opts)
        })
        .collect()
}
