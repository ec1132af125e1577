use clap::{Parser, Subcommand, ValueEnum};
use qt_sim::env::fresh_seed;
use qt_sim::render::text_gauges;
use qt_sim::{
    BoxSpace, ConstantPolicy, EpisodeRecord, Levels, Observation, Policy, QuadTankEnv, RandomPolicy, RolloutOptions,
    SimResult, StepInfo, TankParams, ZeroPolicy, run_batch, run_episode,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "qt-cli")]
#[command(about = "QuadTank CLI - Quadruple-tank process simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print parameters, spaces and step metadata
    Info {
        /// Parameter file (YAML or JSON); defaults to the lab rig
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run episodes with a fixed policy
    Rollout {
        /// Parameter file (YAML or JSON); defaults to the lab rig
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seed of the first episode; later episodes use seed+1, seed+2, ...
        #[arg(long)]
        seed: Option<u64>,
        /// Number of independent episodes
        #[arg(long, default_value_t = 1)]
        episodes: usize,
        /// Step limit per episode
        #[arg(long, default_value_t = 1000)]
        max_steps: usize,
        /// Pump command policy
        #[arg(long, value_enum, default_value = "random")]
        policy: PolicyKind,
        /// Print tank level gauges during a single episode
        #[arg(long)]
        render: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    /// Both pumps off
    Zero,
    /// Both pumps at capacity
    Max,
    /// Uniform samples from the action space
    Random,
}

#[derive(Serialize)]
struct SpaceReport {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl<const N: usize> From<BoxSpace<N>> for SpaceReport {
    fn from(space: BoxSpace<N>) -> Self {
        Self {
            low: space.low.to_vec(),
            high: space.high.to_vec(),
        }
    }
}

#[derive(Serialize)]
struct InfoReport {
    params: TankParams,
    observation_space: SpaceReport,
    action_space: SpaceReport,
    metadata: StepInfo,
}

fn main() -> SimResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { config } => cmd_info(config.as_deref()),
        Commands::Rollout {
            config,
            seed,
            episodes,
            max_steps,
            policy,
            render,
        } => cmd_rollout(
            config.as_deref(),
            seed,
            episodes,
            max_steps,
            policy,
            render,
        ),
    }
}

fn load_params(config: Option<&Path>) -> SimResult<TankParams> {
    match config {
        Some(path) => {
            info!(path = %path.display(), "loading parameters");
            TankParams::load(path)
        }
        None => Ok(TankParams::default()),
    }
}

fn make_policy(kind: PolicyKind, space: BoxSpace<2>, seed: u64) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Zero => Box::new(ZeroPolicy),
        PolicyKind::Max => Box::new(ConstantPolicy(space.high)),
        // Offset so action draws are not correlated with the initial levels.
        PolicyKind::Random => Box::new(RandomPolicy::new(space, seed.wrapping_add(1))),
    }
}

fn cmd_info(config: Option<&Path>) -> SimResult<()> {
    let params = load_params(config)?;
    let env = QuadTankEnv::with_seed(params.clone(), 0)?;
    let report = InfoReport {
        observation_space: env.observation_space().into(),
        action_space: env.action_space().into(),
        metadata: env.info(),
        params,
    };
    print!("{}", serde_yaml::to_string(&report)?);
    Ok(())
}

fn cmd_rollout(
    config: Option<&Path>,
    seed: Option<u64>,
    episodes: usize,
    max_steps: usize,
    policy: PolicyKind,
    render: bool,
) -> SimResult<()> {
    let params = load_params(config)?;
    let base_seed = seed.unwrap_or_else(fresh_seed);
    let start = Instant::now();

    if episodes <= 1 {
        let mut env = QuadTankEnv::with_seed(params, base_seed)?;
        println!("{:?}", env.info());
        let opts = RolloutOptions {
            max_steps,
            record_every: if render { 10 } else { 1 },
        };
        let mut actor = make_policy(policy, env.action_space(), base_seed);
        let record = run_episode(&mut env, &mut actor, &opts)?;

        println!("initial observation: {:?}", record.observations[0]);
        if render {
            let params = env.params();
            for (t, obs) in record.t.iter().zip(record.observations.iter()) {
                let levels = levels_from_observation(obs, params.kc);
                println!("t = {t:.1} s\n{}\n", text_gauges(&levels, params.h_max, 40));
            }
        }
        print_summary(0, &record);
    } else {
        let space = QuadTankEnv::with_seed(params.clone(), base_seed)?.action_space();
        let seeds: Vec<u64> = (0..episodes as u64)
            .map(|i| base_seed.wrapping_add(i))
            .collect();
        let opts = RolloutOptions {
            max_steps,
            record_every: max_steps,
        };
        let records = run_batch(
            &params,
            &seeds,
            |seed| make_policy(policy, space, seed),
            &opts,
        )?;
        for (i, record) in records.iter().enumerate() {
            print_summary(i, record);
        }
        let terminated = records.iter().filter(|r| r.terminated).count();
        println!("{terminated}/{episodes} episodes terminated");
    }

    info!(
        elapsed_s = start.elapsed().as_secs_f64(),
        episodes, "rollout complete"
    );
    Ok(())
}

/// Gauges show tank levels in cm, so undo the sensor gain.
fn levels_from_observation(observation: &Observation, kc: f64) -> Levels {
    observation.map(|y| y / kc)
}

fn print_summary(index: usize, record: &EpisodeRecord) {
    if record.terminated {
        println!(
            "Episode {} (seed {}) finished after {} timesteps, total reward {:.1}",
            index + 1,
            record.seed,
            record.steps,
            record.total_reward()
        );
    } else {
        println!(
            "Episode {} (seed {}) reached the {}-step limit, total reward {:.1}",
            index + 1,
            record.seed,
            record.steps,
            record.total_reward()
        );
    }
}
