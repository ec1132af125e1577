//! Episode driver: single episodes and parallel batches.

use qt_sim::{
    ConstantPolicy, QuadTankEnv, RandomPolicy, RolloutOptions, TankParams, ZeroPolicy, run_batch,
    run_episode,
};

#[test]
fn full_flow_episode_stops_at_termination() {
    let mut env = QuadTankEnv::with_seed(TankParams::default(), 1).unwrap();
    let high = env.action_space().high;
    let record = run_episode(&mut env, &mut ConstantPolicy(high), &RolloutOptions::default())
        .expect("episode runs");

    assert!(record.terminated);
    assert!(record.steps < 1000);
    assert_eq!(record.rewards.len(), record.steps);
    // Every step up to and including the terminating one is rewarded.
    assert!(record.rewards.iter().all(|&r| r == 1.0));
    assert_eq!(record.total_reward(), record.steps as f64);
    assert_eq!(record.observations.len(), record.steps + 1);
    assert_eq!(record.seed, 1);
}

#[test]
fn zero_policy_runs_to_step_limit() {
    let mut env = QuadTankEnv::with_seed(TankParams::default(), 42).unwrap();
    let opts = RolloutOptions {
        max_steps: 50,
        record_every: 10,
    };
    let record = run_episode(&mut env, &mut ZeroPolicy, &opts).unwrap();
    assert!(!record.terminated);
    assert_eq!(record.steps, 50);
    assert_eq!(record.t.len(), 6);
    assert!((record.t[5] - 5.0).abs() < 1e-9);
}

#[test]
fn batch_matches_sequential_runs() {
    let params = TankParams::default();
    let seeds = [3_u64, 5, 8, 13];
    let opts = RolloutOptions {
        max_steps: 200,
        record_every: 1,
    };

    let space = QuadTankEnv::with_seed(params.clone(), 0)
        .unwrap()
        .action_space();
    let batch = run_batch(&params, &seeds, |seed| RandomPolicy::new(space, seed), &opts).unwrap();
    assert_eq!(batch.len(), seeds.len());

    for (record, &seed) in batch.iter().zip(seeds.iter()) {
        let mut env = QuadTankEnv::with_seed(params.clone(), seed).unwrap();
        let mut policy = RandomPolicy::new(space, seed);
        let sequential = run_episode(&mut env, &mut policy, &opts).unwrap();

        assert_eq!(record.seed, seed);
        assert_eq!(record.steps, sequential.steps);
        assert_eq!(record.observations, sequential.observations);
        assert_eq!(record.rewards, sequential.rewards);
    }
}

#[test]
fn batch_rejects_invalid_params() {
    let params = TankParams {
        dt: -0.1,
        ..TankParams::default()
    };
    let result = run_batch(&params, &[1, 2], |_| ZeroPolicy, &RolloutOptions::default());
    assert!(result.is_err());
}
