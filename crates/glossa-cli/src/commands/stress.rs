//! `glossa stress` -- exercise the worker pool with a simulated backend.
//!
//! Many caller threads dispatch requests drawn at random from a small set
//! of configurations. The report shows how often a warm worker was reused
//! versus reconfigured, and confirms every caller finished.
//!
//! # Examples
//!
//! ```text
//! glossa stress --callers 16 --requests 400 --configs 3
//! glossa stress --workers 4 --latency-ms 0
//! ```

use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use clap::Args;
use rand::Rng;
use serde::Serialize;

use glossa_pool::{DispatcherStats, RecognitionBackend, WorkerPoolDispatcher};
use glossa_types::config::{Config, PoolConfig};
use glossa_types::{RecognitionConfig, RecognitionOutcome, RecognitionRequest, Result};

/// Arguments for the `stress` subcommand.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Concurrent caller threads.
    #[arg(long, default_value = "8")]
    pub callers: usize,

    /// Total requests across all callers.
    #[arg(long, default_value = "200")]
    pub requests: usize,

    /// Number of distinct request configurations.
    #[arg(long, default_value = "3")]
    pub configs: usize,

    /// Worker count (overrides `pool.threads`).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Simulated batch latency; configuring costs five times as much.
    #[arg(long, default_value = "1")]
    pub latency_ms: u64,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Backend that sleeps instead of recognizing.
#[derive(Debug)]
struct SimulatedBackend {
    latency: Duration,
}

impl RecognitionBackend for SimulatedBackend {
    fn configure(&mut self, _config: &RecognitionConfig) -> Result<()> {
        thread::sleep(self.latency * 5);
        Ok(())
    }

    fn recognize_batch(&mut self, request: &RecognitionRequest) -> Result<RecognitionOutcome> {
        thread::sleep(self.latency);
        Ok(RecognitionOutcome {
            words: request.config.words.iter().take(1).cloned().collect(),
        })
    }
}

/// Result of a stress run.
#[derive(Debug, Serialize)]
pub struct StressReport {
    pub callers: usize,
    pub completed: usize,
    pub errors: usize,
    pub elapsed_ms: u128,
    pub dispatcher: DispatcherStats,
}

fn vocabulary(index: usize) -> RecognitionConfig {
    RecognitionConfig::new(
        "el",
        vec![format!("λέξη{index}"), "ναι".into(), "όχι".into()],
        Vec::new(),
        Vec::new(),
    )
}

/// `(ok, failed)` of one caller. A caller that panicked failed its whole share.
fn join_caller(share: usize, handle: ScopedJoinHandle<'_, (usize, usize)>) -> (usize, usize) {
    handle.join().unwrap_or_else(|_| {
        tracing::error!(share, "caller thread panicked");
        (0, share)
    })
}

/// Drive a simulated pool and collect the report.
pub fn run(args: &StressArgs, config: &Config) -> anyhow::Result<StressReport> {
    if args.callers == 0 || args.configs == 0 {
        anyhow::bail!("--callers and --configs must be at least 1");
    }

    let pool_config = PoolConfig {
        threads: args.workers.unwrap_or(config.pool.threads),
        ..config.pool.clone()
    };
    let latency = Duration::from_millis(args.latency_ms);
    let workers = (0..pool_config.threads)
        .map(|_| SimulatedBackend { latency })
        .collect();
    let dispatcher = WorkerPoolDispatcher::with_preconfiguration(workers, &pool_config)?;
    let configs: Vec<RecognitionConfig> = (0..args.configs).map(vocabulary).collect();

    tracing::info!(
        callers = args.callers,
        requests = args.requests,
        workers = dispatcher.size(),
        "starting stress run"
    );
    let started = Instant::now();

    let per_caller: Vec<(usize, usize)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..args.callers)
            .map(|caller| {
                let dispatcher = &dispatcher;
                let configs = &configs;
                // Spread the remainder over the first callers.
                let share = args.requests / args.callers
                    + usize::from(caller < args.requests % args.callers);
                let handle = scope.spawn(move || {
                    let mut rng = rand::thread_rng();
                    let (mut ok, mut failed) = (0, 0);
                    for _ in 0..share {
                        let cfg = configs[rng.gen_range(0..configs.len())].clone();
                        let request = RecognitionRequest::new(cfg, "/dev/null");
                        match dispatcher.dispatch(&request) {
                            Ok(_) => ok += 1,
                            Err(e) => {
                                tracing::warn!(caller, error = %e, "dispatch failed");
                                failed += 1;
                            }
                        }
                    }
                    (ok, failed)
                });
                (share, handle)
            })
            .collect();
        handles
            .into_iter()
            .map(|(share, handle)| join_caller(share, handle))
            .collect()
    });

    Ok(StressReport {
        callers: args.callers,
        completed: per_caller.iter().map(|(ok, _)| ok).sum(),
        errors: per_caller.iter().map(|(_, failed)| failed).sum(),
        elapsed_ms: started.elapsed().as_millis(),
        dispatcher: dispatcher.stats(),
    })
}
